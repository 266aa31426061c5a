//! Template environment.
//!
//! All pages are [`minijinja`] templates compiled into the binary and
//! registered once at startup. Handlers hand over a template name and a
//! `minijinja::context!` of variables; what the engine does with them is its
//! own business.

use minijinja::Environment;
use serde::Serialize;

use crate::error::Error;

const PAGES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("movies.html", include_str!("../templates/movies.html")),
    ("form.html", include_str!("../templates/form.html")),
    ("form_2.html", include_str!("../templates/form_2.html")),
    ("greet.html", include_str!("../templates/greet.html")),
    ("greet_2.html", include_str!("../templates/greet_2.html")),
    ("lucky.html", include_str!("../templates/lucky.html")),
    ("spell_word.html", include_str!("../templates/spell_word.html")),
];

/// The rendering collaborator: template name in, HTML out.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, Error> {
        let mut env = Environment::new();
        for (name, source) in PAGES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render<C: Serialize>(&self, name: &str, ctx: C) -> Result<String, Error> {
        Ok(self.env.get_template(name)?.render(ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn every_page_is_registered() {
        let templates = Templates::new().expect("environment builds");
        for (name, _) in PAGES {
            assert!(
                templates.env.get_template(name).is_ok(),
                "missing template {name}"
            );
        }
    }

    #[test]
    fn renders_with_context() {
        let templates = Templates::new().expect("environment builds");
        let html = templates
            .render(
                "greet.html",
                context! { username => "ada", compliment => "clever" },
            )
            .expect("renders");
        assert!(html.contains("ada"));
        assert!(html.contains("clever"));
    }

    #[test]
    fn unknown_template_is_an_error() {
        let templates = Templates::new().expect("environment builds");
        assert!(templates.render("nope.html", context! {}).is_err());
    }
}
