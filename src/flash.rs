//! One-shot notifications across the POST-then-redirect boundary.
//!
//! A mutation reports its outcome on the page the client is redirected to.
//! There is no session layer here, so the notification rides the redirect's
//! query string and the listing page decodes it. Absent or mangled flash
//! parameters degrade to "no notification", never an error.

use serde::Serialize;

use crate::request::{urlencode, Request};

/// The outcome of a title insertion, carried to the next page.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Flash {
    Created(String),
    Duplicate(String),
}

/// Template-facing form of a [`Flash`].
#[derive(Serialize)]
pub struct Note {
    pub kind: &'static str,
    pub text: String,
}

impl Flash {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::Duplicate(_) => "duplicate",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Created(title) | Self::Duplicate(title) => title,
        }
    }

    /// Query-string form, ready to append to a redirect location.
    pub fn to_query(&self) -> String {
        format!("flash={}&title={}", self.kind(), urlencode(self.title()))
    }

    /// Decodes a flash from the request's query string, if one is present
    /// and well-formed.
    pub fn from_request(req: &Request) -> Option<Self> {
        let title = req.query("title")?.to_owned();
        match req.query("flash")? {
            "created" => Some(Self::Created(title)),
            "duplicate" => Some(Self::Duplicate(title)),
            _ => None,
        }
    }

    pub fn note(&self) -> Note {
        let text = match self {
            Self::Created(title) => format!("Added \"{title}\"."),
            Self::Duplicate(title) => format!("\"{title}\" is already on the list."),
        };
        Note {
            kind: self.kind(),
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::Method;
    use bytes::Bytes;
    use http::HeaderMap;
    use std::collections::HashMap;

    fn get(target: &str) -> Request {
        let uri: http::Uri = target.parse().expect("uri");
        Request::new(
            Method::Get,
            &uri,
            HeaderMap::new(),
            Bytes::new(),
            HashMap::new(),
        )
    }

    #[test]
    fn survives_the_redirect_query_string() {
        let flash = Flash::Created("Dances With Wolves".to_owned());
        let req = get(&format!("/movies?{}", flash.to_query()));
        assert_eq!(Flash::from_request(&req), Some(flash));
    }

    #[test]
    fn absent_or_mangled_parameters_mean_no_notification() {
        assert_eq!(Flash::from_request(&get("/movies")), None);
        assert_eq!(Flash::from_request(&get("/movies?flash=created")), None);
        assert_eq!(
            Flash::from_request(&get("/movies?flash=exploded&title=Alien")),
            None
        );
    }

    #[test]
    fn notes_name_the_title() {
        let note = Flash::Duplicate("Amadeus".to_owned()).note();
        assert_eq!(note.kind, "duplicate");
        assert!(note.text.contains("Amadeus"));
    }
}
