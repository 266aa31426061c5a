//! The route surface.
//!
//! Every handler reads request values through the `extract` contract:
//! declare what a parameter is, where it lives, and whether it is required,
//! then resolve. Misses behave per policy: a required query/form field that
//! is absent is the client's error; an absent lookup-table key resolves to a
//! fallback chosen right here at the call site.

use std::sync::Arc;

use minijinja::context;
use tracing::info;

use crate::error::Error;
use crate::extract::{self, Kind, Source, Spec, Value};
use crate::flash::Flash;
use crate::random;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::state::State;
use crate::store::Insertion;

pub fn router() -> Router<State> {
    Router::new()
        .get("/", home)
        .get("/old-home-page", old_home)
        .get("/movies", movies_index)
        .post("/movies/new", movies_new)
        .get("/movies.json", movies_json)
        .get("/form", greeter_form)
        .get("/form-2", greeter_form_2)
        .get("/greet", greet)
        .get("/greet-2", greet_2)
        .get("/lucky", lucky)
        .get("/spell/{word}", spell)
        .get("/search", search)
        .get("/add-comment", comment_form)
        .post("/add-comment", comment_submit)
        .get("/user/{username}", user_profile)
        .get("/posts/{id}", post_detail)
        .get("/products/{category}/{product_id}", product_detail)
        .get("/shop/{toy}", toy_detail)
}

async fn home(_req: Request, state: Arc<State>) -> Result<Response, Error> {
    Ok(Response::html(state.templates.render("home.html", context! {})?))
}

/// The old bookmarkable address keeps working; it just points at the new one.
async fn old_home(_req: Request, _state: Arc<State>) -> Result<Response, Error> {
    Ok(Response::redirect("/"))
}

async fn movies_index(req: Request, state: Arc<State>) -> Result<Response, Error> {
    let flash = Flash::from_request(&req).map(|f| f.note());
    let body = state.templates.render(
        "movies.html",
        context! { movies => state.movies.snapshot(), flash },
    )?;
    Ok(Response::html(body))
}

/// Insert, then redirect to the listing so a refresh cannot resubmit the
/// form. The insertion outcome rides along as a flash.
async fn movies_new(req: Request, state: Arc<State>) -> Result<Response, Error> {
    let title = extract::resolve(&Spec::required("title", Source::Form, Kind::Str), &req)?;
    let title = title.as_str().unwrap_or_default().to_owned();

    let flash = match state.movies.insert(title.clone()) {
        Insertion::Created => {
            info!(%title, "movie added");
            Flash::Created(title)
        }
        Insertion::Duplicate => Flash::Duplicate(title),
    };

    Ok(Response::redirect(&format!("/movies?{}", flash.to_query())))
}

async fn movies_json(_req: Request, state: Arc<State>) -> Result<Response, Error> {
    Ok(Response::json(state.movies.to_json()?.into_bytes()))
}

async fn greeter_form(_req: Request, state: Arc<State>) -> Result<Response, Error> {
    Ok(Response::html(state.templates.render("form.html", context! {})?))
}

async fn greeter_form_2(_req: Request, state: Arc<State>) -> Result<Response, Error> {
    Ok(Response::html(state.templates.render("form_2.html", context! {})?))
}

async fn greet(req: Request, state: Arc<State>) -> Result<Response, Error> {
    let username = extract::resolve(&Spec::required("username", Source::Query, Kind::Str), &req)?;
    let compliment = random::choose(state.random.as_ref(), &state.compliments)
        .map(String::as_str)
        .unwrap_or("fine");

    let body = state.templates.render(
        "greet.html",
        context! { username => username.as_str(), compliment },
    )?;
    Ok(Response::html(body))
}

async fn greet_2(req: Request, state: Arc<State>) -> Result<Response, Error> {
    let params = extract::resolve_all(
        &[
            Spec::required("username", Source::Query, Kind::Str),
            Spec::optional("wants_compliments", Source::Query, Kind::Bool, Value::Null),
        ],
        &req,
    )?;

    let compliments: Vec<&str> = random::sample(state.random.as_ref(), &state.compliments, 3)
        .into_iter()
        .map(String::as_str)
        .collect();

    let body = state.templates.render(
        "greet_2.html",
        context! {
            username => params.str("username"),
            // An unchecked checkbox resolves to the null sentinel; the page
            // treats that as "no thanks".
            wants_compliments => params.bool("wants_compliments").unwrap_or(false),
            compliments,
        },
    )?;
    Ok(Response::html(body))
}

async fn lucky(_req: Request, state: Arc<State>) -> Result<Response, Error> {
    let lucky_num = random::roll(state.random.as_ref(), 1, 10);
    let body = state.templates.render(
        "lucky.html",
        context! { lucky_num, msg => "You are so lucky!!" },
    )?;
    Ok(Response::html(body))
}

async fn spell(req: Request, state: Arc<State>) -> Result<Response, Error> {
    let word = extract::resolve(&Spec::required("word", Source::Path, Kind::Str), &req)?;
    let word = word.as_str().unwrap_or_default().to_uppercase();
    let letters: Vec<String> = word.chars().map(|c| c.to_string()).collect();

    let body = state
        .templates
        .render("spell_word.html", context! { word, letters })?;
    Ok(Response::html(body))
}

async fn search(req: Request, _state: Arc<State>) -> Result<Response, Error> {
    let params = extract::resolve_all(
        &[
            Spec::required("term", Source::Query, Kind::Str),
            Spec::required("sort", Source::Query, Kind::Str),
        ],
        &req,
    )?;
    let term = params.str("term").unwrap_or_default();
    let sort = params.str("sort").unwrap_or_default();

    Ok(Response::html(format!(
        "<h1>Searching for {term}</h1> <p>Sorting by: {sort}</p>"
    )))
}

async fn comment_form(_req: Request, _state: Arc<State>) -> Result<Response, Error> {
    Ok(Response::html(
        r#"<form method="POST">
  <input type="text" placeholder="comment" name="comment">
  <input type="text" placeholder="username" name="username">
  <button>Submit</button>
</form>"#,
    ))
}

async fn comment_submit(req: Request, _state: Arc<State>) -> Result<Response, Error> {
    let params = extract::resolve_all(
        &[
            Spec::required("comment", Source::Form, Kind::Str),
            Spec::required("username", Source::Form, Kind::Str),
        ],
        &req,
    )?;
    let comment = params.str("comment").unwrap_or_default();
    let username = params.str("username").unwrap_or_default();

    Ok(Response::html(format!(
        "<h1>Saved your comment</h1>\n<ul>\n  <li>Username: {username}</li>\n  <li>Comment: {comment}</li>\n</ul>"
    )))
}

async fn user_profile(req: Request, state: Arc<State>) -> Result<Response, Error> {
    let username = extract::resolve(&Spec::required("username", Source::Path, Kind::Str), &req)?;
    let name = state
        .users
        .get_or(username.as_str().unwrap_or_default(), "Somebody unknown");

    Ok(Response::html(format!("<h1>Profile for {name}</h1>")))
}

async fn post_detail(req: Request, state: Arc<State>) -> Result<Response, Error> {
    // An unparseable id never reaches the lookup; it resolves as a 404.
    let id = extract::resolve(&Spec::required("id", Source::Path, Kind::Int), &req)?;
    let post = state
        .posts
        .get_or(&id.as_int().unwrap_or_default(), "Post not found");

    Ok(Response::html(format!("<p>{post}</p>")))
}

async fn product_detail(req: Request, _state: Arc<State>) -> Result<Response, Error> {
    let params = extract::resolve_all(
        &[
            Spec::required("category", Source::Path, Kind::Str),
            Spec::required("product_id", Source::Path, Kind::Int),
        ],
        &req,
    )?;
    let category = params.str("category").unwrap_or_default();
    let product_id = params.int("product_id").unwrap_or_default();

    Ok(Response::html(format!(
        "<h1>Viewing the product with id: {product_id} from the category: {category}</h1>"
    )))
}

async fn toy_detail(req: Request, _state: Arc<State>) -> Result<Response, Error> {
    let params = extract::resolve_all(
        &[
            Spec::required("toy", Source::Path, Kind::Str),
            Spec::optional("color", Source::Query, Kind::Str, Value::Null),
        ],
        &req,
    )?;
    let toy = params.str("toy").unwrap_or_default();
    let color = params.str("color").unwrap_or("none");

    Ok(Response::html(format!("<h1>{toy}</h1>Color: {color}")))
}
