//! # wren
//!
//! A small, self-contained web service for showing off the ordinary parts of
//! a web stack: routing with path parameters, query-string and form
//! extraction, template rendering, redirects, and flash notifications.
//! Nothing persists. Nothing scales. Everything is inspectable.
//!
//! ## The contract
//!
//! Every handler reads request values through one declarative contract
//! ([`extract`]): say where a parameter lives (path, query, or form), what
//! type it carries, and whether it is required. Resolution has exactly four
//! outcomes: a typed value, a configured default, a 400 for a required field
//! the client left out, or a 404 for a typed path segment that never really
//! matched. Lookups against the seeded reference tables ([`store`]) follow a
//! separate policy: an absent key is a soft miss that resolves to a fallback
//! chosen at the call site.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wren::{Request, Response, Router, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .get("/hello/{name}", hello);
//!
//!     Server::bind("0.0.0.0:3000")
//!         .serve(app, Arc::new(()))
//!         .await
//!         .unwrap();
//! }
//!
//! async fn hello(req: Request, _state: Arc<()>) -> Response {
//!     let name = req.param("name").unwrap_or("world");
//!     Response::text(format!("hello, {name}"))
//! }
//! ```
//!
//! The full demonstration surface lives in [`routes`] and runs as the `wren`
//! binary.

mod error;
mod flash;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod extract;
pub mod random;
pub mod render;
pub mod routes;
pub mod state;
pub mod store;

pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response};
pub use router::Router;
pub use server::Server;
pub use status::Status;
