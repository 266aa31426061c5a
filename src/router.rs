//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup via [`matchit`]. You
//! register a path, you get a handler. That is all.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;

/// The application router.
///
/// Build it once at startup; pass it to
/// [`Server::serve`](crate::Server::serve) together with the shared state.
/// Each registration returns `self` so routes chain naturally.
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
}

impl<S> Router<S> {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Register a GET handler. Path parameters use `{name}` syntax and are
    /// retrieved with `req.param("name")`:
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use wren::{Request, Response, Router};
    /// # async fn show_post(_: Request, _: Arc<()>) -> Response { Response::text("") }
    /// # async fn add_movie(_: Request, _: Arc<()>) -> Response { Response::text("") }
    /// Router::new()
    ///     .get("/posts/{id}", show_post)
    ///     .post("/movies/new", add_movie);
    /// ```
    pub fn get(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::Get, path, handler)
    }

    /// Register a POST handler.
    pub fn post(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::Post, path, handler)
    }

    /// Register a handler for an arbitrary method + path pair.
    ///
    /// # Panics
    ///
    /// Panics on a malformed or conflicting route pattern. Routes are
    /// registered at startup, so this is a programming error, not a runtime
    /// condition.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub(crate) fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler<S>, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

impl<S> Default for Router<S> {
    fn default() -> Self {
        Self::new()
    }
}
