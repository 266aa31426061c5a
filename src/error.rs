//! Unified error type.
//!
//! One enum covers everything a handler or the server can fail with. Each
//! variant maps to exactly one HTTP status, so handlers return
//! `Result<Response, Error>` and let `?` do the bookkeeping:
//!
//! - parameter resolution failures are client errors (400),
//! - an unparseable typed path segment is a routing-level non-match (404),
//! - rendering and serialization failures are server errors (500),
//! - io errors only surface from [`Server::serve`](crate::Server::serve)
//!   and never reach a client.

use thiserror::Error as ThisError;
use tracing::error;

use crate::response::{IntoResponse, Response};
use crate::status::Status;

#[derive(Debug, ThisError)]
pub enum Error {
    /// A required query or form field was absent from the request.
    #[error("missing required parameter `{name}`")]
    MissingParameter { name: &'static str },

    /// A field was present but not coercible to its declared kind.
    #[error("parameter `{name}` is not a valid {expected}")]
    InvalidParameter {
        name: &'static str,
        expected: &'static str,
    },

    /// A typed path segment did not parse. Treated like an unrouted path,
    /// not like bad client input on a matched route.
    #[error("no route for path segment `{name}`")]
    SegmentMismatch { name: &'static str },

    #[error("template: {0}")]
    Template(#[from] minijinja::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::MissingParameter { .. } | Error::InvalidParameter { .. } => Response::builder()
                .status(Status::BadRequest)
                .text(self.to_string()),
            Error::SegmentMismatch { .. } => Response::status(Status::NotFound),
            Error::Template(_) | Error::Json(_) | Error::Io(_) => {
                // Internal detail stays in the log, not in the response body.
                error!("internal error: {self}");
                Response::status(Status::InternalServerError)
            }
        }
    }
}
