//! Declarative request-parameter resolution.
//!
//! Every handler reads request values through the same contract: declare a
//! [`Spec`] per parameter (where it lives, what type it carries, whether it
//! is required), then [`resolve`] it against the request. The outcome is
//! always one of:
//!
//! - a typed [`Value`],
//! - the declared default, when the parameter is optional and absent,
//! - [`Error::MissingParameter`] when a required query/form field is absent,
//! - [`Error::InvalidParameter`] when a value is present but uncoercible,
//! - [`Error::SegmentMismatch`] when a typed path segment does not parse.
//!
//! The last one is deliberately distinct: the router binds path segments
//! before a handler runs, so a segment that fails integer coercion means the
//! request never really matched the route. It surfaces as 404, while bad
//! query/form input on a matched route surfaces as 400.

use std::collections::HashMap;

use crate::error::Error;
use crate::request::Request;

/// Where a parameter is carried in the request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Source {
    /// A named segment of the route pattern, bound by the router.
    Path,
    /// A key in the query string.
    Query,
    /// A key in a form-encoded request body.
    Form,
}

/// The semantic type a raw value coerces to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    Str,
    Int,
    Bool,
}

/// A resolved parameter value.
///
/// `Null` is the sentinel used as the default of optional parameters that
/// have no meaningful value when absent (an unchecked checkbox, an omitted
/// filter).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Str(String),
    Int(i64),
    Bool(bool),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Whether absence is a client error or resolves to a default.
#[derive(Clone, Debug, PartialEq)]
pub enum Requirement {
    /// Absence is a hard miss: the client sees a 400.
    Required,
    /// Absence resolves silently to the carried default. An optional spec
    /// always has its default by construction.
    Optional(Value),
}

/// The declared contract for one named parameter of one operation.
#[derive(Clone, Debug)]
pub struct Spec {
    pub name: &'static str,
    pub source: Source,
    pub kind: Kind,
    pub requirement: Requirement,
}

impl Spec {
    pub fn required(name: &'static str, source: Source, kind: Kind) -> Self {
        Self {
            name,
            source,
            kind,
            requirement: Requirement::Required,
        }
    }

    pub fn optional(name: &'static str, source: Source, kind: Kind, default: Value) -> Self {
        Self {
            name,
            source,
            kind,
            requirement: Requirement::Optional(default),
        }
    }
}

/// Resolves one spec against the request.
pub fn resolve(spec: &Spec, req: &Request) -> Result<Value, Error> {
    let raw = match spec.source {
        Source::Path => req.param(spec.name),
        Source::Query => req.query(spec.name),
        Source::Form => req.form(spec.name),
    };

    match raw {
        Some(raw) => coerce(spec, raw),
        // The router binds every declared segment before the handler runs,
        // so an absent path parameter is a route/handler mismatch, not
        // client input.
        None if spec.source == Source::Path => Err(Error::SegmentMismatch { name: spec.name }),
        None => match &spec.requirement {
            Requirement::Required => Err(Error::MissingParameter { name: spec.name }),
            Requirement::Optional(default) => Ok(default.clone()),
        },
    }
}

/// Resolves each spec in order, failing fast on the first error.
///
/// No partial results: either every declared parameter resolves or the caller
/// gets the first failure.
pub fn resolve_all(specs: &[Spec], req: &Request) -> Result<Resolved, Error> {
    let mut values = HashMap::with_capacity(specs.len());
    for spec in specs {
        values.insert(spec.name, resolve(spec, req)?);
    }
    Ok(Resolved { values })
}

fn coerce(spec: &Spec, raw: &str) -> Result<Value, Error> {
    match spec.kind {
        Kind::Str => Ok(Value::Str(raw.to_owned())),
        Kind::Int => match raw.parse::<i64>() {
            Ok(n) => Ok(Value::Int(n)),
            Err(_) if spec.source == Source::Path => {
                Err(Error::SegmentMismatch { name: spec.name })
            }
            Err(_) => Err(Error::InvalidParameter {
                name: spec.name,
                expected: "integer",
            }),
        },
        Kind::Bool => match raw.to_ascii_lowercase().as_str() {
            "true" | "on" | "1" | "yes" => Ok(Value::Bool(true)),
            "false" | "off" | "0" | "no" => Ok(Value::Bool(false)),
            _ => Err(Error::InvalidParameter {
                name: spec.name,
                expected: "boolean",
            }),
        },
    }
}

/// The value bundle for one operation: exactly the declared names, each
/// resolved.
#[derive(Debug)]
pub struct Resolved {
    values: HashMap<&'static str, Value>,
}

impl Resolved {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// String value for `name`; `None` for `Null`, undeclared, or non-string.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::Method;
    use bytes::Bytes;
    use http::HeaderMap;

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

    fn get_with_params(target: &str, params: &[(&str, &str)]) -> Request {
        let uri: http::Uri = target.parse().expect("uri");
        let params = params
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Request::new(Method::Get, &uri, HeaderMap::new(), Bytes::new(), params)
    }

    fn form(body: &str) -> Request {
        let uri: http::Uri = "/submit".parse().expect("uri");
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        Request::new(
            Method::Post,
            &uri,
            headers,
            Bytes::from(body.as_bytes().to_vec()),
            HashMap::new(),
        )
    }

    #[test]
    fn required_query_present_resolves() {
        let spec = Spec::required("username", Source::Query, Kind::Str);
        let value = resolve(&spec, &get("/greet?username=ada")).expect("resolves");
        assert_eq!(value, Value::Str("ada".to_owned()));
    }

    #[test]
    fn required_query_absent_is_a_hard_miss() {
        let spec = Spec::required("username", Source::Query, Kind::Str);
        let err = resolve(&spec, &get("/greet")).expect_err("must fail");
        assert!(matches!(err, Error::MissingParameter { name: "username" }));
    }

    #[test]
    fn optional_query_absent_yields_exactly_the_default() {
        let null = Spec::optional("wants_compliments", Source::Query, Kind::Bool, Value::Null);
        assert_eq!(resolve(&null, &get("/greet-2?username=ada")).expect("ok"), Value::Null);

        let with_default = Spec::optional(
            "sort",
            Source::Query,
            Kind::Str,
            Value::Str("new".to_owned()),
        );
        assert_eq!(
            resolve(&with_default, &get("/search")).expect("ok"),
            Value::Str("new".to_owned())
        );
    }

    #[test]
    fn optional_query_present_ignores_the_default() {
        let spec = Spec::optional("wants_compliments", Source::Query, Kind::Bool, Value::Null);
        let value = resolve(&spec, &get("/greet-2?wants_compliments=on")).expect("ok");
        assert_eq!(value, Value::Bool(true));
    }

    #[test]
    fn required_form_field_is_a_hard_miss_when_absent() {
        let spec = Spec::required("title", Source::Form, Kind::Str);
        let err = resolve(&spec, &form("other=x")).expect_err("must fail");
        assert!(matches!(err, Error::MissingParameter { name: "title" }));
        assert_eq!(
            resolve(&spec, &form("title=Alien")).expect("ok"),
            Value::Str("Alien".to_owned())
        );
    }

    #[test]
    fn integer_coercion() {
        let spec = Spec::required("page", Source::Query, Kind::Int);
        assert_eq!(resolve(&spec, &get("/x?page=42")).expect("ok"), Value::Int(42));
        assert_eq!(resolve(&spec, &get("/x?page=-3")).expect("ok"), Value::Int(-3));

        let err = resolve(&spec, &get("/x?page=lots")).expect_err("must fail");
        assert!(matches!(
            err,
            Error::InvalidParameter { name: "page", expected: "integer" }
        ));
    }

    #[test]
    fn boolean_coercion() {
        let spec = Spec::required("flag", Source::Query, Kind::Bool);
        for raw in ["true", "on", "1", "yes", "YES", "On"] {
            let value = resolve(&spec, &get(&format!("/x?flag={raw}"))).expect("ok");
            assert_eq!(value, Value::Bool(true), "raw: {raw}");
        }
        for raw in ["false", "off", "0", "no"] {
            let value = resolve(&spec, &get(&format!("/x?flag={raw}"))).expect("ok");
            assert_eq!(value, Value::Bool(false), "raw: {raw}");
        }
        let err = resolve(&spec, &get("/x?flag=banana")).expect_err("must fail");
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }

    #[test]
    fn path_segment_resolves_without_a_failure_path() {
        let spec = Spec::required("id", Source::Path, Kind::Int);
        let req = get_with_params("/posts/3", &[("id", "3")]);
        assert_eq!(resolve(&spec, &req).expect("ok"), Value::Int(3));
    }

    #[test]
    fn unparseable_path_segment_is_a_non_match() {
        let spec = Spec::required("id", Source::Path, Kind::Int);
        let req = get_with_params("/posts/abc", &[("id", "abc")]);
        let err = resolve(&spec, &req).expect_err("must fail");
        assert!(matches!(err, Error::SegmentMismatch { name: "id" }));
    }

    #[test]
    fn resolve_all_fails_fast_in_declaration_order() {
        let specs = [
            Spec::required("term", Source::Query, Kind::Str),
            Spec::required("sort", Source::Query, Kind::Str),
        ];
        let err = resolve_all(&specs, &get("/search")).expect_err("must fail");
        assert!(matches!(err, Error::MissingParameter { name: "term" }));

        let err = resolve_all(&specs, &get("/search?term=fun")).expect_err("must fail");
        assert!(matches!(err, Error::MissingParameter { name: "sort" }));
    }

    #[test]
    fn resolve_all_covers_exactly_the_declared_names() {
        let specs = [
            Spec::required("term", Source::Query, Kind::Str),
            Spec::optional("color", Source::Query, Kind::Str, Value::Null),
        ];
        let resolved = resolve_all(&specs, &get("/search?term=fun&extra=1")).expect("ok");
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved.str("term"), Some("fun"));
        assert!(resolved.get("color").expect("declared").is_null());
        assert!(resolved.get("extra").is_none());
    }
}
