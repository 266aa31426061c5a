//! Incoming HTTP request type.
//!
//! A request carries values from three places and keeps them separate,
//! because they answer to different contracts:
//!
//! - **path parameters**, bound by the router before the handler runs,
//! - **query parameters**, decoded from the query string,
//! - **form parameters**, decoded from an
//!   `application/x-www-form-urlencoded` body.
//!
//! Query and form pairs are decoded once at construction. Lookups return the
//! first occurrence of a name; repeated names keep their order in
//! [`query_pairs`](Request::query_pairs) / [`form_pairs`](Request::form_pairs).

use std::collections::HashMap;

use bytes::Bytes;
use http::HeaderMap;

use crate::method::Method;

/// An incoming HTTP request, parsed and ready for a handler.
pub struct Request {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Bytes,
    params: HashMap<String, String>,
    query: Vec<(String, String)>,
    form: Vec<(String, String)>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        uri: &http::Uri,
        headers: HeaderMap,
        body: Bytes,
        params: HashMap<String, String>,
    ) -> Self {
        let query = uri.query().map(parse_pairs).unwrap_or_default();
        let form = if is_form_encoded(&headers) {
            parse_pairs(&String::from_utf8_lossy(&body))
        } else {
            Vec::new()
        };
        Self {
            method,
            path: uri.path().to_owned(),
            headers,
            body,
            params,
            query,
            form,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Case-insensitive header lookup. Non-UTF-8 values read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns
    /// `Some("42")`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// First query-string value for `name`, decoded.
    pub fn query(&self, name: &str) -> Option<&str> {
        first(&self.query, name)
    }

    /// First form-body value for `name`, decoded. Empty unless the request
    /// carried a form-encoded body.
    pub fn form(&self, name: &str) -> Option<&str> {
        first(&self.form, name)
    }

    /// All decoded query pairs, in request order.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// All decoded form pairs, in request order.
    pub fn form_pairs(&self) -> &[(String, String)] {
        &self.form
    }
}

fn first<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

fn is_form_encoded(headers: &HeaderMap) -> bool {
    headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"))
}

/// Splits `a=1&b=2` into decoded pairs. A key with no `=` keeps an empty value.
fn parse_pairs(input: &str) -> Vec<(String, String)> {
    input
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (urldecode(k), urldecode(v)),
            None => (urldecode(pair), String::new()),
        })
        .collect()
}

/// Decodes `+` as space and `%XX` escapes. Malformed escapes pass through
/// literally; invalid UTF-8 is replaced rather than rejected.
pub(crate) fn urldecode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => match hex_pair(bytes[i + 1], bytes[i + 2]) {
                Some(b) => {
                    out.push(b);
                    i += 3;
                }
                None => {
                    out.push(b'%');
                    i += 1;
                }
            },
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
pub(crate) fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for &b in s.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char);
            }
            _ => {
                out.push('%');
                out.push_str(&format!("{b:02X}"));
            }
        }
    }
    out
}

fn hex_pair(hi: u8, lo: u8) -> Option<u8> {
    let hi = (hi as char).to_digit(16)?;
    let lo = (lo as char).to_digit(16)?;
    Some((hi as u8) << 4 | lo as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn query_pairs_decode() {
        let req = get("/search?term=double+rainbow&sort=new%20stuff");
        assert_eq!(req.query("term"), Some("double rainbow"));
        assert_eq!(req.query("sort"), Some("new stuff"));
        assert_eq!(req.query("missing"), None);
    }

    #[test]
    fn first_occurrence_wins() {
        let req = get("/x?a=1&a=2");
        assert_eq!(req.query("a"), Some("1"));
        assert_eq!(req.query_pairs().len(), 2);
    }

    #[test]
    fn key_without_value_is_empty() {
        let req = get("/x?flag&name=");
        assert_eq!(req.query("flag"), Some(""));
        assert_eq!(req.query("name"), Some(""));
    }

    #[test]
    fn malformed_escape_passes_through() {
        assert_eq!(urldecode("100%"), "100%");
        assert_eq!(urldecode("a%2"), "a%2");
        assert_eq!(urldecode("caf%C3%A9"), "café");
    }

    #[test]
    fn encode_round_trips_reserved_characters() {
        let raw = "Dances With Wolves & more?";
        assert_eq!(urldecode(&urlencode(raw)), raw);
        assert!(!urlencode(raw).contains(' '));
    }

    #[test]
    fn form_body_requires_content_type() {
        let uri: http::Uri = "/movies/new".parse().expect("uri");
        let body = Bytes::from_static(b"title=Alien");

        let plain = Request::new(
            Method::Post,
            &uri,
            HeaderMap::new(),
            body.clone(),
            HashMap::new(),
        );
        assert_eq!(plain.form("title"), None);

        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        let form = Request::new(Method::Post, &uri, headers, body, HashMap::new());
        assert_eq!(form.form("title"), Some("Alien"));
    }
}
