//! Normalized HTTP response value
//!
//! Both success and error round trips collapse into the same [`Response`]
//! shape: status code, body text, and the full multi-valued header map.
//! Callers branch on status with [`Response::is`] / [`Response::not`]
//! instead of catching errors for non-2xx results.

use std::collections::HashMap;

/// Immutable result of a completed HTTP call.
///
/// Headers are kept as `name -> ordered values` because HTTP allows a header
/// to repeat (e.g. multiple `Set-Cookie`); a single-valued map would lose
/// that. Lookup is case-insensitive.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use http_client::Response;
///
/// let mut headers = HashMap::new();
/// headers.insert("X-Test".to_string(), vec!["a".to_string(), "b".to_string()]);
///
/// let response = Response::new(200, "ok", headers);
/// assert_eq!(response.code(), 200);
/// assert_eq!(response.body(), "ok");
/// assert_eq!(response.header("x-test"), Some("a"));
/// assert!(response.is(&[200]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    code: u16,
    /// Body text, empty string when the remote sent no body
    body: String,
    /// Header map, keys normalized to lowercase
    headers: HashMap<String, Vec<String>>,
}

impl Response {
    /// Create a response from status, body text and header map.
    ///
    /// Header names are normalized to lowercase so lookups are
    /// case-insensitive; the value order within a name is preserved.
    pub fn new(
        code: u16,
        body: impl Into<String>,
        headers: HashMap<String, Vec<String>>,
    ) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, values)| (name.to_ascii_lowercase(), values))
            .collect();

        Self {
            code,
            body: body.into(),
            headers,
        }
    }

    /// HTTP status code
    pub fn code(&self) -> u16 {
        self.code
    }

    /// Body text; empty when the remote end sent no body
    pub fn body(&self) -> &str {
        &self.body
    }

    /// First value of the named header, or `None` if absent
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of the named header in order, or `None` if absent
    pub fn headers(&self, name: &str) -> Option<&[String]> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
    }

    /// True when the status code is one of the expected codes.
    ///
    /// An empty slice always evaluates to false.
    pub fn is(&self, status: &[u16]) -> bool {
        status.contains(&self.code)
    }

    /// Negation of [`Response::is`]
    pub fn not(&self, status: &[u16]) -> bool {
        !self.is(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> Response {
        let mut headers = HashMap::new();
        headers.insert("X-Test".to_string(), vec!["a".to_string(), "b".to_string()]);
        Response::new(200, "ok", headers)
    }

    #[test]
    fn accessors_round_trip() {
        let res = response();
        assert_eq!(res.code(), 200);
        assert_eq!(res.body(), "ok");
        assert_eq!(
            res.headers("X-Test"),
            Some(&["a".to_string(), "b".to_string()][..])
        );
        assert_eq!(res.header("X-Test"), Some("a"));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let res = response();
        assert_eq!(res.header("x-test"), Some("a"));
        assert_eq!(res.header("X-TEST"), Some("a"));
    }

    #[test]
    fn absent_header_returns_none() {
        let res = response();
        assert_eq!(res.header("X-Missing"), None);
        assert_eq!(res.headers("X-Missing"), None);
    }

    #[test]
    fn is_matches_membership() {
        let res = response();
        assert!(res.is(&[200]));
        assert!(res.is(&[404, 200]));
        assert!(!res.is(&[404, 500]));
        assert!(!res.not(&[200]));
        assert!(res.not(&[404]));
    }

    #[test]
    fn is_with_empty_set_is_false() {
        let res = response();
        assert!(!res.is(&[]));
        assert!(res.not(&[]));
    }

    #[test]
    fn equality_is_by_value() {
        assert_eq!(response(), response());
        let other = Response::new(404, "", HashMap::new());
        assert_ne!(response(), other);
    }

    #[test]
    fn empty_body_is_empty_string() {
        let res = Response::new(204, "", HashMap::new());
        assert_eq!(res.body(), "");
    }
}
