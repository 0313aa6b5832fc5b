//! Request/response views handed to the engine.
//!
//! Both views are ephemeral: built fresh per incoming request from the
//! axum-native objects, dropped when handling ends. [`EngineRequest`] is the
//! read side (method, URI, headers, buffered body); [`EngineResponse`] is the
//! write side the engine mutates and the dispatcher later copies back onto
//! the live response.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};

/// Read-only view of the incoming request, in the shape the engine expects.
#[derive(Debug, Clone)]
pub struct EngineRequest {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
}

impl EngineRequest {
    /// Build a view from a request head and its buffered body.
    #[must_use]
    pub fn from_parts(parts: &Parts, body: Bytes) -> Self {
        Self {
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            headers: parts.headers.clone(),
            body,
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Request URI.
    #[must_use]
    pub const fn uri(&self) -> &Uri {
        &self.uri
    }

    /// All request headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// A single header as UTF-8, if present and valid.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Query string parameters. Later duplicates win.
    #[must_use]
    pub fn query(&self) -> HashMap<String, String> {
        let raw = self.uri.query().unwrap_or_default();
        url::form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Raw buffered body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body parsed as a urlencoded form. Later duplicates win.
    #[must_use]
    pub fn form(&self) -> HashMap<String, String> {
        url::form_urlencoded::parse(&self.body)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Body parsed as JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Writable view the engine populates with its response.
///
/// Status defaults to `200 OK` until the engine sets one.
#[derive(Debug, Clone, Default)]
pub struct EngineResponse {
    status: Option<StatusCode>,
    body: Option<serde_json::Value>,
    headers: HeaderMap,
}

impl EngineResponse {
    /// Create an empty response view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the response status.
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    /// The response status, defaulting to `200 OK`.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    /// Set the JSON response body.
    pub fn set_body(&mut self, body: serde_json::Value) {
        self.body = Some(body);
    }

    /// The JSON response body, if one was set.
    #[must_use]
    pub const fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Set a response header, replacing any previous value.
    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// All response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to the response headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_for(uri: &str) -> Parts {
        let (parts, ()) = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn test_request_view_query_and_headers() {
        let parts = parts_for("/authorize?response_type=code&client_id=c1&state=xyz%20abc");
        let view = EngineRequest::from_parts(&parts, Bytes::new());

        assert_eq!(view.method(), &Method::POST);
        let query = view.query();
        assert_eq!(query.get("response_type").map(String::as_str), Some("code"));
        assert_eq!(query.get("state").map(String::as_str), Some("xyz abc"));
        assert_eq!(view.header("content-type"), Some("application/x-www-form-urlencoded"));
        assert_eq!(view.header("authorization"), None);
    }

    #[test]
    fn test_request_view_form_body() {
        let parts = parts_for("/token");
        let body = Bytes::from_static(b"grant_type=authorization_code&code=abc123");
        let view = EngineRequest::from_parts(&parts, body);

        let form = view.form();
        assert_eq!(form.get("grant_type").map(String::as_str), Some("authorization_code"));
        assert_eq!(form.get("code").map(String::as_str), Some("abc123"));
    }

    #[test]
    fn test_request_view_json_body() {
        let parts = parts_for("/token");
        let view = EngineRequest::from_parts(&parts, Bytes::from_static(b"{\"a\":1}"));
        assert_eq!(view.json().unwrap(), serde_json::json!({"a": 1}));

        let view = EngineRequest::from_parts(&parts, Bytes::from_static(b"not json"));
        assert!(view.json().is_err());
    }

    #[test]
    fn test_response_view_defaults_and_mutation() {
        let mut view = EngineResponse::new();
        assert_eq!(view.status(), StatusCode::OK);
        assert!(view.body().is_none());
        assert!(view.headers().is_empty());

        view.set_status(StatusCode::FOUND);
        view.set_body(serde_json::json!({"access_token": "tok"}));
        view.set_header(
            HeaderName::from_static("location"),
            HeaderValue::from_static("https://app.example.com/cb?code=abc"),
        );

        assert_eq!(view.status(), StatusCode::FOUND);
        assert_eq!(view.body().unwrap()["access_token"], "tok");
        assert_eq!(view.headers().get("location").unwrap(), "https://app.example.com/cb?code=abc");
    }
}
