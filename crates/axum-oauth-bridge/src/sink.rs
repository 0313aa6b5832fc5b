//! Application-level error channel.
//!
//! Failures the error mapper does not consider terminal (anything outside the
//! 4xx range) are offered to an [`ErrorSink`] so logging and monitoring
//! integrations can observe them. The sink's return value reports whether the
//! error was acknowledged; unacknowledged non-4xx failures remain unhandled
//! at this layer.

use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, Uri};

use crate::error::OAuthError;

/// Per-request context handed to the sink alongside the error.
#[derive(Debug, Clone, Copy)]
pub struct ErrorContext<'a> {
    /// Method of the failing request.
    pub method: &'a Method,
    /// URI of the failing request.
    pub uri: &'a Uri,
    /// Headers of the failing request.
    pub headers: &'a HeaderMap,
}

impl<'a> ErrorContext<'a> {
    /// Borrow the context out of a request head.
    #[must_use]
    pub const fn from_parts(parts: &'a Parts) -> Self {
        Self { method: &parts.method, uri: &parts.uri, headers: &parts.headers }
    }
}

/// Receiver for errors escalated past the middleware layer.
pub trait ErrorSink: Send + Sync {
    /// Observe an escalated error. Returns true if the error was handled.
    fn report(&self, error: &OAuthError, request: &ErrorContext<'_>) -> bool;
}

impl<F> ErrorSink for F
where
    F: for<'a> Fn(&OAuthError, &ErrorContext<'a>) -> bool + Send + Sync,
{
    fn report(&self, error: &OAuthError, request: &ErrorContext<'_>) -> bool {
        self(error, request)
    }
}

/// Default sink: logs the error and leaves it unhandled.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&self, error: &OAuthError, request: &ErrorContext<'_>) -> bool {
        tracing::error!(
            error = %error,
            status = %error.status(),
            method = %request.method,
            path = %request.uri.path(),
            "oauth middleware error"
        );
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts() -> Parts {
        let (parts, ()) = Request::builder().uri("/token").body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_tracing_sink_never_acknowledges() {
        let parts = parts();
        let ctx = ErrorContext::from_parts(&parts);
        let error = OAuthError::server_error("boom");
        assert!(!TracingSink.report(&error, &ctx));
    }

    #[test]
    fn test_closures_are_sinks() {
        let parts = parts();
        let ctx = ErrorContext::from_parts(&parts);
        let sink = |_: &OAuthError, _: &ErrorContext<'_>| true;
        assert!(ErrorSink::report(&sink, &OAuthError::server_error("boom"), &ctx));
    }
}
