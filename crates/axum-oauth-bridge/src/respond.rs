//! Copying engine outcomes onto the live response.
//!
//! Two operations: [`apply_view`] replays a successful engine response view
//! onto the axum response, and [`handle_error`] maps a failed operation to
//! the wire (RFC 6749 §5.2 error bodies, §7 header-only unauthorized
//! responses) while deciding escalation.

use axum::body::Body;
use axum::http::{HeaderValue, header};
use axum::response::Response;

use crate::error::OAuthError;
use crate::sink::{ErrorContext, ErrorSink};
use crate::views::EngineResponse;

/// What became of a failed operation.
///
/// Two explicit signals instead of one conflated boolean: `reported` records
/// whether the error channel acknowledged the error, `handled` records
/// whether the failure is terminal at this layer. Client-error (4xx)
/// responses are always terminal; anything else is terminal only if a sink
/// acknowledged it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorOutcome {
    /// The failure was fully dealt with at this layer.
    pub handled: bool,
    /// The error channel acknowledged the error.
    pub reported: bool,
}

/// Copy status, body, and headers from the engine's response view onto the
/// live response.
///
/// Headers already on the live response survive unless the view overrides
/// them. Idempotent for a given view.
#[must_use]
pub fn apply_view(response: Response, view: &EngineResponse) -> Response {
    let (mut parts, _) = response.into_parts();

    parts.status = view.status();
    // The downstream body is replaced wholesale; its framing headers must not
    // survive it.
    parts.headers.remove(header::CONTENT_LENGTH);
    for (name, value) in view.headers() {
        parts.headers.insert(name.clone(), value.clone());
    }

    let body = match view.body() {
        Some(value) => {
            parts
                .headers
                .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
            Body::from(serde_json::to_vec(value).unwrap_or_default())
        }
        None => {
            parts.headers.remove(header::CONTENT_TYPE);
            Body::empty()
        }
    };

    Response::from_parts(parts, body)
}

/// Build the HTTP response for a failed engine operation.
///
/// Headers from a partially populated response view (e.g. `WWW-Authenticate`)
/// are copied first so they survive into the error path. Unauthorized-request
/// errors carry status and headers only; every other error gets an RFC 6749
/// §5.2 body, with extra error fields included when the error is marked safe
/// to expose.
#[must_use]
pub fn error_response(error: &OAuthError, view: Option<&EngineResponse>) -> Response {
    let mut response = Response::new(Body::empty());

    if let Some(view) = view {
        for (name, value) in view.headers() {
            response.headers_mut().insert(name.clone(), value.clone());
        }
    }

    *response.status_mut() = error.status();

    if error.is_unauthorized_request() {
        return response;
    }

    let mut body = serde_json::Map::new();
    body.insert("error".to_owned(), serde_json::Value::String(error.name().to_owned()));
    body.insert(
        "error_description".to_owned(),
        serde_json::Value::String(error.message().to_owned()),
    );
    if error.expose() {
        for (key, value) in error.extras() {
            body.insert(key.clone(), value.clone());
        }
    }

    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    *response.body_mut() =
        Body::from(serde_json::to_vec(&serde_json::Value::Object(body)).unwrap_or_default());
    response
}

/// Map a failed operation to its HTTP response and escalation outcome.
///
/// The sink is consulted only for statuses outside the client-error range;
/// 4xx failures are terminal here and never escalate.
pub fn handle_error(
    error: &OAuthError,
    view: Option<&EngineResponse>,
    sink: &dyn ErrorSink,
    request: &ErrorContext<'_>,
) -> (Response, ErrorOutcome) {
    let response = error_response(error, view);

    let client_error = response.status().is_client_error();
    let reported = if client_error { false } else { sink.report(error, request) };

    (response, ErrorOutcome { handled: client_error || reported, reported })
}
