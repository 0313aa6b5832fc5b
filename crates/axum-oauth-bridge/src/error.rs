//! Error types for the OAuth bridge.
//!
//! Uses `thiserror` for structured error handling. A single [`OAuthError`]
//! type covers both adapter configuration failures and errors surfaced by the
//! external engine, mirroring the RFC 6749 error vocabulary.

use axum::http::StatusCode;

/// Classification of an OAuth error.
///
/// Each kind carries a canonical RFC 6749 / RFC 6750 error code string and a
/// default HTTP status. [`OAuthErrorKind::UnauthorizedRequest`] is the one
/// kind handled specially on the wire: its responses carry a status and
/// headers but no body (RFC 6749 §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OAuthErrorKind {
    /// Missing or malformed configuration/arguments (construction-time).
    InvalidArgument,
    /// The request is missing a parameter or is otherwise malformed.
    InvalidRequest,
    /// Client authentication failed.
    InvalidClient,
    /// The provided grant is invalid, expired, or revoked.
    InvalidGrant,
    /// The requested scope is invalid or exceeds what was granted.
    InvalidScope,
    /// The access token is expired, revoked, or malformed.
    InvalidToken,
    /// The token lacks the scope required for this request.
    InsufficientScope,
    /// The client is not authorized to use this grant type.
    UnauthorizedClient,
    /// The grant type is not supported by the engine.
    UnsupportedGrantType,
    /// The response type is not supported by the engine.
    UnsupportedResponseType,
    /// The resource owner or engine denied the request.
    AccessDenied,
    /// The request lacked any applicable authentication.
    UnauthorizedRequest,
    /// The engine encountered an unexpected internal condition.
    ServerError,
}

impl OAuthErrorKind {
    /// Canonical `error` code string for response bodies.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::InvalidRequest => "invalid_request",
            Self::InvalidClient => "invalid_client",
            Self::InvalidGrant => "invalid_grant",
            Self::InvalidScope => "invalid_scope",
            Self::InvalidToken => "invalid_token",
            Self::InsufficientScope => "insufficient_scope",
            Self::UnauthorizedClient => "unauthorized_client",
            Self::UnsupportedGrantType => "unsupported_grant_type",
            Self::UnsupportedResponseType => "unsupported_response_type",
            Self::AccessDenied => "access_denied",
            Self::UnauthorizedRequest => "unauthorized_request",
            Self::ServerError => "server_error",
        }
    }

    /// Default HTTP status for this kind.
    #[must_use]
    pub const fn default_status(self) -> StatusCode {
        match self {
            Self::InvalidArgument => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidRequest
            | Self::InvalidClient
            | Self::InvalidGrant
            | Self::InvalidScope
            | Self::UnauthorizedClient
            | Self::UnsupportedGrantType
            | Self::UnsupportedResponseType
            | Self::AccessDenied => StatusCode::BAD_REQUEST,
            Self::InvalidToken | Self::UnauthorizedRequest => StatusCode::UNAUTHORIZED,
            Self::InsufficientScope => StatusCode::FORBIDDEN,
            Self::ServerError => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// A typed OAuth error, produced by the engine or by adapter construction.
///
/// Carries everything the error mapper needs: a wire-visible `name`, a human
/// message, an HTTP status, an `expose` flag deciding whether extra fields may
/// be shown to clients, and those extra fields themselves.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{name}: {message}")]
pub struct OAuthError {
    kind: OAuthErrorKind,
    name: String,
    message: String,
    status: StatusCode,
    expose: bool,
    extras: serde_json::Map<String, serde_json::Value>,
}

impl OAuthError {
    /// Create an error of the given kind with the kind's canonical name,
    /// default status, and an `expose` flag set for client errors.
    #[must_use]
    pub fn new(kind: OAuthErrorKind, message: impl Into<String>) -> Self {
        let status = kind.default_status();
        Self {
            kind,
            name: kind.name().to_owned(),
            message: message.into(),
            status,
            expose: status.is_client_error(),
            extras: serde_json::Map::new(),
        }
    }

    /// Create a construction-time configuration error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(OAuthErrorKind::InvalidArgument, message)
    }

    /// Create a malformed-request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(OAuthErrorKind::InvalidRequest, message)
    }

    /// Create a client-authentication error.
    #[must_use]
    pub fn invalid_client(message: impl Into<String>) -> Self {
        Self::new(OAuthErrorKind::InvalidClient, message)
    }

    /// Create an invalid-grant error.
    #[must_use]
    pub fn invalid_grant(message: impl Into<String>) -> Self {
        Self::new(OAuthErrorKind::InvalidGrant, message)
    }

    /// Create an unauthorized-request error (status + headers only on the
    /// wire, no body).
    #[must_use]
    pub fn unauthorized_request(message: impl Into<String>) -> Self {
        Self::new(OAuthErrorKind::UnauthorizedRequest, message)
    }

    /// Create an access-denied error.
    #[must_use]
    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::new(OAuthErrorKind::AccessDenied, message)
    }

    /// Create an internal engine error.
    #[must_use]
    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(OAuthErrorKind::ServerError, message)
    }

    /// Override the wire-visible error name. Extension grants use names
    /// outside the canonical set.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Override the HTTP status.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Override the `expose` flag.
    #[must_use]
    pub fn with_expose(mut self, expose: bool) -> Self {
        self.expose = expose;
        self
    }

    /// Attach an extra field, merged into the response body when the error is
    /// exposed.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extras.insert(key.into(), value);
        self
    }

    /// The error's classification.
    #[must_use]
    pub const fn kind(&self) -> OAuthErrorKind {
        self.kind
    }

    /// Wire-visible `error` code.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable `error_description`.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status for the mapped response.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Whether extra fields are safe to show to clients.
    #[must_use]
    pub const fn expose(&self) -> bool {
        self.expose
    }

    /// Extra diagnostic fields.
    #[must_use]
    pub const fn extras(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.extras
    }

    /// True for the header-only unauthorized-request kind.
    #[must_use]
    pub const fn is_unauthorized_request(&self) -> bool {
        matches!(self.kind, OAuthErrorKind::UnauthorizedRequest)
    }
}

/// Result type alias for engine and model operations.
pub type OAuthResult<T> = Result<T, OAuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_match_rfc_codes() {
        assert_eq!(OAuthErrorKind::InvalidGrant.name(), "invalid_grant");
        assert_eq!(OAuthErrorKind::UnauthorizedRequest.name(), "unauthorized_request");
        assert_eq!(OAuthErrorKind::InsufficientScope.name(), "insufficient_scope");
    }

    #[test]
    fn test_default_statuses() {
        assert_eq!(OAuthErrorKind::InvalidGrant.default_status(), StatusCode::BAD_REQUEST);
        assert_eq!(OAuthErrorKind::InvalidToken.default_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(OAuthErrorKind::InsufficientScope.default_status(), StatusCode::FORBIDDEN);
        assert_eq!(
            OAuthErrorKind::ServerError.default_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_expose_defaults_to_client_error_range() {
        assert!(OAuthError::invalid_grant("bad code").expose());
        assert!(!OAuthError::server_error("boom").expose());
        assert!(!OAuthError::invalid_argument("missing model").expose());
    }

    #[test]
    fn test_builder_overrides() {
        let err = OAuthError::invalid_grant("bad code")
            .with_status(StatusCode::UNPROCESSABLE_ENTITY)
            .with_expose(false)
            .with_extra("hint", serde_json::json!("check the code"));

        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(!err.expose());
        assert_eq!(err.extras().get("hint"), Some(&serde_json::json!("check the code")));
    }

    #[test]
    fn test_display_includes_name_and_message() {
        let err = OAuthError::invalid_client("authentication failed");
        assert_eq!(err.to_string(), "invalid_client: authentication failed");
    }
}
