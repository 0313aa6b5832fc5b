//! The external engine boundary.
//!
//! The bridge never implements OAuth protocol logic. Grant handling, token
//! issuance, and credential validation all live behind [`Engine`]; this crate
//! only builds the views the engine reads and writes, sequences the calls,
//! and maps the outcomes onto the live response.

use std::sync::Arc;

use crate::config::{AuthenticateOptions, AuthorizeOptions, EngineOptions, TokenOptions};
use crate::error::OAuthResult;
use crate::model::{AuthorizationCode, Model, Token};
use crate::views::{EngineRequest, EngineResponse};

/// An OAuth 2.0 authorization-server engine.
///
/// Bound once per process to a shared model and construction-time options;
/// stateless across requests beyond that reference. Each operation may write
/// headers, status, and body to the response view before returning, and fails
/// with a typed [`OAuthError`](crate::OAuthError) the dispatchers translate
/// into HTTP.
#[async_trait::async_trait]
pub trait Engine: Send + Sync + Sized + 'static {
    /// Construct the engine around a model and passthrough options.
    fn bind(model: Arc<dyn Model>, options: EngineOptions) -> OAuthResult<Self>;

    /// Validate that the request carries a token satisfying the engine's
    /// access rules (RFC 6749 §7).
    async fn authenticate(
        &self,
        request: &EngineRequest,
        response: &mut EngineResponse,
        options: &AuthenticateOptions,
    ) -> OAuthResult<Token>;

    /// Validate an authorization request and issue an authorization code
    /// (RFC 6749 §3.1).
    async fn authorize(
        &self,
        request: &EngineRequest,
        response: &mut EngineResponse,
        options: &AuthorizeOptions,
    ) -> OAuthResult<AuthorizationCode>;

    /// Validate a token-grant request and issue an access/refresh token
    /// (RFC 6749 §3.2).
    async fn token(
        &self,
        request: &EngineRequest,
        response: &mut EngineResponse,
        options: &TokenOptions,
    ) -> OAuthResult<Token>;
}
