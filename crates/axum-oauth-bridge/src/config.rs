//! Configuration for the OAuth bridge.
//!
//! One options object at construction ([`ServerOptions`]) and one per
//! middleware call ([`AuthenticateOptions`], [`AuthorizeOptions`],
//! [`TokenOptions`]). The per-call and passthrough options are recognized by
//! the engine, never reinterpreted here.

use std::sync::Arc;

use crate::model::{Blocking, BlockingModel, Model};
use crate::sink::ErrorSink;

/// Adapter limits.
pub mod limits {
    /// Maximum request body size buffered for the engine.
    pub const MAX_BODY_BYTES: usize = 1024 * 1024;
}

/// Default grant lifetimes, in seconds.
pub mod lifetimes {
    /// Access token lifetime: 1 hour.
    pub const ACCESS_TOKEN: u64 = 3600;
    /// Refresh token lifetime: 14 days.
    pub const REFRESH_TOKEN: u64 = 14 * 24 * 3600;
    /// Authorization code lifetime: 5 minutes.
    pub const AUTHORIZATION_CODE: u64 = 300;
}

/// Construction-time options for [`OAuthServer`](crate::OAuthServer).
///
/// The model is the one required field; everything else passes through to the
/// engine untouched.
#[derive(Clone, Default)]
pub struct ServerOptions {
    /// Capability provider the engine calls back into. Required.
    pub model: Option<Arc<dyn Model>>,
    /// Engine-recognized passthrough options.
    pub engine: EngineOptions,
    /// Channel for errors escalated past the middleware layer. Defaults to
    /// [`TracingSink`](crate::sink::TracingSink).
    pub error_sink: Option<Arc<dyn ErrorSink>>,
}

impl ServerOptions {
    /// Create empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply the model.
    #[must_use]
    pub fn with_model(mut self, model: Arc<dyn Model>) -> Self {
        self.model = Some(model);
        self
    }

    /// Supply a synchronous model, wrapped into the async contract.
    #[must_use]
    pub fn with_blocking_model<M: BlockingModel + 'static>(self, model: M) -> Self {
        self.with_model(Arc::new(Blocking(model)))
    }

    /// Supply engine passthrough options.
    #[must_use]
    pub fn with_engine_options(mut self, engine: EngineOptions) -> Self {
        self.engine = engine;
        self
    }

    /// Supply an error sink.
    #[must_use]
    pub fn with_error_sink(mut self, sink: Arc<dyn ErrorSink>) -> Self {
        self.error_sink = Some(sink);
        self
    }
}

impl std::fmt::Debug for ServerOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerOptions")
            .field("model", &self.model.as_ref().map(|_| "<dyn Model>"))
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

/// Engine-recognized construction passthrough options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Default access token lifetime, in seconds.
    pub access_token_lifetime: u64,
    /// Default refresh token lifetime, in seconds.
    pub refresh_token_lifetime: u64,
    /// Default authorization code lifetime, in seconds.
    pub authorization_code_lifetime: u64,
    /// Accept bearer tokens in the query string.
    pub allow_bearer_tokens_in_query_string: bool,
    /// Allow authorization requests without a `state` parameter.
    pub allow_empty_state: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            access_token_lifetime: lifetimes::ACCESS_TOKEN,
            refresh_token_lifetime: lifetimes::REFRESH_TOKEN,
            authorization_code_lifetime: lifetimes::AUTHORIZATION_CODE,
            allow_bearer_tokens_in_query_string: false,
            allow_empty_state: false,
        }
    }
}

/// Engine-recognized options for the authenticate operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticateOptions {
    /// Scope required to access the protected resource.
    pub scope: Option<Vec<String>>,
    /// Announce accepted scopes via `X-Accepted-OAuth-Scopes`.
    pub add_accepted_scopes_header: bool,
    /// Announce authorized scopes via `X-OAuth-Scopes`.
    pub add_authorized_scopes_header: bool,
    /// Accept bearer tokens in the query string for this route.
    pub allow_bearer_tokens_in_query_string: bool,
}

impl Default for AuthenticateOptions {
    fn default() -> Self {
        Self {
            scope: None,
            add_accepted_scopes_header: true,
            add_authorized_scopes_header: true,
            allow_bearer_tokens_in_query_string: false,
        }
    }
}

impl AuthenticateOptions {
    /// Require the given scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.scope = Some(scope.into_iter().map(Into::into).collect());
        self
    }
}

/// Engine-recognized options for the authorize operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizeOptions {
    /// Authorization code lifetime for this route, in seconds.
    pub authorization_code_lifetime: u64,
    /// Allow requests without a `state` parameter on this route.
    pub allow_empty_state: bool,
}

impl Default for AuthorizeOptions {
    fn default() -> Self {
        Self {
            authorization_code_lifetime: lifetimes::AUTHORIZATION_CODE,
            allow_empty_state: false,
        }
    }
}

/// Engine-recognized options for the token operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOptions {
    /// Access token lifetime for this route, in seconds.
    pub access_token_lifetime: u64,
    /// Refresh token lifetime for this route, in seconds.
    pub refresh_token_lifetime: u64,
    /// Rotate the refresh token on every refresh grant.
    pub always_issue_new_refresh_token: bool,
    /// Require client credentials on the token endpoint.
    pub require_client_authentication: bool,
}

impl Default for TokenOptions {
    fn default() -> Self {
        Self {
            access_token_lifetime: lifetimes::ACCESS_TOKEN,
            refresh_token_lifetime: lifetimes::REFRESH_TOKEN,
            always_issue_new_refresh_token: true,
            require_client_authentication: true,
        }
    }
}
