//! axum-oauth-bridge
//!
//! Bridges an external OAuth 2.0 authorization-server engine into the axum
//! middleware chain. The engine owns all protocol logic (grants, token
//! issuance, client validation, storage callbacks); this crate translates
//! axum request/response objects into the engine's views, sequences the
//! three engine operations, and maps results and errors back onto the live
//! response.
//!
//! # Features
//!
//! - **Three middlewares**: `authenticate`, `authorize`, `token`, one per
//!   engine operation, each usable with `axum::middleware::from_fn`
//! - **Capability-provider model**: storage and validation behind an async
//!   [`Model`] trait, with a [`BlockingModel`] adapter for synchronous
//!   implementations
//! - **Typed errors**: RFC 6749 error codes with per-error expose control,
//!   mapped to wire responses in one place
//! - **Escalation channel**: non-4xx failures are offered to an
//!   [`ErrorSink`] for logging/monitoring integrations
//!
//! # Example
//!
//! ```no_run
//! use axum::{Router, middleware, routing::post};
//! use axum_oauth_bridge::{Engine, OAuthServer, TokenOptions};
//!
//! fn routes<E: Engine>(oauth: &OAuthServer<E>) -> Router {
//!     Router::new()
//!         .route("/token", post(|| async {}))
//!         .route_layer(middleware::from_fn(oauth.token(TokenOptions::default())))
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod respond;
pub mod server;
pub mod sink;
pub mod views;

pub use config::{
    AuthenticateOptions, AuthorizeOptions, EngineOptions, ServerOptions, TokenOptions,
};
pub use engine::Engine;
pub use error::{OAuthError, OAuthErrorKind, OAuthResult};
pub use model::{AuthorizationCode, Blocking, BlockingModel, Client, Model, Token, User};
pub use respond::ErrorOutcome;
pub use server::{OAuthContext, OAuthServer};
pub use sink::{ErrorContext, ErrorSink, TracingSink};
pub use views::{EngineRequest, EngineResponse};
