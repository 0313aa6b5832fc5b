//! Adapter construction and the three operation dispatchers.
//!
//! [`OAuthServer`] binds one engine instance at construction and hands out
//! middleware closures for `axum::middleware::from_fn`. Each dispatch is a
//! single linear flow: buffer the body, build views, call the engine, then
//! either publish the result and continue the chain or map the error and
//! halt.

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::Request;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use futures::future::BoxFuture;

use crate::config::{
    AuthenticateOptions, AuthorizeOptions, ServerOptions, TokenOptions, limits,
};
use crate::engine::Engine;
use crate::error::{OAuthError, OAuthResult};
use crate::model::{AuthorizationCode, Token};
use crate::respond;
use crate::sink::{ErrorContext, ErrorSink, TracingSink};
use crate::views::{EngineRequest, EngineResponse};

/// Result of a successful oauth operation, published for downstream
/// middleware via request extensions.
///
/// Written once per request by the dispatcher, never read by the adapter
/// itself afterward. Read it with `Extension<OAuthContext>` or
/// `request.extensions().get::<OAuthContext>()`.
#[derive(Debug, Clone)]
pub enum OAuthContext {
    /// Set by `authenticate` and `token`.
    Token(Token),
    /// Set by `authorize`.
    Code(AuthorizationCode),
}

impl OAuthContext {
    /// The token, if this slot holds one.
    #[must_use]
    pub const fn token(&self) -> Option<&Token> {
        match self {
            Self::Token(token) => Some(token),
            Self::Code(_) => None,
        }
    }

    /// The authorization code, if this slot holds one.
    #[must_use]
    pub const fn code(&self) -> Option<&AuthorizationCode> {
        match self {
            Self::Code(code) => Some(code),
            Self::Token(_) => None,
        }
    }
}

/// Bridge between an OAuth engine and the axum middleware chain.
///
/// Constructed once for the process lifetime; clones share the same engine
/// and sink. Holds no per-request state.
pub struct OAuthServer<E> {
    engine: Arc<E>,
    sink: Arc<dyn ErrorSink>,
}

impl<E> Clone for OAuthServer<E> {
    fn clone(&self) -> Self {
        Self { engine: Arc::clone(&self.engine), sink: Arc::clone(&self.sink) }
    }
}

impl<E: Engine> OAuthServer<E> {
    /// Construct the adapter, binding one engine instance to the supplied
    /// model.
    ///
    /// Fails with an `invalid_argument` error before any engine is bound when
    /// the model is missing.
    pub fn new(options: ServerOptions) -> OAuthResult<Self> {
        let ServerOptions { model, engine, error_sink } = options;
        let model =
            model.ok_or_else(|| OAuthError::invalid_argument("missing required option: `model`"))?;
        let engine = Arc::new(E::bind(model, engine)?);
        let sink = error_sink.unwrap_or_else(|| Arc::new(TracingSink));
        Ok(Self { engine, sink })
    }

    /// Middleware validating that the request carries an acceptable token.
    ///
    /// On success the request continues down the chain with
    /// [`OAuthContext::Token`] set; the live response is not touched. On
    /// failure the chain halts with the mapped error response.
    pub fn authenticate(
        &self,
        options: AuthenticateOptions,
    ) -> impl Fn(Request, Next) -> BoxFuture<'static, Response> + Clone + Send + Sync + use<E>
    {
        let server = self.clone();
        let options = Arc::new(options);
        move |request: Request, next: Next| {
            let server = server.clone();
            let options = Arc::clone(&options);
            Box::pin(async move { server.dispatch_authenticate(&options, request, next).await })
        }
    }

    /// Middleware authorizing a client to request tokens.
    ///
    /// On success [`OAuthContext::Code`] is set, the chain runs, and the
    /// engine's response view is applied over the final response. On failure
    /// the chain halts; headers the engine had already set survive into the
    /// error response.
    pub fn authorize(
        &self,
        options: AuthorizeOptions,
    ) -> impl Fn(Request, Next) -> BoxFuture<'static, Response> + Clone + Send + Sync + use<E>
    {
        let server = self.clone();
        let options = Arc::new(options);
        move |request: Request, next: Next| {
            let server = server.clone();
            let options = Arc::clone(&options);
            Box::pin(async move { server.dispatch_authorize(&options, request, next).await })
        }
    }

    /// Middleware granting tokens to valid requests.
    ///
    /// Same structure as [`OAuthServer::authorize`], publishing
    /// [`OAuthContext::Token`] instead.
    pub fn token(
        &self,
        options: TokenOptions,
    ) -> impl Fn(Request, Next) -> BoxFuture<'static, Response> + Clone + Send + Sync + use<E>
    {
        let server = self.clone();
        let options = Arc::new(options);
        move |request: Request, next: Next| {
            let server = server.clone();
            let options = Arc::clone(&options);
            Box::pin(async move { server.dispatch_token(&options, request, next).await })
        }
    }

    async fn dispatch_authenticate(
        &self,
        options: &AuthenticateOptions,
        request: Request,
        next: Next,
    ) -> Response {
        let (parts, body) = request.into_parts();
        let bytes = match buffer_body(body).await {
            Ok(bytes) => bytes,
            Err(error) => return self.finish_error(&error, None, &parts),
        };

        let engine_request = EngineRequest::from_parts(&parts, bytes.clone());
        let mut engine_response = EngineResponse::new();

        tracing::debug!(method = %parts.method, path = %parts.uri.path(), "authenticating request");

        match self.engine.authenticate(&engine_request, &mut engine_response, options).await {
            Ok(token) => {
                let mut request = Request::from_parts(parts, Body::from(bytes));
                request.extensions_mut().insert(OAuthContext::Token(token));
                next.run(request).await
            }
            // authenticate populates no response view; the mapper gets the
            // error alone.
            Err(error) => self.finish_error(&error, None, &parts),
        }
    }

    async fn dispatch_authorize(
        &self,
        options: &AuthorizeOptions,
        request: Request,
        next: Next,
    ) -> Response {
        let (parts, body) = request.into_parts();
        let bytes = match buffer_body(body).await {
            Ok(bytes) => bytes,
            Err(error) => return self.finish_error(&error, None, &parts),
        };

        let engine_request = EngineRequest::from_parts(&parts, bytes.clone());
        let mut engine_response = EngineResponse::new();

        tracing::debug!(method = %parts.method, path = %parts.uri.path(), "authorizing client");

        match self.engine.authorize(&engine_request, &mut engine_response, options).await {
            Ok(code) => {
                let mut request = Request::from_parts(parts, Body::from(bytes));
                request.extensions_mut().insert(OAuthContext::Code(code));
                let response = next.run(request).await;
                respond::apply_view(response, &engine_response)
            }
            Err(error) => self.finish_error(&error, Some(&engine_response), &parts),
        }
    }

    async fn dispatch_token(
        &self,
        options: &TokenOptions,
        request: Request,
        next: Next,
    ) -> Response {
        let (parts, body) = request.into_parts();
        let bytes = match buffer_body(body).await {
            Ok(bytes) => bytes,
            Err(error) => return self.finish_error(&error, None, &parts),
        };

        let engine_request = EngineRequest::from_parts(&parts, bytes.clone());
        let mut engine_response = EngineResponse::new();

        tracing::debug!(method = %parts.method, path = %parts.uri.path(), "granting token");

        match self.engine.token(&engine_request, &mut engine_response, options).await {
            Ok(token) => {
                let mut request = Request::from_parts(parts, Body::from(bytes));
                request.extensions_mut().insert(OAuthContext::Token(token));
                let response = next.run(request).await;
                respond::apply_view(response, &engine_response)
            }
            Err(error) => self.finish_error(&error, Some(&engine_response), &parts),
        }
    }

    fn finish_error(
        &self,
        error: &OAuthError,
        view: Option<&EngineResponse>,
        parts: &Parts,
    ) -> Response {
        let request = ErrorContext::from_parts(parts);
        let (response, outcome) =
            respond::handle_error(error, view, self.sink.as_ref(), &request);
        tracing::debug!(
            error = %error,
            status = %response.status(),
            handled = outcome.handled,
            reported = outcome.reported,
            "oauth operation failed"
        );
        response
    }
}

impl<E> std::fmt::Debug for OAuthServer<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthServer").finish()
    }
}

async fn buffer_body(body: Body) -> OAuthResult<Bytes> {
    axum::body::to_bytes(body, limits::MAX_BODY_BYTES)
        .await
        .map_err(|err| OAuthError::invalid_request(format!("failed to read request body: {err}")))
}
