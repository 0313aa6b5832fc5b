//! The model (capability provider) boundary.
//!
//! The engine owns protocol logic but delegates every storage and validation
//! decision to a caller-supplied [`Model`]. The trait replaces the upstream
//! engine's duck-typed model object with named async functions of fixed
//! signature: each capability returns eventually or fails with an
//! [`OAuthError`](crate::OAuthError), regardless of how the implementation
//! computes its answer.
//!
//! Capabilities required by every deployment (`get_client`,
//! `get_access_token`, `save_token`) have no default bodies. Grant-specific
//! capabilities default to an `invalid_argument` error naming the missing
//! function, so a model wired into a grant it does not support fails loudly
//! rather than silently.

mod blocking;
mod types;

pub use blocking::{Blocking, BlockingModel};
pub use types::{AuthorizationCode, Client, Token, User};

use crate::error::{OAuthError, OAuthResult};

fn unimplemented_capability(name: &str) -> OAuthError {
    OAuthError::invalid_argument(format!("model does not implement `{name}`"))
}

/// Storage and validation capabilities the engine calls back into.
///
/// Shared as a read-only `Arc<dyn Model>` across all requests; created once
/// at adapter construction.
#[async_trait::async_trait]
pub trait Model: Send + Sync {
    /// Look up a client, verifying the secret when one is supplied.
    async fn get_client(
        &self,
        client_id: &str,
        client_secret: Option<&str>,
    ) -> OAuthResult<Option<Client>>;

    /// Look up a previously issued access token.
    async fn get_access_token(&self, access_token: &str) -> OAuthResult<Option<Token>>;

    /// Persist a newly issued token.
    async fn save_token(&self, token: Token, client: &Client, user: &User) -> OAuthResult<Token>;

    /// Authenticate a resource owner (password grant).
    async fn get_user(&self, _username: &str, _password: &str) -> OAuthResult<Option<User>> {
        Err(unimplemented_capability("get_user"))
    }

    /// Look up a refresh token (refresh token grant).
    async fn get_refresh_token(&self, _refresh_token: &str) -> OAuthResult<Option<Token>> {
        Err(unimplemented_capability("get_refresh_token"))
    }

    /// Revoke a refresh token after rotation. Returns whether it existed.
    async fn revoke_token(&self, _token: &Token) -> OAuthResult<bool> {
        Err(unimplemented_capability("revoke_token"))
    }

    /// Persist an authorization code (authorization code grant).
    async fn save_authorization_code(
        &self,
        _code: AuthorizationCode,
        _client: &Client,
        _user: &User,
    ) -> OAuthResult<AuthorizationCode> {
        Err(unimplemented_capability("save_authorization_code"))
    }

    /// Look up an authorization code (authorization code grant).
    async fn get_authorization_code(
        &self,
        _code: &str,
    ) -> OAuthResult<Option<AuthorizationCode>> {
        Err(unimplemented_capability("get_authorization_code"))
    }

    /// Revoke an authorization code after exchange. Returns whether it existed.
    async fn revoke_authorization_code(&self, _code: &AuthorizationCode) -> OAuthResult<bool> {
        Err(unimplemented_capability("revoke_authorization_code"))
    }

    /// Check a token against the scope required by a protected resource.
    async fn verify_scope(&self, _token: &Token, _scope: &[String]) -> OAuthResult<bool> {
        Err(unimplemented_capability("verify_scope"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OAuthErrorKind;

    struct MinimalModel;

    #[async_trait::async_trait]
    impl Model for MinimalModel {
        async fn get_client(
            &self,
            _client_id: &str,
            _client_secret: Option<&str>,
        ) -> OAuthResult<Option<Client>> {
            Ok(None)
        }

        async fn get_access_token(&self, _access_token: &str) -> OAuthResult<Option<Token>> {
            Ok(None)
        }

        async fn save_token(
            &self,
            token: Token,
            _client: &Client,
            _user: &User,
        ) -> OAuthResult<Token> {
            Ok(token)
        }
    }

    #[tokio::test]
    async fn test_optional_capabilities_fail_loudly() {
        let model = MinimalModel;

        let err = model.get_user("alice", "hunter2").await.unwrap_err();
        assert_eq!(err.kind(), OAuthErrorKind::InvalidArgument);
        assert!(err.message().contains("get_user"));

        let err = model.get_authorization_code("abc").await.unwrap_err();
        assert!(err.message().contains("get_authorization_code"));
    }
}
