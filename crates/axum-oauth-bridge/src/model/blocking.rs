//! Adapter lifting synchronous model implementations into the async contract.
//!
//! The upstream adapter normalized every model function to an awaitable form
//! at construction, whatever its original calling convention. Here the async
//! [`Model`](super::Model) trait is the uniform contract, and [`Blocking`]
//! plays the wrapping role for implementations that compute their answers
//! synchronously (in-memory stores, test fixtures). The wrapped calls resolve
//! to exactly the values and errors the synchronous functions return.
//!
//! Implementations that perform blocking I/O should implement
//! [`Model`](super::Model) directly and offload to a blocking pool instead.

use super::types::{AuthorizationCode, Client, Token, User};
use super::{Model, unimplemented_capability};
use crate::error::OAuthResult;

/// A synchronous counterpart to [`Model`](super::Model).
///
/// Same capabilities, same required/optional split, no suspension points.
pub trait BlockingModel: Send + Sync {
    /// Look up a client, verifying the secret when one is supplied.
    fn get_client(
        &self,
        client_id: &str,
        client_secret: Option<&str>,
    ) -> OAuthResult<Option<Client>>;

    /// Look up a previously issued access token.
    fn get_access_token(&self, access_token: &str) -> OAuthResult<Option<Token>>;

    /// Persist a newly issued token.
    fn save_token(&self, token: Token, client: &Client, user: &User) -> OAuthResult<Token>;

    /// Authenticate a resource owner (password grant).
    fn get_user(&self, _username: &str, _password: &str) -> OAuthResult<Option<User>> {
        Err(unimplemented_capability("get_user"))
    }

    /// Look up a refresh token (refresh token grant).
    fn get_refresh_token(&self, _refresh_token: &str) -> OAuthResult<Option<Token>> {
        Err(unimplemented_capability("get_refresh_token"))
    }

    /// Revoke a refresh token after rotation. Returns whether it existed.
    fn revoke_token(&self, _token: &Token) -> OAuthResult<bool> {
        Err(unimplemented_capability("revoke_token"))
    }

    /// Persist an authorization code (authorization code grant).
    fn save_authorization_code(
        &self,
        _code: AuthorizationCode,
        _client: &Client,
        _user: &User,
    ) -> OAuthResult<AuthorizationCode> {
        Err(unimplemented_capability("save_authorization_code"))
    }

    /// Look up an authorization code (authorization code grant).
    fn get_authorization_code(&self, _code: &str) -> OAuthResult<Option<AuthorizationCode>> {
        Err(unimplemented_capability("get_authorization_code"))
    }

    /// Revoke an authorization code after exchange. Returns whether it existed.
    fn revoke_authorization_code(&self, _code: &AuthorizationCode) -> OAuthResult<bool> {
        Err(unimplemented_capability("revoke_authorization_code"))
    }

    /// Check a token against the scope required by a protected resource.
    fn verify_scope(&self, _token: &Token, _scope: &[String]) -> OAuthResult<bool> {
        Err(unimplemented_capability("verify_scope"))
    }
}

/// Wrapper implementing the async [`Model`](super::Model) contract over a
/// [`BlockingModel`].
#[derive(Debug, Clone)]
pub struct Blocking<M>(pub M);

#[async_trait::async_trait]
impl<M: BlockingModel> Model for Blocking<M> {
    async fn get_client(
        &self,
        client_id: &str,
        client_secret: Option<&str>,
    ) -> OAuthResult<Option<Client>> {
        self.0.get_client(client_id, client_secret)
    }

    async fn get_access_token(&self, access_token: &str) -> OAuthResult<Option<Token>> {
        self.0.get_access_token(access_token)
    }

    async fn save_token(&self, token: Token, client: &Client, user: &User) -> OAuthResult<Token> {
        self.0.save_token(token, client, user)
    }

    async fn get_user(&self, username: &str, password: &str) -> OAuthResult<Option<User>> {
        self.0.get_user(username, password)
    }

    async fn get_refresh_token(&self, refresh_token: &str) -> OAuthResult<Option<Token>> {
        self.0.get_refresh_token(refresh_token)
    }

    async fn revoke_token(&self, token: &Token) -> OAuthResult<bool> {
        self.0.revoke_token(token)
    }

    async fn save_authorization_code(
        &self,
        code: AuthorizationCode,
        client: &Client,
        user: &User,
    ) -> OAuthResult<AuthorizationCode> {
        self.0.save_authorization_code(code, client, user)
    }

    async fn get_authorization_code(&self, code: &str) -> OAuthResult<Option<AuthorizationCode>> {
        self.0.get_authorization_code(code)
    }

    async fn revoke_authorization_code(&self, code: &AuthorizationCode) -> OAuthResult<bool> {
        self.0.revoke_authorization_code(code)
    }

    async fn verify_scope(&self, token: &Token, scope: &[String]) -> OAuthResult<bool> {
        self.0.verify_scope(token, scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OAuthError;

    struct FixtureModel;

    impl BlockingModel for FixtureModel {
        fn get_client(
            &self,
            client_id: &str,
            client_secret: Option<&str>,
        ) -> OAuthResult<Option<Client>> {
            if client_id == "c1" && client_secret == Some("s3cret") {
                Ok(Some(Client {
                    id: "c1".into(),
                    redirect_uris: vec!["https://app.example.com/cb".into()],
                    grants: vec!["authorization_code".into()],
                    access_token_lifetime: None,
                    refresh_token_lifetime: None,
                }))
            } else {
                Ok(None)
            }
        }

        fn get_access_token(&self, access_token: &str) -> OAuthResult<Option<Token>> {
            if access_token == "revoked" {
                return Err(OAuthError::server_error("token store offline"));
            }
            Ok(None)
        }

        fn save_token(&self, token: Token, _client: &Client, _user: &User) -> OAuthResult<Token> {
            Ok(token)
        }
    }

    #[tokio::test]
    async fn test_wrapped_calls_match_direct_calls() {
        let direct = FixtureModel;
        let wrapped = Blocking(FixtureModel);

        let direct_client = direct.get_client("c1", Some("s3cret")).unwrap();
        let wrapped_client = wrapped.get_client("c1", Some("s3cret")).await.unwrap();
        assert_eq!(direct_client, wrapped_client);

        assert!(wrapped.get_client("c1", Some("wrong")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_wrapped_errors_match_direct_errors() {
        let direct = FixtureModel;
        let wrapped = Blocking(FixtureModel);

        let direct_err = direct.get_access_token("revoked").unwrap_err();
        let wrapped_err = wrapped.get_access_token("revoked").await.unwrap_err();
        assert_eq!(direct_err.kind(), wrapped_err.kind());
        assert_eq!(direct_err.message(), wrapped_err.message());
    }

    #[tokio::test]
    async fn test_wrapped_defaults_stay_unimplemented() {
        let wrapped = Blocking(FixtureModel);
        let err = wrapped.get_refresh_token("r1").await.unwrap_err();
        assert!(err.message().contains("get_refresh_token"));
    }
}
