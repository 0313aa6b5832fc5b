//! Entity types exchanged between the engine and the model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered OAuth client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Client identifier.
    pub id: String,
    /// Registered redirect URIs for the authorization code grant.
    #[serde(default)]
    pub redirect_uris: Vec<String>,
    /// Grant types this client may use.
    #[serde(default)]
    pub grants: Vec<String>,
    /// Per-client access token lifetime override, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token_lifetime: Option<u64>,
    /// Per-client refresh token lifetime override, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token_lifetime: Option<u64>,
}

/// A resource owner.
///
/// The engine treats users as opaque beyond the identifier; anything else the
/// model wants to carry lives in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: String,
    /// Model-defined attributes, flattened into the serialized form.
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl User {
    /// Create a user with no extra attributes.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), attributes: serde_json::Map::new() }
    }
}

/// An issued access token, optionally paired with a refresh token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The access token string.
    pub access_token: String,
    /// Access token expiration, if bounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token_expires_at: Option<DateTime<Utc>>,
    /// Paired refresh token, if issued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Refresh token expiration, if bounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
    /// Scope granted to the token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Vec<String>>,
    /// Owning client.
    pub client_id: String,
    /// Resource owner the token was issued for.
    pub user_id: String,
}

impl Token {
    /// Check if the access token has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.access_token_expires_at.is_some_and(|at| at <= Utc::now())
    }
}

/// An authorization code awaiting exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationCode {
    /// The code string handed to the client.
    pub code: String,
    /// Code expiration.
    pub expires_at: DateTime<Utc>,
    /// Redirect URI the code was bound to.
    pub redirect_uri: String,
    /// Scope approved for the eventual token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Vec<String>>,
    /// Owning client.
    pub client_id: String,
    /// Resource owner who approved the grant.
    pub user_id: String,
}

impl AuthorizationCode {
    /// Check if the code has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}
