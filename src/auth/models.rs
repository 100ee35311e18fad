//! Authentication data models

use serde::{Deserialize, Serialize};

/// User attributes from a successful external authentication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    #[serde(rename = "name")]
    pub display_name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "image")]
    pub avatar_url: Option<String>,
}

/// Present only on first sign-in; distinguishes it from a token refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMarker {
    pub provider: String,
    #[serde(rename = "providerAccountId")]
    pub provider_account_id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl AccountMarker {
    pub fn oauth(provider: &str, provider_account_id: &str) -> Self {
        Self {
            provider: provider.to_string(),
            provider_account_id: provider_account_id.to_string(),
            kind: "oauth".to_string(),
        }
    }
}

/// Credential carrying identity attributes between requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "picture", default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
}

impl Token {
    /// The token the session layer starts from on first sign-in, before the
    /// policy runs. Name, email and picture come straight from the provider.
    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            id: None,
            display_name: identity.display_name.clone(),
            email: identity.email.clone(),
            avatar_url: identity.avatar_url.clone(),
            sub: Some(identity.id.clone()),
        }
    }
}

/// Signed form of a token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(flatten)]
    pub token: Token,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Short-lived claims carried in the OAuth state cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateClaims {
    pub nonce: String,
    #[serde(rename = "callbackUrl")]
    pub callback_url: String,
    pub exp: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "image", default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Per-request view of a token, exposed to pages and `/api/auth/session`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    pub expires: String,
}

impl Session {
    pub fn new(expires: String) -> Self {
        Self {
            user: SessionUser::default(),
            expires,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.id.is_some()
    }
}

/// Body of `POST /api/auth/signin/:provider`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    #[serde(rename = "callbackUrl", default)]
    pub callback_url: Option<String>,
    #[serde(default = "default_redirect")]
    pub redirect: bool,
}

fn default_redirect() -> bool {
    true
}

/// Result of a sign-in call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInResponse {
    pub ok: bool,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Query of the browser sign-in and login page routes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackUrlQuery {
    #[serde(rename = "callbackUrl")]
    pub callback_url: Option<String>,
    pub error: Option<String>,
}

/// Query the provider sends back to the callback route
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Public provider description served by `/api/auth/providers`
#[derive(Debug, Clone, Serialize)]
pub struct ProviderInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "signinUrl")]
    pub signin_url: String,
    #[serde(rename = "callbackUrl")]
    pub callback_url: String,
}
