//! Identity providers
//!
//! The OAuth handshake sits behind [`IdentityProvider`]. [`GoogleProvider`]
//! talks to Google; [`MockProvider`] completes the same two steps locally so
//! the demo runs without credentials.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, info};

use super::models::{AccountMarker, Identity};
use crate::common::config::ProviderCredentials;

pub const GOOGLE_PROVIDER_ID: &str = "google";
pub const MOCK_AUTHORIZATION_CODE: &str = "mock-authorization-code";

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("OAuth flow failed: {0}")]
    OAuthFailed(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Provider id used in routes, e.g. `google`
    fn id(&self) -> &'static str;

    /// Human readable name
    fn name(&self) -> &'static str;

    /// Where to send the browser to start the handshake
    fn authorization_url(&self, state: &str, redirect_uri: &str) -> String;

    /// Exchanges the authorization code for the signed-in identity
    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<(Identity, AccountMarker), ProviderError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    sub: String,
    name: Option<String>,
    email: Option<String>,
    picture: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GoogleProvider {
    credentials: ProviderCredentials,
    client: Client,
}

impl GoogleProvider {
    pub fn new(credentials: ProviderCredentials) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            credentials,
            client,
        }
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<GoogleUserInfo, ProviderError> {
        let response = self
            .client
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::RequestFailed(format!(
                "userinfo returned HTTP {}",
                response.status()
            )));
        }

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| ProviderError::SerializationError(e.to_string()))
    }
}

#[async_trait]
impl IdentityProvider for GoogleProvider {
    fn id(&self) -> &'static str {
        GOOGLE_PROVIDER_ID
    }

    fn name(&self) -> &'static str {
        "Google"
    }

    fn authorization_url(&self, state: &str, redirect_uri: &str) -> String {
        let scope = "openid email profile";

        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}&access_type=offline&prompt=consent",
            GOOGLE_AUTH_URL,
            urlencoding::encode(&self.credentials.client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(scope),
            urlencoding::encode(state)
        )
    }

    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<(Identity, AccountMarker), ProviderError> {
        let params = [
            ("code", code),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
        ];

        debug!("Exchanging authorization code with Google");

        let response = self
            .client
            .post(GOOGLE_TOKEN_URL)
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "Google token exchange failed");
            return Err(ProviderError::OAuthFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let tokens = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| ProviderError::SerializationError(e.to_string()))?;

        let info = self.fetch_user_info(&tokens.access_token).await?;
        info!(provider_id = %info.sub, "Google identity resolved");

        let account = AccountMarker::oauth(GOOGLE_PROVIDER_ID, &info.sub);
        let identity = Identity {
            id: info.sub,
            display_name: info.name,
            email: info.email,
            avatar_url: info.picture,
        };

        Ok((identity, account))
    }
}

/// Local stand-in for Google. The authorization URL points straight back at
/// the callback with a fixed code.
#[derive(Debug, Clone, Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IdentityProvider for MockProvider {
    fn id(&self) -> &'static str {
        GOOGLE_PROVIDER_ID
    }

    fn name(&self) -> &'static str {
        "Google"
    }

    fn authorization_url(&self, state: &str, redirect_uri: &str) -> String {
        format!(
            "{}?code={}&state={}",
            redirect_uri,
            MOCK_AUTHORIZATION_CODE,
            urlencoding::encode(state)
        )
    }

    async fn exchange_code(
        &self,
        code: &str,
        _redirect_uri: &str,
    ) -> Result<(Identity, AccountMarker), ProviderError> {
        if code != MOCK_AUTHORIZATION_CODE {
            return Err(ProviderError::OAuthFailed(
                "unknown mock authorization code".to_string(),
            ));
        }

        let identity = Identity {
            id: "mock-provider-subject".to_string(),
            display_name: Some("Mock Provider User".to_string()),
            email: Some("provider-user@mock.invalid".to_string()),
            avatar_url: None,
        };
        let account = AccountMarker::oauth(GOOGLE_PROVIDER_ID, &identity.id);

        Ok((identity, account))
    }
}
