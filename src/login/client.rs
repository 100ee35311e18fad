//! HTTP implementation of the sign-in call
//!
//! Posts to `/api/auth/signin/:provider` with `redirect: false` and, when
//! the returned URL stays on this origin (the mock handshake), follows it so
//! the session cookie lands in the client's cookie store.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::initiator::{SignInClient, SignInFailure, SignInOptions};
use crate::auth::models::{SignInRequest, SignInResponse};

#[derive(Debug, Clone)]
pub struct HttpSignInClient {
    base_url: Url,
    client: Client,
}

impl HttpSignInClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)?;
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self { base_url, client })
    }

    /// The underlying client, sharing the cookie store
    pub fn http(&self) -> &Client {
        &self.client
    }

    pub fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }
}

#[async_trait]
impl SignInClient for HttpSignInClient {
    async fn sign_in(
        &self,
        provider: &str,
        options: &SignInOptions,
    ) -> Result<SignInResponse, SignInFailure> {
        let endpoint = self
            .url(&format!("/api/auth/signin/{}", provider))
            .map_err(|e| SignInFailure(e.to_string()))?;

        let request = SignInRequest {
            callback_url: Some(options.callback_url.clone()),
            redirect: options.redirect,
        };

        let response = self
            .client
            .post(endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| SignInFailure(e.to_string()))?
            .json::<SignInResponse>()
            .await
            .map_err(|e| SignInFailure(e.to_string()))?;

        if response.error.is_some() {
            return Ok(response);
        }

        let Some(next) = response.url.as_deref() else {
            return Ok(response);
        };
        let next = Url::parse(next).map_err(|e| SignInFailure(e.to_string()))?;
        if next.origin() != self.base_url.origin() {
            debug!(url = %next, "Sign-in continues at the provider");
            return Ok(response);
        }

        let landed = self
            .client
            .get(next)
            .send()
            .await
            .map_err(|e| SignInFailure(e.to_string()))?;
        let status = landed.status().as_u16();
        let error = landed
            .url()
            .query_pairs()
            .find(|(k, _)| k == "error")
            .map(|(_, v)| v.into_owned());

        debug!(url = %landed.url(), status, "Sign-in handshake finished");

        Ok(SignInResponse {
            ok: error.is_none(),
            status,
            url: Some(landed.url().to_string()),
            error,
        })
    }
}
