//! Login form state machine
//!
//! `Idle -> Submitting -> Idle`. The loading flag is cleared on every exit
//! path; a second trigger while submitting is rejected with
//! [`LoginError::Busy`].

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::auth::models::SignInResponse;
use crate::auth::provider::GOOGLE_PROVIDER_ID;
use crate::common::config::DASHBOARD_PATH;

pub const SIGN_IN_FAILED_MESSAGE: &str = "Failed to sign in. Please try again.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";
pub const SIGN_IN_TIMEOUT_MESSAGE: &str = "Sign in timed out. Please try again.";

/// Options passed with every sign-in call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInOptions {
    pub redirect: bool,
    pub callback_url: String,
}

/// Failure of the sign-in call itself, as opposed to a reported error result
#[derive(Debug, Error)]
#[error("sign-in call failed: {0}")]
pub struct SignInFailure(pub String);

/// The external sign-in call
#[async_trait]
pub trait SignInClient: Send + Sync {
    async fn sign_in(
        &self,
        provider: &str,
        options: &SignInOptions,
    ) -> Result<SignInResponse, SignInFailure>;
}

/// Client-side navigation
pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("a sign-in attempt is already in progress")]
    Busy,

    #[error("sign-in reported an error: {0}")]
    Reported(String),

    #[error("unexpected sign-in failure: {0}")]
    Unexpected(String),

    #[error("sign-in timed out after {0:?}")]
    TimedOut(Duration),
}

impl LoginError {
    /// What the form shows for this error. `Busy` leaves the form untouched.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            LoginError::Busy => None,
            LoginError::Reported(_) => Some(SIGN_IN_FAILED_MESSAGE),
            LoginError::Unexpected(_) => Some(UNEXPECTED_ERROR_MESSAGE),
            LoginError::TimedOut(_) => Some(SIGN_IN_TIMEOUT_MESSAGE),
        }
    }
}

/// Local form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub is_loading: bool,
    pub error: Option<String>,
}

impl UiState {
    /// State shown when the error page redirects back with `?error=`
    pub fn from_error_code(code: Option<&str>) -> Self {
        Self {
            is_loading: false,
            error: code.map(|_| SIGN_IN_FAILED_MESSAGE.to_string()),
        }
    }
}

pub struct LoginInitiator<C, N> {
    client: C,
    navigator: N,
    timeout: Duration,
    provider: String,
    callback_url: String,
    state: Mutex<UiState>,
}

impl<C, N> LoginInitiator<C, N>
where
    C: SignInClient,
    N: Navigator,
{
    pub fn new(client: C, navigator: N, timeout: Duration) -> Self {
        Self {
            client,
            navigator,
            timeout,
            provider: GOOGLE_PROVIDER_ID.to_string(),
            callback_url: DASHBOARD_PATH.to_string(),
            state: Mutex::new(UiState::default()),
        }
    }

    pub async fn state(&self) -> UiState {
        self.state.lock().await.clone()
    }

    /// Runs one sign-in attempt to completion.
    ///
    /// Success navigates to the dashboard. Failures set the user-facing
    /// error and are also returned. The state lock is never held across the
    /// sign-in call.
    pub async fn submit(&self) -> Result<(), LoginError> {
        {
            let mut state = self.state.lock().await;
            if state.is_loading {
                warn!("Sign-in triggered while another attempt is in flight");
                return Err(LoginError::Busy);
            }
            state.is_loading = true;
            state.error = None;
        }

        let options = SignInOptions {
            redirect: false,
            callback_url: self.callback_url.clone(),
        };

        let outcome =
            match tokio::time::timeout(self.timeout, self.client.sign_in(&self.provider, &options))
                .await
            {
                Err(_) => Err(LoginError::TimedOut(self.timeout)),
                Ok(Err(failure)) => Err(LoginError::Unexpected(failure.0)),
                Ok(Ok(response)) => match response.error {
                    Some(reason) => Err(LoginError::Reported(reason)),
                    None if response.ok => Ok(()),
                    None => Err(LoginError::Reported(format!(
                        "sign-in returned status {} without ok",
                        response.status
                    ))),
                },
            };

        let mut state = self.state.lock().await;
        state.is_loading = false;
        match &outcome {
            Ok(()) => {
                info!(provider = %self.provider, "Sign-in succeeded");
                state.error = None;
                drop(state);
                self.navigator.push(DASHBOARD_PATH);
            }
            Err(e) => {
                error!(error = %e, "Login error");
                state.error = e.user_message().map(str::to_string);
            }
        }

        outcome
    }
}
