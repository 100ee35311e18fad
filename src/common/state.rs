// Application state shared across all modules

use std::sync::Arc;

use crate::auth::policy::SessionPolicy;
use crate::auth::provider::{GoogleProvider, IdentityProvider, MockProvider};
use crate::common::config::AuthConfig;

/// Configuration plus the collaborators built from it. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AuthConfig>,
    pub policy: SessionPolicy,
    pub provider: Arc<dyn IdentityProvider>,
}

impl AppState {
    /// Picks the real Google handshake when credentials are configured,
    /// otherwise the local mock handshake
    pub fn new(config: AuthConfig) -> Self {
        let provider: Arc<dyn IdentityProvider> = if config.provider.configured {
            Arc::new(GoogleProvider::new(config.provider.clone()))
        } else {
            Arc::new(MockProvider::new())
        };
        Self::with_provider(config, provider)
    }

    pub fn with_provider(config: AuthConfig, provider: Arc<dyn IdentityProvider>) -> Self {
        let policy = SessionPolicy::new(config.mode);
        Self {
            config: Arc::new(config),
            policy,
            provider,
        }
    }
}
