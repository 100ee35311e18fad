// src/common/config.rs
//! Application configuration, read once at startup
//!
//! Every value has a development fallback so the demo runs with an empty
//! environment. Derivation logic never reads the environment itself; it is
//! handed an [`AuthConfig`].

use std::env;
use std::time::Duration;

use url::Url;

use super::dev_mode::AuthMode;

pub const MOCK_CLIENT_ID: &str = "mock-client-id";
pub const MOCK_CLIENT_SECRET: &str = "mock-client-secret";
pub const DEVELOPMENT_SECRET: &str = "development-secret-key";

/// Session and token validity window
pub const SESSION_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);
pub const SIGN_IN_PAGE: &str = "/login";
pub const ERROR_PAGE: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SIGN_IN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("test") => Environment::Test,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// OAuth client credentials for the Google provider
#[derive(Debug, Clone)]
pub struct ProviderCredentials {
    pub client_id: String,
    pub client_secret: String,
    /// False when the id fell back to the mock value
    pub configured: bool,
}

impl ProviderCredentials {
    pub fn mock() -> Self {
        Self {
            client_id: MOCK_CLIENT_ID.to_string(),
            client_secret: MOCK_CLIENT_SECRET.to_string(),
            configured: false,
        }
    }
}

/// Session cookie attributes
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub session_name: String,
    pub state_name: String,
    pub secure: bool,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub environment: Environment,
    pub mode: AuthMode,
    pub provider: ProviderCredentials,
    pub secret: String,
    /// True when `AUTH_SECRET` was unset and the development secret is used
    pub secret_is_default: bool,
    pub base_url: String,
    pub port: u16,
    pub session_max_age: Duration,
    pub sign_in_page: String,
    pub error_page: String,
    pub sign_in_timeout: Duration,
    pub debug: bool,
    pub cookies: CookieConfig,
}

impl AuthConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = Environment::parse(read("APP_ENV").as_deref());

        let client_id = read("GOOGLE_CLIENT_ID");
        let provider = ProviderCredentials {
            configured: client_id.is_some(),
            client_id: client_id.unwrap_or_else(|| MOCK_CLIENT_ID.to_string()),
            client_secret: read("GOOGLE_CLIENT_SECRET")
                .unwrap_or_else(|| MOCK_CLIENT_SECRET.to_string()),
        };

        let derived_mode = if environment.is_development() || !provider.configured {
            AuthMode::Mock
        } else {
            AuthMode::Live
        };
        let mode = match read("AUTH_MODE") {
            Some(raw) => AuthMode::parse(&raw).ok_or_else(|| {
                anyhow::anyhow!("AUTH_MODE must be 'mock' or 'live', got '{}'", raw)
            })?,
            None => derived_mode,
        };

        let configured_secret = read("AUTH_SECRET");
        let secret_is_default = configured_secret.is_none();
        let secret = configured_secret.unwrap_or_else(|| DEVELOPMENT_SECRET.to_string());

        let port = read("PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let base_url = read("BASE_URL").unwrap_or_else(|| format!("http://localhost:{}", port));
        Url::parse(&base_url)
            .map_err(|e| anyhow::anyhow!("BASE_URL '{}' is not a valid URL: {}", base_url, e))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let sign_in_timeout = read("SIGN_IN_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_SIGN_IN_TIMEOUT);

        Ok(Self {
            environment,
            mode,
            provider,
            secret,
            secret_is_default,
            base_url,
            port,
            session_max_age: SESSION_MAX_AGE,
            sign_in_page: SIGN_IN_PAGE.to_string(),
            error_page: ERROR_PAGE.to_string(),
            sign_in_timeout,
            debug: environment.is_development(),
            cookies: CookieConfig {
                session_name: "web-login.session-token".to_string(),
                state_name: "web-login.oauth-state".to_string(),
                secure: environment.is_production(),
            },
        })
    }

    /// Config for a fixed mode, used by tests and tooling
    pub fn for_mode(mode: AuthMode, base_url: &str) -> Self {
        Self {
            environment: Environment::Test,
            mode,
            provider: ProviderCredentials::mock(),
            secret: DEVELOPMENT_SECRET.to_string(),
            secret_is_default: true,
            base_url: base_url.trim_end_matches('/').to_string(),
            port: DEFAULT_PORT,
            session_max_age: SESSION_MAX_AGE,
            sign_in_page: SIGN_IN_PAGE.to_string(),
            error_page: ERROR_PAGE.to_string(),
            sign_in_timeout: DEFAULT_SIGN_IN_TIMEOUT,
            debug: false,
            cookies: CookieConfig {
                session_name: "web-login.session-token".to_string(),
                state_name: "web-login.oauth-state".to_string(),
                secure: false,
            },
        }
    }

    /// Production is signing sessions with the public development secret
    pub fn insecure_secret(&self) -> bool {
        self.secret_is_default && self.environment.is_production()
    }

    pub fn callback_url(&self, provider: &str) -> String {
        format!("{}/api/auth/callback/{}", self.base_url, provider)
    }

    /// Default tracing filter when RUST_LOG is unset
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}
