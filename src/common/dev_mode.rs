// src/common/dev_mode.rs
//! Mock/live authentication mode and the fixed demo identity
//! Mock mode substitutes the demo user for whatever the provider returns

use std::env;
use std::fmt;

use crate::auth::models::Identity;

/// Fixed demo identity used in mock mode
pub const DEMO_USER_ID: &str = "demo-user-123";
pub const DEMO_USER_NAME: &str = "Demo User";
pub const DEMO_USER_EMAIL: &str = "demo@example.com";
pub const DEMO_USER_IMAGE: &str =
    "https://ui-avatars.com/api/?name=Demo+User&background=4285f4&color=fff&size=128";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Real provider verification; identity comes from the provider
    Live,
    /// Provider output is replaced with the demo identity
    Mock,
}

impl AuthMode {
    pub fn is_mock(&self) -> bool {
        matches!(self, AuthMode::Mock)
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "mock" | "demo" => Some(AuthMode::Mock),
            "live" | "real" => Some(AuthMode::Live),
            _ => None,
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::Live => write!(f, "live"),
            AuthMode::Mock => write!(f, "mock"),
        }
    }
}

/// The demo user as an identity
pub fn demo_identity() -> Identity {
    Identity {
        id: DEMO_USER_ID.to_string(),
        display_name: Some(DEMO_USER_NAME.to_string()),
        email: Some(DEMO_USER_EMAIL.to_string()),
        avatar_url: Some(DEMO_USER_IMAGE.to_string()),
    }
}

/// Print auth mode status on startup
pub fn print_mode_status(mode: AuthMode, provider_configured: bool) {
    match mode {
        AuthMode::Mock => {
            println!("⚠️  🔓 MOCK AUTH MODE 🔓 ⚠️");
            println!("   Every sign-in resolves to the demo account");
            println!("   Demo User: {} ({})", DEMO_USER_NAME, DEMO_USER_EMAIL);
            println!(
                "   Provider: {}",
                if provider_configured {
                    "Google (real handshake, identity replaced)"
                } else {
                    "local mock handshake"
                }
            );
            println!("   ⚠️  DO NOT USE IN PRODUCTION ⚠️");
            println!();
        }
        AuthMode::Live => println!("🔒 Live mode - Google sign-in required"),
    }
}

/// CLI argument parsing for the auth mode
pub fn parse_mode_args<I>(args: I) -> Option<AuthMode>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    for arg in args {
        match arg.as_ref() {
            "--mock" | "--dev" | "--dev-mode" => return Some(AuthMode::Mock),
            "--live" | "--prod" | "--production" => return Some(AuthMode::Live),
            _ => {}
        }
    }

    None
}

/// Override the configured mode from process CLI args
pub fn apply_cli_override(mode: AuthMode) -> AuthMode {
    match parse_mode_args(env::args().skip(1)) {
        Some(cli_mode) => {
            println!("🔧 CLI override: AUTH_MODE = {}", cli_mode);
            cli_mode
        }
        None => mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode_values() {
        assert_eq!(AuthMode::parse("mock"), Some(AuthMode::Mock));
        assert_eq!(AuthMode::parse(" LIVE "), Some(AuthMode::Live));
        assert_eq!(AuthMode::parse("maybe"), None);
    }

    #[test]
    fn test_parse_mode_args_first_flag_wins() {
        assert_eq!(parse_mode_args(["--port", "--live", "--mock"]), Some(AuthMode::Live));
        assert_eq!(parse_mode_args(["--dev"]), Some(AuthMode::Mock));
        assert_eq!(parse_mode_args(Vec::<String>::new()), None);
    }

    #[test]
    fn test_demo_identity_fields() {
        let identity = demo_identity();
        assert_eq!(identity.id, DEMO_USER_ID);
        assert_eq!(identity.email.as_deref(), Some(DEMO_USER_EMAIL));
        assert_eq!(identity.avatar_url.as_deref(), Some(DEMO_USER_IMAGE));
    }
}
