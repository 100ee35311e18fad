// src/login_client.rs
//! Drives the login form's sign-in action against a running server and
//! prints the resulting session.
//!
//! Usage: `login_client [BASE_URL]`. Without an argument the server's
//! `BASE_URL` setting is used.

use dotenv::dotenv;
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

use web_login::common::AuthConfig;
use web_login::login::{HttpSignInClient, LoginInitiator, Navigator};

struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn push(&self, path: &str) {
        println!("➡️  Navigating to {}", path);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AuthConfig::from_env()?;
    let base_url = env::args().nth(1).unwrap_or(config.base_url);
    let timeout = config.sign_in_timeout;

    info!(%base_url, ?timeout, "Signing in");

    let client = HttpSignInClient::new(&base_url)?;
    let initiator = LoginInitiator::new(client.clone(), StdoutNavigator, timeout);

    if let Err(e) = initiator.submit().await {
        let state = initiator.state().await;
        println!("❌ {}", state.error.as_deref().unwrap_or("Sign-in failed"));
        return Err(e.into());
    }

    let session: serde_json::Value = client
        .http()
        .get(client.url("/api/auth/session")?)
        .send()
        .await?
        .json()
        .await?;

    println!("✅ Signed in");
    println!("{}", serde_json::to_string_pretty(&session)?);

    Ok(())
}
