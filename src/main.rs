// src/main.rs
use dotenv::dotenv;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use web_login::build_router;
use web_login::common::dev_mode::{apply_cli_override, print_mode_status};
use web_login::common::{AppState, AuthConfig};

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // ========================================================================
    // ENVIRONMENT CONFIGURATION
    // ========================================================================

    let mut config = AuthConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter())),
        )
        .with_target(false)
        .init();

    if config.insecure_secret() {
        warn!("AUTH_SECRET is not set; production sessions are signed with the development secret");
    }

    // ========================================================================
    // AUTH MODE
    // ========================================================================

    config.mode = apply_cli_override(config.mode);
    print_mode_status(config.mode, config.provider.configured);

    info!(
        environment = ?config.environment,
        mode = %config.mode,
        base_url = %config.base_url,
        "Configuration loaded"
    );

    // ========================================================================
    // APPLICATION STATE
    // ========================================================================

    let port = config.port;
    let state = Arc::new(AppState::new(config));
    info!(provider = state.provider.id(), "Identity provider initialized");

    // ========================================================================
    // ROUTER COMPOSITION
    // ========================================================================

    let app = build_router(state);

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
