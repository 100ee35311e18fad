//! Login demo gated by a Google sign-in, with a mock provider for local runs.

use axum::{extract::Extension, middleware, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod common;
pub mod logging_middleware;
pub mod login;
pub mod pages;

use common::AppState;

/// Composes the auth API and the pages behind the shared state
pub fn build_router(state: Arc<AppState>) -> Router {
    let debug = state.config.debug;

    let mut app = Router::new()
        // ====================================================================
        // AUTHENTICATION ROUTES
        // ====================================================================
        .merge(auth::auth_routes())
        // ====================================================================
        // PAGES (Home, Login, Dashboard)
        // ====================================================================
        .merge(pages::pages_routes());

    // Add request/response body logging in debug mode
    if debug {
        app = app.layer(middleware::from_fn(logging_middleware::log_request_response));
    }

    app.layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
