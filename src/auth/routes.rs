//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `GET /api/auth/providers` - Configured providers
/// - `POST /api/auth/signin/:provider` - Programmatic sign-in
/// - `GET /api/auth/signin/:provider` - Browser sign-in redirect
/// - `GET /api/auth/callback/:provider` - OAuth callback
/// - `GET /api/auth/session` - Current session
/// - `POST /api/auth/signout` - Clear the session cookie
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/auth/providers", get(handlers::providers_handler))
        .route(
            "/api/auth/signin/:provider",
            post(handlers::signin_json_handler).get(handlers::signin_browser_handler),
        )
        .route(
            "/api/auth/callback/:provider",
            get(handlers::oauth_callback_handler),
        )
        .route("/api/auth/session", get(handlers::session_handler))
        .route("/api/auth/signout", post(handlers::signout_handler))
}
