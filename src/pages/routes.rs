//! Page routes

use axum::{routing::get, Router};

use super::handlers;

/// Creates and returns the page router
///
/// # Routes
/// - `GET /` - Home
/// - `GET /login` - Sign-in and sign-in error page
/// - `GET /dashboard` - Protected dashboard
pub fn pages_routes() -> Router {
    Router::new()
        .route("/", get(handlers::home_handler))
        .route("/login", get(handlers::login_handler))
        .route("/dashboard", get(handlers::dashboard_handler))
}
