//! Page handlers

use axum::{
    extract::{Extension, Query},
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::debug;

use super::views;
use crate::auth::models::CallbackUrlQuery;
use crate::auth::{MaybeSession, RequireSession};
use crate::common::config::DASHBOARD_PATH;
use crate::common::AppState;
use crate::login::UiState;

/// GET /
pub async fn home_handler() -> Html<String> {
    Html(views::home_page())
}

/// GET /login
/// Sign-in page; also the error page, reached with `?error=<code>`.
/// Visitors who already have a session go straight to the dashboard.
pub async fn login_handler(
    Extension(state): Extension<Arc<AppState>>,
    MaybeSession(current): MaybeSession,
    Query(query): Query<CallbackUrlQuery>,
) -> Response {
    if current.is_some() && query.error.is_none() {
        debug!("Signed-in visitor on login page, redirecting to dashboard");
        return Redirect::to(DASHBOARD_PATH).into_response();
    }

    let ui_state = UiState::from_error_code(query.error.as_deref());
    let callback_url = query.callback_url.as_deref().unwrap_or(DASHBOARD_PATH);

    Html(views::login_page(&state.config, &ui_state, callback_url)).into_response()
}

/// GET /dashboard
pub async fn dashboard_handler(RequireSession(current): RequireSession) -> Html<String> {
    Html(views::dashboard_page(&current.session))
}
