//! Session extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::debug;

use super::cookies::read_cookie;
use super::jwt::{decode_token, expires_at};
use super::models::{Session, Token};
use crate::common::{safe_email_log, ApiError, AppState};

/// A verified session token and the session derived from it
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub token: Token,
    pub session: Session,
}

/// Resolves the session cookie, if any. Invalid or expired tokens count as
/// signed out.
pub fn load_session(parts: &Parts, state: &AppState) -> Option<CurrentSession> {
    let raw = read_cookie(&parts.headers, &state.config.cookies.session_name)?;
    let claims = decode_token(&raw, &state.config.secret).ok()?;

    let session = Session::new(expires_at(&claims).to_rfc3339());
    let session = state.policy.derive_session(session, Some(&claims.token));

    debug!(
        user_id = ?claims.token.id,
        email = %claims.token.email.as_deref().map(safe_email_log).unwrap_or_default(),
        "Session resolved from cookie"
    );

    Some(CurrentSession {
        token: claims.token,
        session,
    })
}

async fn app_state<S>(parts: &mut Parts, state: &S) -> Result<Arc<AppState>, ApiError>
where
    S: Send + Sync,
{
    let Extension(app_state): Extension<Arc<AppState>> =
        Extension::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;
    Ok(app_state)
}

/// Session if signed in, `None` otherwise. Never rejects for a missing session.
#[derive(Debug)]
pub struct MaybeSession(pub Option<CurrentSession>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts, state).await?;
        Ok(MaybeSession(load_session(parts, &app_state)))
    }
}

/// Gate for protected pages. Visitors without a session are sent to the
/// sign-in page with the requested path as `callbackUrl`.
#[derive(Debug)]
pub struct RequireSession(pub CurrentSession);

#[async_trait]
impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match load_session(parts, &app_state) {
            Some(current) => Ok(RequireSession(current)),
            None => {
                let requested = parts
                    .uri
                    .path_and_query()
                    .map(|pq| pq.as_str())
                    .unwrap_or("/");
                debug!(requested = %requested, "No session, redirecting to sign-in page");
                let target = format!(
                    "{}?callbackUrl={}",
                    app_state.config.sign_in_page,
                    urlencoding::encode(requested)
                );
                Err(Redirect::to(&target).into_response())
            }
        }
    }
}
