//! Authentication handlers

use axum::{
    extract::{Extension, Json, Path, Query},
    http::{header::SET_COOKIE, StatusCode},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::cookies::{read_cookie, SetCookie};
use super::extractors::MaybeSession;
use super::jwt::{decode_state, encode_state, encode_token, STATE_MAX_AGE_SECS};
use super::models::{
    CallbackUrlQuery, OAuthCallbackQuery, ProviderInfo, Session, SignInRequest, SignInResponse,
    Token,
};
use super::redirect::resolve_redirect;
use crate::common::config::DASHBOARD_PATH;
use crate::common::{safe_email_log, ApiError, AppState};

/// Error codes appended to the error page as `?error=`
pub const ERROR_CONFIGURATION: &str = "Configuration";
pub const ERROR_OAUTH_SIGNIN: &str = "OAuthSignin";
pub const ERROR_OAUTH_CALLBACK: &str = "OAuthCallback";

/// Authorization URL plus the state cookie that must accompany it
struct SignInStart {
    url: String,
    state_cookie: SetCookie,
}

fn start_sign_in(
    state: &AppState,
    provider: &str,
    callback_url: Option<&str>,
) -> Result<SignInStart, ApiError> {
    if provider != state.provider.id() {
        warn!(provider = %provider, "Sign-in requested for unknown provider");
        return Err(ApiError::NotFound(format!("unknown provider '{}'", provider)));
    }

    let nonce = Uuid::new_v4().simple().to_string();
    let callback_url = callback_url.unwrap_or(DASHBOARD_PATH);
    let state_jwt = encode_state(&nonce, callback_url, &state.config.secret)?;

    let url = state
        .provider
        .authorization_url(&nonce, &state.config.callback_url(provider));

    debug!(provider = %provider, callback_url = %callback_url, "Starting sign-in");

    Ok(SignInStart {
        url,
        state_cookie: SetCookie::state(&state_jwt, STATE_MAX_AGE_SECS, &state.config.cookies),
    })
}

fn error_page_redirect(state: &AppState, code: &str) -> Response {
    let target = format!("{}?error={}", state.config.error_page, urlencoding::encode(code));
    (
        AppendHeaders([(
            SET_COOKIE,
            SetCookie::clear_state(&state.config.cookies).header_value(),
        )]),
        Redirect::to(&target),
    )
        .into_response()
}

/// GET /api/auth/providers
/// Lists the configured providers
pub async fn providers_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<BTreeMap<String, ProviderInfo>> {
    let id = state.provider.id();
    let info = ProviderInfo {
        id: id.to_string(),
        name: state.provider.name().to_string(),
        kind: "oauth".to_string(),
        signin_url: format!("{}/api/auth/signin/{}", state.config.base_url, id),
        callback_url: state.config.callback_url(id),
    };

    let mut providers = BTreeMap::new();
    providers.insert(id.to_string(), info);
    Json(providers)
}

/// POST /api/auth/signin/:provider
/// Programmatic sign-in
///
/// # Request Body
/// ```json
/// { "callbackUrl": "/dashboard", "redirect": false }
/// ```
///
/// # Response
/// With `redirect: false`, JSON describing where to continue:
/// ```json
/// { "ok": true, "status": 200, "url": "<authorization url>" }
/// ```
/// Otherwise a 303 to the authorization URL.
pub async fn signin_json_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(provider): Path<String>,
    Json(payload): Json<SignInRequest>,
) -> Response {
    info!(provider = %provider, redirect = payload.redirect, "🔐 Received sign-in request");

    let start = match start_sign_in(&state, &provider, payload.callback_url.as_deref()) {
        Ok(start) => start,
        Err(e) => {
            let (status, code) = match e {
                ApiError::NotFound(_) => (StatusCode::BAD_REQUEST, ERROR_CONFIGURATION),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, ERROR_OAUTH_SIGNIN),
            };
            let body = SignInResponse {
                ok: false,
                status: status.as_u16(),
                url: None,
                error: Some(code.to_string()),
            };
            return (status, Json(body)).into_response();
        }
    };

    let cookie = AppendHeaders([(SET_COOKIE, start.state_cookie.header_value())]);
    if payload.redirect {
        return (cookie, Redirect::to(&start.url)).into_response();
    }

    let body = SignInResponse {
        ok: true,
        status: StatusCode::OK.as_u16(),
        url: Some(start.url),
        error: None,
    };
    (cookie, Json(body)).into_response()
}

/// GET /api/auth/signin/:provider?callbackUrl=
/// Browser sign-in: redirects straight to the provider
pub async fn signin_browser_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(provider): Path<String>,
    Query(query): Query<CallbackUrlQuery>,
) -> Response {
    info!(provider = %provider, "🔐 Browser sign-in started");

    match start_sign_in(&state, &provider, query.callback_url.as_deref()) {
        Ok(start) => (
            AppendHeaders([(SET_COOKIE, start.state_cookie.header_value())]),
            Redirect::to(&start.url),
        )
            .into_response(),
        Err(ApiError::NotFound(_)) => error_page_redirect(&state, ERROR_CONFIGURATION),
        Err(e) => {
            error!(error = %e, "Failed to start sign-in");
            error_page_redirect(&state, ERROR_OAUTH_SIGNIN)
        }
    }
}

/// GET /api/auth/callback/:provider?code=&state=
/// Completes the handshake, issues the session cookie and redirects to the
/// resolved callback URL
pub async fn oauth_callback_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(provider): Path<String>,
    Query(params): Query<OAuthCallbackQuery>,
    headers: axum::http::HeaderMap,
) -> Response {
    if provider != state.provider.id() {
        warn!(provider = %provider, "Callback for unknown provider");
        return error_page_redirect(&state, ERROR_CONFIGURATION);
    }

    if let Some(oauth_error) = &params.error {
        error!(oauth_error = %oauth_error, "Provider returned an error to the callback");
        return error_page_redirect(&state, ERROR_OAUTH_CALLBACK);
    }

    let state_claims = match read_cookie(&headers, &state.config.cookies.state_name)
        .ok_or_else(|| ApiError::Unauthorized("missing oauth state".to_string()))
        .and_then(|raw| decode_state(&raw, &state.config.secret))
    {
        Ok(claims) => claims,
        Err(e) => {
            warn!(error = %e, "OAuth state cookie missing or invalid");
            return error_page_redirect(&state, ERROR_OAUTH_CALLBACK);
        }
    };

    if params.state.as_deref() != Some(state_claims.nonce.as_str()) {
        warn!("OAuth state mismatch");
        return error_page_redirect(&state, ERROR_OAUTH_CALLBACK);
    }

    let Some(code) = params.code.as_deref() else {
        error!("No authorization code in OAuth callback");
        return error_page_redirect(&state, ERROR_OAUTH_CALLBACK);
    };

    let (identity, account) = match state
        .provider
        .exchange_code(code, &state.config.callback_url(&provider))
        .await
    {
        Ok(pair) => pair,
        Err(e) => {
            error!(error = %e, "Authorization code exchange failed");
            return error_page_redirect(&state, ERROR_OAUTH_CALLBACK);
        }
    };

    let token = state.policy.derive_token(
        Token::from_identity(&identity),
        Some(&identity),
        Some(&account),
    );

    let (jwt, _expires) =
        match encode_token(&token, &state.config.secret, state.config.session_max_age) {
            Ok(pair) => pair,
            Err(e) => {
                error!(error = %e, "Failed to issue session token");
                return error_page_redirect(&state, ERROR_OAUTH_CALLBACK);
            }
        };

    info!(
        user_id = ?token.id,
        email = %token.email.as_deref().map(safe_email_log).unwrap_or_default(),
        provider = %account.provider,
        mode = %state.policy.mode(),
        "User signed in"
    );

    let target = resolve_redirect(&state_claims.callback_url, &state.config.base_url);
    (
        AppendHeaders([
            (
                SET_COOKIE,
                SetCookie::session(&jwt, state.config.session_max_age, &state.config.cookies)
                    .header_value(),
            ),
            (
                SET_COOKIE,
                SetCookie::clear_state(&state.config.cookies).header_value(),
            ),
        ]),
        Redirect::to(&target),
    )
        .into_response()
}

/// GET /api/auth/session
/// Returns the current session and slides the token expiry forward
///
/// # Response
/// ```json
/// { "user": { "id": "...", "name": "...", "email": "...", "image": "..." }, "expires": "..." }
/// ```
/// or `{}` when signed out.
pub async fn session_handler(
    Extension(state): Extension<Arc<AppState>>,
    MaybeSession(current): MaybeSession,
) -> Result<Response, ApiError> {
    let Some(current) = current else {
        return Ok(Json(serde_json::json!({})).into_response());
    };

    let token = state.policy.derive_token(current.token, None, None);
    let (jwt, expires) = encode_token(&token, &state.config.secret, state.config.session_max_age)?;
    let session = state
        .policy
        .derive_session(Session::new(expires.to_rfc3339()), Some(&token));

    Ok((
        AppendHeaders([(
            SET_COOKIE,
            SetCookie::session(&jwt, state.config.session_max_age, &state.config.cookies)
                .header_value(),
        )]),
        Json(session),
    )
        .into_response())
}

/// POST /api/auth/signout
/// Clears the session cookie and redirects home, or to `callbackUrl` when
/// it resolves on this origin
pub async fn signout_handler(
    Extension(state): Extension<Arc<AppState>>,
    MaybeSession(current): MaybeSession,
    Query(query): Query<CallbackUrlQuery>,
) -> Response {
    if let Some(current) = current {
        info!(user_id = ?current.token.id, "User signed out");
    }

    let target = resolve_redirect(
        query.callback_url.as_deref().unwrap_or("/"),
        &state.config.base_url,
    );
    (
        AppendHeaders([(
            SET_COOKIE,
            SetCookie::clear_session(&state.config.cookies).header_value(),
        )]),
        Redirect::to(&target),
    )
        .into_response()
}
