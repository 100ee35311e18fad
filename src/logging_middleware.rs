// src/logging_middleware.rs
//! Middleware for logging request and response bodies in debug mode

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, StatusCode, Uri,
    },
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::common::safe_token_log;

fn mask_pair(pair: &str) -> Option<String> {
    let (key, value) = pair.trim().split_once('=')?;
    Some(format!("{}={}", key, safe_token_log(value)))
}

/// Request cookies with their values masked
fn masked_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(mask_pair)
        .collect()
}

/// Response cookies with their values masked; attributes are dropped
fn masked_set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .filter_map(mask_pair)
        .collect()
}

/// Query parameters whose values are credentials
const SENSITIVE_QUERY_KEYS: [&str; 2] = ["code", "state"];

/// Request path and query with OAuth `code` and `state` values masked
fn masked_uri(uri: &Uri) -> String {
    let Some(query) = uri.query() else {
        return uri.path().to_string();
    };

    let query = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if SENSITIVE_QUERY_KEYS.contains(&key) => {
                format!("{}={}", key, safe_token_log(value))
            }
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", uri.path(), query)
}

/// Pretty-prints JSON bodies; other UTF-8 bodies are passed through.
/// HTML pages are summarized by length.
fn render_body(bytes: &[u8]) -> Option<String> {
    let body_str = std::str::from_utf8(bytes).ok()?;
    if body_str.trim_start().starts_with("<!DOCTYPE html>") {
        return Some(format!("<html, {} bytes>", bytes.len()));
    }
    match serde_json::from_str::<serde_json::Value>(body_str) {
        Ok(json) => {
            Some(serde_json::to_string_pretty(&json).unwrap_or_else(|_| body_str.to_string()))
        }
        Err(_) => Some(body_str.to_string()),
    }
}

/// Middleware to log requests and responses in debug mode.
/// Cookie values are masked so session tokens never reach the logs.
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    let (parts, body) = request.into_parts();

    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    debug!(
        method = %parts.method,
        uri = %masked_uri(&parts.uri),
        cookies = ?masked_cookies(&parts.headers),
        request_body = %render_body(&bytes).unwrap_or_default(),
        "📥 Request"
    );

    let request = Request::from_parts(parts, Body::from(bytes));
    let response = next.run(request).await;
    let (parts, body) = response.into_parts();

    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    debug!(
        status = %parts.status,
        set_cookies = ?masked_set_cookies(&parts.headers),
        response_body = %render_body(&bytes).unwrap_or_default(),
        "📤 Response"
    );

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_masked_cookies_hide_values() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static(
                "web-login.session-token=eyJhbGciOiJIUzI1NiJ9.payload.sig; theme=dark",
            ),
        );

        let masked = masked_cookies(&headers);
        assert_eq!(masked, vec!["web-login.session-token=eyJh....sig", "theme=***"]);
    }

    #[test]
    fn test_masked_set_cookies_drop_attributes() {
        let mut headers = HeaderMap::new();
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static(
                "web-login.session-token=abcdefghijkl; Path=/; Max-Age=86400; HttpOnly",
            ),
        );
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("web-login.oauth-state=; Path=/; Max-Age=0"),
        );

        let masked = masked_set_cookies(&headers);
        assert_eq!(
            masked,
            vec!["web-login.session-token=abcd...ijkl", "web-login.oauth-state=***"]
        );
    }

    #[test]
    fn test_masked_uri_hides_oauth_parameters() {
        let raw = "/api/auth/callback/google?code=4%2F0AbCdEfGhIjK&state=0123456789abcdef&scope=x";
        let uri: Uri = raw.parse().expect("valid uri");
        assert_eq!(
            masked_uri(&uri),
            "/api/auth/callback/google?code=4%2F...hIjK&state=0123...cdef&scope=x"
        );

        let uri: Uri = "/api/auth/callback/google?error=access_denied&state=short"
            .parse()
            .expect("valid uri");
        assert_eq!(
            masked_uri(&uri),
            "/api/auth/callback/google?error=access_denied&state=***"
        );

        let uri: Uri = "/dashboard".parse().expect("valid uri");
        assert_eq!(masked_uri(&uri), "/dashboard");
    }

    #[test]
    fn test_render_body() {
        assert_eq!(render_body(b"{\"ok\":true}").as_deref(), Some("{\n  \"ok\": true\n}"));
        assert_eq!(
            render_body(b"<!DOCTYPE html><p>x</p>").as_deref(),
            Some("<html, 23 bytes>")
        );
        assert_eq!(render_body(b"plain").as_deref(), Some("plain"));
        assert!(render_body(&[0xff, 0xfe]).is_none());
    }
}
