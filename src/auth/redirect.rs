//! Post-authentication redirect resolution

use axum::http::HeaderValue;
use tracing::warn;
use url::Url;

use crate::common::config::DASHBOARD_PATH;

/// Decides where to send the user after an auth event.
///
/// Relative paths are joined onto `base_url`; absolute URLs are allowed only
/// when their origin equals the base origin. Anything else, including
/// unparseable input, falls back to the dashboard so a crafted callback URL
/// can never bounce the user to a foreign origin. The result is always a
/// valid `Location` header value.
pub fn resolve_redirect(requested: &str, base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let fallback = format!("{}{}", base, DASHBOARD_PATH);

    if !is_header_safe(requested) {
        warn!(requested = ?requested, "Rejected redirect target with control characters");
        return fallback;
    }

    if requested.starts_with('/') {
        return format!("{}{}", base, requested);
    }

    let same_origin = match (Url::parse(requested), Url::parse(base)) {
        (Ok(target), Ok(base_parsed)) => target.origin() == base_parsed.origin(),
        _ => false,
    };

    if same_origin {
        return requested.to_string();
    }

    warn!(requested = %requested, "Rejected cross-origin redirect target");
    fallback
}

/// No control characters (tab included) and accepted as a header value
fn is_header_safe(candidate: &str) -> bool {
    !candidate.chars().any(char::is_control) && HeaderValue::from_str(candidate).is_ok()
}
