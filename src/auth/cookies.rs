//! Session and OAuth state cookies

use axum::http::{header::COOKIE, HeaderMap};

use crate::common::config::CookieConfig;

/// Attributes of one `Set-Cookie` header
#[derive(Debug, Clone)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub max_age_secs: i64,
    pub path: &'static str,
    pub http_only: bool,
    pub same_site: &'static str,
    pub secure: bool,
}

impl SetCookie {
    fn auth_cookie(name: &str, value: &str, max_age_secs: i64, config: &CookieConfig) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            max_age_secs,
            path: "/",
            http_only: true,
            same_site: "Lax",
            secure: config.secure,
        }
    }

    pub fn session(value: &str, max_age: std::time::Duration, config: &CookieConfig) -> Self {
        let max_age_secs = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);
        Self::auth_cookie(&config.session_name, value, max_age_secs, config)
    }

    pub fn clear_session(config: &CookieConfig) -> Self {
        Self::auth_cookie(&config.session_name, "", 0, config)
    }

    pub fn state(value: &str, max_age_secs: i64, config: &CookieConfig) -> Self {
        Self::auth_cookie(&config.state_name, value, max_age_secs, config)
    }

    pub fn clear_state(config: &CookieConfig) -> Self {
        Self::auth_cookie(&config.state_name, "", 0, config)
    }

    /// Serialized `Set-Cookie` header value
    pub fn header_value(&self) -> String {
        let mut out = format!(
            "{}={}; Path={}; Max-Age={}",
            self.name, self.value, self.path, self.max_age_secs
        );
        if self.http_only {
            out.push_str("; HttpOnly");
        }
        out.push_str("; SameSite=");
        out.push_str(self.same_site);
        if self.secure {
            out.push_str("; Secure");
        }
        out
    }
}

/// Value of cookie `name` from the request's `Cookie` headers
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use std::time::Duration;

    fn cookie_config(secure: bool) -> CookieConfig {
        CookieConfig {
            session_name: "web-login.session-token".to_string(),
            state_name: "web-login.oauth-state".to_string(),
            secure,
        }
    }

    #[test]
    fn test_session_cookie_attributes() {
        let header = SetCookie::session("abc", Duration::from_secs(86_400), &cookie_config(false))
            .header_value();
        assert_eq!(
            header,
            "web-login.session-token=abc; Path=/; Max-Age=86400; HttpOnly; SameSite=Lax"
        );
    }

    #[test]
    fn test_session_cookie_secure_in_production() {
        let header = SetCookie::session("abc", Duration::from_secs(60), &cookie_config(true))
            .header_value();
        assert!(header.ends_with("; SameSite=Lax; Secure"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let header = SetCookie::clear_session(&cookie_config(false)).header_value();
        assert!(header.starts_with("web-login.session-token=; Path=/; Max-Age=0"));
    }

    #[test]
    fn test_read_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark; other=1"));
        headers.append(
            COOKIE,
            HeaderValue::from_static("web-login.session-token=tok.en.value"),
        );

        assert_eq!(
            read_cookie(&headers, "web-login.session-token").as_deref(),
            Some("tok.en.value")
        );
        assert_eq!(read_cookie(&headers, "theme").as_deref(), Some("dark"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_read_cookie_ignores_empty_value() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("web-login.session-token="));
        assert_eq!(read_cookie(&headers, "web-login.session-token"), None);
    }
}
