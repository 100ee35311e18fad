//! Tests for pages module
//!
//! These tests verify:
//! - Button and spinner markup
//! - Login form states (idle, loading, error, demo notice)
//! - Dashboard gating and rendering

#[cfg(test)]
mod tests {
    use super::super::components::*;
    use super::super::views;
    use crate::auth::jwt::encode_token;
    use crate::auth::models::{Session, SessionUser, Token};
    use crate::auth::provider::MockProvider;
    use crate::common::{AppState, AuthConfig, AuthMode};
    use crate::login::initiator::{SIGN_IN_FAILED_MESSAGE, UNEXPECTED_ERROR_MESSAGE};
    use crate::login::UiState;
    use axum::body::Body;
    use axum::http::{
        header::{COOKIE, LOCATION},
        Request, StatusCode,
    };
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    const BASE: &str = "http://localhost:8080";

    #[test]
    fn test_button_variants_and_disabled() {
        let primary = Button::new(ButtonVariant::Primary).render("Go");
        assert_eq!(primary, r#"<button type="submit" class="btn btn-primary">Go</button>"#);

        let danger = Button::new(ButtonVariant::Danger).disabled(true).render("<Logout>");
        assert!(danger.contains("btn-danger btn-disabled"));
        assert!(danger.contains(" disabled"));
        assert!(danger.contains("&lt;Logout&gt;"));
    }

    #[test]
    fn test_loading_sizes() {
        assert!(loading(LoadingSize::Small, "").contains("spinner-sm"));
        assert!(loading(LoadingSize::Medium, "").contains("spinner-md"));
        let large = loading(LoadingSize::Large, "mt-4");
        assert!(large.contains("spinner-lg"));
        assert!(large.contains(r#"role="status""#));
        assert!(large.contains("loading mt-4"));
    }

    #[test]
    fn test_login_form_idle_in_mock_mode() {
        let config = AuthConfig::for_mode(AuthMode::Mock, BASE);
        let html = views::login_form(&config, &UiState::default(), "/dashboard");

        assert!(html.contains("Login with Google"));
        assert!(html.contains(r#"action="/api/auth/signin/google""#));
        assert!(html.contains(r#"name="callbackUrl" value="/dashboard""#));
        assert!(html.contains("demo@example.com"));
        assert!(!html.contains(r#"role="alert""#));
        assert!(!html.contains("spinner"));
    }

    #[test]
    fn test_login_form_loading_and_error_states() {
        let config = AuthConfig::for_mode(AuthMode::Live, BASE);

        let loading_state = UiState {
            is_loading: true,
            error: None,
        };
        let html = views::login_form(&config, &loading_state, "/dashboard");
        assert!(html.contains("Signing in..."));
        assert!(html.contains("spinner-sm"));
        assert!(html.contains(" disabled"));
        assert!(!html.contains("demo@example.com"));

        let error_state = UiState {
            is_loading: false,
            error: Some(UNEXPECTED_ERROR_MESSAGE.to_string()),
        };
        let html = views::login_form(&config, &error_state, "/dashboard");
        assert!(html.contains(r#"role="alert""#));
        assert!(html.contains(UNEXPECTED_ERROR_MESSAGE));
    }

    #[test]
    fn test_login_form_escapes_callback_url() {
        let config = AuthConfig::for_mode(AuthMode::Mock, BASE);
        let html = views::login_form(&config, &UiState::default(), r#""><script>"#);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_dashboard_escapes_user_fields() {
        let session = Session {
            user: SessionUser {
                id: Some("u1".to_string()),
                display_name: Some("<b>Mallory</b>".to_string()),
                email: Some("m@example.com".to_string()),
                avatar_url: None,
            },
            expires: String::new(),
        };

        let html = views::dashboard_page(&session);
        assert!(html.contains("&lt;b&gt;Mallory&lt;/b&gt;"));
        assert!(html.contains("m@example.com"));
        assert!(html.contains(r#"action="/api/auth/signout""#));
        assert!(html.contains("User Profile"));
        assert!(!html.contains("<img"));
    }

    fn test_app(mode: AuthMode) -> (axum::Router, Arc<AppState>) {
        let config = AuthConfig::for_mode(mode, BASE);
        let state = Arc::new(AppState::with_provider(config, Arc::new(MockProvider::new())));
        (crate::build_router(state.clone()), state)
    }

    async fn get(
        app: &axum::Router,
        uri: &str,
        cookie: Option<&str>,
    ) -> axum::http::Response<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        app.clone()
            .oneshot(builder.body(Body::empty()).expect("request builds"))
            .await
            .expect("router responds")
    }

    async fn body_text(response: axum::http::Response<Body>) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body reads")
            .to_bytes();
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    fn session_cookie(state: &AppState, token: &Token) -> String {
        let (jwt, _) = encode_token(token, &state.config.secret, state.config.session_max_age)
            .expect("token encodes");
        format!("{}={}", state.config.cookies.session_name, jwt)
    }

    #[tokio::test]
    async fn test_home_links_to_login() {
        let (app, _) = test_app(AuthMode::Mock);
        let response = get(&app, "/", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(r#"href="/login""#));
    }

    #[tokio::test]
    async fn test_dashboard_requires_session() {
        let (app, _) = test_app(AuthMode::Mock);

        let response = get(&app, "/dashboard", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[LOCATION].to_str().expect("ascii"),
            "/login?callbackUrl=%2Fdashboard"
        );
    }

    #[tokio::test]
    async fn test_dashboard_rejects_forged_token() {
        let (app, state) = test_app(AuthMode::Mock);
        let forged = AppState::with_provider(
            AuthConfig {
                secret: "someone-elses-secret".to_string(),
                ..AuthConfig::for_mode(AuthMode::Mock, BASE)
            },
            Arc::new(MockProvider::new()),
        );
        let token = Token {
            id: Some("demo-user-123".to_string()),
            ..Token::default()
        };
        let cookie = session_cookie(&forged, &token);
        assert!(cookie.starts_with(&state.config.cookies.session_name));

        let response = get(&app, "/dashboard", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_dashboard_renders_signed_in_user() {
        let (app, state) = test_app(AuthMode::Mock);
        let token = Token {
            id: Some("demo-user-123".to_string()),
            display_name: Some("Demo User".to_string()),
            email: Some("demo@example.com".to_string()),
            avatar_url: Some("https://img.example/demo.png".to_string()),
            sub: None,
        };
        let cookie = session_cookie(&state, &token);

        let response = get(&app, "/dashboard", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Demo User"));
        assert!(html.contains("demo@example.com"));
        assert!(html.contains(r#"src="https://img.example/demo.png""#));
        assert!(html.contains("Logout"));
    }

    #[tokio::test]
    async fn test_login_page_shows_error_from_query() {
        let (app, _) = test_app(AuthMode::Mock);

        let response = get(&app, "/login?error=OAuthCallback", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(SIGN_IN_FAILED_MESSAGE));
        assert!(html.contains("Welcome"));
    }

    #[tokio::test]
    async fn test_login_page_forwards_signed_in_visitor() {
        let (app, state) = test_app(AuthMode::Mock);
        let token = Token {
            id: Some("demo-user-123".to_string()),
            ..Token::default()
        };
        let cookie = session_cookie(&state, &token);

        let response = get(&app, "/login", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION].to_str().expect("ascii"), "/dashboard");
    }
}
