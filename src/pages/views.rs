//! Server-rendered pages

use super::components::{loading, Button, ButtonVariant, LoadingSize};
use crate::auth::models::Session;
use crate::common::dev_mode::DEMO_USER_EMAIL;
use crate::common::{escape_html, AuthConfig};
use crate::login::UiState;

const STYLES: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0; background: #f9fafb; color: #111827; }
main { min-height: 100vh; display: flex; flex-direction: column; align-items: center; justify-content: center; padding: 24px; }
.card { background: white; padding: 32px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); border: 1px solid #e5e7eb; }
.muted { color: #6b7280; }
.small { font-size: 0.875rem; }
.btn { padding: 8px 16px; border-radius: 6px; font-weight: 500; border: none; cursor: pointer; }
.btn-primary { background: #3b82f6; color: white; }
.btn-secondary { background: #6b7280; color: white; }
.btn-danger { background: #ef4444; color: white; }
.btn-disabled { opacity: 0.5; cursor: not-allowed; }
.btn-google { width: 100%; display: flex; align-items: center; justify-content: center; gap: 8px; background: white; color: #374151; border: 1px solid #d1d5db; }
.link-button { display: inline-block; padding: 12px 24px; border-radius: 8px; background: #3b82f6; color: white; text-decoration: none; }
.alert { padding: 16px; background: #fef2f2; border: 1px solid #fecaca; border-radius: 6px; color: #991b1b; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 24px; }
.tile { background: #f9fafb; padding: 24px; border-radius: 8px; }
.avatar { width: 48px; height: 48px; border-radius: 50%; }
.loading { display: flex; justify-content: center; align-items: center; }
.spinner { border: 2px solid #d1d5db; border-top-color: #3b82f6; border-radius: 50%; animation: spin 1s linear infinite; }
.spinner-sm { width: 16px; height: 16px; }
.spinner-md { width: 32px; height: 32px; }
.spinner-lg { width: 48px; height: 48px; }
.sr-only { position: absolute; width: 1px; height: 1px; overflow: hidden; clip: rect(0,0,0,0); }
@keyframes spin { to { transform: rotate(360deg); } }
"#;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{}</title>
    <style>{}</style>
</head>
<body>
{}
</body>
</html>
"#,
        escape_html(title),
        STYLES,
        body
    )
}

pub fn home_page() -> String {
    layout(
        "Web Login Demo",
        r#"<main>
    <div style="text-align: center">
        <h1>Web Login Demo</h1>
        <p class="muted">Authentication demonstration with a Google sign-in and a mock mode</p>
        <a href="/login" class="link-button">Go to Login</a>
        <p class="muted small">This is a demo application showing authentication capabilities</p>
    </div>
</main>"#,
    )
}

/// The login card: error alert, sign-in button and the demo notice
pub fn login_form(config: &AuthConfig, state: &UiState, callback_url: &str) -> String {
    let alert = match &state.error {
        Some(message) => format!(
            r#"<div class="alert" role="alert" aria-live="polite"><p class="small">{}</p></div>"#,
            escape_html(message)
        ),
        None => String::new(),
    };

    let button = Button::new(ButtonVariant::Secondary)
        .class("btn-google")
        .disabled(state.is_loading)
        .aria_label("Sign in with Google");
    let button = if state.is_loading {
        button
            .title("Signing in...")
            .render_html(&format!("{}Signing in...", loading(LoadingSize::Small, "")))
    } else {
        button
            .title("Click to sign in with Google")
            .render("Login with Google")
    };

    let demo_notice = if config.mode.is_mock() {
        format!(
            r#"<div class="muted small" style="margin-top: 24px; text-align: center">
            <p>This is a demo with mock authentication</p>
            <p>Demo Account: {} (no real login required)</p>
        </div>"#,
            DEMO_USER_EMAIL
        )
    } else {
        String::new()
    };

    format!(
        r#"<div class="card">
        {}
        <form method="get" action="/api/auth/signin/google">
            <input type="hidden" name="callbackUrl" value="{}">
            {}
        </form>
        {}
    </div>"#,
        alert,
        escape_html(callback_url),
        button,
        demo_notice
    )
}

pub fn login_page(config: &AuthConfig, state: &UiState, callback_url: &str) -> String {
    let body = format!(
        r##"<main id="main-content">
    <div style="width: 100%; max-width: 28rem">
        <div style="text-align: center; margin-bottom: 32px">
            <h1>Welcome</h1>
            <p class="muted">Sign in to access your dashboard</p>
        </div>
        {}
        <div class="muted small" style="text-align: center; margin-top: 24px">
            <p>By signing in, you agree to our <a href="#">Terms of Service</a></p>
        </div>
    </div>
</main>"##,
        login_form(config, state, callback_url)
    );

    layout("Login | Web Login Demo", &body)
}

pub fn dashboard_page(session: &Session) -> String {
    let user = &session.user;
    let name = user.display_name.as_deref().unwrap_or("Signed-in user");
    let avatar = match &user.avatar_url {
        Some(url) => format!(
            r#"<img class="avatar" src="{}" alt="{}">"#,
            escape_html(url),
            escape_html(name)
        ),
        None => String::new(),
    };
    let email = user
        .email
        .as_deref()
        .map(|e| format!(r#"<p class="muted small">{}</p>"#, escape_html(e)))
        .unwrap_or_default();

    let logout = Button::new(ButtonVariant::Danger).render("Logout");

    let body = format!(
        r#"<main>
    <div style="width: 100%; max-width: 56rem">
        <div style="text-align: center; margin-bottom: 32px">
            <h1>Dashboard</h1>
            <p class="muted">Welcome to your protected dashboard</p>
        </div>
        <div class="card">
            <div style="display: flex; align-items: center; gap: 16px; margin-bottom: 24px">
                {}
                <div><p><strong>{}</strong></p>{}</div>
            </div>
            <div class="grid">
                <div class="tile"><h3>User Profile</h3><p class="muted">View and manage your profile information</p></div>
                <div class="tile"><h3>Settings</h3><p class="muted">Configure your application preferences</p></div>
                <div class="tile"><h3>Activity</h3><p class="muted">View your recent activity and history</p></div>
            </div>
            <div style="margin-top: 32px; text-align: center">
                <a href="/" class="link-button" style="background: #6b7280; margin-right: 16px">Back to Home</a>
                <form method="post" action="/api/auth/signout" style="display: inline">{}</form>
            </div>
        </div>
    </div>
</main>"#,
        avatar,
        escape_html(name),
        email,
        logout
    );

    layout("Dashboard | Web Login Demo", &body)
}
