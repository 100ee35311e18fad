//! Token and session shaping rules
//!
//! Both derivations are total: missing inputs pass the value through.

use crate::auth::models::{AccountMarker, Identity, Session, SessionUser, Token};
use crate::common::dev_mode::{demo_identity, AuthMode};

#[derive(Debug, Clone, Copy)]
pub struct SessionPolicy {
    mode: AuthMode,
}

impl SessionPolicy {
    pub fn new(mode: AuthMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Shapes the outgoing token.
    ///
    /// `identity` and `account` are only both present on first sign-in. In
    /// mock mode the demo identity replaces whatever the provider returned;
    /// in live mode only `id` and the avatar are taken from the identity.
    /// Anything else is a refresh and returns `token` unchanged.
    pub fn derive_token(
        &self,
        token: Token,
        identity: Option<&Identity>,
        account: Option<&AccountMarker>,
    ) -> Token {
        let (Some(identity), Some(_account)) = (identity, account) else {
            return token;
        };

        match self.mode {
            AuthMode::Mock => {
                let demo = demo_identity();
                Token {
                    id: Some(demo.id),
                    display_name: demo.display_name,
                    email: demo.email,
                    avatar_url: demo.avatar_url,
                    ..token
                }
            }
            AuthMode::Live => Token {
                id: Some(identity.id.clone()),
                avatar_url: identity.avatar_url.clone(),
                ..token
            },
        }
    }

    /// Projects the token onto the session's user. No token, no change.
    pub fn derive_session(&self, session: Session, token: Option<&Token>) -> Session {
        match token {
            Some(token) => Session {
                user: SessionUser {
                    id: token.id.clone(),
                    display_name: token.display_name.clone(),
                    email: token.email.clone(),
                    avatar_url: token.avatar_url.clone(),
                },
                ..session
            },
            None => session,
        }
    }
}
