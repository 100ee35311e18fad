//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Token and session shaping (mock/live policy)
//! - Post-authentication redirect resolution
//! - Google OAuth handshake and its local mock
//! - JWT session cookies and the session extractors for protected routes

pub mod cookies;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod models;
pub mod policy;
pub mod provider;
pub mod redirect;
pub mod routes;


pub use extractors::{CurrentSession, MaybeSession, RequireSession};
pub use policy::SessionPolicy;
pub use redirect::resolve_redirect;
pub use routes::auth_routes;
