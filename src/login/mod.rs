//! # Login Module
//!
//! The login form's sign-in action: in-flight and error state, the bounded
//! sign-in call, and navigation on success.

pub mod client;
pub mod initiator;


pub use client::HttpSignInClient;
pub use initiator::{LoginError, LoginInitiator, Navigator, SignInClient, UiState};
