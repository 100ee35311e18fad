// Common module - shared types and utilities across all modules

pub mod config;
pub mod dev_mode;
pub mod error;
pub mod helpers;
pub mod state;

// Re-export commonly used types for convenience
pub use config::AuthConfig;
pub use dev_mode::AuthMode;
pub use error::ApiError;
pub use helpers::{escape_html, safe_email_log, safe_token_log};
pub use state::AppState;
