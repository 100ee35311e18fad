//! # Pages Module
//!
//! Home, login and dashboard views plus the button and spinner primitives
//! they are built from.

pub mod components;
pub mod handlers;
pub mod routes;
pub mod views;

#[cfg(test)]
mod tests;

pub use routes::pages_routes;
