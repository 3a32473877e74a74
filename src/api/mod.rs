//! HTTP API surface.
//!
//! Thin plumbing around the intent pipeline: one assistant endpoint,
//! login-by-email session issuance, an admin owner listing, and health.

mod admin;
mod assistant;
mod auth;
mod routes;
mod types;

pub use routes::{serve, AppState};
