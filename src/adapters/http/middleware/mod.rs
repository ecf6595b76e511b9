//! HTTP middleware for axum.
//!
//! - `auth` - Bearer token validation for protected routes

pub mod auth;

pub use auth::{require_admin, AuthState};
