//! HTTP adapter for admin login.
//!
//! - `POST /api/auth/login` - Exchange admin credentials for a bearer token

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::login_routes;
