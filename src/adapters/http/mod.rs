//! HTTP adapter - REST API for the front desk and admin console.
//!
//! Each resource has its own module with DTOs, handlers and routes. All of
//! them share one [`AppState`] and report failures through [`ApiError`].

pub mod catalog;
mod error;
pub mod login;
pub mod members;
pub mod middleware;
pub mod reports;
mod router;
mod state;

pub use error::{ApiError, ErrorResponse};
pub use router::{app_router, RouterConfig};
pub use state::AppState;
