//! Axum router configuration for login.

use axum::{routing::post, Router};

use crate::adapters::http::AppState;

use super::handlers::login;

/// Routes mounted at `/api/auth`. Unauthenticated.
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}
