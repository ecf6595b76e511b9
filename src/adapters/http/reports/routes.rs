//! Axum router configuration for report endpoints.

use axum::{routing::get, Router};

use crate::adapters::http::AppState;

use super::handlers::revenue_report;

/// Routes mounted at `/api/reports`.
pub fn report_routes() -> Router<AppState> {
    Router::new().route("/revenue", get(revenue_report))
}
