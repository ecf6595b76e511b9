//! HTTP handlers for report endpoints.

use axum::extract::{Json, Query, State};
use serde::Deserialize;

use crate::adapters::http::{ApiError, AppState};
use crate::application::handlers::reports::{GetRevenueReportQuery, RevenueReport};
use crate::domain::foundation::Timestamp;

/// RFC 3339 bounds. `to` is exclusive.
#[derive(Debug, Clone, Deserialize)]
pub struct RevenueParams {
    pub from: Timestamp,
    pub to: Timestamp,
}

/// GET /api/reports/revenue
pub async fn revenue_report(
    State(state): State<AppState>,
    Query(params): Query<RevenueParams>,
) -> Result<Json<RevenueReport>, ApiError> {
    let report = state
        .revenue_report_handler()
        .handle(GetRevenueReportQuery {
            from: params.from,
            to: params.to,
        })
        .await?;
    Ok(Json(report))
}
