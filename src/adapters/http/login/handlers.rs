//! Login handler.

use axum::extract::{Json, State};

use crate::adapters::http::{ApiError, AppState};

use super::dto::{LoginRequest, LoginResponse};

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = state
        .authenticator
        .login(request.username.trim(), &request.password)
        .await?;
    Ok(Json(LoginResponse::from(token)))
}
