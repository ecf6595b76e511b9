//! HTTP handlers for member endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;

use crate::adapters::http::{ApiError, AppState};
use crate::application::handlers::members::{
    DeleteMemberCommand, GetMemberQuery, GetMemberStatusQuery, GetMembershipHistoryQuery,
    RegisterMemberCommand, UpdateMemberCommand,
};
use crate::domain::foundation::MemberId;
use crate::domain::membership::Member;

use super::dto::{
    AddPeriodRequest, CheckInRequest, CheckInResponse, CreateMemberRequest, DayPassRequest,
    ListMembersParams, MemberCreatedResponse, MemberDetailResponse, MemberPageResponse,
    MemberStatusResponse, MembershipHistoryResponse, PeriodGrantedResponse, RenewRequest,
    SaleResponse, UpdateMemberRequest,
};

/// GET /api/members
pub async fn list_members(
    State(state): State<AppState>,
    Query(params): Query<ListMembersParams>,
) -> Result<Json<MemberPageResponse>, ApiError> {
    let page = state.list_members_handler().handle(params.into()).await?;
    Ok(Json(page.into()))
}

/// POST /api/members
///
/// Responds 201 when a member was registered and 200 when an existing one
/// was extended.
pub async fn create_member(
    State(state): State<AppState>,
    Json(request): Json<CreateMemberRequest>,
) -> Result<(StatusCode, Json<MemberCreatedResponse>), ApiError> {
    let response = match request.package_id {
        Some(package_id) => {
            let cmd = request.into_enrollment(package_id)?;
            MemberCreatedResponse::from(state.enroll_member_handler().handle(cmd).await?)
        }
        None => {
            let cmd = RegisterMemberCommand {
                profile: request.profile(),
            };
            MemberCreatedResponse::from(state.register_member_handler().handle(cmd).await?)
        }
    };

    let status = if response.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(response)))
}

/// GET /api/members/:id
pub async fn get_member(
    State(state): State<AppState>,
    Path(member_id): Path<MemberId>,
) -> Result<Json<MemberDetailResponse>, ApiError> {
    let result = state
        .get_member_handler()
        .handle(GetMemberQuery { member_id })
        .await?;
    Ok(Json(result.into()))
}

/// PATCH /api/members/:id
pub async fn update_member(
    State(state): State<AppState>,
    Path(member_id): Path<MemberId>,
    Json(request): Json<UpdateMemberRequest>,
) -> Result<Json<Member>, ApiError> {
    let member = state
        .update_member_handler()
        .handle(UpdateMemberCommand {
            member_id,
            update: request.into(),
        })
        .await?;
    Ok(Json(member))
}

/// DELETE /api/members/:id
pub async fn delete_member(
    State(state): State<AppState>,
    Path(member_id): Path<MemberId>,
) -> Result<StatusCode, ApiError> {
    state
        .delete_member_handler()
        .handle(DeleteMemberCommand { member_id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/members/:id/status
pub async fn member_status(
    State(state): State<AppState>,
    Path(member_id): Path<MemberId>,
) -> Result<Json<MemberStatusResponse>, ApiError> {
    let result = state
        .member_status_handler()
        .handle(GetMemberStatusQuery { member_id })
        .await?;
    Ok(Json(result.into()))
}

/// GET /api/members/:id/history
pub async fn membership_history(
    State(state): State<AppState>,
    Path(member_id): Path<MemberId>,
) -> Result<Json<MembershipHistoryResponse>, ApiError> {
    let result = state
        .membership_history_handler()
        .handle(GetMembershipHistoryQuery { member_id })
        .await?;
    Ok(Json(result.into()))
}

/// POST /api/members/:id/renew
pub async fn renew_membership(
    State(state): State<AppState>,
    Path(member_id): Path<MemberId>,
    Json(request): Json<RenewRequest>,
) -> Result<(StatusCode, Json<SaleResponse>), ApiError> {
    let cmd = request.into_command(member_id)?;
    let result = state.renew_membership_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(result.into())))
}

/// POST /api/members/:id/day-pass
pub async fn purchase_day_pass(
    State(state): State<AppState>,
    Path(member_id): Path<MemberId>,
    request: Option<Json<DayPassRequest>>,
) -> Result<(StatusCode, Json<SaleResponse>), ApiError> {
    let Json(request) = request.unwrap_or_default();
    let cmd = request.into_command(member_id)?;
    let result = state.purchase_day_pass_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(result.into())))
}

/// POST /api/members/:id/periods
pub async fn add_period(
    State(state): State<AppState>,
    Path(member_id): Path<MemberId>,
    Json(request): Json<AddPeriodRequest>,
) -> Result<(StatusCode, Json<PeriodGrantedResponse>), ApiError> {
    let result = state
        .add_period_handler()
        .handle(request.into_command(member_id))
        .await?;
    Ok((StatusCode::CREATED, Json(result.into())))
}

/// POST /api/members/:id/check-ins
///
/// The body is optional; without one no Day Pass is bought.
pub async fn check_in(
    State(state): State<AppState>,
    Path(member_id): Path<MemberId>,
    request: Option<Json<CheckInRequest>>,
) -> Result<(StatusCode, Json<CheckInResponse>), ApiError> {
    let Json(request) = request.unwrap_or_default();
    let cmd = request.into_command(member_id)?;
    let result = state.check_in_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(result.into())))
}
