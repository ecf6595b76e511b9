//! HTTP handlers for catalog endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;

use crate::adapters::http::{ApiError, AppState};
use crate::application::handlers::catalog::{
    CreatePackageCommand, CreatePaymentMethodCommand, DeletePackageCommand, UpdatePackageCommand,
};
use crate::domain::foundation::PackageId;
use crate::domain::membership::{MembershipPackage, PaymentMethod};

use super::dto::{
    CreatePackageRequest, CreatePaymentMethodRequest, IncludeInactiveParams, UpdatePackageRequest,
};

/// GET /api/packages
pub async fn list_packages(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> Result<Json<Vec<MembershipPackage>>, ApiError> {
    let packages = state
        .list_packages_handler()
        .handle(params.include_inactive)
        .await?;
    Ok(Json(packages))
}

/// POST /api/packages
pub async fn create_package(
    State(state): State<AppState>,
    Json(request): Json<CreatePackageRequest>,
) -> Result<(StatusCode, Json<MembershipPackage>), ApiError> {
    let cmd = CreatePackageCommand {
        package: request.try_into()?,
    };
    let package = state.create_package_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(package)))
}

/// PATCH /api/packages/:id
pub async fn update_package(
    State(state): State<AppState>,
    Path(package_id): Path<PackageId>,
    Json(request): Json<UpdatePackageRequest>,
) -> Result<Json<MembershipPackage>, ApiError> {
    let cmd = UpdatePackageCommand {
        package_id,
        update: request.try_into()?,
    };
    let package = state.update_package_handler().handle(cmd).await?;
    Ok(Json(package))
}

/// DELETE /api/packages/:id
pub async fn delete_package(
    State(state): State<AppState>,
    Path(package_id): Path<PackageId>,
) -> Result<StatusCode, ApiError> {
    state
        .delete_package_handler()
        .handle(DeletePackageCommand { package_id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/payment-methods
pub async fn list_payment_methods(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> Result<Json<Vec<PaymentMethod>>, ApiError> {
    let methods = state
        .list_payment_methods_handler()
        .handle(params.include_inactive)
        .await?;
    Ok(Json(methods))
}

/// POST /api/payment-methods
pub async fn create_payment_method(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentMethodRequest>,
) -> Result<(StatusCode, Json<PaymentMethod>), ApiError> {
    let method = state
        .create_payment_method_handler()
        .handle(CreatePaymentMethodCommand { name: request.name })
        .await?;
    Ok((StatusCode::CREATED, Json(method)))
}
