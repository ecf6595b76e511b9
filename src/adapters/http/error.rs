//! Error responses for the REST API.
//!
//! Every failure is rendered as `{ "code", "message" }` JSON. Phone conflicts
//! also carry the candidate member ids under `details`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{AuthError, DomainError, ErrorCode};
use crate::domain::membership::MembershipError;

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Membership(MembershipError),
    Auth(AuthError),
    /// No bearer token on a protected route.
    Unauthenticated,
}

impl From<MembershipError> for ApiError {
    fn from(err: MembershipError) -> Self {
        ApiError::Membership(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Membership(MembershipError::from(err))
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Membership(err) => membership_status(err),
            ApiError::Auth(AuthError::ServiceUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Auth(_) | ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::Membership(MembershipError::PersistenceFailure(cause)) => {
                tracing::error!(error = %cause, "Request failed in persistence");
                ErrorResponse::new(ErrorCode::DatabaseError.to_string(), "Internal server error")
            }
            ApiError::Membership(err) => {
                let mut body = ErrorResponse::new(err.code().to_string(), err.to_string());
                if let MembershipError::PhoneConflict { candidates, .. } = err {
                    body.details = Some(serde_json::json!({ "candidates": candidates }));
                }
                body
            }
            ApiError::Auth(AuthError::ServiceUnavailable(cause)) => {
                tracing::error!(error = %cause, "Auth service unavailable");
                ErrorResponse::new(
                    ErrorCode::InternalError.to_string(),
                    "Authentication service unavailable",
                )
            }
            ApiError::Auth(err) => ErrorResponse::new(ErrorCode::Unauthorized.to_string(), err.to_string()),
            ApiError::Unauthenticated => {
                ErrorResponse::new(ErrorCode::Unauthorized.to_string(), "Authentication required")
            }
        }
    }
}

fn membership_status(err: &MembershipError) -> StatusCode {
    match err {
        MembershipError::InvalidDuration(_)
        | MembershipError::EmptyHistoryAmbiguity { .. }
        | MembershipError::MalformedPeriod { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        MembershipError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        MembershipError::MemberNotFound(_)
        | MembershipError::PackageNotFound(_)
        | MembershipError::PaymentMethodNotFound(_)
        | MembershipError::DayPassUnavailable(_) => StatusCode::NOT_FOUND,
        MembershipError::ProtectedPackage(_)
        | MembershipError::DuplicateDayPass
        | MembershipError::PhoneConflict { .. } => StatusCode::CONFLICT,
        MembershipError::NoActiveEntitlement(_) => StatusCode::PAYMENT_REQUIRED,
        MembershipError::PersistenceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{MemberId, PackageId};

    #[test]
    fn engine_faults_are_unprocessable() {
        let err = ApiError::from(MembershipError::invalid_duration("1.5"));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.body().code, "INVALID_DURATION");
    }

    #[test]
    fn not_found_and_conflicts() {
        assert_eq!(
            ApiError::from(MembershipError::PackageNotFound(PackageId::new())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(MembershipError::DuplicateDayPass).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(MembershipError::NoActiveEntitlement(MemberId::new())).status(),
            StatusCode::PAYMENT_REQUIRED
        );
    }

    #[test]
    fn phone_conflict_lists_candidates() {
        let candidate = MemberId::new();
        let body = ApiError::from(MembershipError::PhoneConflict {
            phone: "0811".to_string(),
            candidates: vec![candidate],
        })
        .body();
        assert_eq!(
            body.details,
            Some(serde_json::json!({ "candidates": [candidate.to_string()] }))
        );
    }

    #[test]
    fn persistence_details_are_hidden() {
        let err = ApiError::from(DomainError::new(ErrorCode::DatabaseError, "password=hunter2"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.body().message.contains("hunter2"));
    }

    #[test]
    fn auth_failures_are_unauthorized() {
        assert_eq!(ApiError::from(AuthError::TokenExpired).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Unauthenticated.body().code, "UNAUTHORIZED");
        assert_eq!(
            ApiError::from(AuthError::service_unavailable("bad key")).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
