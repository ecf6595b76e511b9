//! Membership-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidDuration | 422 |
//! | EmptyHistoryAmbiguity | 422 |
//! | MalformedPeriod | 422 |
//! | ValidationFailed | 400 |
//! | MemberNotFound / PackageNotFound / PaymentMethodNotFound | 404 |
//! | DayPassUnavailable | 404 |
//! | ProtectedPackage / DuplicateDayPass / PhoneConflict | 409 |
//! | NoActiveEntitlement | 402 |
//! | PersistenceFailure | 500 |

use thiserror::Error;

use crate::domain::foundation::{
    DomainError, ErrorCode, MemberId, PackageId, PaymentMethodId, PeriodId, Timestamp,
    ValidationError,
};

/// Membership-specific errors.
///
/// The first three variants are deterministic faults of the period engine and
/// are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MembershipError {
    /// Negative duration, or a non-integer where whole months are required.
    #[error("Invalid package duration: {0}")]
    InvalidDuration(String),

    /// An explicit start date was supplied for a member that already has history.
    #[error("Member {member_id} already has {existing_periods} period(s); an explicit start date only applies to a first enrollment")]
    EmptyHistoryAmbiguity {
        member_id: MemberId,
        existing_periods: usize,
    },

    /// A stored period ends before it starts.
    #[error("Period {period_id} is malformed: ends at {end} before it starts at {start}")]
    MalformedPeriod {
        period_id: PeriodId,
        start: String,
        end: String,
    },

    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("Package not found: {0}")]
    PackageNotFound(PackageId),

    #[error("Payment method not found: {0}")]
    PaymentMethodNotFound(PaymentMethodId),

    /// No active Day Pass package is configured.
    #[error("No active '{0}' package is configured")]
    DayPassUnavailable(String),

    /// Attempted a forbidden change to the Day Pass package.
    #[error("The Day Pass package cannot be {0}")]
    ProtectedPackage(String),

    #[error("An active Day Pass package already exists")]
    DuplicateDayPass,

    /// Several members share the phone number; the caller must choose.
    #[error("Phone {phone} matches {} existing members; choose one or force a new member", .candidates.len())]
    PhoneConflict {
        phone: String,
        candidates: Vec<MemberId>,
    },

    /// Check-in refused: no current entitlement and no purchase requested.
    #[error("Member {0} has no active membership")]
    NoActiveEntitlement(MemberId),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    /// Opaque failure from the persistence collaborator.
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),
}

impl MembershipError {
    pub fn invalid_duration(reason: impl Into<String>) -> Self {
        MembershipError::InvalidDuration(reason.into())
    }

    pub fn malformed_period(period_id: PeriodId, start: Timestamp, end: Timestamp) -> Self {
        MembershipError::MalformedPeriod {
            period_id,
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
        }
    }

    pub fn protected_package(action: impl Into<String>) -> Self {
        MembershipError::ProtectedPackage(action.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::InvalidDuration(_) => ErrorCode::InvalidDuration,
            MembershipError::EmptyHistoryAmbiguity { .. } => ErrorCode::EmptyHistoryAmbiguity,
            MembershipError::MalformedPeriod { .. } => ErrorCode::MalformedPeriod,
            MembershipError::MemberNotFound(_) => ErrorCode::MemberNotFound,
            MembershipError::PackageNotFound(_) => ErrorCode::PackageNotFound,
            MembershipError::PaymentMethodNotFound(_) => ErrorCode::PaymentMethodNotFound,
            MembershipError::DayPassUnavailable(_) => ErrorCode::DayPassUnavailable,
            MembershipError::ProtectedPackage(_) => ErrorCode::ProtectedPackage,
            MembershipError::DuplicateDayPass => ErrorCode::DuplicateDayPass,
            MembershipError::PhoneConflict { .. } => ErrorCode::PhoneConflict,
            MembershipError::NoActiveEntitlement(_) => ErrorCode::NoActiveEntitlement,
            MembershipError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MembershipError::PersistenceFailure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns true for faults in the caller's input or stored history, as
    /// opposed to infrastructure failures.
    pub fn is_client_fault(&self) -> bool {
        !matches!(self, MembershipError::PersistenceFailure(_))
    }
}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            // Raised by the unique index when two admins race to create one.
            ErrorCode::DuplicateDayPass => MembershipError::DuplicateDayPass,
            _ => MembershipError::PersistenceFailure(err.to_string()),
        }
    }
}

impl From<ValidationError> for MembershipError {
    fn from(err: ValidationError) -> Self {
        MembershipError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
