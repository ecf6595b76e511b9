//! Error types shared by every layer.
//!
//! `ValidationError` comes out of value-object constructors. `DomainError` is
//! what ports return, tagged with a stable `ErrorCode` the HTTP layer echoes.

use std::fmt;

use thiserror::Error;

/// Rejected input for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Machine-readable error codes returned in API error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationFailed,
    InvalidDuration,
    EmptyHistoryAmbiguity,
    MalformedPeriod,

    MemberNotFound,
    PackageNotFound,
    PaymentMethodNotFound,
    DayPassUnavailable,

    ProtectedPackage,
    DuplicateDayPass,
    PhoneConflict,

    NoActiveEntitlement,
    Unauthorized,

    DatabaseError,
    InternalError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidDuration => "INVALID_DURATION",
            ErrorCode::EmptyHistoryAmbiguity => "EMPTY_HISTORY_AMBIGUITY",
            ErrorCode::MalformedPeriod => "MALFORMED_PERIOD",
            ErrorCode::MemberNotFound => "MEMBER_NOT_FOUND",
            ErrorCode::PackageNotFound => "PACKAGE_NOT_FOUND",
            ErrorCode::PaymentMethodNotFound => "PAYMENT_METHOD_NOT_FOUND",
            ErrorCode::DayPassUnavailable => "DAY_PASS_UNAVAILABLE",
            ErrorCode::ProtectedPackage => "PROTECTED_PACKAGE",
            ErrorCode::DuplicateDayPass => "DUPLICATE_DAY_PASS",
            ErrorCode::PhoneConflict => "PHONE_CONFLICT",
            ErrorCode::NoActiveEntitlement => "NO_ACTIVE_ENTITLEMENT",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by a port implementation.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Wraps a storage driver error with what was being attempted.
    pub fn database(context: &str, cause: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, format!("{}: {}", context, cause))
    }
}
