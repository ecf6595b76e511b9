//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the business calendar and error types
//! that form the vocabulary of the gym ledger domain.

mod auth;
mod calendar;
mod errors;
mod ids;
mod money;
mod timestamp;

pub use auth::{AccessToken, AuthError, AuthenticatedAdmin};
pub use calendar::{BusinessCalendar, MAX_UTC_OFFSET_MINUTES};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CheckInId, MemberId, PackageId, PaymentMethodId, PeriodId, TransactionId};
pub use money::Money;
pub use timestamp::Timestamp;
