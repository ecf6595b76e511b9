//! Membership domain module.
//!
//! Members, packages, payments and the period engine that decides when a
//! member is entitled to use the gym.
//!
//! # Module Structure
//!
//! - `period` - Append-only period ledger entries
//! - `temporal_policy` - Bounds of newly purchased periods
//! - `continuity` - Days remaining and status across stitched periods
//! - `engagement` - Loyalty statistics over a full history
//! - `enrollment` - Resolving which member an enrollment applies to
//! - `member`, `package`, `transaction`, `payment_method`, `check_in` - Entities
//! - `rules` - Calendar and product settings shared by the engine

mod check_in;
mod continuity;
mod engagement;
mod enrollment;
mod errors;
mod member;
mod package;
mod payment_method;
pub(crate) mod period;
mod rules;
mod temporal_policy;
mod transaction;

pub use check_in::CheckIn;
pub use continuity::{Continuity, ContinuityResolver, ContinuityStatus};
pub use engagement::{EngagementAnalyzer, EngagementSummary, LoyaltyTier, PeriodGap};
pub use enrollment::EnrollmentIntent;
pub use errors::MembershipError;
pub use member::{normalize_phone, Member, MemberCache, MemberProfileUpdate, NewMemberProfile};
pub use package::{
    is_day_pass_label, MembershipPackage, NewPackage, PackageDuration, PackageUpdate,
    DAY_PASS_PACKAGE_NAME,
};
pub use payment_method::PaymentMethod;
pub use period::{
    sorted_by_start, validate_history, MembershipPeriod, PaymentLink, PeriodBounds, PeriodPhase,
    PeriodStatus,
};
pub use rules::{MembershipRules, DEFAULT_EXPIRING_SOON_DAYS};
pub use temporal_policy::{latest_end, TemporalPolicy};
pub use transaction::Transaction;
