//! Enrollment handlers.
//!
//! Every path that appends a period to the ledger:
//!
//! ## Commands
//! - Enrolling a member from the front-desk form
//! - Renewing with any package
//! - Buying a Day Pass
//! - Granting a period without payment
//! - Checking in, optionally buying a Day Pass on the spot

mod add_period;
mod check_in;
mod enroll_member;
mod ledger_plan;
mod purchase_day_pass;
mod renew_membership;

pub use add_period::{AddPeriodCommand, AddPeriodHandler, AddPeriodResult};
pub use check_in::{CheckInCommand, CheckInHandler, CheckInResult, PurchasedPass};
pub use enroll_member::{EnrollMemberCommand, EnrollMemberHandler, EnrollMemberResult};
pub use purchase_day_pass::{PurchaseDayPassCommand, PurchaseDayPassHandler, PurchaseDayPassResult};
pub use renew_membership::{RenewMembershipCommand, RenewMembershipHandler, RenewMembershipResult};
