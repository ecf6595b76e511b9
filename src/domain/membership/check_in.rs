//! Facility check-ins.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CheckInId, MemberId, PeriodId, Timestamp};

/// A recorded visit. Append-only; removed only with the member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    pub id: CheckInId,
    pub member_id: MemberId,
    pub checked_in_at: Timestamp,
    /// Period that entitled the visit, when one was identified.
    pub period_id: Option<PeriodId>,
}
