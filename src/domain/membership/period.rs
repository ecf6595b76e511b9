//! Membership periods: the authoritative entitlement ledger.
//!
//! A period is appended at enrollment, renewal, administrative insertion, or a
//! day-pass purchase, and is never updated afterwards. Expiry is derived from
//! the reference instant, not stored.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BusinessCalendar, MemberId, Money, PeriodId, Timestamp, TransactionId,
};

use super::{MembershipError, PackageDuration};

/// Stored status label. Only `active` is ever written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodStatus {
    #[default]
    Active,
}

impl PeriodStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodStatus::Active => "active",
        }
    }
}

/// Payment that paid for a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLink {
    pub transaction_id: TransactionId,
    pub amount: Money,
}

/// Start and end instants computed for a new period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBounds {
    pub start: Timestamp,
    /// Inclusive.
    pub end: Timestamp,
}

/// Where a period sits relative to a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodPhase {
    Upcoming,
    Current,
    Ended,
}

/// A single contiguous span of access entitlement.
///
/// # Invariants
///
/// - `end >= start`
/// - Never mutated after it is appended to the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipPeriod {
    pub id: PeriodId,
    pub member_id: MemberId,
    pub start: Timestamp,
    pub end: Timestamp,

    /// Package name at the time the period was created.
    pub package_name: String,

    /// Package duration at the time the period was created.
    pub duration: PackageDuration,

    pub status: PeriodStatus,

    /// Present when the period was bought rather than inserted by an admin.
    pub payment: Option<PaymentLink>,

    pub created_at: Timestamp,
}

impl MembershipPeriod {
    /// Creates a new period from computed bounds.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPeriod` if the bounds are inverted.
    pub fn open(
        id: PeriodId,
        member_id: MemberId,
        bounds: PeriodBounds,
        package_name: impl Into<String>,
        duration: PackageDuration,
        payment: Option<PaymentLink>,
        created_at: Timestamp,
    ) -> Result<Self, MembershipError> {
        let period = Self {
            id,
            member_id,
            start: bounds.start,
            end: bounds.end,
            package_name: package_name.into(),
            duration,
            status: PeriodStatus::Active,
            payment,
            created_at,
        };
        period.validate()?;
        Ok(period)
    }

    /// Rejects a period that ends before it starts.
    pub fn validate(&self) -> Result<(), MembershipError> {
        if self.end.is_before(&self.start) {
            return Err(MembershipError::malformed_period(self.id, self.start, self.end));
        }
        Ok(())
    }

    pub fn bounds(&self) -> PeriodBounds {
        PeriodBounds {
            start: self.start,
            end: self.end,
        }
    }

    /// Number of calendar days the period touches, counting both ends.
    pub fn day_span(&self, calendar: &BusinessCalendar) -> i64 {
        calendar.days_between_dates(self.start, self.end) + 1
    }

    pub fn paid_amount(&self) -> Money {
        self.payment.map(|p| p.amount).unwrap_or(Money::ZERO)
    }

    pub fn phase(&self, now: Timestamp) -> PeriodPhase {
        if self.start.is_after(&now) {
            PeriodPhase::Upcoming
        } else if self.end.is_before(&now) {
            PeriodPhase::Ended
        } else {
            PeriodPhase::Current
        }
    }
}

/// Validates every period in a history.
pub fn validate_history(periods: &[MembershipPeriod]) -> Result<(), MembershipError> {
    periods.iter().try_for_each(MembershipPeriod::validate)
}

/// Returns a copy of the history sorted by start, then end, then id.
pub fn sorted_by_start(periods: &[MembershipPeriod]) -> Vec<MembershipPeriod> {
    let mut sorted = periods.to_vec();
    sorted.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(a.end.cmp(&b.end))
            .then(a.id.cmp(&b.id))
    });
    sorted
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    pub fn period(member_id: MemberId, start: &str, end: &str) -> MembershipPeriod {
        MembershipPeriod {
            id: PeriodId::new(),
            member_id,
            start: ts(start),
            end: ts(end),
            package_name: "Monthly".to_string(),
            duration: PackageDuration::Months(1),
            status: PeriodStatus::Active,
            payment: None,
            created_at: ts(start),
        }
    }

    pub fn paid_period(
        member_id: MemberId,
        start: &str,
        end: &str,
        amount: i64,
    ) -> MembershipPeriod {
        MembershipPeriod {
            payment: Some(PaymentLink {
                transaction_id: TransactionId::new(),
                amount: Money::from_minor_units(amount),
            }),
            ..period(member_id, start, end)
        }
    }

    pub fn day_pass_period(member_id: MemberId, start: &str, end: &str) -> MembershipPeriod {
        MembershipPeriod {
            package_name: "Day Pass".to_string(),
            duration: PackageDuration::DayPass,
            ..period(member_id, start, end)
        }
    }
}
