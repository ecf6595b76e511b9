//! Temporal policy: bounds of a newly purchased period.
//!
//! New periods are appended after the member's existing entitlement instead of
//! overlapping it. The anchor is always the greatest `end` in the ledger,
//! regardless of which product produced it or whether it was paid for.

use crate::domain::foundation::{BusinessCalendar, Timestamp};

use super::{validate_history, MembershipError, MembershipPeriod, PackageDuration, PeriodBounds};

/// Computes period bounds on a business calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalPolicy {
    calendar: BusinessCalendar,
}

impl TemporalPolicy {
    pub fn new(calendar: BusinessCalendar) -> Self {
        Self { calendar }
    }

    /// Computes the `(start, end)` of a new period.
    ///
    /// When the ledger already runs past `reference`, the new period starts at
    /// local midnight after the latest end. Otherwise:
    ///
    /// - a regular package starts at `explicit_start`, or `reference` when no
    ///   start was given, and ends that many calendar months later;
    /// - a Day Pass covers the whole local day of `explicit_start` or
    ///   `reference`.
    ///
    /// # Errors
    ///
    /// - `MalformedPeriod` if any history period ends before it starts
    /// - `EmptyHistoryAmbiguity` if `explicit_start` is given while history exists
    /// - `InvalidDuration` if month arithmetic leaves the representable range
    pub fn compute_new_period(
        &self,
        duration: PackageDuration,
        prior_periods: &[MembershipPeriod],
        reference: Timestamp,
        explicit_start: Option<Timestamp>,
    ) -> Result<PeriodBounds, MembershipError> {
        validate_history(prior_periods)?;

        if let (Some(_), Some(first)) = (explicit_start, prior_periods.first()) {
            return Err(MembershipError::EmptyHistoryAmbiguity {
                member_id: first.member_id,
                existing_periods: prior_periods.len(),
            });
        }

        let queued_after = latest_end(prior_periods)
            .filter(|end| end.is_after(&reference))
            .map(|end| self.calendar.start_of_next_day(end));
        let anchor = explicit_start.unwrap_or(reference);

        match duration {
            PackageDuration::DayPass => {
                let start = queued_after.unwrap_or_else(|| self.calendar.start_of_day(anchor));
                Ok(PeriodBounds {
                    start,
                    end: self.calendar.end_of_day(start),
                })
            }
            PackageDuration::Months(months) => {
                let start = queued_after.unwrap_or(anchor);
                let end = self.calendar.add_months(start, months).ok_or_else(|| {
                    MembershipError::invalid_duration(format!(
                        "{} months from {} is out of range",
                        months,
                        start.to_rfc3339()
                    ))
                })?;
                Ok(PeriodBounds { start, end })
            }
        }
    }
}

/// Greatest end across every period, if any.
pub fn latest_end(periods: &[MembershipPeriod]) -> Option<Timestamp> {
    periods.iter().map(|p| p.end).max()
}
