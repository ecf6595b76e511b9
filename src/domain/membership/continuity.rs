//! Continuity resolver: stitched days remaining and membership status.
//!
//! Entitlement may be spread over several future periods with gaps or
//! overlaps between them. Days remaining is the sum over every unexpired
//! period, counting overlapping stretches once. A period that has not started
//! counts `ceil((end - start) / 1 day) + 1` days; one already under way counts
//! the whole days left after the cursor, rounded up.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BusinessCalendar, Timestamp};

use super::{is_day_pass_label, sorted_by_start, validate_history, MembershipError, MembershipPeriod};

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Status shown for a member at a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinuityStatus {
    Active,
    ExpiringSoon,
    Expired,
}

/// Result of resolving a member's continuity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Continuity {
    pub status: ContinuityStatus,
    pub days_remaining: i64,
    /// Latest end among unexpired periods.
    pub entitled_until: Option<Timestamp>,
}

impl Continuity {
    pub fn expired() -> Self {
        Self {
            status: ContinuityStatus::Expired,
            days_remaining: 0,
            entitled_until: None,
        }
    }

    pub fn is_entitled(&self) -> bool {
        self.status != ContinuityStatus::Expired
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuityResolver {
    calendar: BusinessCalendar,
    day_pass_name: String,
    expiring_soon_days: i64,
}

impl ContinuityResolver {
    pub fn new(calendar: BusinessCalendar, day_pass_name: String, expiring_soon_days: i64) -> Self {
        Self {
            calendar,
            day_pass_name,
            expiring_soon_days,
        }
    }

    /// Resolves status and days remaining as of `reference`.
    ///
    /// Members whose current type is the Day Pass are evaluated on local
    /// dates, so a pass stays active until the local day is over. Everyone
    /// else is evaluated on exact instants.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPeriod` if any period ends before it starts.
    pub fn resolve_continuity(
        &self,
        periods: &[MembershipPeriod],
        membership_type: Option<&str>,
        reference: Timestamp,
    ) -> Result<Continuity, MembershipError> {
        validate_history(periods)?;

        let day_pass_member = membership_type
            .map(|label| is_day_pass_label(label, &self.day_pass_name))
            .unwrap_or(false);

        if day_pass_member {
            Ok(self.resolve_by_date(periods, reference))
        } else {
            Ok(self.resolve_by_instant(periods, reference))
        }
    }

    fn resolve_by_instant(&self, periods: &[MembershipPeriod], now: Timestamp) -> Continuity {
        let live: Vec<_> = sorted_by_start(periods)
            .into_iter()
            .filter(|p| p.end.is_after(&now))
            .collect();
        if live.is_empty() {
            return Continuity::expired();
        }

        let mut cursor = now;
        let mut days_remaining = 0;
        for period in &live {
            days_remaining += if period.start.is_after(&cursor) {
                ceil_days(period.end.duration_since(&period.start)) + 1
            } else {
                ceil_days(period.end.duration_since(&cursor)).max(0)
            };
            cursor = cursor.max(period.end);
        }

        let window_closes_soon =
            cursor.duration_since(&now) <= Duration::days(self.expiring_soon_days);
        let status = if window_closes_soon && days_remaining <= self.expiring_soon_days {
            ContinuityStatus::ExpiringSoon
        } else {
            ContinuityStatus::Active
        };

        Continuity {
            status,
            days_remaining,
            entitled_until: Some(cursor),
        }
    }

    fn resolve_by_date(&self, periods: &[MembershipPeriod], now: Timestamp) -> Continuity {
        let today = self.calendar.local_date(now);
        let live: Vec<_> = sorted_by_start(periods)
            .into_iter()
            .filter(|p| self.calendar.local_date(p.end) >= today)
            .collect();
        if live.is_empty() {
            return Continuity::expired();
        }

        // First local date not yet counted.
        let mut next_uncounted: NaiveDate = today;
        let mut entitled_until = now;
        let mut days_remaining = 0;
        for period in &live {
            let first = self.calendar.local_date(period.start).max(next_uncounted);
            let last = self.calendar.local_date(period.end);
            if last >= first {
                days_remaining += (last - first).num_days() + 1;
            }
            if let Some(after_last) = last.succ_opt() {
                next_uncounted = next_uncounted.max(after_last);
            }
            entitled_until = entitled_until.max(period.end);
        }

        Continuity {
            status: ContinuityStatus::Active,
            days_remaining,
            entitled_until: Some(entitled_until),
        }
    }
}

fn ceil_days(duration: Duration) -> i64 {
    let millis = duration.num_milliseconds();
    millis.div_euclid(DAY_MILLIS) + i64::from(millis.rem_euclid(DAY_MILLIS) != 0)
}
