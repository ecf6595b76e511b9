//! Business calendar: local midnight, end of day, and month arithmetic.
//!
//! The gym operates on a single fixed UTC offset. Every "calendar day" in the
//! membership rules is a day on this calendar, never a UTC day.

use chrono::{Duration, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};

use super::{Timestamp, ValidationError};

/// Largest offset from UTC, in minutes, a calendar accepts in either direction.
pub const MAX_UTC_OFFSET_MINUTES: i32 = 18 * 60;

/// Calendar used to interpret instants as local dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessCalendar {
    offset: FixedOffset,
}

impl BusinessCalendar {
    /// Calendar with a zero offset.
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Creates a calendar east of UTC by `minutes` (negative for west).
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` unless `minutes` is within +/- 18 hours.
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, ValidationError> {
        let out_of_range = || {
            ValidationError::out_of_range(
                "utc_offset_minutes",
                -i64::from(MAX_UTC_OFFSET_MINUTES),
                i64::from(MAX_UTC_OFFSET_MINUTES),
                i64::from(minutes),
            )
        };
        if !(-MAX_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&minutes) {
            return Err(out_of_range());
        }
        FixedOffset::east_opt(minutes * 60)
            .map(|offset| Self { offset })
            .ok_or_else(out_of_range)
    }

    /// Offset from UTC in minutes.
    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    /// Local calendar date of an instant.
    pub fn local_date(&self, ts: Timestamp) -> NaiveDate {
        self.to_local(ts).date()
    }

    /// Local midnight of the day containing `ts`.
    pub fn start_of_day(&self, ts: Timestamp) -> Timestamp {
        self.from_local(self.local_date(ts).and_time(NaiveTime::MIN))
    }

    /// Last millisecond (23:59:59.999) of the day containing `ts`.
    pub fn end_of_day(&self, ts: Timestamp) -> Timestamp {
        self.start_of_next_day(ts).add_duration(-Duration::milliseconds(1))
    }

    /// Local midnight of the day after the one containing `ts`.
    pub fn start_of_next_day(&self, ts: Timestamp) -> Timestamp {
        self.start_of_day(ts).add_days(1)
    }

    /// Advances `ts` by whole calendar months in local time.
    ///
    /// Day-of-month overflow clamps to the last valid day of the target month
    /// (Jan 31 + 1 month = Feb 28 or 29). Returns `None` only when the result
    /// leaves the representable range.
    pub fn add_months(&self, ts: Timestamp, months: u32) -> Option<Timestamp> {
        self.to_local(ts)
            .checked_add_months(Months::new(months))
            .map(|local| self.from_local(local))
    }

    /// Number of local calendar days from `from`'s date to `to`'s date.
    pub fn days_between_dates(&self, from: Timestamp, to: Timestamp) -> i64 {
        (self.local_date(to) - self.local_date(from)).num_days()
    }

    fn to_local(&self, ts: Timestamp) -> NaiveDateTime {
        ts.as_datetime().with_timezone(&self.offset).naive_local()
    }

    fn from_local(&self, local: NaiveDateTime) -> Timestamp {
        let utc = local - Duration::seconds(i64::from(self.offset.local_minus_utc()));
        Timestamp::from_datetime(Utc.from_utc_datetime(&utc))
    }
}

impl Default for BusinessCalendar {
    fn default() -> Self {
        Self::utc()
    }
}
