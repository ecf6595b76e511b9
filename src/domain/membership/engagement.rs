//! Engagement analyzer: aggregate statistics over a member's full history.
//!
//! Pure and order-independent. The input is sorted as a copy and never
//! reordered in place.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BusinessCalendar, Money, Timestamp};

use super::{sorted_by_start, validate_history, MembershipError, MembershipPeriod};

const LOYAL_PERIODS: usize = 5;
const RETURNING_PERIODS: usize = 3;
const HIGH_SPEND_MINOR_UNITS: i64 = 1_000_000;
const SHORT_GAP_DAYS: f64 = 30.0;
const LONG_AVERAGE_DURATION_DAYS: i64 = 30;

/// Loyalty tier derived from the number of periods held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoyaltyTier {
    #[default]
    New,
    SecondTime,
    Returning,
    Loyal,
}

impl LoyaltyTier {
    pub fn for_period_count(count: usize) -> Self {
        match count {
            n if n >= LOYAL_PERIODS => LoyaltyTier::Loyal,
            n if n >= RETURNING_PERIODS => LoyaltyTier::Returning,
            2 => LoyaltyTier::SecondTime,
            _ => LoyaltyTier::New,
        }
    }
}

/// Break between two consecutive periods, indexed in start order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodGap {
    pub from_index: usize,
    pub to_index: usize,
    pub days: i64,
    pub previous_end: Timestamp,
    pub next_start: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngagementSummary {
    pub total_periods: usize,
    pub total_days: i64,
    pub total_spent: Money,
    pub average_duration: i64,
    pub gaps: Vec<PeriodGap>,
    /// 0 to 100.
    pub loyalty_score: u8,
    pub membership_type: LoyaltyTier,
    pub average_gap_days: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementAnalyzer {
    calendar: BusinessCalendar,
}

impl EngagementAnalyzer {
    pub fn new(calendar: BusinessCalendar) -> Self {
        Self { calendar }
    }

    /// Summarizes a history.
    ///
    /// Loyalty score is additive and capped at 100:
    /// - +30 for three or more periods
    /// - +25 when a repeat member's mean gap is under 30 days
    /// - +25 when the rounded average duration exceeds 30 days
    /// - +20 when total spend exceeds 1,000,000 minor units
    ///
    /// # Errors
    ///
    /// Returns `MalformedPeriod` if any period ends before it starts.
    pub fn analyze_engagement(
        &self,
        periods: &[MembershipPeriod],
    ) -> Result<EngagementSummary, MembershipError> {
        validate_history(periods)?;
        if periods.is_empty() {
            return Ok(EngagementSummary::default());
        }

        let sorted = sorted_by_start(periods);
        let total_periods = sorted.len();
        let total_days: i64 = sorted.iter().map(|p| p.day_span(&self.calendar)).sum();
        let total_spent: Money = sorted.iter().map(MembershipPeriod::paid_amount).sum();
        let average_duration = round_div(total_days, total_periods as i64);

        let gaps: Vec<PeriodGap> = sorted
            .windows(2)
            .enumerate()
            .filter_map(|(i, pair)| {
                let days = self.calendar.days_between_dates(pair[0].end, pair[1].start) - 1;
                (days > 0).then(|| PeriodGap {
                    from_index: i,
                    to_index: i + 1,
                    days,
                    previous_end: pair[0].end,
                    next_start: pair[1].start,
                })
            })
            .collect();
        let gap_days: i64 = gaps.iter().map(|g| g.days).sum();
        let average_gap_days = if gaps.is_empty() {
            0
        } else {
            round_div(gap_days, gaps.len() as i64)
        };
        let mean_gap = if gaps.is_empty() {
            0.0
        } else {
            gap_days as f64 / gaps.len() as f64
        };

        let mut score: u32 = 0;
        if total_periods >= RETURNING_PERIODS {
            score += 30;
        }
        if total_periods >= 2 && mean_gap < SHORT_GAP_DAYS {
            score += 25;
        }
        if average_duration > LONG_AVERAGE_DURATION_DAYS {
            score += 25;
        }
        if total_spent.minor_units() > HIGH_SPEND_MINOR_UNITS {
            score += 20;
        }

        Ok(EngagementSummary {
            total_periods,
            total_days,
            total_spent,
            average_duration,
            gaps,
            loyalty_score: score.min(100) as u8,
            membership_type: LoyaltyTier::for_period_count(total_periods),
            average_gap_days,
        })
    }
}

/// Integer division rounding halves up, for non-negative operands.
fn round_div(numerator: i64, denominator: i64) -> i64 {
    (2 * numerator + denominator).div_euclid(2 * denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::MemberId;
    use crate::domain::membership::period::test_support::{paid_period, period};

    fn analyzer() -> EngagementAnalyzer {
        EngagementAnalyzer::new(BusinessCalendar::utc())
    }

    #[test]
    fn empty_history_is_baseline() {
        let summary = analyzer().analyze_engagement(&[]).unwrap();
        assert_eq!(
            summary,
            EngagementSummary {
                total_periods: 0,
                total_days: 0,
                total_spent: Money::ZERO,
                average_duration: 0,
                gaps: vec![],
                loyalty_score: 0,
                membership_type: LoyaltyTier::New,
                average_gap_days: 0,
            }
        );
    }

    #[test]
    fn two_periods_with_short_gap() {
        let member = MemberId::new();
        let history = vec![
            paid_period(member, "2024-02-05T00:00:00Z", "2024-02-28T23:59:59.999Z", 150_000),
            paid_period(member, "2024-01-01T00:00:00Z", "2024-01-31T23:59:59.999Z", 150_000),
        ];

        let summary = analyzer().analyze_engagement(&history).unwrap();

        assert_eq!(summary.total_periods, 2);
        assert_eq!(summary.total_days, 55);
        assert_eq!(summary.total_spent.minor_units(), 300_000);
        assert_eq!(summary.average_duration, 28);
        assert_eq!(summary.gaps.len(), 1);
        assert_eq!(summary.gaps[0].days, 4);
        assert_eq!((summary.gaps[0].from_index, summary.gaps[0].to_index), (0, 1));
        assert_eq!(summary.average_gap_days, 4);
        assert_eq!(summary.membership_type, LoyaltyTier::SecondTime);
        assert_eq!(summary.loyalty_score, 25);
    }

    #[test]
    fn back_to_back_and_overlapping_periods_have_no_gap() {
        let member = MemberId::new();
        let history = vec![
            period(member, "2024-01-01T00:00:00Z", "2024-01-31T23:59:59.999Z"),
            period(member, "2024-02-01T00:00:00Z", "2024-02-29T23:59:59.999Z"),
            period(member, "2024-02-15T00:00:00Z", "2024-03-15T00:00:00Z"),
        ];
        let summary = analyzer().analyze_engagement(&history).unwrap();
        assert!(summary.gaps.is_empty());
        assert_eq!(summary.average_gap_days, 0);
    }

    #[test]
    fn loyal_big_spender_is_capped_at_100() {
        let member = MemberId::new();
        let history: Vec<_> = (1..=6)
            .map(|month| {
                paid_period(
                    member,
                    &format!("2023-{:02}-01T00:00:00Z", month * 2 - 1),
                    &format!("2023-{:02}-28T00:00:00Z", month * 2),
                    300_000,
                )
            })
            .collect();

        let summary = analyzer().analyze_engagement(&history).unwrap();

        assert_eq!(summary.membership_type, LoyaltyTier::Loyal);
        assert_eq!(summary.loyalty_score, 100);
    }

    #[test]
    fn long_gaps_lose_the_gap_bonus() {
        let member = MemberId::new();
        let history = vec![
            period(member, "2023-01-01T00:00:00Z", "2023-01-20T00:00:00Z"),
            period(member, "2023-06-01T00:00:00Z", "2023-06-20T00:00:00Z"),
            period(member, "2023-12-01T00:00:00Z", "2023-12-20T00:00:00Z"),
        ];
        let summary = analyzer().analyze_engagement(&history).unwrap();
        assert_eq!(summary.membership_type, LoyaltyTier::Returning);
        assert_eq!(summary.loyalty_score, 30);
    }

    #[test]
    fn analysis_is_idempotent_and_leaves_input_order() {
        let member = MemberId::new();
        let history = vec![
            period(member, "2024-03-01T00:00:00Z", "2024-03-31T00:00:00Z"),
            period(member, "2024-01-01T00:00:00Z", "2024-01-31T00:00:00Z"),
            period(member, "2024-02-10T00:00:00Z", "2024-02-20T00:00:00Z"),
        ];
        let snapshot = history.clone();

        let first = analyzer().analyze_engagement(&history).unwrap();
        let second = analyzer().analyze_engagement(&history).unwrap();

        assert_eq!(first, second);
        assert_eq!(history, snapshot);
    }

    #[test]
    fn round_div_rounds_halves_up() {
        assert_eq!(round_div(55, 2), 28);
        assert_eq!(round_div(54, 4), 14);
        assert_eq!(round_div(53, 4), 13);
    }

    #[test]
    fn tiers_follow_period_count() {
        assert_eq!(LoyaltyTier::for_period_count(0), LoyaltyTier::New);
        assert_eq!(LoyaltyTier::for_period_count(1), LoyaltyTier::New);
        assert_eq!(LoyaltyTier::for_period_count(2), LoyaltyTier::SecondTime);
        assert_eq!(LoyaltyTier::for_period_count(4), LoyaltyTier::Returning);
        assert_eq!(LoyaltyTier::for_period_count(5), LoyaltyTier::Loyal);
    }
}
