//! Configured membership rules shared by the period engine.

use crate::domain::foundation::BusinessCalendar;

use super::{
    is_day_pass_label, ContinuityResolver, EngagementAnalyzer, TemporalPolicy, DAY_PASS_PACKAGE_NAME,
};

/// Days before the end of entitlement at which a member counts as expiring.
pub const DEFAULT_EXPIRING_SOON_DAYS: i64 = 7;

/// Calendar and product settings the period engine runs under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipRules {
    pub calendar: BusinessCalendar,
    pub day_pass_name: String,
    pub expiring_soon_days: i64,
}

impl MembershipRules {
    pub fn new(calendar: BusinessCalendar, day_pass_name: impl Into<String>, expiring_soon_days: i64) -> Self {
        Self {
            calendar,
            day_pass_name: day_pass_name.into(),
            expiring_soon_days,
        }
    }

    /// True if a membership type label names the Day Pass.
    pub fn is_day_pass_label(&self, label: &str) -> bool {
        is_day_pass_label(label, &self.day_pass_name)
    }

    pub fn temporal_policy(&self) -> TemporalPolicy {
        TemporalPolicy::new(self.calendar)
    }

    pub fn continuity_resolver(&self) -> ContinuityResolver {
        ContinuityResolver::new(self.calendar, self.day_pass_name.clone(), self.expiring_soon_days)
    }

    pub fn engagement_analyzer(&self) -> EngagementAnalyzer {
        EngagementAnalyzer::new(self.calendar)
    }
}

impl Default for MembershipRules {
    fn default() -> Self {
        Self::new(BusinessCalendar::utc(), DAY_PASS_PACKAGE_NAME, DEFAULT_EXPIRING_SOON_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{MemberId, Timestamp};
    use crate::domain::membership::period::test_support::{day_pass_period, ts};
    use crate::domain::membership::ContinuityStatus;

    #[test]
    fn day_pass_label_ignores_case_and_padding() {
        let rules = MembershipRules::default();
        assert!(rules.is_day_pass_label(" day PASS "));
        assert!(!rules.is_day_pass_label("Day Passes"));
    }

    #[test]
    fn resolver_agrees_with_rules_on_padded_label() {
        let rules = MembershipRules::new(BusinessCalendar::utc(), " Drop In ", DEFAULT_EXPIRING_SOON_DAYS);
        let member = MemberId::new();
        let history = vec![day_pass_period(member, "2024-05-10T00:00:00Z", "2024-05-10T23:59:59.999Z")];
        let late_evening: Timestamp = ts("2024-05-10T23:30:00Z");

        assert!(rules.is_day_pass_label("drop in"));
        let result = rules
            .continuity_resolver()
            .resolve_continuity(&history, Some("drop in"), late_evening)
            .unwrap();
        // Date-based evaluation keeps the pass active for the rest of the day.
        assert_eq!(result.status, ContinuityStatus::Active);
    }
}
