//! Membership rules configuration

use serde::Deserialize;

use crate::domain::foundation::{BusinessCalendar, MAX_UTC_OFFSET_MINUTES};
use crate::domain::membership::{MembershipRules, DAY_PASS_PACKAGE_NAME, DEFAULT_EXPIRING_SOON_DAYS};

use super::error::ValidationError;

/// Business calendar and product settings for the period engine
#[derive(Debug, Clone, Deserialize)]
pub struct MembershipConfig {
    /// Offset of the gym's local time from UTC, in minutes
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Name of the Day Pass sentinel package
    #[serde(default = "default_day_pass_name")]
    pub day_pass_name: String,

    /// Days before entitlement ends at which a member is expiring soon
    #[serde(default = "default_expiring_soon_days")]
    pub expiring_soon_days: i64,
}

impl MembershipConfig {
    /// Validate membership configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(-MAX_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&self.utc_offset_minutes) {
            return Err(ValidationError::InvalidUtcOffset);
        }
        if self.day_pass_name.trim().is_empty() {
            return Err(ValidationError::EmptyDayPassName);
        }
        if !(0..=365).contains(&self.expiring_soon_days) {
            return Err(ValidationError::InvalidExpiringWindow);
        }
        Ok(())
    }

    /// Builds the rules the period engine runs under.
    pub fn rules(&self) -> Result<MembershipRules, ValidationError> {
        self.validate()?;
        let calendar = BusinessCalendar::from_offset_minutes(self.utc_offset_minutes)
            .map_err(|_| ValidationError::InvalidUtcOffset)?;
        Ok(MembershipRules::new(
            calendar,
            self.day_pass_name.trim(),
            self.expiring_soon_days,
        ))
    }
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            day_pass_name: default_day_pass_name(),
            expiring_soon_days: default_expiring_soon_days(),
        }
    }
}

fn default_day_pass_name() -> String {
    DAY_PASS_PACKAGE_NAME.to_string()
}

fn default_expiring_soon_days() -> i64 {
    DEFAULT_EXPIRING_SOON_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_build_default_rules() {
        let rules = MembershipConfig::default().rules().unwrap();
        assert_eq!(rules, MembershipRules::default());
    }

    #[test]
    fn test_offset_out_of_range() {
        let config = MembershipConfig {
            utc_offset_minutes: 19 * 60,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidUtcOffset)));
    }

    #[test]
    fn test_blank_day_pass_name() {
        let config = MembershipConfig {
            day_pass_name: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::EmptyDayPassName)));
    }

    #[test]
    fn test_negative_expiring_window() {
        let config = MembershipConfig {
            expiring_soon_days: -1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_local_offset_reaches_calendar() {
        let config = MembershipConfig {
            utc_offset_minutes: 420,
            day_pass_name: " Drop-in ".to_string(),
            ..Default::default()
        };
        let rules = config.rules().unwrap();
        assert_eq!(rules.day_pass_name, "Drop-in");
        assert_eq!(rules.calendar, BusinessCalendar::from_offset_minutes(420).unwrap());
    }
}
