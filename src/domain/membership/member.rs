//! Member entity and its ledger-derived cache.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, Timestamp, ValidationError};

use super::MembershipPeriod;

/// Profile fields supplied when a member is registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMemberProfile {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

/// Partial profile edit. An empty string clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

/// Display cache mirroring the member's latest period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberCache {
    pub membership_type: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}

impl MemberCache {
    /// Derives the cache from the ledger.
    ///
    /// The latest period is the one with the greatest end; ties go to the
    /// later start. An empty ledger yields an empty cache.
    pub fn from_ledger(periods: &[MembershipPeriod]) -> Self {
        periods
            .iter()
            .max_by(|a, b| a.end.cmp(&b.end).then(a.start.cmp(&b.start)))
            .map(|latest| Self {
                membership_type: Some(latest.package_name.clone()),
                start_date: Some(latest.start),
                end_date: Some(latest.end),
            })
            .unwrap_or_default()
    }
}

/// A gym member.
///
/// `membership_type`, `start_date` and `end_date` are never authored
/// directly; they are replaced wholesale by [`Member::apply_cache`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    /// Soft-unique: several members may share a phone number.
    pub phone: Option<String>,
    pub email: Option<String>,
    pub membership_type: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub is_active: bool,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Member {
    /// Registers a member with an empty cache.
    pub fn register(
        id: MemberId,
        profile: NewMemberProfile,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let email = clean(profile.email);
        if let Some(email) = &email {
            validate_email(email)?;
        }

        Ok(Self {
            id,
            name: normalize_name(&profile.name)?,
            phone: normalize_phone(profile.phone),
            email,
            membership_type: None,
            start_date: None,
            end_date: None,
            is_active: true,
            notes: clean(profile.notes),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies profile edits. Cache fields are untouched.
    pub fn apply_profile(
        &mut self,
        update: MemberProfileUpdate,
        now: Timestamp,
    ) -> Result<(), ValidationError> {
        if let Some(name) = update.name {
            self.name = normalize_name(&name)?;
        }
        if let Some(phone) = update.phone {
            self.phone = normalize_phone(Some(phone));
        }
        if let Some(email) = update.email {
            let email = clean(Some(email));
            if let Some(email) = &email {
                validate_email(email)?;
            }
            self.email = email;
        }
        if let Some(notes) = update.notes {
            self.notes = clean(Some(notes));
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Replaces the cache fields with values derived from the ledger.
    pub fn apply_cache(&mut self, cache: &MemberCache, now: Timestamp) {
        self.membership_type = cache.membership_type.clone();
        self.start_date = cache.start_date;
        self.end_date = cache.end_date;
        self.updated_at = now;
    }

    pub fn cache(&self) -> MemberCache {
        MemberCache {
            membership_type: self.membership_type.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Trims a phone number, treating blank input as absent.
pub fn normalize_phone(phone: Option<String>) -> Option<String> {
    clean(phone)
}

fn normalize_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::empty_field("name"));
    }
    Ok(name.to_string())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ValidationError::invalid_format("email", "expected an address like name@example.com")),
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::period::test_support::{day_pass_period, period, ts};

    fn profile(name: &str) -> NewMemberProfile {
        NewMemberProfile {
            name: name.to_string(),
            phone: Some(" 0812-555 ".to_string()),
            email: None,
            notes: Some("   ".to_string()),
        }
    }

    #[test]
    fn register_normalizes_fields() {
        let member = Member::register(MemberId::new(), profile(" Ana "), Timestamp::now()).unwrap();
        assert_eq!(member.name, "Ana");
        assert_eq!(member.phone.as_deref(), Some("0812-555"));
        assert_eq!(member.notes, None);
        assert!(member.is_active);
        assert_eq!(member.cache(), MemberCache::default());
    }

    #[test]
    fn register_rejects_blank_name() {
        assert!(Member::register(MemberId::new(), profile("  "), Timestamp::now()).is_err());
    }

    #[test]
    fn register_rejects_bad_email() {
        let input = NewMemberProfile {
            email: Some("not-an-email".to_string()),
            ..profile("Ana")
        };
        assert!(Member::register(MemberId::new(), input, Timestamp::now()).is_err());
    }

    #[test]
    fn empty_string_clears_phone() {
        let mut member = Member::register(MemberId::new(), profile("Ana"), Timestamp::now()).unwrap();
        let update = MemberProfileUpdate {
            phone: Some(String::new()),
            ..Default::default()
        };
        member.apply_profile(update, Timestamp::now()).unwrap();
        assert_eq!(member.phone, None);
    }

    #[test]
    fn cache_follows_latest_end() {
        let member_id = MemberId::new();
        let monthly = period(member_id, "2024-01-01T00:00:00Z", "2024-03-01T00:00:00Z");
        let pass = day_pass_period(member_id, "2024-03-02T00:00:00Z", "2024-03-02T23:59:59.999Z");
        let older = period(member_id, "2023-06-01T00:00:00Z", "2023-07-01T00:00:00Z");

        let cache = MemberCache::from_ledger(&[monthly, pass, older]);

        assert_eq!(cache.membership_type.as_deref(), Some("Day Pass"));
        assert_eq!(cache.start_date, Some(ts("2024-03-02T00:00:00Z")));
        assert_eq!(cache.end_date, Some(ts("2024-03-02T23:59:59.999Z")));
    }

    #[test]
    fn empty_ledger_clears_cache() {
        let mut member = Member::register(MemberId::new(), profile("Ana"), Timestamp::now()).unwrap();
        member.membership_type = Some("Imported".to_string());
        member.end_date = Some(ts("2030-01-01T00:00:00Z"));

        member.apply_cache(&MemberCache::from_ledger(&[]), Timestamp::now());

        assert_eq!(member.cache(), MemberCache::default());
    }
}
