//! Membership packages (products) and the reserved Day Pass sentinel.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Money, PackageId, Timestamp};

use super::MembershipError;

/// Default name of the single-calendar-day product.
pub const DAY_PASS_PACKAGE_NAME: &str = "Day Pass";

/// True if `label` names the configured Day Pass, ignoring case and
/// surrounding whitespace.
pub fn is_day_pass_label(label: &str, day_pass_name: &str) -> bool {
    label.trim().eq_ignore_ascii_case(day_pass_name.trim())
}

/// Length of entitlement a package sells.
///
/// Serialized as whole months, with `0` reserved for the Day Pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "i64")]
pub enum PackageDuration {
    /// One local calendar day.
    DayPass,
    /// Whole calendar months, always greater than zero.
    Months(u32),
}

impl PackageDuration {
    /// Interprets a stored or submitted month count.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDuration` for negative or oversized values.
    pub fn from_months(months: i64) -> Result<Self, MembershipError> {
        match months {
            0 => Ok(PackageDuration::DayPass),
            m if m < 0 => Err(MembershipError::invalid_duration(format!(
                "duration_months cannot be negative (got {})",
                m
            ))),
            m => u32::try_from(m)
                .map(PackageDuration::Months)
                .map_err(|_| MembershipError::invalid_duration(format!("{} months is out of range", m))),
        }
    }

    /// Month count, `0` for the Day Pass.
    pub fn months(&self) -> u32 {
        match self {
            PackageDuration::DayPass => 0,
            PackageDuration::Months(m) => *m,
        }
    }

    pub fn is_day_pass(&self) -> bool {
        matches!(self, PackageDuration::DayPass)
    }
}

impl From<PackageDuration> for u32 {
    fn from(duration: PackageDuration) -> Self {
        duration.months()
    }
}

impl TryFrom<i64> for PackageDuration {
    type Error = MembershipError;

    fn try_from(months: i64) -> Result<Self, Self::Error> {
        PackageDuration::from_months(months)
    }
}

impl fmt::Display for PackageDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageDuration::DayPass => write!(f, "day pass"),
            PackageDuration::Months(1) => write!(f, "1 month"),
            PackageDuration::Months(m) => write!(f, "{} months", m),
        }
    }
}

/// Input for creating a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPackage {
    pub name: String,
    pub duration: PackageDuration,
    pub price: Money,
    pub description: Option<String>,
}

/// Partial update of a package. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageUpdate {
    pub name: Option<String>,
    pub duration: Option<PackageDuration>,
    pub price: Option<Money>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// A product members can buy.
///
/// # Invariants
///
/// - A `DayPass` duration is only carried by the package named after the
///   configured Day Pass name, and vice versa
/// - The Day Pass package is never deleted, renamed, or given another duration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipPackage {
    pub id: PackageId,
    pub name: String,
    pub duration: PackageDuration,
    pub price: Money,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MembershipPackage {
    /// Creates an active package.
    ///
    /// Uniqueness of the active Day Pass is checked by the caller against the
    /// repository.
    pub fn create(
        id: PackageId,
        input: NewPackage,
        day_pass_name: &str,
        now: Timestamp,
    ) -> Result<Self, MembershipError> {
        let name = normalize_name(&input.name)?;
        ensure_sentinel_pairing(&name, input.duration, day_pass_name)?;

        Ok(Self {
            id,
            name,
            duration: input.duration,
            price: input.price,
            description: clean_optional(input.description),
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_day_pass(&self) -> bool {
        self.duration.is_day_pass()
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// - `ProtectedPackage` when renaming the Day Pass or changing its duration
    /// - `ValidationFailed` when a regular package would take the Day Pass
    ///   name or duration
    pub fn apply_update(
        &mut self,
        update: PackageUpdate,
        day_pass_name: &str,
        now: Timestamp,
    ) -> Result<(), MembershipError> {
        let name = match update.name {
            Some(raw) => normalize_name(&raw)?,
            None => self.name.clone(),
        };
        let duration = update.duration.unwrap_or(self.duration);

        if self.is_day_pass() {
            if name != self.name {
                return Err(MembershipError::protected_package("renamed"));
            }
            if duration != self.duration {
                return Err(MembershipError::protected_package("given a different duration"));
            }
        } else {
            ensure_sentinel_pairing(&name, duration, day_pass_name)?;
        }

        self.name = name;
        self.duration = duration;
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(description) = update.description {
            self.description = clean_optional(Some(description));
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Refuses deletion of the Day Pass package.
    pub fn ensure_deletable(&self) -> Result<(), MembershipError> {
        if self.is_day_pass() {
            return Err(MembershipError::protected_package("deleted"));
        }
        Ok(())
    }
}

fn normalize_name(raw: &str) -> Result<String, MembershipError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(MembershipError::validation("name", "Package name cannot be empty"));
    }
    Ok(name.to_string())
}

fn ensure_sentinel_pairing(
    name: &str,
    duration: PackageDuration,
    day_pass_name: &str,
) -> Result<(), MembershipError> {
    let named_day_pass = is_day_pass_label(name, day_pass_name);
    match (duration.is_day_pass(), named_day_pass) {
        (true, false) => Err(MembershipError::validation(
            "duration_months",
            format!("A duration of 0 is reserved for the '{}' package", day_pass_name),
        )),
        (false, true) => Err(MembershipError::validation(
            "name",
            format!("'{}' must have a duration of 0", day_pass_name),
        )),
        _ => Ok(()),
    }
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
