//! Money value object in currency minor units.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use super::ValidationError;

/// Non-negative amount stored as integer minor units (never floats).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates an amount, rejecting negative values.
    pub fn try_new(minor_units: i64, field: &str) -> Result<Self, ValidationError> {
        if minor_units < 0 {
            return Err(ValidationError::invalid_format(field, "amount cannot be negative"));
        }
        Ok(Self(minor_units))
    }

    /// Creates an amount from trusted storage.
    pub fn from_minor_units(minor_units: i64) -> Self {
        Self(minor_units)
    }

    /// Returns the amount in minor units.
    pub fn minor_units(&self) -> i64 {
        self.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(Money::try_new(-1, "price").is_err());
        assert_eq!(Money::try_new(0, "price").unwrap(), Money::ZERO);
    }

    #[test]
    fn amounts_sum() {
        let total: Money = [150_000, 150_000, 25_000]
            .into_iter()
            .map(Money::from_minor_units)
            .sum();
        assert_eq!(total.minor_units(), 325_000);
    }
}
