//! Payment methods accepted at the front desk.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PaymentMethodId, Timestamp, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    pub name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl PaymentMethod {
    pub fn create(id: PaymentMethodId, name: &str, now: Timestamp) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            id,
            name: name.to_string(),
            is_active: true,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        assert!(PaymentMethod::create(PaymentMethodId::new(), " ", Timestamp::now()).is_err());
    }

    #[test]
    fn create_trims_name() {
        let method = PaymentMethod::create(PaymentMethodId::new(), " Cash ", Timestamp::now()).unwrap();
        assert_eq!(method.name, "Cash");
        assert!(method.is_active);
    }
}
