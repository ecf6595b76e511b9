//! Payment method repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PaymentMethodId};
use crate::domain::membership::PaymentMethod;

#[async_trait]
pub trait PaymentMethodRepository: Send + Sync {
    async fn save(&self, method: &PaymentMethod) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &PaymentMethodId) -> Result<Option<PaymentMethod>, DomainError>;

    /// List payment methods ordered by name.
    async fn list(&self, include_inactive: bool) -> Result<Vec<PaymentMethod>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_method_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn PaymentMethodRepository) {}
    }
}
