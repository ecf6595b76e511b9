//! Transaction reader port for financial reporting.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::membership::Transaction;

#[async_trait]
pub trait TransactionReader: Send + Sync {
    /// Transactions with `from <= occurred_at < to`, oldest first.
    async fn list_between(&self, from: Timestamp, to: Timestamp) -> Result<Vec<Transaction>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn TransactionReader) {}
    }
}
