//! Check-in repository port.
//!
//! Check-ins that come with a day-pass purchase are written through
//! [`LedgerWriter`](super::LedgerWriter) instead.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MemberId};
use crate::domain::membership::CheckIn;

#[async_trait]
pub trait CheckInRepository: Send + Sync {
    async fn record(&self, check_in: &CheckIn) -> Result<(), DomainError>;

    /// Most recent first, at most `limit`.
    async fn list_by_member(&self, member_id: &MemberId, limit: u32) -> Result<Vec<CheckIn>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_in_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn CheckInRepository) {}
    }
}
