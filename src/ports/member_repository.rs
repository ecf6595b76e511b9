//! Member repository port (write side).
//!
//! Profiles only. Cache fields are rewritten through
//! [`LedgerWriter`](super::LedgerWriter) so the cache always moves together
//! with the ledger.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MemberId};
use crate::domain::membership::Member;

/// Repository port for member persistence.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Register a member that has no periods yet.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure or if the id is taken
    async fn save(&self, member: &Member) -> Result<(), DomainError>;

    /// Find a member by ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError>;

    /// Find every member registered with this exact (trimmed) phone number.
    ///
    /// Phone numbers are soft-unique, so several members may match.
    async fn find_by_phone(&self, phone: &str) -> Result<Vec<Member>, DomainError>;

    /// Persist profile fields (name, phone, email, notes, active flag).
    ///
    /// Cache fields are never written by this method.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_profile(&self, member: &Member) -> Result<(), DomainError>;

    /// Delete a member together with its periods and check-ins.
    ///
    /// Transactions survive with their member reference cleared.
    /// Returns `false` if the member did not exist.
    async fn delete(&self, id: &MemberId) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn MemberRepository) {}
    }
}
