//! Package repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PackageId};
use crate::domain::membership::MembershipPackage;

#[async_trait]
pub trait PackageRepository: Send + Sync {
    /// Save a new package.
    async fn save(&self, package: &MembershipPackage) -> Result<(), DomainError>;

    /// Update an existing package.
    ///
    /// # Errors
    ///
    /// - `PackageNotFound` if the package doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, package: &MembershipPackage) -> Result<(), DomainError>;

    /// Delete a package. Transactions keep their snapshot and lose the reference.
    ///
    /// Returns `false` if the package did not exist.
    async fn delete(&self, id: &PackageId) -> Result<bool, DomainError>;

    async fn find_by_id(&self, id: &PackageId) -> Result<Option<MembershipPackage>, DomainError>;

    /// Find the active package with this name, compared case-insensitively.
    ///
    /// Used to locate the Day Pass.
    async fn find_active_by_name(&self, name: &str) -> Result<Option<MembershipPackage>, DomainError>;

    /// List packages ordered by duration then name.
    async fn list(&self, include_inactive: bool) -> Result<Vec<MembershipPackage>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn PackageRepository) {}
    }
}
