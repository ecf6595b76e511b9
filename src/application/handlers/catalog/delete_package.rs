//! DeletePackageHandler - Removes a catalog product.
//!
//! Past transactions keep their snapshot of the package name and duration.

use std::sync::Arc;

use crate::domain::foundation::PackageId;
use crate::domain::membership::MembershipError;
use crate::ports::PackageRepository;

#[derive(Debug, Clone)]
pub struct DeletePackageCommand {
    pub package_id: PackageId,
}

pub struct DeletePackageHandler {
    packages: Arc<dyn PackageRepository>,
}

impl DeletePackageHandler {
    pub fn new(packages: Arc<dyn PackageRepository>) -> Self {
        Self { packages }
    }

    pub async fn handle(&self, cmd: DeletePackageCommand) -> Result<(), MembershipError> {
        let package = self
            .packages
            .find_by_id(&cmd.package_id)
            .await?
            .ok_or(MembershipError::PackageNotFound(cmd.package_id))?;
        package.ensure_deletable()?;

        if !self.packages.delete(&package.id).await? {
            return Err(MembershipError::PackageNotFound(package.id));
        }
        tracing::info!(package_id = %package.id, package = %package.name, "Package deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;

    #[tokio::test]
    async fn regular_package_is_deleted() {
        let fx = Fixture::at("2024-01-01T00:00:00Z").await;
        let handler = DeletePackageHandler::new(fx.store.clone());

        handler
            .handle(DeletePackageCommand { package_id: fx.quarterly.id })
            .await
            .unwrap();

        assert!(PackageRepository::find_by_id(fx.store.as_ref(), &fx.quarterly.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn day_pass_is_protected() {
        let fx = Fixture::at("2024-01-01T00:00:00Z").await;
        let handler = DeletePackageHandler::new(fx.store.clone());

        let result = handler
            .handle(DeletePackageCommand { package_id: fx.day_pass.id })
            .await;

        assert_eq!(result, Err(MembershipError::ProtectedPackage("deleted".to_string())));
        assert!(PackageRepository::find_by_id(fx.store.as_ref(), &fx.day_pass.id).await.unwrap().is_some());
    }
}
