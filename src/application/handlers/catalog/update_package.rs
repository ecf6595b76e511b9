//! UpdatePackageHandler - Edits a catalog product.
//!
//! The Day Pass keeps its name and duration; only price, description and the
//! active flag may change.

use std::sync::Arc;

use crate::domain::foundation::PackageId;
use crate::domain::membership::{MembershipError, MembershipPackage, MembershipRules, PackageUpdate};
use crate::ports::{Clock, PackageRepository};

#[derive(Debug, Clone)]
pub struct UpdatePackageCommand {
    pub package_id: PackageId,
    pub update: PackageUpdate,
}

pub struct UpdatePackageHandler {
    packages: Arc<dyn PackageRepository>,
    clock: Arc<dyn Clock>,
    rules: MembershipRules,
}

impl UpdatePackageHandler {
    pub fn new(packages: Arc<dyn PackageRepository>, clock: Arc<dyn Clock>, rules: MembershipRules) -> Self {
        Self {
            packages,
            clock,
            rules,
        }
    }

    pub async fn handle(&self, cmd: UpdatePackageCommand) -> Result<MembershipPackage, MembershipError> {
        let mut package = self
            .packages
            .find_by_id(&cmd.package_id)
            .await?
            .ok_or(MembershipError::PackageNotFound(cmd.package_id))?;
        let was_active = package.is_active;

        package.apply_update(cmd.update, &self.rules.day_pass_name, self.clock.now())?;

        if package.is_day_pass() && package.is_active && !was_active {
            let active = self.packages.list(false).await?;
            if active.iter().any(|p| p.id != package.id && p.is_day_pass()) {
                return Err(MembershipError::DuplicateDayPass);
            }
        }

        self.packages.update(&package).await?;
        tracing::info!(package_id = %package.id, package = %package.name, "Package updated");
        Ok(package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::Money;
    use crate::domain::membership::PackageDuration;

    fn handler(fx: &Fixture) -> UpdatePackageHandler {
        UpdatePackageHandler::new(fx.store.clone(), fx.clock.clone(), fx.rules.clone())
    }

    #[tokio::test]
    async fn day_pass_price_can_change() {
        let fx = Fixture::at("2024-01-01T00:00:00Z").await;

        let updated = handler(&fx)
            .handle(UpdatePackageCommand {
                package_id: fx.day_pass.id,
                update: PackageUpdate {
                    price: Some(Money::from_minor_units(30_000)),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(updated.price.minor_units(), 30_000);
    }

    #[tokio::test]
    async fn day_pass_cannot_be_renamed() {
        let fx = Fixture::at("2024-01-01T00:00:00Z").await;

        let result = handler(&fx)
            .handle(UpdatePackageCommand {
                package_id: fx.day_pass.id,
                update: PackageUpdate {
                    name: Some("Single Visit".to_string()),
                    ..Default::default()
                },
            })
            .await;

        assert_eq!(
            result.err(),
            Some(MembershipError::ProtectedPackage("renamed".to_string()))
        );
    }

    #[tokio::test]
    async fn day_pass_duration_is_fixed() {
        let fx = Fixture::at("2024-01-01T00:00:00Z").await;

        let result = handler(&fx)
            .handle(UpdatePackageCommand {
                package_id: fx.day_pass.id,
                update: PackageUpdate {
                    duration: Some(PackageDuration::Months(1)),
                    ..Default::default()
                },
            })
            .await;

        assert!(matches!(result, Err(MembershipError::ProtectedPackage(_))));
    }

    #[tokio::test]
    async fn regular_package_can_be_retired() {
        let fx = Fixture::at("2024-01-01T00:00:00Z").await;

        let updated = handler(&fx)
            .handle(UpdatePackageCommand {
                package_id: fx.quarterly.id,
                update: PackageUpdate {
                    is_active: Some(false),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert!(!updated.is_active);
        let active = PackageRepository::list(fx.store.as_ref(), false).await.unwrap();
        assert!(active.iter().all(|p| p.id != fx.quarterly.id));
    }
}
