//! CreatePackageHandler - Adds a product to the catalog.

use std::sync::Arc;

use crate::domain::foundation::PackageId;
use crate::domain::membership::{MembershipError, MembershipPackage, MembershipRules, NewPackage};
use crate::ports::{Clock, PackageRepository};

#[derive(Debug, Clone)]
pub struct CreatePackageCommand {
    pub package: NewPackage,
}

pub struct CreatePackageHandler {
    packages: Arc<dyn PackageRepository>,
    clock: Arc<dyn Clock>,
    rules: MembershipRules,
}

impl CreatePackageHandler {
    pub fn new(packages: Arc<dyn PackageRepository>, clock: Arc<dyn Clock>, rules: MembershipRules) -> Self {
        Self {
            packages,
            clock,
            rules,
        }
    }

    pub async fn handle(&self, cmd: CreatePackageCommand) -> Result<MembershipPackage, MembershipError> {
        let package = MembershipPackage::create(
            PackageId::new(),
            cmd.package,
            &self.rules.day_pass_name,
            self.clock.now(),
        )?;

        if package.is_day_pass() {
            let active = self.packages.list(false).await?;
            if active.iter().any(MembershipPackage::is_day_pass) {
                return Err(MembershipError::DuplicateDayPass);
            }
        }

        self.packages.save(&package).await?;
        tracing::info!(package_id = %package.id, package = %package.name, "Package created");
        Ok(package)
    }
}
