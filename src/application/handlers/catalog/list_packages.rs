//! ListPackagesHandler - Catalog listing.

use std::sync::Arc;

use crate::domain::membership::{MembershipError, MembershipPackage};
use crate::ports::PackageRepository;

pub struct ListPackagesHandler {
    packages: Arc<dyn PackageRepository>,
}

impl ListPackagesHandler {
    pub fn new(packages: Arc<dyn PackageRepository>) -> Self {
        Self { packages }
    }

    pub async fn handle(&self, include_inactive: bool) -> Result<Vec<MembershipPackage>, MembershipError> {
        Ok(self.packages.list(include_inactive).await?)
    }
}
