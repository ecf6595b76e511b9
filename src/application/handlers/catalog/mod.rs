//! Catalog handlers: membership packages and payment methods.

mod create_package;
mod delete_package;
mod list_packages;
mod payment_methods;
mod update_package;

pub use create_package::{CreatePackageCommand, CreatePackageHandler};
pub use delete_package::{DeletePackageCommand, DeletePackageHandler};
pub use list_packages::ListPackagesHandler;
pub use payment_methods::{
    CreatePaymentMethodCommand, CreatePaymentMethodHandler, ListPaymentMethodsHandler,
};
pub use update_package::{UpdatePackageCommand, UpdatePackageHandler};
