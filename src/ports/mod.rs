//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `MemberRepository` / `MemberReader` - Member profiles and listings
//! - `PackageRepository` - Membership packages, including the Day Pass
//! - `PaymentMethodRepository` - Accepted payment methods
//! - `PeriodLedger` / `LedgerWriter` - Period history and atomic writes
//! - `CheckInRepository` - Facility visits
//! - `TransactionReader` - Payments for financial reports
//!
//! ## Other Ports
//!
//! - `AdminAuthenticator` - Shared-secret admin login and token validation
//! - `Clock` - Source of the reference instant

mod admin_authenticator;
mod check_in_repository;
mod clock;
mod member_reader;
mod member_repository;
mod package_repository;
mod payment_method_repository;
mod period_ledger;
mod transaction_reader;

pub use admin_authenticator::AdminAuthenticator;
pub use check_in_repository::CheckInRepository;
pub use clock::Clock;
pub use member_reader::{MemberPage, MemberQuery, MemberReader, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use member_repository::MemberRepository;
pub use package_repository::PackageRepository;
pub use payment_method_repository::PaymentMethodRepository;
pub use period_ledger::{LedgerWrite, LedgerWriter, PeriodLedger};
pub use transaction_reader::TransactionReader;
