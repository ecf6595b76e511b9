//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresMemberRepository` / `PostgresMemberReader` - Members
//! - `PostgresPackageRepository` - Membership packages
//! - `PostgresPaymentMethodRepository` - Payment methods
//! - `PostgresPeriodLedger` - Period history and the atomic ledger write
//! - `PostgresCheckInRepository` - Check-ins
//! - `PostgresTransactionReader` - Payments for reports

mod check_in_repository;
mod member_reader;
mod member_repository;
mod package_repository;
mod payment_method_repository;
mod period_ledger;
mod transaction_reader;

pub use check_in_repository::PostgresCheckInRepository;
pub use member_reader::PostgresMemberReader;
pub use member_repository::PostgresMemberRepository;
pub use package_repository::PostgresPackageRepository;
pub use payment_method_repository::PostgresPaymentMethodRepository;
pub use period_ledger::PostgresPeriodLedger;
pub use transaction_reader::PostgresTransactionReader;
