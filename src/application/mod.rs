//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers write through the ledger writer; query handlers only read.

pub mod handlers;

pub use handlers::catalog::{
    CreatePackageCommand, CreatePackageHandler, CreatePaymentMethodCommand,
    CreatePaymentMethodHandler, DeletePackageCommand, DeletePackageHandler, ListPackagesHandler,
    ListPaymentMethodsHandler, UpdatePackageCommand, UpdatePackageHandler,
};
pub use handlers::enrollment::{
    AddPeriodCommand, AddPeriodHandler, AddPeriodResult, CheckInCommand, CheckInHandler,
    CheckInResult, EnrollMemberCommand, EnrollMemberHandler, EnrollMemberResult, PurchaseDayPassCommand,
    PurchaseDayPassHandler, PurchaseDayPassResult, PurchasedPass, RenewMembershipCommand,
    RenewMembershipHandler, RenewMembershipResult,
};
pub use handlers::members::{
    DeleteMemberCommand, DeleteMemberHandler, GetMemberHandler, GetMemberQuery, GetMemberResult,
    GetMemberStatusHandler, GetMemberStatusQuery, GetMemberStatusResult, GetMembershipHistoryHandler,
    GetMembershipHistoryQuery, GetMembershipHistoryResult, HistoryEntry, ListMembersHandler,
    RegisterMemberCommand, RegisterMemberHandler, UpdateMemberCommand, UpdateMemberHandler,
};
pub use handlers::reports::{GetRevenueReportHandler, GetRevenueReportQuery, RevenueLine, RevenueReport};
