//! Shared application state for the HTTP adapter.

use std::sync::Arc;

use crate::adapters::memory::InMemoryStore;
use crate::application::handlers::catalog::{
    CreatePackageHandler, CreatePaymentMethodHandler, DeletePackageHandler, ListPackagesHandler,
    ListPaymentMethodsHandler, UpdatePackageHandler,
};
use crate::application::handlers::enrollment::{
    AddPeriodHandler, CheckInHandler, EnrollMemberHandler, PurchaseDayPassHandler,
    RenewMembershipHandler,
};
use crate::application::handlers::members::{
    DeleteMemberHandler, GetMemberHandler, GetMemberStatusHandler, GetMembershipHistoryHandler,
    ListMembersHandler, RegisterMemberHandler, UpdateMemberHandler,
};
use crate::application::handlers::reports::GetRevenueReportHandler;
use crate::domain::membership::MembershipRules;
use crate::ports::{
    AdminAuthenticator, CheckInRepository, Clock, LedgerWriter, MemberReader, MemberRepository,
    PackageRepository, PaymentMethodRepository, PeriodLedger, TransactionReader,
};

/// Shared application state containing all dependencies.
///
/// Cloned for each request; handlers are built on demand from the
/// Arc-wrapped ports.
#[derive(Clone)]
pub struct AppState {
    pub members: Arc<dyn MemberRepository>,
    pub member_reader: Arc<dyn MemberReader>,
    pub packages: Arc<dyn PackageRepository>,
    pub payment_methods: Arc<dyn PaymentMethodRepository>,
    pub ledger: Arc<dyn PeriodLedger>,
    pub writer: Arc<dyn LedgerWriter>,
    pub check_ins: Arc<dyn CheckInRepository>,
    pub transactions: Arc<dyn TransactionReader>,
    pub authenticator: Arc<dyn AdminAuthenticator>,
    pub clock: Arc<dyn Clock>,
    pub rules: MembershipRules,
}

impl AppState {
    /// State with every persistence port served by one in-memory store.
    pub fn in_memory(
        store: Arc<InMemoryStore>,
        authenticator: Arc<dyn AdminAuthenticator>,
        clock: Arc<dyn Clock>,
        rules: MembershipRules,
    ) -> Self {
        Self {
            members: store.clone(),
            member_reader: store.clone(),
            packages: store.clone(),
            payment_methods: store.clone(),
            ledger: store.clone(),
            writer: store.clone(),
            check_ins: store.clone(),
            transactions: store,
            authenticator,
            clock,
            rules,
        }
    }

    // Members

    pub fn register_member_handler(&self) -> RegisterMemberHandler {
        RegisterMemberHandler::new(self.members.clone(), self.clock.clone())
    }

    pub fn update_member_handler(&self) -> UpdateMemberHandler {
        UpdateMemberHandler::new(self.members.clone(), self.clock.clone())
    }

    pub fn delete_member_handler(&self) -> DeleteMemberHandler {
        DeleteMemberHandler::new(self.members.clone())
    }

    pub fn get_member_handler(&self) -> GetMemberHandler {
        GetMemberHandler::new(self.members.clone(), self.check_ins.clone())
    }

    pub fn member_status_handler(&self) -> GetMemberStatusHandler {
        GetMemberStatusHandler::new(
            self.members.clone(),
            self.ledger.clone(),
            self.clock.clone(),
            self.rules.clone(),
        )
    }

    pub fn membership_history_handler(&self) -> GetMembershipHistoryHandler {
        GetMembershipHistoryHandler::new(
            self.members.clone(),
            self.ledger.clone(),
            self.clock.clone(),
            self.rules.clone(),
        )
    }

    pub fn list_members_handler(&self) -> ListMembersHandler {
        ListMembersHandler::new(self.member_reader.clone())
    }

    // Enrollment

    pub fn enroll_member_handler(&self) -> EnrollMemberHandler {
        EnrollMemberHandler::new(
            self.members.clone(),
            self.packages.clone(),
            self.payment_methods.clone(),
            self.ledger.clone(),
            self.writer.clone(),
            self.clock.clone(),
            self.rules.clone(),
        )
    }

    pub fn renew_membership_handler(&self) -> RenewMembershipHandler {
        RenewMembershipHandler::new(
            self.members.clone(),
            self.packages.clone(),
            self.payment_methods.clone(),
            self.ledger.clone(),
            self.writer.clone(),
            self.clock.clone(),
            self.rules.clone(),
        )
    }

    pub fn purchase_day_pass_handler(&self) -> PurchaseDayPassHandler {
        PurchaseDayPassHandler::new(
            self.members.clone(),
            self.packages.clone(),
            self.payment_methods.clone(),
            self.ledger.clone(),
            self.writer.clone(),
            self.clock.clone(),
            self.rules.clone(),
        )
    }

    pub fn add_period_handler(&self) -> AddPeriodHandler {
        AddPeriodHandler::new(
            self.members.clone(),
            self.packages.clone(),
            self.ledger.clone(),
            self.writer.clone(),
            self.clock.clone(),
            self.rules.clone(),
        )
    }

    pub fn check_in_handler(&self) -> CheckInHandler {
        CheckInHandler::new(
            self.members.clone(),
            self.packages.clone(),
            self.payment_methods.clone(),
            self.ledger.clone(),
            self.writer.clone(),
            self.check_ins.clone(),
            self.clock.clone(),
            self.rules.clone(),
        )
    }

    // Catalog

    pub fn create_package_handler(&self) -> CreatePackageHandler {
        CreatePackageHandler::new(self.packages.clone(), self.clock.clone(), self.rules.clone())
    }

    pub fn update_package_handler(&self) -> UpdatePackageHandler {
        UpdatePackageHandler::new(self.packages.clone(), self.clock.clone(), self.rules.clone())
    }

    pub fn delete_package_handler(&self) -> DeletePackageHandler {
        DeletePackageHandler::new(self.packages.clone())
    }

    pub fn list_packages_handler(&self) -> ListPackagesHandler {
        ListPackagesHandler::new(self.packages.clone())
    }

    pub fn create_payment_method_handler(&self) -> CreatePaymentMethodHandler {
        CreatePaymentMethodHandler::new(self.payment_methods.clone(), self.clock.clone())
    }

    pub fn list_payment_methods_handler(&self) -> ListPaymentMethodsHandler {
        ListPaymentMethodsHandler::new(self.payment_methods.clone())
    }

    // Reports

    pub fn revenue_report_handler(&self) -> GetRevenueReportHandler {
        GetRevenueReportHandler::new(self.transactions.clone(), self.payment_methods.clone())
    }
}
