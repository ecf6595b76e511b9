//! PurchaseDayPassHandler - Sells the Day Pass package.
//!
//! The pass lands on today when the member has no future entitlement, or on
//! the day after their latest end otherwise, so passes bought in advance stack.

use std::sync::Arc;

use crate::domain::foundation::{MemberId, Money, PaymentMethodId};
use crate::domain::membership::{
    Member, MembershipError, MembershipPeriod, MembershipRules, Transaction,
};
use crate::ports::{
    Clock, LedgerWrite, LedgerWriter, MemberRepository, PackageRepository,
    PaymentMethodRepository, PeriodLedger,
};

use super::ledger_plan::{ensure_payment_method, load_day_pass, load_member, plan_sale, Sale};

#[derive(Debug, Clone)]
pub struct PurchaseDayPassCommand {
    pub member_id: MemberId,
    pub payment_method_id: Option<PaymentMethodId>,
    pub amount: Option<Money>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PurchaseDayPassResult {
    pub member: Member,
    pub period: MembershipPeriod,
    pub transaction: Transaction,
}

pub struct PurchaseDayPassHandler {
    members: Arc<dyn MemberRepository>,
    packages: Arc<dyn PackageRepository>,
    payment_methods: Arc<dyn PaymentMethodRepository>,
    ledger: Arc<dyn PeriodLedger>,
    writer: Arc<dyn LedgerWriter>,
    clock: Arc<dyn Clock>,
    rules: MembershipRules,
}

impl PurchaseDayPassHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        packages: Arc<dyn PackageRepository>,
        payment_methods: Arc<dyn PaymentMethodRepository>,
        ledger: Arc<dyn PeriodLedger>,
        writer: Arc<dyn LedgerWriter>,
        clock: Arc<dyn Clock>,
        rules: MembershipRules,
    ) -> Self {
        Self {
            members,
            packages,
            payment_methods,
            ledger,
            writer,
            clock,
            rules,
        }
    }

    pub async fn handle(
        &self,
        cmd: PurchaseDayPassCommand,
    ) -> Result<PurchaseDayPassResult, MembershipError> {
        let now = self.clock.now();

        let mut member = load_member(self.members.as_ref(), cmd.member_id).await?;
        let package = load_day_pass(self.packages.as_ref(), &self.rules).await?;
        ensure_payment_method(self.payment_methods.as_ref(), cmd.payment_method_id).await?;
        let history = self.ledger.find_periods_by_member(&member.id).await?;

        let sale = Sale {
            package,
            payment_method_id: cmd.payment_method_id,
            amount: cmd.amount,
            notes: cmd.notes,
        };
        let planned = plan_sale(&self.rules, member.id, &history, sale, None, now)?;
        let transaction = planned
            .transaction
            .clone()
            .ok_or_else(|| MembershipError::PersistenceFailure("sale produced no transaction".to_string()))?;

        self.writer
            .commit(
                LedgerWrite::period(planned.period.clone(), planned.cache.clone(), now)
                    .with_transaction(transaction.clone()),
            )
            .await?;
        member.apply_cache(&planned.cache, now);

        tracing::info!(
            member_id = %member.id,
            package = %planned.period.package_name,
            period_start = %planned.period.start.to_rfc3339(),
            period_end = %planned.period.end.to_rfc3339(),
            "Day pass purchased"
        );

        Ok(PurchaseDayPassResult {
            member,
            period: planned.period,
            transaction,
        })
    }
}
