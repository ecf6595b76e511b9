//! CheckInHandler - Records a facility visit.
//!
//! A member with a period covering the visit is checked in directly. A
//! membership that has not started yet does not count. A member without cover
//! may buy a Day Pass at the desk; the pass and the visit are committed in the
//! same ledger write. Otherwise the visit is refused.

use std::sync::Arc;

use crate::domain::foundation::{CheckInId, MemberId, Money, PaymentMethodId, PeriodId, Timestamp};
use crate::domain::membership::{
    sorted_by_start, CheckIn, Continuity, MembershipError, MembershipPeriod, MembershipRules,
    PeriodPhase, Transaction,
};
use crate::ports::{
    CheckInRepository, Clock, LedgerWrite, LedgerWriter, MemberRepository, PackageRepository,
    PaymentMethodRepository, PeriodLedger,
};

use super::ledger_plan::{ensure_payment_method, load_day_pass, load_member, plan_sale, Sale};

#[derive(Debug, Clone)]
pub struct CheckInCommand {
    pub member_id: MemberId,
    /// Buy a Day Pass if the member has no current entitlement.
    pub purchase_day_pass: bool,
    pub payment_method_id: Option<PaymentMethodId>,
    pub amount: Option<Money>,
}

/// Day Pass bought as part of a check-in.
#[derive(Debug, Clone)]
pub struct PurchasedPass {
    pub period: MembershipPeriod,
    pub transaction: Transaction,
}

#[derive(Debug, Clone)]
pub struct CheckInResult {
    pub check_in: CheckIn,
    /// Continuity after the visit, including any pass just bought.
    pub continuity: Continuity,
    pub purchased: Option<PurchasedPass>,
}

pub struct CheckInHandler {
    members: Arc<dyn MemberRepository>,
    packages: Arc<dyn PackageRepository>,
    payment_methods: Arc<dyn PaymentMethodRepository>,
    ledger: Arc<dyn PeriodLedger>,
    writer: Arc<dyn LedgerWriter>,
    check_ins: Arc<dyn CheckInRepository>,
    clock: Arc<dyn Clock>,
    rules: MembershipRules,
}

impl CheckInHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        members: Arc<dyn MemberRepository>,
        packages: Arc<dyn PackageRepository>,
        payment_methods: Arc<dyn PaymentMethodRepository>,
        ledger: Arc<dyn PeriodLedger>,
        writer: Arc<dyn LedgerWriter>,
        check_ins: Arc<dyn CheckInRepository>,
        clock: Arc<dyn Clock>,
        rules: MembershipRules,
    ) -> Self {
        Self {
            members,
            packages,
            payment_methods,
            ledger,
            writer,
            check_ins,
            clock,
            rules,
        }
    }

    pub async fn handle(&self, cmd: CheckInCommand) -> Result<CheckInResult, MembershipError> {
        let now = self.clock.now();

        let member = load_member(self.members.as_ref(), cmd.member_id).await?;
        if !member.is_active {
            return Err(MembershipError::validation("member_id", "member is deactivated"));
        }
        let history = self.ledger.find_periods_by_member(&member.id).await?;
        let resolver = self.rules.continuity_resolver();
        let day_pass_member = member
            .membership_type
            .as_deref()
            .map(|label| self.rules.is_day_pass_label(label))
            .unwrap_or(false);

        // A membership that only starts later does not admit the member today.
        if let Some(period_id) = self.covering_period(&history, now, day_pass_member) {
            let continuity =
                resolver.resolve_continuity(&history, member.membership_type.as_deref(), now)?;
            let check_in = CheckIn {
                id: CheckInId::new(),
                member_id: member.id,
                checked_in_at: now,
                period_id: Some(period_id),
            };
            self.check_ins.record(&check_in).await?;

            tracing::info!(member_id = %member.id, days_remaining = continuity.days_remaining, "Member checked in");
            return Ok(CheckInResult {
                check_in,
                continuity,
                purchased: None,
            });
        }

        if !cmd.purchase_day_pass {
            tracing::info!(member_id = %member.id, "Check-in refused: no active membership");
            return Err(MembershipError::NoActiveEntitlement(member.id));
        }

        // Buy a pass and check in with it
        let package = load_day_pass(self.packages.as_ref(), &self.rules).await?;
        ensure_payment_method(self.payment_methods.as_ref(), cmd.payment_method_id).await?;
        let sale = Sale {
            package,
            payment_method_id: cmd.payment_method_id,
            amount: cmd.amount,
            notes: Some("Purchased at check-in".to_string()),
        };
        let planned = plan_sale(&self.rules, member.id, &history, sale, None, now)?;
        if !self.covers(&planned.period, now, true) {
            tracing::info!(
                member_id = %member.id,
                period_start = %planned.period.start.to_rfc3339(),
                "Check-in refused: day pass would queue behind an upcoming membership"
            );
            return Err(MembershipError::validation(
                "purchase_day_pass",
                "a day pass bought now would start after the upcoming membership",
            ));
        }
        let transaction = planned
            .transaction
            .clone()
            .ok_or_else(|| MembershipError::PersistenceFailure("sale produced no transaction".to_string()))?;
        let check_in = CheckIn {
            id: CheckInId::new(),
            member_id: member.id,
            checked_in_at: now,
            period_id: Some(planned.period.id),
        };

        self.writer
            .commit(
                LedgerWrite::period(planned.period.clone(), planned.cache.clone(), now)
                    .with_transaction(transaction.clone())
                    .with_check_in(check_in.clone()),
            )
            .await?;

        let mut ledger = history;
        ledger.push(planned.period.clone());
        let continuity =
            resolver.resolve_continuity(&ledger, planned.cache.membership_type.as_deref(), now)?;

        tracing::info!(
            member_id = %member.id,
            package = %planned.period.package_name,
            period_start = %planned.period.start.to_rfc3339(),
            period_end = %planned.period.end.to_rfc3339(),
            "Member checked in with a day pass"
        );

        Ok(CheckInResult {
            check_in,
            continuity,
            purchased: Some(PurchasedPass {
                period: planned.period,
                transaction,
            }),
        })
    }

    /// Period the visit falls in; Day Pass members match on local dates.
    fn covering_period(
        &self,
        history: &[MembershipPeriod],
        now: Timestamp,
        day_pass_member: bool,
    ) -> Option<PeriodId> {
        let sorted = sorted_by_start(history);
        sorted
            .iter()
            .find(|p| self.covers(p, now, false))
            .or_else(|| sorted.iter().find(|p| day_pass_member && self.covers(p, now, true)))
            .map(|p| p.id)
    }

    fn covers(&self, period: &MembershipPeriod, now: Timestamp, by_date: bool) -> bool {
        if period.phase(now) == PeriodPhase::Current {
            return true;
        }
        let calendar = self.rules.calendar;
        let today = calendar.local_date(now);
        by_date && calendar.local_date(period.start) <= today && calendar.local_date(period.end) >= today
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{ts, Fixture};
    use crate::domain::membership::ContinuityStatus;

    fn handler(fx: &Fixture) -> CheckInHandler {
        CheckInHandler::new(
            fx.store.clone(),
            fx.store.clone(),
            fx.store.clone(),
            fx.store.clone(),
            fx.store.clone(),
            fx.store.clone(),
            fx.clock.clone(),
            fx.rules.clone(),
        )
    }

    fn command(member_id: MemberId, purchase_day_pass: bool) -> CheckInCommand {
        CheckInCommand {
            member_id,
            purchase_day_pass,
            payment_method_id: None,
            amount: None,
        }
    }

    #[tokio::test]
    async fn entitled_member_checks_in_against_current_period() {
        let fx = Fixture::at("2024-01-15T07:30:00Z").await;
        let member = fx.register("Ana", None).await;
        let period = fx
            .grant(&fx.monthly, member.id, "2024-01-01T00:00:00Z", "2024-02-01T00:00:00Z")
            .await;

        let result = handler(&fx).handle(command(member.id, false)).await.unwrap();

        assert_eq!(result.check_in.period_id, Some(period.id));
        assert_eq!(result.continuity.status, ContinuityStatus::Active);
        assert!(result.purchased.is_none());
        let visits = fx.store.list_by_member(&member.id, 10).await.unwrap();
        assert_eq!(visits.len(), 1);
    }

    #[tokio::test]
    async fn lapsed_member_is_refused_without_purchase() {
        let fx = Fixture::at("2024-03-15T07:30:00Z").await;
        let member = fx.register("Ana", None).await;
        fx.grant(&fx.monthly, member.id, "2024-01-01T00:00:00Z", "2024-02-01T00:00:00Z")
            .await;

        let result = handler(&fx).handle(command(member.id, false)).await;

        assert_eq!(result.err(), Some(MembershipError::NoActiveEntitlement(member.id)));
        assert!(fx.store.list_by_member(&member.id, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lapsed_member_can_buy_a_pass_at_the_desk() {
        let fx = Fixture::at("2024-03-15T07:30:00Z").await;
        let member = fx.register("Ana", None).await;

        let result = handler(&fx).handle(command(member.id, true)).await.unwrap();

        let purchased = result.purchased.unwrap();
        assert_eq!(purchased.period.start, ts("2024-03-15T00:00:00Z"));
        assert_eq!(result.check_in.period_id, Some(purchased.period.id));
        assert_eq!(result.continuity.status, ContinuityStatus::Active);
        assert_eq!(result.continuity.days_remaining, 1);
        assert_eq!(fx.store.transaction_count().await, 1);
        assert_eq!(fx.store.list_by_member(&member.id, 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn day_pass_member_stays_entitled_until_local_midnight() {
        let fx = Fixture::at("2024-05-10T22:00:00Z").await;
        let member = fx.register("Walk-in", None).await;
        let pass = fx
            .grant(&fx.day_pass, member.id, "2024-05-10T00:00:00Z", "2024-05-10T23:59:59.999Z")
            .await;

        let result = handler(&fx).handle(command(member.id, false)).await.unwrap();

        assert_eq!(result.check_in.period_id, Some(pass.id));
        assert!(result.purchased.is_none());
    }

    #[tokio::test]
    async fn deactivated_member_is_refused() {
        let fx = Fixture::at("2024-01-15T07:30:00Z").await;
        let mut member = fx.register("Ana", None).await;
        fx.grant(&fx.monthly, member.id, "2024-01-01T00:00:00Z", "2024-02-01T00:00:00Z")
            .await;
        member.is_active = false;
        fx.store.update_profile(&member).await.unwrap();

        let result = handler(&fx).handle(command(member.id, true)).await;

        assert!(matches!(result, Err(MembershipError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn upcoming_membership_does_not_admit_early() {
        let fx = Fixture::at("2024-06-15T07:30:00Z").await;
        let member = fx.register("Ana", None).await;
        fx.grant(&fx.monthly, member.id, "2024-07-01T00:00:00Z", "2024-08-01T00:00:00Z")
            .await;

        let result = handler(&fx).handle(command(member.id, false)).await;

        assert_eq!(result.err(), Some(MembershipError::NoActiveEntitlement(member.id)));
        assert!(fx.store.list_by_member(&member.id, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn desk_pass_is_refused_while_a_membership_is_queued() {
        let fx = Fixture::at("2024-06-15T07:30:00Z").await;
        let member = fx.register("Ana", None).await;
        fx.grant(&fx.monthly, member.id, "2024-07-01T00:00:00Z", "2024-08-01T00:00:00Z")
            .await;

        let result = handler(&fx).handle(command(member.id, true)).await;

        match result {
            Err(MembershipError::ValidationFailed { field, .. }) => assert_eq!(field, "purchase_day_pass"),
            other => panic!("expected validation failure, got {:?}", other),
        }
        assert_eq!(fx.store.transaction_count().await, 0);
        assert!(fx.store.list_by_member(&member.id, 10).await.unwrap().is_empty());
    }
}
