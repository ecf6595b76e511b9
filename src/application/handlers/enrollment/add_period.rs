//! AddPeriodHandler - Administrative period insertion without a payment.
//!
//! Used for comps and corrections. An explicit start is honored only for a
//! member with no history; otherwise the period queues like a renewal.

use std::sync::Arc;

use crate::domain::foundation::{MemberId, PackageId, Timestamp};
use crate::domain::membership::{Member, MembershipError, MembershipPeriod, MembershipRules};
use crate::ports::{Clock, LedgerWrite, LedgerWriter, MemberRepository, PackageRepository, PeriodLedger};

use super::ledger_plan::{load_member, plan_period};

#[derive(Debug, Clone)]
pub struct AddPeriodCommand {
    pub member_id: MemberId,
    pub package_id: PackageId,
    pub start_date: Option<Timestamp>,
}

#[derive(Debug, Clone)]
pub struct AddPeriodResult {
    pub member: Member,
    pub period: MembershipPeriod,
}

pub struct AddPeriodHandler {
    members: Arc<dyn MemberRepository>,
    packages: Arc<dyn PackageRepository>,
    ledger: Arc<dyn PeriodLedger>,
    writer: Arc<dyn LedgerWriter>,
    clock: Arc<dyn Clock>,
    rules: MembershipRules,
}

impl AddPeriodHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        packages: Arc<dyn PackageRepository>,
        ledger: Arc<dyn PeriodLedger>,
        writer: Arc<dyn LedgerWriter>,
        clock: Arc<dyn Clock>,
        rules: MembershipRules,
    ) -> Self {
        Self {
            members,
            packages,
            ledger,
            writer,
            clock,
            rules,
        }
    }

    pub async fn handle(&self, cmd: AddPeriodCommand) -> Result<AddPeriodResult, MembershipError> {
        let now = self.clock.now();

        let mut member = load_member(self.members.as_ref(), cmd.member_id).await?;
        // Inactive packages may still be granted.
        let package = self
            .packages
            .find_by_id(&cmd.package_id)
            .await?
            .ok_or(MembershipError::PackageNotFound(cmd.package_id))?;
        let history = self.ledger.find_periods_by_member(&member.id).await?;

        let planned = plan_period(
            &self.rules,
            member.id,
            &history,
            &package.name,
            package.duration,
            None,
            cmd.start_date,
            now,
        )?;

        self.writer
            .commit(LedgerWrite::period(planned.period.clone(), planned.cache.clone(), now))
            .await?;
        member.apply_cache(&planned.cache, now);

        tracing::info!(
            member_id = %member.id,
            package = %planned.period.package_name,
            period_start = %planned.period.start.to_rfc3339(),
            period_end = %planned.period.end.to_rfc3339(),
            "Period added"
        );

        Ok(AddPeriodResult {
            member,
            period: planned.period,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{ts, Fixture};

    fn handler(fx: &Fixture) -> AddPeriodHandler {
        AddPeriodHandler::new(
            fx.store.clone(),
            fx.store.clone(),
            fx.store.clone(),
            fx.store.clone(),
            fx.clock.clone(),
            fx.rules.clone(),
        )
    }

    #[tokio::test]
    async fn explicit_start_applies_to_empty_history() {
        let fx = Fixture::at("2024-03-05T10:00:00Z").await;
        let member = fx.register("Ana", None).await;

        let result = handler(&fx)
            .handle(AddPeriodCommand {
                member_id: member.id,
                package_id: fx.monthly.id,
                start_date: Some(ts("2024-01-31T10:00:00Z")),
            })
            .await
            .unwrap();

        assert_eq!(result.period.start, ts("2024-01-31T10:00:00Z"));
        assert_eq!(result.period.end, ts("2024-02-29T10:00:00Z"));
        assert_eq!(result.period.payment, None);
        assert_eq!(fx.store.transaction_count().await, 0);
    }

    #[tokio::test]
    async fn explicit_start_with_history_is_rejected() {
        let fx = Fixture::at("2024-03-05T10:00:00Z").await;
        let member = fx.register("Ana", None).await;
        fx.grant(&fx.monthly, member.id, "2024-01-01T00:00:00Z", "2024-02-01T00:00:00Z")
            .await;

        let result = handler(&fx)
            .handle(AddPeriodCommand {
                member_id: member.id,
                package_id: fx.monthly.id,
                start_date: Some(ts("2024-04-01T00:00:00Z")),
            })
            .await;

        assert!(matches!(
            result,
            Err(MembershipError::EmptyHistoryAmbiguity { existing_periods: 1, .. })
        ));
    }

    #[tokio::test]
    async fn unknown_package_is_not_found() {
        let fx = Fixture::at("2024-03-05T10:00:00Z").await;
        let member = fx.register("Ana", None).await;
        let missing = PackageId::new();

        let result = handler(&fx)
            .handle(AddPeriodCommand {
                member_id: member.id,
                package_id: missing,
                start_date: None,
            })
            .await;

        assert_eq!(result.err(), Some(MembershipError::PackageNotFound(missing)));
    }
}
