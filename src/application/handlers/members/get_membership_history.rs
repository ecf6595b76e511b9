//! GetMembershipHistoryHandler - Full ledger with engagement statistics.

use std::sync::Arc;

use crate::domain::foundation::MemberId;
use crate::domain::membership::{
    sorted_by_start, EngagementSummary, Member, MembershipError, MembershipPeriod, MembershipRules,
    PeriodPhase,
};
use crate::ports::{Clock, MemberRepository, PeriodLedger};

#[derive(Debug, Clone)]
pub struct GetMembershipHistoryQuery {
    pub member_id: MemberId,
}

/// A ledger entry with its phase relative to now.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub period: MembershipPeriod,
    pub phase: PeriodPhase,
}

#[derive(Debug, Clone)]
pub struct GetMembershipHistoryResult {
    pub member: Member,
    /// Newest first.
    pub entries: Vec<HistoryEntry>,
    pub engagement: EngagementSummary,
}

pub struct GetMembershipHistoryHandler {
    members: Arc<dyn MemberRepository>,
    ledger: Arc<dyn PeriodLedger>,
    clock: Arc<dyn Clock>,
    rules: MembershipRules,
}

impl GetMembershipHistoryHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        ledger: Arc<dyn PeriodLedger>,
        clock: Arc<dyn Clock>,
        rules: MembershipRules,
    ) -> Self {
        Self {
            members,
            ledger,
            clock,
            rules,
        }
    }

    pub async fn handle(
        &self,
        query: GetMembershipHistoryQuery,
    ) -> Result<GetMembershipHistoryResult, MembershipError> {
        let member = self
            .members
            .find_by_id(&query.member_id)
            .await?
            .ok_or(MembershipError::MemberNotFound(query.member_id))?;
        let history = self.ledger.find_periods_by_member(&member.id).await?;

        let engagement = self.rules.engagement_analyzer().analyze_engagement(&history)?;

        let now = self.clock.now();
        let entries = sorted_by_start(&history)
            .into_iter()
            .rev()
            .map(|period| HistoryEntry {
                phase: period.phase(now),
                period,
            })
            .collect();

        Ok(GetMembershipHistoryResult {
            member,
            entries,
            engagement,
        })
    }
}
