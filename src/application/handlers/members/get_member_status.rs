//! GetMemberStatusHandler - Current continuity of a member.

use std::sync::Arc;

use crate::domain::foundation::MemberId;
use crate::domain::membership::{Continuity, Member, MembershipError, MembershipRules};
use crate::ports::{Clock, MemberRepository, PeriodLedger};

#[derive(Debug, Clone)]
pub struct GetMemberStatusQuery {
    pub member_id: MemberId,
}

#[derive(Debug, Clone)]
pub struct GetMemberStatusResult {
    pub member: Member,
    pub continuity: Continuity,
}

pub struct GetMemberStatusHandler {
    members: Arc<dyn MemberRepository>,
    ledger: Arc<dyn PeriodLedger>,
    clock: Arc<dyn Clock>,
    rules: MembershipRules,
}

impl GetMemberStatusHandler {
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
        query: GetMemberStatusQuery,
    ) -> Result<GetMemberStatusResult, MembershipError> {
        let member = self
            .members
            .find_by_id(&query.member_id)
            .await?
            .ok_or(MembershipError::MemberNotFound(query.member_id))?;
        let history = self.ledger.find_periods_by_member(&member.id).await?;

        let continuity = self.rules.continuity_resolver().resolve_continuity(
            &history,
            member.membership_type.as_deref(),
            self.clock.now(),
        )?;

        Ok(GetMemberStatusResult { member, continuity })
    }
}
