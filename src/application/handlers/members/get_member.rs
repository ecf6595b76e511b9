//! GetMemberHandler - Member profile with recent visits.

use std::sync::Arc;

use crate::domain::foundation::MemberId;
use crate::domain::membership::{CheckIn, Member, MembershipError};
use crate::ports::{CheckInRepository, MemberRepository};

const RECENT_CHECK_INS: u32 = 10;

#[derive(Debug, Clone)]
pub struct GetMemberQuery {
    pub member_id: MemberId,
}

#[derive(Debug, Clone)]
pub struct GetMemberResult {
    pub member: Member,
    /// Most recent first.
    pub recent_check_ins: Vec<CheckIn>,
}

pub struct GetMemberHandler {
    members: Arc<dyn MemberRepository>,
    check_ins: Arc<dyn CheckInRepository>,
}

impl GetMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>, check_ins: Arc<dyn CheckInRepository>) -> Self {
        Self { members, check_ins }
    }

    pub async fn handle(&self, query: GetMemberQuery) -> Result<GetMemberResult, MembershipError> {
        let member = self
            .members
            .find_by_id(&query.member_id)
            .await?
            .ok_or(MembershipError::MemberNotFound(query.member_id))?;
        let recent_check_ins = self
            .check_ins
            .list_by_member(&member.id, RECENT_CHECK_INS)
            .await?;

        Ok(GetMemberResult {
            member,
            recent_check_ins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{ts, Fixture};
    use crate::domain::foundation::CheckInId;

    #[tokio::test]
    async fn returns_visits_newest_first() {
        let fx = Fixture::at("2024-01-15T00:00:00Z").await;
        let member = fx.register("Ana", None).await;
        for at in ["2024-01-02T07:00:00Z", "2024-01-05T07:00:00Z", "2024-01-03T07:00:00Z"] {
            fx.store
                .record(&CheckIn {
                    id: CheckInId::new(),
                    member_id: member.id,
                    checked_in_at: ts(at),
                    period_id: None,
                })
                .await
                .unwrap();
        }
        let handler = GetMemberHandler::new(fx.store.clone(), fx.store.clone());

        let result = handler
            .handle(GetMemberQuery { member_id: member.id })
            .await
            .unwrap();

        let times: Vec<_> = result.recent_check_ins.iter().map(|c| c.checked_in_at).collect();
        assert_eq!(
            times,
            vec![ts("2024-01-05T07:00:00Z"), ts("2024-01-03T07:00:00Z"), ts("2024-01-02T07:00:00Z")]
        );
    }
}
