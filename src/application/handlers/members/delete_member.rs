//! DeleteMemberHandler - Removes a member and their ledger.
//!
//! Periods and check-ins go with the member. Transactions stay in the
//! financial record with the member reference cleared.

use std::sync::Arc;

use crate::domain::foundation::MemberId;
use crate::domain::membership::MembershipError;
use crate::ports::MemberRepository;

#[derive(Debug, Clone)]
pub struct DeleteMemberCommand {
    pub member_id: MemberId,
}

pub struct DeleteMemberHandler {
    members: Arc<dyn MemberRepository>,
}

impl DeleteMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    pub async fn handle(&self, cmd: DeleteMemberCommand) -> Result<(), MembershipError> {
        if !self.members.delete(&cmd.member_id).await? {
            return Err(MembershipError::MemberNotFound(cmd.member_id));
        }
        tracing::info!(member_id = %cmd.member_id, "Member deleted");
        Ok(())
    }
}
