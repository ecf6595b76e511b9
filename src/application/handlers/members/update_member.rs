//! UpdateMemberHandler - Edits profile fields.
//!
//! Cache fields (type, start, end) are never touched here; only ledger writes
//! move them.

use std::sync::Arc;

use crate::domain::foundation::MemberId;
use crate::domain::membership::{Member, MemberProfileUpdate, MembershipError};
use crate::ports::{Clock, MemberRepository};

#[derive(Debug, Clone)]
pub struct UpdateMemberCommand {
    pub member_id: MemberId,
    pub update: MemberProfileUpdate,
}

pub struct UpdateMemberHandler {
    members: Arc<dyn MemberRepository>,
    clock: Arc<dyn Clock>,
}

impl UpdateMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { members, clock }
    }

    pub async fn handle(&self, cmd: UpdateMemberCommand) -> Result<Member, MembershipError> {
        let mut member = self
            .members
            .find_by_id(&cmd.member_id)
            .await?
            .ok_or(MembershipError::MemberNotFound(cmd.member_id))?;

        member.apply_profile(cmd.update, self.clock.now())?;
        self.members.update_profile(&member).await?;

        tracing::info!(member_id = %member.id, is_active = member.is_active, "Member profile updated");
        Ok(member)
    }
}
