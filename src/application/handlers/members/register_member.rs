//! RegisterMemberHandler - Records a member profile with no period.

use std::sync::Arc;

use crate::domain::foundation::MemberId;
use crate::domain::membership::{Member, MembershipError, NewMemberProfile};
use crate::ports::{Clock, MemberRepository};

#[derive(Debug, Clone)]
pub struct RegisterMemberCommand {
    pub profile: NewMemberProfile,
}

pub struct RegisterMemberHandler {
    members: Arc<dyn MemberRepository>,
    clock: Arc<dyn Clock>,
}

impl RegisterMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { members, clock }
    }

    pub async fn handle(&self, cmd: RegisterMemberCommand) -> Result<Member, MembershipError> {
        let member = Member::register(MemberId::new(), cmd.profile, self.clock.now())?;
        self.members.save(&member).await?;

        tracing::info!(member_id = %member.id, "Member registered");
        Ok(member)
    }
}
