//! ListMembersHandler - Paged, searchable member listing.

use std::sync::Arc;

use crate::domain::membership::MembershipError;
use crate::ports::{MemberPage, MemberQuery, MemberReader};

pub struct ListMembersHandler {
    reader: Arc<dyn MemberReader>,
}

impl ListMembersHandler {
    pub fn new(reader: Arc<dyn MemberReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: MemberQuery) -> Result<MemberPage, MembershipError> {
        Ok(self.reader.list(&query).await?)
    }
}
