//! Member reader port (read side).
//!
//! Paginated, searchable member listings for the admin console.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;
use crate::domain::membership::Member;

/// Largest page the reader will return.
pub const MAX_PER_PAGE: u32 = 100;
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberQuery {
    /// Case-insensitive substring matched against name, phone and email.
    pub search: Option<String>,
    /// 1-based.
    pub page: u32,
    pub per_page: u32,
}

impl MemberQuery {
    /// Clamps paging to `1..` and `1..=MAX_PER_PAGE` and drops blank search.
    pub fn new(search: Option<String>, page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            search: search.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }
}

impl Default for MemberQuery {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

/// One page of members, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberPage {
    pub items: Vec<Member>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

impl MemberPage {
    pub fn total_pages(&self) -> u64 {
        let per_page = u64::from(self.per_page.max(1));
        (self.total + per_page - 1) / per_page
    }
}

#[async_trait]
pub trait MemberReader: Send + Sync {
    async fn list(&self, query: &MemberQuery) -> Result<MemberPage, DomainError>;
}
