//! PostgreSQL implementation of MemberReader.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::DomainError;
use crate::domain::membership::Member;
use crate::ports::{MemberPage, MemberQuery, MemberReader};

use super::member_repository::{MemberRow, MEMBER_COLUMNS};

pub struct PostgresMemberReader {
    pool: PgPool,
}

impl PostgresMemberReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Builds an ILIKE pattern matching `term` anywhere, with wildcards escaped.
fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

const SEARCH_FILTER: &str = "($1::text IS NULL OR name ILIKE $1 OR phone ILIKE $1 OR email ILIKE $1)";

#[async_trait]
impl MemberReader for PostgresMemberReader {
    async fn list(&self, query: &MemberQuery) -> Result<MemberPage, DomainError> {
        let pattern = query.search.as_deref().map(contains_pattern);

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM members WHERE {}", SEARCH_FILTER))
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to count members", e))?;

        let rows: Vec<MemberRow> = sqlx::query_as(&format!(
            "SELECT {} FROM members WHERE {} ORDER BY created_at DESC, id LIMIT $2 OFFSET $3",
            MEMBER_COLUMNS, SEARCH_FILTER
        ))
        .bind(&pattern)
        .bind(i64::from(query.per_page))
        .bind(query.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list members", e))?;

        Ok(MemberPage {
            items: rows.into_iter().map(Member::from).collect(),
            total: total.max(0) as u64,
            page: query.page,
            per_page: query.per_page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("ana"), "%ana%");
    }
}
