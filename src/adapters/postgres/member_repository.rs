//! PostgreSQL implementation of MemberRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, Timestamp};
use crate::domain::membership::Member;
use crate::ports::MemberRepository;

/// Columns selected for every member query.
pub(super) const MEMBER_COLUMNS: &str = "id, name, phone, email, membership_type, start_date, end_date, \
     is_active, notes, created_at, updated_at";

pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a member.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct MemberRow {
    id: Uuid,
    name: String,
    phone: Option<String>,
    email: Option<String>,
    membership_type: Option<String>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    is_active: bool,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            id: MemberId::from_uuid(row.id),
            name: row.name,
            phone: row.phone,
            email: row.email,
            membership_type: row.membership_type,
            start_date: row.start_date.map(Timestamp::from_datetime),
            end_date: row.end_date.map(Timestamp::from_datetime),
            is_active: row.is_active,
            notes: row.notes,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn save(&self, member: &Member) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO members (
                id, name, phone, email, is_active, notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(member.id.as_uuid())
        .bind(&member.name)
        .bind(&member.phone)
        .bind(&member.email)
        .bind(member.is_active)
        .bind(&member.notes)
        .bind(member.created_at.as_datetime())
        .bind(member.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert member", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> =
            sqlx::query_as(&format!("SELECT {} FROM members WHERE id = $1", MEMBER_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to find member", e))?;

        Ok(row.map(Member::from))
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Vec<Member>, DomainError> {
        let rows: Vec<MemberRow> = sqlx::query_as(&format!(
            "SELECT {} FROM members WHERE phone = $1 ORDER BY created_at ASC",
            MEMBER_COLUMNS
        ))
        .bind(phone.trim())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find members by phone", e))?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn update_profile(&self, member: &Member) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE members SET
                name = $2,
                phone = $3,
                email = $4,
                notes = $5,
                is_active = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(member.id.as_uuid())
        .bind(&member.name)
        .bind(&member.phone)
        .bind(&member.email)
        .bind(&member.notes)
        .bind(member.is_active)
        .bind(member.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update member", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found"));
        }

        Ok(())
    }

    async fn delete(&self, id: &MemberId) -> Result<bool, DomainError> {
        // Periods and check-ins cascade; transactions keep a NULL member_id.
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete member", e))?;

        Ok(result.rows_affected() > 0)
    }
}
