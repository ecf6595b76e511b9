//! PostgreSQL implementation of CheckInRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{CheckInId, DomainError, MemberId, PeriodId, Timestamp};
use crate::domain::membership::CheckIn;
use crate::ports::CheckInRepository;

pub struct PostgresCheckInRepository {
    pool: PgPool,
}

impl PostgresCheckInRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CheckInRow {
    id: Uuid,
    member_id: Uuid,
    checked_in_at: DateTime<Utc>,
    period_id: Option<Uuid>,
}

impl From<CheckInRow> for CheckIn {
    fn from(row: CheckInRow) -> Self {
        CheckIn {
            id: CheckInId::from_uuid(row.id),
            member_id: MemberId::from_uuid(row.member_id),
            checked_in_at: Timestamp::from_datetime(row.checked_in_at),
            period_id: row.period_id.map(PeriodId::from_uuid),
        }
    }
}

#[async_trait]
impl CheckInRepository for PostgresCheckInRepository {
    async fn record(&self, check_in: &CheckIn) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO check_ins (id, member_id, checked_in_at, period_id) VALUES ($1, $2, $3, $4)")
            .bind(check_in.id.as_uuid())
            .bind(check_in.member_id.as_uuid())
            .bind(check_in.checked_in_at.as_datetime())
            .bind(check_in.period_id.map(|id| *id.as_uuid()))
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to record check-in", e))?;

        Ok(())
    }

    async fn list_by_member(&self, member_id: &MemberId, limit: u32) -> Result<Vec<CheckIn>, DomainError> {
        let rows: Vec<CheckInRow> = sqlx::query_as(
            r#"
            SELECT id, member_id, checked_in_at, period_id
            FROM check_ins
            WHERE member_id = $1
            ORDER BY checked_in_at DESC
            LIMIT $2
            "#,
        )
        .bind(member_id.as_uuid())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list check-ins", e))?;

        Ok(rows.into_iter().map(CheckIn::from).collect())
    }
}
