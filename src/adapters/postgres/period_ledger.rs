//! PostgreSQL implementation of PeriodLedger and LedgerWriter.
//!
//! `commit` runs every write of a request in one sqlx transaction. If any
//! statement fails the transaction is dropped and rolled back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction as SqlxTransaction};
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, MemberId, Money, PeriodId, Timestamp, TransactionId,
};
use crate::domain::membership::{
    CheckIn, Member, MemberCache, MembershipPeriod, PaymentLink, PeriodStatus, Transaction,
};
use crate::ports::{LedgerWrite, LedgerWriter, PeriodLedger};

use super::package_repository::{duration_to_db, parse_duration};

pub struct PostgresPeriodLedger {
    pool: PgPool,
}

impl PostgresPeriodLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PeriodRow {
    id: Uuid,
    member_id: Uuid,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    package_name: String,
    duration_months: i32,
    transaction_id: Option<Uuid>,
    transaction_amount: Option<i64>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PeriodRow> for MembershipPeriod {
    type Error = DomainError;

    fn try_from(row: PeriodRow) -> Result<Self, Self::Error> {
        let payment = match (row.transaction_id, row.transaction_amount) {
            (Some(id), Some(amount)) => Some(PaymentLink {
                transaction_id: TransactionId::from_uuid(id),
                amount: Money::from_minor_units(amount),
            }),
            _ => None,
        };

        // Bounds are returned as stored; inverted rows surface as
        // MalformedPeriod in the domain rather than being repaired here.
        Ok(MembershipPeriod {
            id: PeriodId::from_uuid(row.id),
            member_id: MemberId::from_uuid(row.member_id),
            start: Timestamp::from_datetime(row.start_at),
            end: Timestamp::from_datetime(row.end_at),
            package_name: row.package_name,
            duration: parse_duration(row.duration_months)?,
            status: PeriodStatus::Active,
            payment,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl PeriodLedger for PostgresPeriodLedger {
    async fn find_periods_by_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<MembershipPeriod>, DomainError> {
        let rows: Vec<PeriodRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.member_id, p.start_at, p.end_at, p.package_name, p.duration_months,
                   p.transaction_id, t.amount AS transaction_amount, p.created_at
            FROM membership_periods p
            LEFT JOIN transactions t ON t.id = p.transaction_id
            WHERE p.member_id = $1
            ORDER BY p.start_at ASC
            "#,
        )
        .bind(member_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load periods", e))?;

        rows.into_iter().map(MembershipPeriod::try_from).collect()
    }
}

#[async_trait]
impl LedgerWriter for PostgresPeriodLedger {
    async fn commit(&self, write: LedgerWrite) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin ledger transaction", e))?;

        if let Some(member) = &write.new_member {
            insert_member(&mut tx, member).await?;
        }
        if let Some(transaction) = &write.transaction {
            insert_transaction(&mut tx, transaction).await?;
        }
        insert_period(&mut tx, &write.period).await?;
        if let Some(check_in) = &write.check_in {
            insert_check_in(&mut tx, check_in).await?;
        }
        update_cache(&mut tx, &write.member_id(), &write.cache, write.recorded_at).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit ledger transaction", e))?;

        tracing::debug!(
            member_id = %write.member_id(),
            period_id = %write.period.id,
            "ledger write committed"
        );
        Ok(())
    }
}

type PgTx<'a> = SqlxTransaction<'a, Postgres>;

async fn insert_member(tx: &mut PgTx<'_>, member: &Member) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO members (
            id, name, phone, email, membership_type, start_date, end_date,
            is_active, notes, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(member.id.as_uuid())
    .bind(&member.name)
    .bind(&member.phone)
    .bind(&member.email)
    .bind(&member.membership_type)
    .bind(member.start_date.map(|t| *t.as_datetime()))
    .bind(member.end_date.map(|t| *t.as_datetime()))
    .bind(member.is_active)
    .bind(&member.notes)
    .bind(member.created_at.as_datetime())
    .bind(member.updated_at.as_datetime())
    .execute(&mut **tx)
    .await
    .map_err(|e| DomainError::database("Failed to insert member", e))?;

    Ok(())
}

async fn insert_transaction(tx: &mut PgTx<'_>, transaction: &Transaction) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO transactions (
            id, member_id, package_id, payment_method_id, amount,
            package_name, duration_months, occurred_at, notes
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(transaction.id.as_uuid())
    .bind(transaction.member_id.map(|id| *id.as_uuid()))
    .bind(transaction.package_id.map(|id| *id.as_uuid()))
    .bind(transaction.payment_method_id.map(|id| *id.as_uuid()))
    .bind(transaction.amount.minor_units())
    .bind(&transaction.package_name)
    .bind(duration_to_db(transaction.duration))
    .bind(transaction.occurred_at.as_datetime())
    .bind(&transaction.notes)
    .execute(&mut **tx)
    .await
    .map_err(|e| DomainError::database("Failed to insert transaction", e))?;

    Ok(())
}

async fn insert_period(tx: &mut PgTx<'_>, period: &MembershipPeriod) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO membership_periods (
            id, member_id, start_at, end_at, package_name, duration_months,
            status, transaction_id, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(period.id.as_uuid())
    .bind(period.member_id.as_uuid())
    .bind(period.start.as_datetime())
    .bind(period.end.as_datetime())
    .bind(&period.package_name)
    .bind(duration_to_db(period.duration))
    .bind(period.status.as_str())
    .bind(period.payment.map(|p| *p.transaction_id.as_uuid()))
    .bind(period.created_at.as_datetime())
    .execute(&mut **tx)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.constraint() == Some("membership_periods_member_id_fkey") {
                return DomainError::new(ErrorCode::MemberNotFound, "Member not found");
            }
        }
        DomainError::database("Failed to insert period", e)
    })?;

    Ok(())
}

async fn insert_check_in(tx: &mut PgTx<'_>, check_in: &CheckIn) -> Result<(), DomainError> {
    sqlx::query("INSERT INTO check_ins (id, member_id, checked_in_at, period_id) VALUES ($1, $2, $3, $4)")
        .bind(check_in.id.as_uuid())
        .bind(check_in.member_id.as_uuid())
        .bind(check_in.checked_in_at.as_datetime())
        .bind(check_in.period_id.map(|id| *id.as_uuid()))
        .execute(&mut **tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert check-in", e))?;

    Ok(())
}

async fn update_cache(
    tx: &mut PgTx<'_>,
    member_id: &MemberId,
    cache: &MemberCache,
    recorded_at: Timestamp,
) -> Result<(), DomainError> {
    let result = sqlx::query(
        r#"
        UPDATE members SET
            membership_type = $2,
            start_date = $3,
            end_date = $4,
            updated_at = $5
        WHERE id = $1
        "#,
    )
    .bind(member_id.as_uuid())
    .bind(&cache.membership_type)
    .bind(cache.start_date.map(|t| *t.as_datetime()))
    .bind(cache.end_date.map(|t| *t.as_datetime()))
    .bind(recorded_at.as_datetime())
    .execute(&mut **tx)
    .await
    .map_err(|e| DomainError::database("Failed to resync member cache", e))?;

    if result.rows_affected() == 0 {
        return Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found"));
    }

    Ok(())
}
