//! PostgreSQL implementation of TransactionReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, MemberId, Money, PackageId, PaymentMethodId, Timestamp, TransactionId,
};
use crate::domain::membership::Transaction;
use crate::ports::TransactionReader;

use super::package_repository::parse_duration;

pub struct PostgresTransactionReader {
    pool: PgPool,
}

impl PostgresTransactionReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    member_id: Option<Uuid>,
    package_id: Option<Uuid>,
    payment_method_id: Option<Uuid>,
    amount: i64,
    package_name: String,
    duration_months: i32,
    occurred_at: DateTime<Utc>,
    notes: Option<String>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = DomainError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Transaction {
            id: TransactionId::from_uuid(row.id),
            member_id: row.member_id.map(MemberId::from_uuid),
            package_id: row.package_id.map(PackageId::from_uuid),
            payment_method_id: row.payment_method_id.map(PaymentMethodId::from_uuid),
            amount: Money::from_minor_units(row.amount),
            package_name: row.package_name,
            duration: parse_duration(row.duration_months)?,
            occurred_at: Timestamp::from_datetime(row.occurred_at),
            notes: row.notes,
        })
    }
}

#[async_trait]
impl TransactionReader for PostgresTransactionReader {
    async fn list_between(&self, from: Timestamp, to: Timestamp) -> Result<Vec<Transaction>, DomainError> {
        let rows: Vec<TransactionRow> = sqlx::query_as(
            r#"
            SELECT id, member_id, package_id, payment_method_id, amount,
                   package_name, duration_months, occurred_at, notes
            FROM transactions
            WHERE occurred_at >= $1 AND occurred_at < $2
            ORDER BY occurred_at ASC
            "#,
        )
        .bind(from.as_datetime())
        .bind(to.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list transactions", e))?;

        rows.into_iter().map(Transaction::try_from).collect()
    }
}
