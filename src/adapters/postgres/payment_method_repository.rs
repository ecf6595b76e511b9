//! PostgreSQL implementation of PaymentMethodRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, PaymentMethodId, Timestamp};
use crate::domain::membership::PaymentMethod;
use crate::ports::PaymentMethodRepository;

pub struct PostgresPaymentMethodRepository {
    pool: PgPool,
}

impl PostgresPaymentMethodRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentMethodRow {
    id: Uuid,
    name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<PaymentMethodRow> for PaymentMethod {
    fn from(row: PaymentMethodRow) -> Self {
        PaymentMethod {
            id: PaymentMethodId::from_uuid(row.id),
            name: row.name,
            is_active: row.is_active,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[async_trait]
impl PaymentMethodRepository for PostgresPaymentMethodRepository {
    async fn save(&self, method: &PaymentMethod) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO payment_methods (id, name, is_active, created_at) VALUES ($1, $2, $3, $4)")
            .bind(method.id.as_uuid())
            .bind(&method.name)
            .bind(method.is_active)
            .bind(method.created_at.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to save payment method", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &PaymentMethodId) -> Result<Option<PaymentMethod>, DomainError> {
        let row: Option<PaymentMethodRow> =
            sqlx::query_as("SELECT id, name, is_active, created_at FROM payment_methods WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to find payment method", e))?;

        Ok(row.map(PaymentMethod::from))
    }

    async fn list(&self, include_inactive: bool) -> Result<Vec<PaymentMethod>, DomainError> {
        let rows: Vec<PaymentMethodRow> = sqlx::query_as(
            "SELECT id, name, is_active, created_at FROM payment_methods WHERE $1 OR is_active ORDER BY name",
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list payment methods", e))?;

        Ok(rows.into_iter().map(PaymentMethod::from).collect())
    }
}
