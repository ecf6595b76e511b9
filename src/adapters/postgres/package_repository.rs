//! PostgreSQL implementation of PackageRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Money, PackageId, Timestamp};
use crate::domain::membership::{MembershipPackage, PackageDuration};
use crate::ports::PackageRepository;

const PACKAGE_COLUMNS: &str =
    "id, name, duration_months, price, description, is_active, created_at, updated_at";

pub struct PostgresPackageRepository {
    pool: PgPool,
}

impl PostgresPackageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PackageRow {
    id: Uuid,
    name: String,
    duration_months: i32,
    price: i64,
    description: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PackageRow> for MembershipPackage {
    type Error = DomainError;

    fn try_from(row: PackageRow) -> Result<Self, Self::Error> {
        Ok(MembershipPackage {
            id: PackageId::from_uuid(row.id),
            name: row.name,
            duration: parse_duration(row.duration_months)?,
            price: Money::from_minor_units(row.price),
            description: row.description,
            is_active: row.is_active,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

/// Reads a stored month count.
pub(super) fn parse_duration(months: i32) -> Result<PackageDuration, DomainError> {
    PackageDuration::from_months(i64::from(months)).map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid stored duration: {}", e))
    })
}

/// Month count as stored.
pub(super) fn duration_to_db(duration: PackageDuration) -> i32 {
    i32::try_from(duration.months()).unwrap_or(i32::MAX)
}

fn map_write_error(context: &str, e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some("idx_membership_packages_active_day_pass") {
            return DomainError::new(ErrorCode::DuplicateDayPass, "An active Day Pass package already exists");
        }
    }
    DomainError::database(context, e)
}

#[async_trait]
impl PackageRepository for PostgresPackageRepository {
    async fn save(&self, package: &MembershipPackage) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO membership_packages (
                id, name, duration_months, price, description, is_active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(package.id.as_uuid())
        .bind(&package.name)
        .bind(duration_to_db(package.duration))
        .bind(package.price.minor_units())
        .bind(&package.description)
        .bind(package.is_active)
        .bind(package.created_at.as_datetime())
        .bind(package.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("Failed to save package", e))?;

        Ok(())
    }

    async fn update(&self, package: &MembershipPackage) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE membership_packages SET
                name = $2,
                duration_months = $3,
                price = $4,
                description = $5,
                is_active = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(package.id.as_uuid())
        .bind(&package.name)
        .bind(duration_to_db(package.duration))
        .bind(package.price.minor_units())
        .bind(&package.description)
        .bind(package.is_active)
        .bind(package.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("Failed to update package", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::PackageNotFound, "Package not found"));
        }

        Ok(())
    }

    async fn delete(&self, id: &PackageId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM membership_packages WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete package", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: &PackageId) -> Result<Option<MembershipPackage>, DomainError> {
        let row: Option<PackageRow> = sqlx::query_as(&format!(
            "SELECT {} FROM membership_packages WHERE id = $1",
            PACKAGE_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find package", e))?;

        row.map(MembershipPackage::try_from).transpose()
    }

    async fn find_active_by_name(&self, name: &str) -> Result<Option<MembershipPackage>, DomainError> {
        let row: Option<PackageRow> = sqlx::query_as(&format!(
            "SELECT {} FROM membership_packages WHERE is_active AND LOWER(name) = LOWER($1) \
             ORDER BY created_at ASC LIMIT 1",
            PACKAGE_COLUMNS
        ))
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find package by name", e))?;

        row.map(MembershipPackage::try_from).transpose()
    }

    async fn list(&self, include_inactive: bool) -> Result<Vec<MembershipPackage>, DomainError> {
        let rows: Vec<PackageRow> = sqlx::query_as(&format!(
            "SELECT {} FROM membership_packages WHERE $1 OR is_active ORDER BY duration_months, name",
            PACKAGE_COLUMNS
        ))
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list packages", e))?;

        rows.into_iter().map(MembershipPackage::try_from).collect()
    }
}
