//! Storage backend configuration

use std::time::Duration;

use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;

use super::error::ValidationError;
use super::server::Environment;

const MAX_POOL_SIZE: u32 = 100;

/// Where the ledger lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend<'a> {
    Postgres { url: &'a str },
    /// Process-local store, lost on restart.
    InMemory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL URL. Leave unset to run on the in-memory store.
    pub url: Option<String>,
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Apply `migrations/` before serving.
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn backend(&self) -> StorageBackend<'_> {
        match self.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => StorageBackend::Postgres { url },
            _ => StorageBackend::InMemory,
        }
    }

    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .min_connections(self.min_connections)
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
    }

    /// Production refuses to run without PostgreSQL.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let url = match self.backend() {
            StorageBackend::InMemory if *environment == Environment::Production => {
                return Err(ValidationError::MissingRequired("DATABASE_URL"));
            }
            StorageBackend::InMemory => return Ok(()),
            StorageBackend::Postgres { url } => url,
        };
        if !["postgres://", "postgresql://"].iter().any(|scheme| url.starts_with(scheme)) {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.max_connections == 0 || self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > MAX_POOL_SIZE {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            min_connections: 1,
            max_connections: 10,
            acquire_timeout_secs: 5,
            run_migrations: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postgres(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: Some(url.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn unset_or_blank_url_selects_memory_store() {
        assert_eq!(DatabaseConfig::default().backend(), StorageBackend::InMemory);
        assert_eq!(postgres("   ").backend(), StorageBackend::InMemory);
    }

    #[test]
    fn url_selects_postgres() {
        let config = postgres(" postgres://gym@localhost/ledger ");
        assert_eq!(
            config.backend(),
            StorageBackend::Postgres { url: "postgres://gym@localhost/ledger" }
        );
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn memory_store_is_refused_in_production() {
        let config = DatabaseConfig::default();
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::MissingRequired("DATABASE_URL"))
        ));
    }

    #[test]
    fn foreign_scheme_is_rejected() {
        assert!(matches!(
            postgres("mysql://localhost/ledger").validate(&Environment::Development),
            Err(ValidationError::InvalidDatabaseUrl)
        ));
    }

    #[test]
    fn pool_bounds_are_checked() {
        let inverted = DatabaseConfig {
            min_connections: 20,
            max_connections: 5,
            ..postgres("postgresql://localhost/ledger")
        };
        assert!(matches!(
            inverted.validate(&Environment::Development),
            Err(ValidationError::InvalidPoolSize)
        ));

        let huge = DatabaseConfig {
            max_connections: 500,
            ..postgres("postgresql://localhost/ledger")
        };
        assert!(matches!(
            huge.validate(&Environment::Development),
            Err(ValidationError::PoolSizeTooLarge)
        ));
    }
}
