//! Application configuration.
//!
//! Everything is read from `GYM_LEDGER__<SECTION>__<KEY>` environment
//! variables, with a `.env` file honoured for local runs:
//!
//! | Variable | Field |
//! |---|---|
//! | `GYM_LEDGER__SERVER__PORT` | `server.port` |
//! | `GYM_LEDGER__LOGGING__FORMAT` | `logging.format` (`text` or `json`) |
//! | `GYM_LEDGER__DATABASE__URL` | `database.url` |
//! | `GYM_LEDGER__AUTH__JWT_SECRET` | `auth.jwt_secret` |
//! | `GYM_LEDGER__MEMBERSHIP__UTC_OFFSET_MINUTES` | `membership.utc_offset_minutes` |
//!
//! Only the admin password and the JWT secret are required.

mod auth;
mod database;
mod error;
mod logging;
mod membership;
mod server;

use std::collections::HashMap;

pub use auth::AuthConfig;
pub use database::{DatabaseConfig, StorageBackend};
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use membership::MembershipConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

const ENV_PREFIX: &str = "GYM_LEDGER";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub membership: MembershipConfig,
}

impl AppConfig {
    /// Loads `.env` if present, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(config::Environment::default())
    }

    /// Loads from an explicit variable map instead of the process environment.
    pub fn from_env(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_source(config::Environment::default().source(Some(vars)))
    }

    fn from_source(source: config::Environment) -> Result<Self, ConfigError> {
        let loaded = config::Config::builder()
            .add_source(source.prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
            .build()?
            .try_deserialize()?;
        Ok(loaded)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate(&self.server.environment)?;
        self.auth.validate()?;
        self.membership.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn vars(extra: &[(&str, &str)]) -> HashMap<String, String> {
        [
            ("GYM_LEDGER__AUTH__ADMIN_PASSWORD", "front-desk"),
            ("GYM_LEDGER__AUTH__JWT_SECRET", "0123456789abcdef0123456789abcdef"),
        ]
        .iter()
        .chain(extra)
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn secrets_alone_give_a_valid_development_config() {
        let config = AppConfig::from_env(vars(&[])).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.auth.admin_username, "admin");
        assert_eq!(config.auth.admin_password.expose_secret(), "front-desk");
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.database.backend(), StorageBackend::InMemory);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn missing_secrets_fail_to_load() {
        assert!(AppConfig::from_env(HashMap::new()).is_err());
    }

    #[test]
    fn production_without_database_fails_validation() {
        let config =
            AppConfig::from_env(vars(&[("GYM_LEDGER__SERVER__ENVIRONMENT", "production")])).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("DATABASE_URL"))
        ));
    }

    #[test]
    fn nested_overrides_reach_each_section() {
        let config = AppConfig::from_env(vars(&[
            ("GYM_LEDGER__SERVER__PORT", "9000"),
            ("GYM_LEDGER__LOGGING__FORMAT", "json"),
            ("GYM_LEDGER__DATABASE__URL", "postgres://gym@db/ledger"),
            ("GYM_LEDGER__MEMBERSHIP__UTC_OFFSET_MINUTES", "420"),
            ("GYM_LEDGER__MEMBERSHIP__DAY_PASS_NAME", "Drop-in"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(
            config.database.backend(),
            StorageBackend::Postgres { url: "postgres://gym@db/ledger" }
        );
        assert_eq!(config.membership.utc_offset_minutes, 420);
        assert_eq!(config.membership.day_pass_name, "Drop-in");
        assert!(config.validate().is_ok());
    }
}
