//! Admin authentication configuration

use secrecy::{ExposeSecret, SecretString};
use chrono::Duration;
use serde::Deserialize;

use super::error::ValidationError;

const MIN_JWT_SECRET_BYTES: usize = 32;
const MAX_TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Shared-secret admin login and session token signing
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Login name of the single admin account
    #[serde(default = "default_admin_username")]
    pub admin_username: String,

    /// Admin password
    pub admin_password: SecretString,

    /// HS256 signing key for session tokens
    pub jwt_secret: SecretString,

    /// Session token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
}

impl AuthConfig {
    /// Token lifetime. The range check in `validate` keeps the cast lossless.
    pub fn token_ttl(&self) -> Duration {
        Duration::seconds(self.token_ttl_secs as i64)
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.admin_username.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ADMIN_USERNAME"));
        }
        if self.admin_password.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ADMIN_PASSWORD"));
        }
        if self.jwt_secret.expose_secret().len() < MIN_JWT_SECRET_BYTES {
            return Err(ValidationError::WeakJwtSecret);
        }
        if self.token_ttl_secs < 60 || self.token_ttl_secs > MAX_TOKEN_TTL_SECS {
            return Err(ValidationError::InvalidTokenTtl);
        }
        Ok(())
    }
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_token_ttl() -> u64 {
    8 * 60 * 60
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig {
            admin_username: default_admin_username(),
            admin_password: SecretString::new("front-desk".to_string()),
            jwt_secret: SecretString::new("0123456789abcdef0123456789abcdef".to_string()),
            token_ttl_secs: default_token_ttl(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
        assert_eq!(config().token_ttl(), Duration::hours(8));
    }

    #[test]
    fn test_short_jwt_secret_rejected() {
        let config = AuthConfig {
            jwt_secret: SecretString::new("short".to_string()),
            ..config()
        };
        assert!(matches!(config.validate(), Err(ValidationError::WeakJwtSecret)));
    }

    #[test]
    fn test_empty_password_rejected() {
        let config = AuthConfig {
            admin_password: SecretString::new(String::new()),
            ..config()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_token_ttl_bounds() {
        let too_short = AuthConfig {
            token_ttl_secs: 10,
            ..config()
        };
        assert!(too_short.validate().is_err());

        let too_long = AuthConfig {
            token_ttl_secs: MAX_TOKEN_TTL_SECS + 1,
            ..config()
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("front-desk"));
    }
}
