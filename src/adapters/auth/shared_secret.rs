//! Shared-secret admin authenticator.
//!
//! Implements the `AdminAuthenticator` port for a single administrator whose
//! credentials come from configuration. Login issues an HS256 JWT; validation
//! checks its signature, issuer and expiry.
//!
//! # Security
//!
//! - Credentials are compared in constant time with `subtle`
//! - Secrets stay wrapped in `SecretString` and are exposed only to compare
//!   or to build signing keys
//! - Expiry is checked against the injected `Clock`, not the system time

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::domain::foundation::{AccessToken, AuthError, AuthenticatedAdmin, Timestamp};
use crate::ports::{AdminAuthenticator, Clock};

const ISSUER: &str = "gym-ledger";

/// Session token claims.
#[derive(Debug, Serialize, Deserialize)]
struct AdminClaims {
    sub: String,
    iss: String,
    iat: i64,
    exp: i64,
}

pub struct SharedSecretAuthenticator {
    username: String,
    password: SecretString,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SharedSecretAuthenticator {
    pub fn new(
        username: impl Into<String>,
        password: SecretString,
        jwt_secret: &SecretString,
        token_ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let key = jwt_secret.expose_secret().as_bytes();
        Self {
            username: username.into(),
            password,
            encoding_key: EncodingKey::from_secret(key),
            decoding_key: DecodingKey::from_secret(key),
            token_ttl,
            clock,
        }
    }

    fn credentials_match(&self, username: &str, password: &str) -> bool {
        let user_ok = username.as_bytes().ct_eq(self.username.as_bytes());
        let pass_ok = password
            .as_bytes()
            .ct_eq(self.password.expose_secret().as_bytes());
        bool::from(user_ok & pass_ok)
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_exp = false;
        validation
    }
}

#[async_trait]
impl AdminAuthenticator for SharedSecretAuthenticator {
    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, AuthError> {
        if !self.credentials_match(username, password) {
            tracing::warn!("Admin login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let issued_at = self.clock.now();
        let expires_at = issued_at.add_duration(self.token_ttl);
        let claims = AdminClaims {
            sub: self.username.clone(),
            iss: ISSUER.to_string(),
            iat: issued_at.unix_seconds(),
            exp: expires_at.unix_seconds(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::service_unavailable(format!("token signing failed: {}", e)))?;

        tracing::info!(username = %self.username, expires_at = %expires_at.to_rfc3339(), "Admin logged in");
        Ok(AccessToken {
            token,
            // Claims carry whole seconds.
            expires_at: Timestamp::from_unix_seconds(claims.exp).unwrap_or(expires_at),
        })
    }

    async fn validate(&self, token: &str) -> Result<AuthenticatedAdmin, AuthError> {
        let data = decode::<AdminClaims>(token, &self.decoding_key, &Self::validation()).map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            AuthError::InvalidToken
        })?;
        let claims = data.claims;

        if claims.exp <= self.clock.now().unix_seconds() {
            return Err(AuthError::TokenExpired);
        }
        if !bool::from(claims.sub.as_bytes().ct_eq(self.username.as_bytes())) {
            return Err(AuthError::InvalidToken);
        }
        let expires_at = Timestamp::from_unix_seconds(claims.exp).ok_or(AuthError::InvalidToken)?;

        Ok(AuthenticatedAdmin::new(claims.sub, expires_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn authenticator(clock: Arc<FixedClock>) -> SharedSecretAuthenticator {
        SharedSecretAuthenticator::new(
            "admin",
            SecretString::new("front-desk".to_string()),
            &SecretString::new(SECRET.to_string()),
            Duration::hours(8),
            clock,
        )
    }

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::at(
            Timestamp::parse_rfc3339("2024-05-10T09:00:00Z").unwrap(),
        ))
    }

    #[tokio::test]
    async fn login_then_validate_round_trips() {
        let auth = authenticator(clock());
        let issued = auth.login("admin", "front-desk").await.unwrap();

        let admin = auth.validate(&issued.token).await.unwrap();
        assert_eq!(admin.username, "admin");
        assert_eq!(admin.expires_at, issued.expires_at);
        assert_eq!(
            issued.expires_at,
            Timestamp::parse_rfc3339("2024-05-10T17:00:00Z").unwrap()
        );
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let auth = authenticator(clock());
        assert_eq!(
            auth.login("admin", "front-desk!").await,
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            auth.login("root", "front-desk").await,
            Err(AuthError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn token_expires_on_the_injected_clock() {
        let clock = clock();
        let auth = authenticator(clock.clone());
        let issued = auth.login("admin", "front-desk").await.unwrap();

        clock.advance(Duration::hours(8));

        assert_eq!(auth.validate(&issued.token).await, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_invalid() {
        let other = SharedSecretAuthenticator::new(
            "admin",
            SecretString::new("front-desk".to_string()),
            &SecretString::new("another-secret-another-secret-xx".to_string()),
            Duration::hours(8),
            clock(),
        );
        let issued = other.login("admin", "front-desk").await.unwrap();

        let result = authenticator(clock()).validate(&issued.token).await;
        assert_eq!(result, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn garbage_token_is_invalid() {
        let auth = authenticator(clock());
        assert_eq!(auth.validate("not-a-jwt").await, Err(AuthError::InvalidToken));
    }
}
