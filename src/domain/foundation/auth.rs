//! Authentication types for the domain layer.
//!
//! The backend has a single administrator identified by a shared secret.
//! These types carry the result of a login or token check with no dependency
//! on how tokens are signed.
//!
//! # Example
//!
//! ```ignore
//! // In HTTP middleware, after token validation:
//! let admin = authenticator.validate(token).await?;
//! request.extensions_mut().insert(admin);
//! ```

use thiserror::Error;

use super::Timestamp;

/// Administrator identity extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAdmin {
    pub username: String,
    pub expires_at: Timestamp,
}

impl AuthenticatedAdmin {
    pub fn new(username: impl Into<String>, expires_at: Timestamp) -> Self {
        Self {
            username: username.into(),
            expires_at,
        }
    }
}

/// Bearer token issued at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Username or password did not match.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token signature is valid but it has expired.
    #[error("Token expired")]
    TokenExpired,

    /// Tokens could not be issued (signing failure, bad configuration).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the admin should log in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_invalid_token_displays_correctly() {
        assert_eq!(format!("{}", AuthError::InvalidToken), "Invalid or expired token");
    }

    #[test]
    fn auth_error_service_unavailable_displays_message() {
        let err = AuthError::service_unavailable("signing key rejected");
        assert_eq!(format!("{}", err), "Auth service unavailable: signing key rejected");
    }

    #[test]
    fn auth_error_requires_reauthentication_for_token_errors() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::InvalidCredentials.requires_reauthentication());
        assert!(!AuthError::service_unavailable("").requires_reauthentication());
    }
}
