//! Admin authentication port.
//!
//! One administrator logs in with a shared secret and receives a bearer
//! token. HTTP middleware validates that token on every protected route.
//!
//! # Contract
//!
//! Implementations must:
//! - Compare credentials in constant time
//! - Return `AuthError::InvalidCredentials` for a bad username or password
//! - Return `AuthError::InvalidToken` for malformed or badly signed tokens
//! - Return `AuthError::TokenExpired` for expired tokens

use async_trait::async_trait;

use crate::domain::foundation::{AccessToken, AuthError, AuthenticatedAdmin};

#[async_trait]
pub trait AdminAuthenticator: Send + Sync {
    /// Exchange admin credentials for a bearer token.
    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, AuthError>;

    /// Validate a bearer token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedAdmin, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_authenticator_is_object_safe() {
        fn _accepts_dyn(_auth: &dyn AdminAuthenticator) {}
    }
}
