//! Bearer token middleware for the admin API.
//!
//! ```text
//! Request → require_admin → validates token, injects AuthenticatedAdmin
//!                                   ↓
//!                           Handler (may read Extension<AuthenticatedAdmin>)
//! ```
//!
//! The middleware uses the `AdminAuthenticator` port, so it does not care how
//! tokens are signed.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::ApiError;
use crate::ports::AdminAuthenticator;

/// Auth middleware state - wraps the authenticator.
pub type AuthState = Arc<dyn AdminAuthenticator>;

/// Rejects requests without a valid `Authorization: Bearer <token>` header.
pub async fn require_admin(
    State(authenticator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        return ApiError::Unauthenticated.into_response();
    };

    match authenticator.validate(token).await {
        Ok(admin) => {
            request.extensions_mut().insert(admin);
            next.run(request).await
        }
        Err(err) => ApiError::from(err).into_response(),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
    }

    #[test]
    fn ignores_other_schemes_and_blank_tokens() {
        assert_eq!(bearer_token(&headers("Basic YWRtaW4=")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
