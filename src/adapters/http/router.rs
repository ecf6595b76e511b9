//! Top-level router: routes, auth and per-request layers.

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Json, Router};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::catalog::{package_routes, payment_method_routes};
use super::login::login_routes;
use super::members::member_routes;
use super::middleware::require_admin;
use super::reports::report_routes;
use super::AppState;

/// Layer settings taken from server configuration.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub request_timeout: Duration,
    /// Browser origins allowed to call the API. Empty allows none.
    pub cors_origins: Vec<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

/// Builds the complete application router.
///
/// # Routes
///
/// - `GET /health` - Liveness, unauthenticated
/// - `/api/auth` - Login, unauthenticated
/// - `/api/members`, `/api/packages`, `/api/payment-methods`,
///   `/api/reports` - Require `Authorization: Bearer <token>`
pub fn app_router(state: AppState, config: &RouterConfig) -> Router {
    let protected = Router::new()
        .nest("/members", member_routes())
        .nest("/packages", package_routes())
        .nest("/payment-methods", payment_method_routes())
        .nest("/reports", report_routes())
        .route_layer(from_fn_with_state(state.authenticator.clone(), require_admin));

    let api = Router::new().nest("/auth", login_routes()).merge(protected);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(config.request_timeout))
                .layer(cors_layer(&config.cors_origins)),
        )
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) if origin != "*" => Some(value),
            _ => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
