//! Axum router configuration for catalog endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use crate::adapters::http::AppState;

use super::handlers::{
    create_package, create_payment_method, delete_package, list_packages, list_payment_methods,
    update_package,
};

/// Routes mounted at `/api/packages`.
pub fn package_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_packages).post(create_package))
        .route("/:id", patch(update_package).delete(delete_package))
}

/// Routes mounted at `/api/payment-methods`.
pub fn payment_method_routes() -> Router<AppState> {
    Router::new().route("/", get(list_payment_methods).post(create_payment_method))
}
