//! Axum router configuration for member endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::AppState;

use super::handlers::{
    add_period, check_in, create_member, delete_member, get_member, list_members,
    member_status, membership_history, purchase_day_pass, renew_membership, update_member,
};

/// Routes mounted at `/api/members`. Require an admin token.
pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_members).post(create_member))
        .route("/:id", get(get_member).patch(update_member).delete(delete_member))
        .route("/:id/status", get(member_status))
        .route("/:id/history", get(membership_history))
        .route("/:id/renew", post(renew_membership))
        .route("/:id/day-pass", post(purchase_day_pass))
        .route("/:id/periods", post(add_period))
        .route("/:id/check-ins", post(check_in))
}
