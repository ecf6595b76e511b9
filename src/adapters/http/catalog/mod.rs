//! HTTP adapter for the catalog.
//!
//! - `GET /api/packages` - List packages (`?include_inactive=true` for all)
//! - `POST /api/packages` - Create a package
//! - `PATCH /api/packages/:id` - Edit a package
//! - `DELETE /api/packages/:id` - Delete a package (never the Day Pass)
//! - `GET /api/payment-methods` - List payment methods
//! - `POST /api/payment-methods` - Add a payment method

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{package_routes, payment_method_routes};
