//! HTTP adapter for reports.
//!
//! - `GET /api/reports/revenue?from=&to=` - Revenue over `[from, to)`

pub mod handlers;
pub mod routes;

pub use routes::report_routes;
