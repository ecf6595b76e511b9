//! HTTP adapter for member endpoints.
//!
//! - `GET /api/members` - Paged, searchable listing
//! - `POST /api/members` - Register a member, enrolling them when a package is given
//! - `GET /api/members/:id` - Profile with recent check-ins
//! - `PATCH /api/members/:id` - Edit profile fields
//! - `DELETE /api/members/:id` - Delete a member with their ledger
//! - `GET /api/members/:id/status` - Continuity at the current instant
//! - `GET /api/members/:id/history` - Periods and engagement statistics
//! - `POST /api/members/:id/renew` - Buy any package
//! - `POST /api/members/:id/day-pass` - Buy a Day Pass
//! - `POST /api/members/:id/periods` - Grant a period without payment
//! - `POST /api/members/:id/check-ins` - Record a visit

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::member_routes;
