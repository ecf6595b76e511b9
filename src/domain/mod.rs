//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, calendar, errors)
//! - `membership` - Members, packages and the period engine

pub mod foundation;
pub mod membership;
