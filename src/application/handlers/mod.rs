//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.
//!
//! - `members` - Profile CRUD, status and history
//! - `enrollment` - Every operation that appends to the period ledger
//! - `catalog` - Packages and payment methods
//! - `reports` - Revenue

pub mod catalog;
pub mod enrollment;
pub mod members;
pub mod reports;

#[cfg(test)]
pub(crate) mod test_support;
