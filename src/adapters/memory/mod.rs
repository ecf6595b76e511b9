//! In-memory adapters.
//!
//! Back every persistence port with process memory. Used by tests and by the
//! development server when no database URL is configured.

mod store;

pub use store::InMemoryStore;
