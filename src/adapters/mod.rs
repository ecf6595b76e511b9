//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Shared-secret admin login and token checks
//! - `clock` - System and fixed clocks
//! - `http` - axum routes, DTOs and middleware
//! - `memory` - In-memory store implementing every persistence port
//! - `postgres` - PostgreSQL implementations of the persistence ports

pub mod auth;
pub mod clock;
pub mod http;
pub mod memory;
pub mod postgres;

pub use auth::SharedSecretAuthenticator;
pub use clock::{FixedClock, SystemClock};
pub use memory::InMemoryStore;
