//! Authentication adapters.
//!
//! - `shared_secret` - Single admin account with HS256 session tokens

mod shared_secret;

pub use shared_secret::SharedSecretAuthenticator;
