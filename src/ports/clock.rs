//! Clock port.
//!
//! The period engine never reads ambient time. Handlers take "now" from this
//! port and pass it down explicitly.

use crate::domain::foundation::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
