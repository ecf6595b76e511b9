//! Gym Ledger - Membership backend for a single gym.
//!
//! Members buy packages measured in calendar months or a single-day pass.
//! Every purchase appends a period to an append-only ledger, and a member's
//! status, days remaining and loyalty statistics are derived from that
//! ledger at a reference instant.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
