//! dash-domain
//!
//! Pure domain models for the budget dashboard (transactions, goals, recurring
//! rules, currency and theme preferences). No I/O, no CLI, no storage.

pub mod common;
pub mod defaults;
pub mod goal;
pub mod recurring;
pub mod state;
pub mod transaction;

pub use common::*;
pub use goal::*;
pub use recurring::*;
pub use state::*;
pub use transaction::*;

/// Milliseconds in one day. Used for end-of-day filter bounds and default seed data.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;
