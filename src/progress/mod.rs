//! Learner progress: long-lived per-character statistics and persistence
//!
//! # Components
//! - `stats.rs`: `CharacterStats` and `UserProgress` value types
//! - `store.rs`: JSON persistence with safe defaults

pub mod stats;
pub mod store;

pub use stats::{CharacterStats, UserProgress, MAX_RECENT_LATENCIES};
pub use store::{Settings, Store};
