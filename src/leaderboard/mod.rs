//! Leaderboard module.
//!
//! Per-user score aggregation and ranking, recomputed on demand from the
//! full report collection.

pub mod aggregate;

pub use aggregate::*;
