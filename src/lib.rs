//! BacheAI Core - report validation, aliasing and leaderboards
//!
//! This crate holds the pure-data core of the pothole reporting service:
//! citizens photograph potholes, a model estimates size and severity, and
//! the reports feed a table, a heat map and a leaderboard. The
//! implementation prioritizes:
//!
//! 1. **Privacy** - reporters are shown by a one-way alias, never their id
//! 2. **Completeness** - validation reports every problem, not the first
//! 3. **Determinism** - aggregation gives identical output for identical input
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `identity` - alias derivation and the explicit current-identity context
//! - `validation` - report and issue validation, photo hashing
//! - `leaderboard` - per-user aggregation and ranking
//! - `export` - CSV export and map/heat-layer points
//! - `analysis` - model prompt, output schema and analyzer seam
//! - `storage` - report models and photo/report store seams
//! - `pipeline` - submission orchestration
//! - `config` - environment-driven configuration
//! - `logging` - structured logging with submission context

pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod identity;
pub mod leaderboard;
pub mod logging;
pub mod pipeline;
pub mod storage;
pub mod validation;

#[cfg(feature = "python")]
mod python;

pub use error::{
    AliasError, AnalysisError, ConfigError, PhotoError, StoreError, SubmissionError,
    ValidationError, ValidationErrors, ValidationReason,
};
pub use export::csv::reports_to_csv;
pub use identity::alias::generate_alias;
pub use leaderboard::aggregate::{aggregate, aggregate_with, LeaderboardEntry, RankPolicy};
pub use storage::models::{AcceptedReport, Coordinates, RawReport, Report};
pub use validation::issue::{validate_issue, IssueReport};
pub use validation::report::{validate, validate_value};

/// Initialize the process logger.
///
/// Defaults to `info`; `RUST_LOG` overrides. Safe to call more than once.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
