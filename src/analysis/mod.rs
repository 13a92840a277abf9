//! Photo analysis module.
//!
//! The model itself is an external collaborator. This module owns the
//! prompt template, the output schema, and the `PhotoAnalyzer` seam.

pub mod output;
pub mod prompt;

pub use output::*;
pub use prompt::*;
