//! Storage module.
//!
//! Report models and the store seams used by the submission pipeline.
//! The real blob store and document database live outside this crate.

pub mod models;
pub mod store;

pub use models::*;
pub use store::*;
