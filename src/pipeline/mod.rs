//! Pipeline orchestration module.
//!
//! Submission pipeline that coordinates:
//! - Photo decoding and content hashing
//! - Content-addressed photo upload
//! - Alias derivation and report validation
//! - Report persistence

pub mod context;
pub mod submission;

pub use context::*;
pub use submission::*;
