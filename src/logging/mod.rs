//! Structured logging with submission context.
//!
//! Provides logging macros and utilities that include the submission scope
//! and reporter alias in every log message for easy correlation.

pub mod structured;

pub use structured::*;
