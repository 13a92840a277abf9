//! Report validation module.
//!
//! - `report` - the candidate report validator
//! - `issue` - the user feedback (issue report) validator
//! - `rules` - per-field checks (URL, measurements, score, timestamp, location, hash)
//! - `fields` - lenient extraction of fields from untyped JSON
//! - `photo` - data-URI decoding and SHA-256 photo hashing

pub mod fields;
pub mod issue;
pub mod photo;
pub mod report;
pub mod rules;

pub use issue::{validate_issue, validate_issue_value, IssueKind, IssueReport};
pub use photo::*;
pub use report::*;
pub use rules::{MAX_SCORE, MIN_SCORE};
