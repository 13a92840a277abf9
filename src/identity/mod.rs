//! User identity module.
//!
//! - `alias` - one-way display aliases derived from user ids
//! - `session` - explicit current-identity context and provider error codes

pub mod alias;
pub mod session;

pub use alias::*;
pub use session::*;
