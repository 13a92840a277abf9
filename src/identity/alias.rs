//! Anonymous display aliases.
//!
//! A user id is hashed with SHA-256 and the digest is formatted into a short
//! readable token such as `BraveOtter-3fa91c`. The mapping is deterministic
//! and cannot be inverted to recover the id, so reports can be correlated on
//! the leaderboard without exposing who filed them.

use sha2::{Digest, Sha256};

use crate::error::AliasError;

/// Adjectives indexed by the first digest byte. Length must divide 256.
const ADJECTIVES: [&str; 32] = [
    "Agile", "Amber", "Bold", "Brave", "Bright", "Calm", "Clever", "Cosmic",
    "Crimson", "Daring", "Eager", "Fierce", "Gentle", "Golden", "Happy", "Humble",
    "Jolly", "Keen", "Lively", "Lucky", "Mighty", "Nimble", "Noble", "Quiet",
    "Rapid", "Silent", "Silver", "Steady", "Swift", "Tidy", "Vivid", "Witty",
];

/// Nouns indexed by the second digest byte. Length must divide 256.
const NOUNS: [&str; 32] = [
    "Badger", "Beaver", "Bison", "Condor", "Cougar", "Coyote", "Falcon", "Ferret",
    "Fox", "Gecko", "Hare", "Hawk", "Heron", "Ibis", "Jaguar", "Lynx",
    "Marten", "Moose", "Ocelot", "Orca", "Otter", "Owl", "Panther", "Puma",
    "Raven", "Rhea", "Seal", "Tapir", "Toucan", "Vicuna", "Wolf", "Wren",
];

/// Number of digest bytes rendered as the hex suffix.
const SUFFIX_BYTES: usize = 3;

/// Derive the display alias for a user id.
///
/// # Errors
/// `AliasError::InvalidInput` if the id is empty or only whitespace.
pub fn generate_alias(user_id: &str) -> Result<String, AliasError> {
    if user_id.trim().is_empty() {
        return Err(AliasError::InvalidInput("user id is empty".to_string()));
    }

    let digest = Sha256::digest(user_id.as_bytes());
    let adjective = ADJECTIVES[digest[0] as usize % ADJECTIVES.len()];
    let noun = NOUNS[digest[1] as usize % NOUNS.len()];
    let suffix = hex::encode(&digest[2..2 + SUFFIX_BYTES]);

    Ok(format!("{}{}-{}", adjective, noun, suffix))
}

/// Two upper-cased leading characters, used as an avatar placeholder.
pub fn alias_initials(alias: &str) -> String {
    alias.chars().take(2).flat_map(char::to_uppercase).collect()
}
