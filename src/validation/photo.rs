//! Photo payload handling.
//!
//! Clients send photos as `data:<mime>;base64,<payload>` URIs. The decoded
//! bytes are hashed with SHA-256; the lowercase hex digest is both the
//! integrity check and the storage key.

use base64::{engine::general_purpose, Engine as _};
use sha2::{Digest, Sha256};

use crate::error::PhotoError;

/// A decoded data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPhoto {
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Decode a base64 `data:` URI into raw bytes.
pub fn decode_data_uri(data_uri: &str) -> Result<DecodedPhoto, PhotoError> {
    let rest = data_uri
        .trim()
        .strip_prefix("data:")
        .ok_or(PhotoError::NotADataUri)?;
    let (header, payload) = rest.split_once(',').ok_or(PhotoError::NotADataUri)?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or(PhotoError::NotADataUri)?;

    let bytes = general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| PhotoError::InvalidBase64(e.to_string()))?;

    if bytes.is_empty() {
        return Err(PhotoError::Empty);
    }

    Ok(DecodedPhoto {
        mime_type: (!mime.is_empty()).then(|| mime.to_string()),
        bytes,
    })
}

/// Compute the lowercase hex SHA-256 digest of photo bytes.
pub fn compute_photo_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Check that `photo_hash` is the digest of `bytes`.
pub fn verify_photo_hash(bytes: &[u8], photo_hash: &str) -> bool {
    compute_photo_hash(bytes) == photo_hash
}
