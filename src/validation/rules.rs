//! Per-field validation rules.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use crate::error::ValidationReason;
use crate::storage::models::Coordinates;

/// Inclusive severity score bounds.
pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 100;

lazy_static! {
    /// `<float>, <float>` with optional sign, fraction and exponent.
    static ref LOCATION_PATTERN: Regex = Regex::new(
        r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)\s*,\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)\s*$"
    ).unwrap();

    /// Lowercase hex SHA-256 digest
    static ref PHOTO_HASH_PATTERN: Regex = Regex::new(r"^[0-9a-f]{64}$").unwrap();
}

/// Required text must contain something other than whitespace.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn check_absolute_url(value: &str) -> Result<Url, ValidationReason> {
    Url::parse(value.trim()).map_err(|e| ValidationReason::InvalidUrl(e.to_string()))
}

/// Non-negative, finite measurement (area or volume).
pub fn check_measurement(value: Option<f64>) -> Result<f64, ValidationReason> {
    let value = value.ok_or(ValidationReason::Required)?;
    if !value.is_finite() {
        return Err(ValidationReason::NotFinite);
    }
    if value < 0.0 {
        return Err(ValidationReason::Negative(value));
    }
    Ok(value)
}

/// Integer severity score in `[MIN_SCORE, MAX_SCORE]`.
pub fn check_score(value: Option<f64>) -> Result<u8, ValidationReason> {
    let value = value.ok_or(ValidationReason::Required)?;
    if !value.is_finite() {
        return Err(ValidationReason::NotFinite);
    }
    if value.fract() != 0.0 {
        return Err(ValidationReason::NotAnInteger(value));
    }
    if value < f64::from(MIN_SCORE) || value > f64::from(MAX_SCORE) {
        return Err(ValidationReason::OutOfRange {
            min: f64::from(MIN_SCORE),
            max: f64::from(MAX_SCORE),
            value,
        });
    }
    Ok(value as u8)
}

pub fn check_timestamp(value: &str) -> Result<DateTime<Utc>, ValidationReason> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ValidationReason::InvalidTimestamp(e.to_string()))
}

/// `"lat, lng"` with finite components inside WGS84 bounds.
pub fn check_location(value: &str) -> Result<Coordinates, ValidationReason> {
    let caps = LOCATION_PATTERN
        .captures(value)
        .ok_or(ValidationReason::InvalidLocation)?;

    let lat: f64 = caps[1].parse().map_err(|_| ValidationReason::InvalidLocation)?;
    let lng: f64 = caps[2].parse().map_err(|_| ValidationReason::InvalidLocation)?;

    let coords = Coordinates::new(lat, lng);
    if !lat.is_finite() || !lng.is_finite() || !coords.in_range() {
        return Err(ValidationReason::InvalidLocation);
    }
    Ok(coords)
}

pub fn check_photo_hash(value: &str) -> Result<(), ValidationReason> {
    if PHOTO_HASH_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(ValidationReason::InvalidHash)
    }
}
