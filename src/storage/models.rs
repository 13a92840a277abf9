//! Report records.
//!
//! These models mirror the documents persisted in the `reports` collection.
//! Field names serialize in camelCase to match the stored layout.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A candidate report as received from the client, before validation.
///
/// Numeric fields are optional so a missing value can be reported as a
/// validation error instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawReport {
    pub user_id: String,
    pub timestamp: String,
    pub location: String,
    pub ai_summary: String,
    pub approx_dimensions: String,
    pub surface_area: Option<f64>,
    pub approx_volume: Option<f64>,
    pub score: Option<f64>,
    pub is_pothole: bool,
    pub photo_url: String,
    pub photo_hash: String,
    pub model_version: String,
}

/// A report that passed every validation check, with its alias computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedReport {
    pub user_id: String,
    pub alias: String,
    pub timestamp: String,
    pub location: String,
    pub ai_summary: String,
    pub approx_dimensions: String,
    pub surface_area: f64,
    pub approx_volume: f64,
    pub score: u8,
    pub is_pothole: bool,
    pub photo_url: String,
    pub photo_hash: String,
    pub model_version: String,
}

/// A persisted report. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    #[serde(flatten)]
    pub body: AcceptedReport,
}

impl Report {
    pub fn new(id: String, body: AcceptedReport) -> Self {
        Self { id, body }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::parse(&self.body.location)
    }
}

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Parse `"lat, lng"`. Returns `None` unless there are exactly two
    /// finite components.
    pub fn parse(location: &str) -> Option<Self> {
        let mut parts = location.split(',');
        let lat = parts.next()?.trim().parse::<f64>().ok()?;
        let lng = parts.next()?.trim().parse::<f64>().ok()?;
        if parts.next().is_some() || !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        Some(Self { lat, lng })
    }

    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// The `"lat, lng"` form with five decimals used by submitting clients.
    pub fn to_location_string(&self) -> String {
        format!("{:.5}, {:.5}", self.lat, self.lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_location_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_parse() {
        let c = Coordinates::parse("-38.71830, -62.26610").unwrap();
        assert_eq!(c, Coordinates::new(-38.7183, -62.2661));
        assert!(Coordinates::parse("not,a,coord").is_none());
        assert!(Coordinates::parse("1.0").is_none());
        assert!(Coordinates::parse("NaN, 2").is_none());
        assert!(Coordinates::parse("inf, 2").is_none());
    }

    #[test]
    fn test_location_string_format() {
        let c = Coordinates::new(-38.718301234, -62.2661);
        assert_eq!(c.to_location_string(), "-38.71830, -62.26610");
    }

    #[test]
    fn test_raw_report_defaults_missing_fields() {
        let raw: RawReport = serde_json::from_str(r#"{"userId": "u1", "score": 40}"#).unwrap();
        assert_eq!(raw.user_id, "u1");
        assert_eq!(raw.score, Some(40.0));
        assert_eq!(raw.surface_area, None);
        assert!(raw.location.is_empty());
    }

    #[test]
    fn test_report_serializes_flat_camel_case() {
        let report = Report::new(
            "doc-1".to_string(),
            AcceptedReport {
                user_id: "u1".to_string(),
                alias: "BraveOtter-000000".to_string(),
                timestamp: "2024-05-01T12:00:00.000Z".to_string(),
                location: "-38.71830, -62.26610".to_string(),
                ai_summary: "Bache profundo".to_string(),
                approx_dimensions: "30cm x 50cm".to_string(),
                surface_area: 0.15,
                approx_volume: 0.02,
                score: 70,
                is_pothole: true,
                photo_url: "https://storage.example.com/p.jpg".to_string(),
                photo_hash: "0".repeat(64),
                model_version: "googleai/gemini-2.0-flash".to_string(),
            },
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["id"], "doc-1");
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["approxDimensions"], "30cm x 50cm");
        assert_eq!(json["isPothole"], true);

        let back: Report = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }
}
