//! Map markers and heat-layer points.
//!
//! The map library draws the markers and computes the kernel density; this
//! module only turns reports into the point lists it consumes.

use serde::{Deserialize, Serialize};

use crate::storage::models::{Coordinates, Report};

/// A marker for one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPoint {
    pub report_id: String,
    pub lat: f64,
    pub lng: f64,
    pub score: u8,
    pub alias: String,
    pub timestamp: String,
}

/// `[lat, lng, intensity]` with intensity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint(pub f64, pub f64, pub f64);

/// Heat-layer rendering options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatLayerOptions {
    pub radius: u32,
    pub blur: u32,
    pub max_zoom: u32,
    pub max: f64,
    /// `(stop, colour)` pairs in ascending stop order.
    pub gradient: Vec<(f64, String)>,
}

impl Default for HeatLayerOptions {
    fn default() -> Self {
        Self {
            radius: 20,
            blur: 30,
            max_zoom: 18,
            max: 1.0,
            gradient: vec![
                (0.1, "blue".to_string()),
                (0.4, "green".to_string()),
                (0.7, "yellow".to_string()),
                (1.0, "red".to_string()),
            ],
        }
    }
}

/// Initial map view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
}

/// One marker per report with a parseable location.
pub fn map_points(reports: &[Report]) -> Vec<MapPoint> {
    let mut skipped = 0usize;
    let points: Vec<MapPoint> = reports
        .iter()
        .filter_map(|report| {
            let coords = match report.coordinates() {
                Some(coords) => coords,
                None => {
                    skipped += 1;
                    log::debug!(
                        "MAP_POINT_SKIPPED report_id={} location={:?}",
                        report.id,
                        report.body.location
                    );
                    return None;
                }
            };
            Some(MapPoint {
                report_id: report.id.clone(),
                lat: coords.lat,
                lng: coords.lng,
                score: report.body.score,
                alias: report.body.alias.clone(),
                timestamp: report.body.timestamp.clone(),
            })
        })
        .collect();

    if skipped > 0 {
        log::warn!("MAP_POINTS_INCOMPLETE plotted={} skipped={}", points.len(), skipped);
    }
    points
}

/// Heat points weighted by severity (`score / 100`).
pub fn heat_points(points: &[MapPoint]) -> Vec<HeatPoint> {
    points
        .iter()
        .map(|p| HeatPoint(p.lat, p.lng, f64::from(p.score) / 100.0))
        .collect()
}
