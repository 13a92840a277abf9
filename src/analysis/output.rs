//! Model output schema.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// What the model reports about one photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PotholeAnalysis {
    /// Whether a pothole is clearly visible.
    pub is_pothole: bool,
    /// Estimated surface area in m².
    pub surface_area: f64,
    /// Free text such as `"30cm x 50cm"`.
    pub approx_dimensions: String,
    /// Estimated volume in m³.
    pub approx_volume: f64,
    /// Description of the pothole and its surroundings, in Spanish.
    pub ai_summary: String,
    /// Severity 1..=100. Kept as a float here; range and integrality are
    /// enforced when the report is validated.
    pub score: f64,
    /// Which model produced the analysis.
    #[serde(default)]
    pub model_version: String,
}

/// The model's payload, which does not carry the model version.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelOutput {
    is_pothole: bool,
    surface_area: f64,
    approx_dimensions: String,
    approx_volume: f64,
    ai_summary: String,
    score: f64,
}

impl PotholeAnalysis {
    /// Parse a model response and stamp it with `model_version`.
    pub fn from_model_output(output: &str, model_version: &str) -> Result<Self, AnalysisError> {
        if output.trim().is_empty() {
            return Err(AnalysisError::EmptyOutput);
        }

        let raw: ModelOutput = serde_json::from_str(output)?;
        Ok(Self {
            is_pothole: raw.is_pothole,
            surface_area: raw.surface_area,
            approx_dimensions: raw.approx_dimensions,
            approx_volume: raw.approx_volume,
            ai_summary: raw.ai_summary,
            score: raw.score,
            model_version: model_version.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTPUT: &str = r#"{
        "isPothole": true,
        "surfaceArea": 0.35,
        "approxDimensions": "50cm x 70cm",
        "approxVolume": 0.04,
        "aiSummary": "Bache profundo en la calzada, cerca de un desagüe.",
        "score": 78
    }"#;

    #[test]
    fn test_from_model_output() {
        let analysis = PotholeAnalysis::from_model_output(OUTPUT, "googleai/gemini-2.0-flash").unwrap();
        assert!(analysis.is_pothole);
        assert_eq!(analysis.score, 78.0);
        assert_eq!(analysis.approx_dimensions, "50cm x 70cm");
        assert_eq!(analysis.model_version, "googleai/gemini-2.0-flash");
    }

    #[test]
    fn test_empty_output() {
        assert!(matches!(
            PotholeAnalysis::from_model_output("  ", "m"),
            Err(AnalysisError::EmptyOutput)
        ));
    }

    #[test]
    fn test_malformed_output() {
        let err = PotholeAnalysis::from_model_output(r#"{"isPothole": true}"#, "m").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedOutput(_)));
    }
}
