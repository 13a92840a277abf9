//! Analysis prompt and the model seam.

use crate::analysis::output::PotholeAnalysis;
use crate::error::AnalysisError;

/// Placeholder replaced with the photo data URI.
pub const PHOTO_PLACEHOLDER: &str = "{{photo}}";

pub const ANALYSIS_PROMPT: &str = "You are an expert civil engineer specializing in road maintenance.

Your task is to analyze the provided photo of a street pothole and return a detailed analysis. Assume there is a standard reference object in the photo, like a coin or a shoe, to estimate dimensions, even if not explicitly visible.

Provide the following information:
1. **isPothole**: A boolean indicating if a pothole is clearly visible.
2. **surfaceArea**: Estimate the surface area in square meters (m^2).
3. **approxDimensions**: Estimate the approximate dimensions (e.g., \"30cm x 50cm\").
4. **approxVolume**: Estimate the volume in cubic meters (m^3).
5. **aiSummary**: A descriptive summary in Spanish, noting the location, apparent cause (e.g., water damage), and any surrounding context (e.g., near a sewer, in a crosswalk).
6. **score**: A severity score from 1 to 100, where 1 is a minor crack and 100 is a major, dangerous pothole.

Analyze the following photo:
Photo: {{photo}}";

pub fn render_prompt(photo_data_uri: &str) -> String {
    ANALYSIS_PROMPT.replace(PHOTO_PLACEHOLDER, photo_data_uri)
}

/// Something that can look at a photo and estimate the pothole in it.
pub trait PhotoAnalyzer {
    fn analyze(&self, photo_data_uri: &str) -> Result<PotholeAnalysis, AnalysisError>;
}
