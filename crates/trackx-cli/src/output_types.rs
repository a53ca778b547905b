use serde::Serialize;
use trackx_core::geo::BoundingBox;
use trackx_core::models::{CasePayload, CsvIngestSummary, Extraction};

/// Output for the extract command
#[derive(Debug, Serialize)]
pub struct ExtractOutput {
    pub file: String,
    pub format: String,
    pub total_points: usize,
    pub points_of_interest: usize,
    pub track_length_m: f64,
    pub bounding_box: Option<BoundingBox>,
    pub csv_summary: Option<CsvIngestSummary>,
    pub extraction: Extraction,
    pub payload: Option<CasePayload>,
}

/// Output for the inspect command on prose formats
#[derive(Debug, Serialize)]
pub struct InspectOutput {
    pub file: String,
    pub format: String,
    pub valid: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub page_count: usize,
    pub characters: usize,
    pub candidate_count: usize,
    pub sample: String,
}

/// Output for the inspect command on CSV exports
#[derive(Debug, Serialize)]
pub struct InspectCsvOutput {
    pub file: String,
    pub format: String,
    pub summary: CsvIngestSummary,
}

/// Output for the formats command
#[derive(Debug, Serialize)]
pub struct FormatsOutput {
    pub formats: Vec<FormatInfo>,
}

#[derive(Debug, Serialize)]
pub struct FormatInfo {
    pub name: String,
    pub extensions: Vec<String>,
}
