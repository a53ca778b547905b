//! Error types for TrackX

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackxError {
    // Extraction errors
    #[error("No GPS coordinates found. The document may be scanned images or use an \
             unsupported format. Expected formats: decimal pairs (-33.918861, 18.423300), \
             labeled values (Latitude: -33.9), DMS (33°55'07.9\"S) or tabular rows. \
             Text sample: {sample}")]
    NoCoordinatesFound { sample: String },

    #[error("No stopped or idle vehicle points found in the CSV")]
    NoStoppedPoints,

    // CSV errors
    #[error("Could not identify latitude/longitude columns. Headers found: {found}")]
    MissingColumns { found: String },

    #[error("No rows with valid GPS coordinates in the CSV. Headers found: {found}")]
    CsvNoCoordinates { found: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // Document errors
    #[error("Failed to extract text from {path}: {reason}")]
    Pdf { path: PathBuf, reason: String },

    #[error("Unsupported file format: {extension}. Supported: {}", supported.join(", "))]
    UnsupportedFormat {
        extension: String,
        supported: Vec<String>,
    },

    // Payload errors
    #[error("Invalid incident date: {value}. Expected YYYY-MM-DD")]
    InvalidDate { value: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Pattern errors
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrackxError>;
