use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::IgnitionStatus;

/// Which textual pattern produced a coordinate candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourcePattern {
    /// Bare decimal pair: `-33.918861, 18.423300`
    DecimalStandard,
    /// Labeled values: `Latitude: -33.9 ... Longitude: 18.4`
    Labeled,
    /// Degrees-minutes-seconds: `33°55'07.9"S 18°25'23.9"E`
    Dms,
    /// Prefixed pair: `Coordinates: -26.1367, 28.2411`
    CoordPrefix,
    /// Tabular row: `14:32:10 -26.1367 28.2411 stopped`
    StructuredTable,
    /// Latitude label line followed by a longitude line
    MultiLine,
}

impl fmt::Display for SourcePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourcePattern::DecimalStandard => "decimal_standard",
            SourcePattern::Labeled => "labeled",
            SourcePattern::Dms => "dms",
            SourcePattern::CoordPrefix => "coord_prefix",
            SourcePattern::StructuredTable => "structured_table",
            SourcePattern::MultiLine => "multi_line",
        };
        write!(f, "{}", name)
    }
}

/// A coordinate pair as matched in the source text, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCoordinateCandidate {
    /// Decimal degrees latitude
    pub latitude: f64,

    /// Decimal degrees longitude
    pub longitude: f64,

    /// Pattern that produced this candidate
    pub source_pattern: SourcePattern,

    /// The matched substring, used for deduplication and context lookup
    pub original_text: String,

    /// Time-of-day captured from a structured table row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Status label captured from a structured table row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IgnitionStatus>,
}

impl RawCoordinateCandidate {
    /// Candidate from a free-text pattern match
    pub fn new(
        latitude: f64,
        longitude: f64,
        source_pattern: SourcePattern,
        original_text: impl Into<String>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            source_pattern,
            original_text: original_text.into(),
            time: None,
            status: None,
        }
    }

    /// Candidate from a structured table row, carrying the row's own
    /// time and status so assembly can prefer them
    pub fn from_table_row(
        latitude: f64,
        longitude: f64,
        original_text: impl Into<String>,
        time: impl Into<String>,
        status: IgnitionStatus,
    ) -> Self {
        Self {
            latitude,
            longitude,
            source_pattern: SourcePattern::StructuredTable,
            original_text: original_text.into(),
            time: Some(time.into()),
            status: Some(status),
        }
    }
}
