use serde::{Deserialize, Serialize};
use std::fmt;

use super::candidate::SourcePattern;

/// Ignition/motion state classified for a GPS record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnitionStatus {
    Stopped,
    Idle,
    Moving,
    Unknown,
}

impl IgnitionStatus {
    /// Whether this status marks a record as a point of interest
    /// (stopped/idle locations, or anything we could not rule out)
    pub fn is_point_of_interest(&self) -> bool {
        matches!(self, IgnitionStatus::Stopped | IgnitionStatus::Idle | IgnitionStatus::Unknown)
    }

    /// Map a CSV status-column value onto the enum. Tracking exports label
    /// stopped rows as either "stopped" or "off"; anything unrecognized
    /// stays untyped so the caller can decide how to handle it.
    pub fn from_column_text(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "stopped" | "off" => Some(IgnitionStatus::Stopped),
            "idle" => Some(IgnitionStatus::Idle),
            "moving" => Some(IgnitionStatus::Moving),
            _ => None,
        }
    }
}

impl fmt::Display for IgnitionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IgnitionStatus::Stopped => "Stopped",
            IgnitionStatus::Idle => "Idle",
            IgnitionStatus::Moving => "Moving",
            IgnitionStatus::Unknown => "Unknown",
        };
        write!(f, "{}", name)
    }
}

/// A normalized GPS point record, the final unit of output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpsRecord {
    /// Sequence index assigned during assembly (0-based)
    pub id: usize,

    /// Decimal degrees latitude
    pub lat: f64,

    /// Decimal degrees longitude
    pub lng: f64,

    /// Recovered or synthesized timestamp text
    pub timestamp: Option<String>,

    /// Human-readable description, e.g. `GPS Point 3 (labeled)`
    pub description: String,

    /// Classified ignition/motion state
    pub ignition_status: IgnitionStatus,

    /// Text window surrounding the original match
    pub raw_context: String,
}

/// A record paired with the pattern that produced it, kept until
/// partitioning decides where the record belongs
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledRecord {
    pub record: GpsRecord,

    /// Pattern that produced the underlying candidate
    pub source_pattern: SourcePattern,
}

impl AssembledRecord {
    /// Structured-table records are trusted as points of interest even
    /// when their classified status says otherwise
    pub fn is_point_of_interest(&self) -> bool {
        self.record.ignition_status.is_point_of_interest()
            || self.source_pattern == SourcePattern::StructuredTable
    }
}

/// Output contract of an extraction run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    /// Every surviving record (allPoints)
    pub raw: Vec<GpsRecord>,

    /// Points of interest: stopped/idle/unknown or table-sourced records,
    /// falling back to every record when the filter comes up empty
    pub stopped_points: Vec<GpsRecord>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}
