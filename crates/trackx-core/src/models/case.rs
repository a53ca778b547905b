use serde::{Deserialize, Serialize};

use super::record::IgnitionStatus;

/// Case metadata entered by the investigator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseMeta {
    /// Case reference number
    pub case_number: String,

    /// Case title
    pub case_title: String,

    /// Incident date, `YYYY-MM-DD`
    pub date_of_incident: String,

    /// Region the investigation covers
    pub region: String,

    /// Parties involved, e.g. `State v Smith`
    pub between: String,

    /// Urgency level
    pub urgency: String,
}

/// A point of interest flattened for submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "ignitionStatus")]
    pub ignition_status: IgnitionStatus,
}

/// A track point flattened for submission, timestamp normalized to ISO-8601
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadTrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: Option<String>,
    pub description: Option<String>,
}

/// The flat case-creation payload handed to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CasePayload {
    pub case_number: String,
    pub case_title: String,
    pub date_of_incident: String,
    pub region: String,
    pub between: String,
    pub urgency: String,

    /// Points of interest (stopped/idle locations)
    pub csv_data: Vec<PayloadPoint>,

    /// Every extracted point with ISO timestamps where recoverable
    pub all_points: Vec<PayloadTrackPoint>,
}
