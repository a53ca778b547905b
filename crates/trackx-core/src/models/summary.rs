use serde::{Deserialize, Serialize};

/// Header names a CSV ingest resolved for each field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CsvColumnMap {
    /// Header matched for latitude
    pub lat: String,

    /// Header matched for longitude
    pub lng: String,

    /// Header matched for the timestamp, if any
    pub timestamp: Option<String>,

    /// Header matched for the description, if any
    pub description: Option<String>,

    /// Header matched for the ignition status, if any
    pub ignition: Option<String>,
}

/// What a CSV ingest found, reported alongside the extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvIngestSummary {
    /// Rows with a parseable coordinate pair
    pub total_points: usize,

    /// Rows classified as stopped or idle
    pub stopped_points: usize,

    /// Which headers were used for each field
    pub columns_used: CsvColumnMap,

    /// True when ignition status came from description keywords
    /// rather than a status column
    pub derived_status: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = CsvIngestSummary {
            total_points: 12,
            stopped_points: 4,
            columns_used: CsvColumnMap {
                lat: "Latitude".to_string(),
                lng: "Longitude".to_string(),
                timestamp: Some("Time".to_string()),
                description: None,
                ignition: Some("Status".to_string()),
            },
            derived_status: false,
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalPoints"], 12);
        assert_eq!(json["stoppedPoints"], 4);
        assert_eq!(json["columnsUsed"]["lat"], "Latitude");
        assert_eq!(json["derivedStatus"], false);
    }
}
