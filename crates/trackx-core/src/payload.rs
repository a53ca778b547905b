//! Case payload assembly
//!
//! Flattens an extraction into the case-creation payload: points of
//! interest under `csv_data`, the full track under `all_points` with
//! timestamps normalized to ISO-8601 against the incident date.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use regex::Regex;

use crate::error::{Result, TrackxError};
use crate::models::{CaseMeta, CasePayload, Extraction, PayloadPoint, PayloadTrackPoint};

/// Build the submission payload for a case. The incident date must be
/// `YYYY-MM-DD`; it anchors the ISO normalization of track timestamps.
pub fn build_case_payload(meta: &CaseMeta, extraction: &Extraction) -> Result<CasePayload> {
    NaiveDate::parse_from_str(&meta.date_of_incident, "%Y-%m-%d").map_err(|_| {
        TrackxError::InvalidDate { value: meta.date_of_incident.clone() }
    })?;

    let time_of_day = Regex::new(r"\b\d{2}:\d{2}:\d{2}\b")?;

    let csv_data = extraction
        .stopped_points
        .iter()
        .map(|point| PayloadPoint {
            latitude: point.lat,
            longitude: point.lng,
            timestamp: point.timestamp.clone().filter(|t| !t.is_empty()),
            description: none_if_empty(&point.description),
            ignition_status: point.ignition_status,
        })
        .collect();

    let all_points = extraction
        .raw
        .iter()
        .map(|point| PayloadTrackPoint {
            latitude: point.lat,
            longitude: point.lng,
            timestamp: convert_to_iso(&time_of_day, &meta.date_of_incident, &point.description),
            description: none_if_empty(&point.description),
        })
        .collect();

    Ok(CasePayload {
        case_number: meta.case_number.clone(),
        case_title: meta.case_title.clone(),
        date_of_incident: meta.date_of_incident.clone(),
        region: meta.region.clone(),
        between: meta.between.clone(),
        urgency: meta.urgency.clone(),
        csv_data,
        all_points,
    })
}

/// Pull a time of day out of the description and anchor it on the
/// incident date. Descriptions without a full `HH:MM:SS` time, and
/// combinations that do not parse as a real instant, yield `None`.
fn convert_to_iso(time_of_day: &Regex, date: &str, description: &str) -> Option<String> {
    let time = time_of_day.find(description)?.as_str();

    let instant = format!("{}T{}Z", date, time);
    DateTime::parse_from_rfc3339(&instant)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn none_if_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GpsRecord, IgnitionStatus};

    fn record(id: usize, description: &str, status: IgnitionStatus) -> GpsRecord {
        GpsRecord {
            id,
            lat: -26.107567,
            lng: 28.056702,
            timestamp: Some("14:32:10".to_string()),
            description: description.to_string(),
            ignition_status: status,
            raw_context: String::new(),
        }
    }

    fn meta() -> CaseMeta {
        CaseMeta {
            case_number: "CASE-042".to_string(),
            case_title: "Vehicle tracking analysis".to_string(),
            date_of_incident: "2024-03-15".to_string(),
            region: "Gauteng".to_string(),
            between: String::new(),
            urgency: "High".to_string(),
        }
    }

    #[test]
    fn test_payload_splits_interest_and_track() {
        let stopped = record(0, "GPS Point 1 (from table)", IgnitionStatus::Stopped);
        let moving = record(1, "GPS Point 2 (decimal_standard)", IgnitionStatus::Moving);
        let extraction = Extraction {
            raw: vec![stopped.clone(), moving],
            stopped_points: vec![stopped],
        };

        let payload = build_case_payload(&meta(), &extraction).unwrap();

        assert_eq!(payload.csv_data.len(), 1);
        assert_eq!(payload.all_points.len(), 2);
        assert_eq!(payload.case_number, "CASE-042");
    }

    #[test]
    fn test_track_timestamp_normalized_from_description_time() {
        let extraction = Extraction {
            raw: vec![record(0, "Stop at 14:32:10 near depot", IgnitionStatus::Stopped)],
            stopped_points: vec![],
        };

        let payload = build_case_payload(&meta(), &extraction).unwrap();

        assert_eq!(
            payload.all_points[0].timestamp.as_deref(),
            Some("2024-03-15T14:32:10.000Z")
        );
    }

    #[test]
    fn test_description_without_time_yields_no_iso_timestamp() {
        let extraction = Extraction {
            raw: vec![record(0, "GPS Point 1 (labeled)", IgnitionStatus::Unknown)],
            stopped_points: vec![],
        };

        let payload = build_case_payload(&meta(), &extraction).unwrap();

        // The record has a bare timestamp field, but normalization only
        // reads the description
        assert!(payload.all_points[0].timestamp.is_none());
    }

    #[test]
    fn test_impossible_time_of_day_yields_none() {
        let extraction = Extraction {
            raw: vec![record(0, "logged 99:99:99 units", IgnitionStatus::Unknown)],
            stopped_points: vec![],
        };

        let payload = build_case_payload(&meta(), &extraction).unwrap();
        assert!(payload.all_points[0].timestamp.is_none());
    }

    #[test]
    fn test_empty_description_becomes_null() {
        let extraction = Extraction {
            raw: vec![record(0, "", IgnitionStatus::Unknown)],
            stopped_points: vec![record(0, "", IgnitionStatus::Stopped)],
        };

        let payload = build_case_payload(&meta(), &extraction).unwrap();

        assert!(payload.csv_data[0].description.is_none());
        assert!(payload.all_points[0].description.is_none());
    }

    #[test]
    fn test_invalid_incident_date_rejected() {
        let mut invalid = meta();
        invalid.date_of_incident = "15/03/2024".to_string();

        let extraction = Extraction { raw: vec![], stopped_points: vec![] };
        let err = build_case_payload(&invalid, &extraction).unwrap_err();

        assert!(matches!(err, TrackxError::InvalidDate { .. }));
    }
}
