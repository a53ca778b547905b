//! CSV tracking-export ingestion
//!
//! Fleet platforms export point logs as CSV with loosely standardized
//! headers. Columns are resolved by substring match against known header
//! fragments, rows become records directly, and ignition status comes
//! from the status column or, failing that, from description keywords.
//! Rows arrive pre-structured, so none of the text-scanning pipeline or
//! its deduplication applies here.

use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{Result, TrackxError};
use crate::extract::context::classify_description;
use crate::models::{CsvColumnMap, CsvIngestSummary, Extraction, GpsRecord, IgnitionStatus};

/// Header fragments tried per field, first matching header wins
const LAT_KEYS: &[&str] = &["lat", "latitude"];
const LNG_KEYS: &[&str] = &["lon", "lng", "long"];
const TIMESTAMP_KEYS: &[&str] = &["time", "date", "stamp"];
const DESCRIPTION_KEYS: &[&str] = &["desc", "note", "comment", "text"];
const IGNITION_KEYS: &[&str] = &["ignition", "status", "engine"];

/// Ingest a CSV tracking export from a file path
pub fn ingest_csv(path: &Path) -> Result<(Extraction, CsvIngestSummary)> {
    let file = std::fs::File::open(path)?;
    ingest_csv_reader(file)
}

/// Ingest a CSV tracking export from any reader
pub fn ingest_csv_reader<R: io::Read>(input: R) -> Result<(Extraction, CsvIngestSummary)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let lat_idx = resolve_column(&headers, LAT_KEYS);
    let lng_idx = resolve_column(&headers, LNG_KEYS);
    let timestamp_idx = resolve_column(&headers, TIMESTAMP_KEYS);
    let description_idx = resolve_column(&headers, DESCRIPTION_KEYS);
    let ignition_idx = resolve_column(&headers, IGNITION_KEYS);

    let (lat_idx, lng_idx) = match (lat_idx, lng_idx) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => return Err(TrackxError::MissingColumns { found: headers.join(", ") }),
    };

    let columns_used = CsvColumnMap {
        lat: headers[lat_idx].clone(),
        lng: headers[lng_idx].clone(),
        timestamp: timestamp_idx.map(|i| headers[i].clone()),
        description: description_idx.map(|i| headers[i].clone()),
        ignition: ignition_idx.map(|i| headers[i].clone()),
    };

    let mut raw: Vec<GpsRecord> = Vec::new();

    // Row index doubles as the record id; skipped rows leave id gaps
    for (index, row) in reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!(row = index + 1, "skipping unreadable CSV row: {}", e);
                continue;
            }
        };

        let (lat, lng) = match (parse_coordinate(&row, lat_idx), parse_coordinate(&row, lng_idx))
        {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => continue,
        };

        let description = field(&row, description_idx).unwrap_or_default();

        let ignition_status = match field(&row, ignition_idx) {
            Some(value) if !value.is_empty() => {
                IgnitionStatus::from_column_text(&value).unwrap_or(IgnitionStatus::Unknown)
            }
            _ => classify_description(&description).unwrap_or(IgnitionStatus::Unknown),
        };

        // A missing timestamp column gets a synthesized label; an empty
        // cell in a present column stays empty
        let timestamp = match timestamp_idx {
            Some(idx) => row.get(idx).filter(|value| !value.is_empty()).map(|v| v.to_string()),
            None => Some(format!("Record {}", index + 1)),
        };

        raw.push(GpsRecord {
            id: index,
            lat,
            lng,
            timestamp,
            description,
            ignition_status,
            raw_context: row.iter().collect::<Vec<_>>().join(","),
        });
    }

    if raw.is_empty() {
        return Err(TrackxError::CsvNoCoordinates { found: headers.join(", ") });
    }

    // Only an explicit stopped or idle status qualifies here; table rows
    // are authoritative, unlike scanned text where Unknown is kept
    let stopped_points: Vec<GpsRecord> = raw
        .iter()
        .filter(|record| {
            matches!(record.ignition_status, IgnitionStatus::Stopped | IgnitionStatus::Idle)
        })
        .cloned()
        .collect();

    if stopped_points.is_empty() {
        return Err(TrackxError::NoStoppedPoints);
    }

    let summary = CsvIngestSummary {
        total_points: raw.len(),
        stopped_points: stopped_points.len(),
        columns_used,
        derived_status: ignition_idx.is_none(),
    };

    tracing::info!(
        total = summary.total_points,
        stopped = summary.stopped_points,
        derived_status = summary.derived_status,
        "CSV ingest complete"
    );

    Ok((Extraction { raw, stopped_points }, summary))
}

/// First header whose lowercased text contains one of the fragments
fn resolve_column(headers: &[String], keys: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let lower = header.to_lowercase();
        keys.iter().any(|key| lower.contains(key))
    })
}

fn field(row: &StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| row.get(i)).map(|value| value.to_string())
}

fn parse_coordinate(row: &StringRecord, idx: usize) -> Option<f64> {
    row.get(idx).and_then(|value| value.parse::<f64>().ok()).filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ingest(data: &str) -> Result<(Extraction, CsvIngestSummary)> {
        ingest_csv_reader(Cursor::new(data.to_string()))
    }

    #[test]
    fn test_basic_ingest_with_status_column() {
        let data = "\
Timestamp,Latitude,Longitude,Ignition Status
2024-03-15 08:00:00,-26.107567,28.056702,Stopped
2024-03-15 08:05:00,-26.110000,28.060000,Moving
2024-03-15 08:30:00,-33.918861,18.423300,Idle
";
        let (extraction, summary) = ingest(data).unwrap();

        assert_eq!(extraction.raw.len(), 3);
        assert_eq!(extraction.stopped_points.len(), 2);
        assert_eq!(summary.total_points, 3);
        assert_eq!(summary.stopped_points, 2);
        assert!(!summary.derived_status);
        assert_eq!(summary.columns_used.lat, "Latitude");
        assert_eq!(summary.columns_used.ignition.as_deref(), Some("Ignition Status"));
    }

    #[test]
    fn test_off_counts_as_stopped() {
        let data = "\
lat,lng,status
-26.107567,28.056702,OFF
-26.200000,28.100000,moving
";
        let (extraction, _) = ingest(data).unwrap();

        assert_eq!(extraction.stopped_points.len(), 1);
        assert_eq!(extraction.stopped_points[0].ignition_status, IgnitionStatus::Stopped);
    }

    #[test]
    fn test_unrecognized_status_is_not_a_stop() {
        let data = "\
lat,lng,status
-26.107567,28.056702,Parked
-26.200000,28.100000,stopped
";
        let (extraction, _) = ingest(data).unwrap();

        // "Parked" is not one of the recognized column values; the row
        // stays in raw as Unknown but does not count as stopped
        assert_eq!(extraction.raw[0].ignition_status, IgnitionStatus::Unknown);
        assert_eq!(extraction.stopped_points.len(), 1);
        assert_eq!(extraction.stopped_points[0].id, 1);
    }

    #[test]
    fn test_status_derived_from_description() {
        let data = "\
lat,lng,notes
-26.107567,28.056702,Vehicle parked overnight
-26.200000,28.100000,driving north on N1
";
        let (extraction, summary) = ingest(data).unwrap();

        assert!(summary.derived_status);
        assert_eq!(extraction.raw[0].ignition_status, IgnitionStatus::Stopped);
        assert_eq!(extraction.raw[1].ignition_status, IgnitionStatus::Moving);
        assert_eq!(extraction.stopped_points.len(), 1);
    }

    #[test]
    fn test_empty_status_cell_falls_back_to_description() {
        let data = "\
lat,lng,status,notes
-26.107567,28.056702,,waiting at gate
-26.200000,28.100000,stopped,
";
        let (extraction, summary) = ingest(data).unwrap();

        assert_eq!(extraction.raw[0].ignition_status, IgnitionStatus::Idle);
        assert_eq!(extraction.raw[1].ignition_status, IgnitionStatus::Stopped);
        // The status column exists, so the summary does not flag derivation
        assert!(!summary.derived_status);
    }

    #[test]
    fn test_rows_without_coordinates_are_skipped_with_id_gaps() {
        let data = "\
lat,lng,status
-26.107567,28.056702,stopped
not-a-number,28.100000,stopped
-33.918861,18.423300,idle
";
        let (extraction, summary) = ingest(data).unwrap();

        assert_eq!(summary.total_points, 2);
        let ids: Vec<usize> = extraction.raw.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_zero_coordinates_survive_csv_ingest() {
        // Structured rows are trusted; the null-island heuristic only
        // applies to coordinates scanned out of free text
        let data = "\
lat,lng,status
0.0,0.0,stopped
";
        let (extraction, _) = ingest(data).unwrap();
        assert_eq!(extraction.raw[0].lat, 0.0);
    }

    #[test]
    fn test_missing_coordinate_columns() {
        let data = "\
name,speed,heading
truck-1,80,270
";
        let err = ingest(data).unwrap_err();

        match err {
            TrackxError::MissingColumns { found } => {
                assert!(found.contains("speed"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_parseable_rows() {
        let data = "\
lat,lng
abc,def
";
        let err = ingest(data).unwrap_err();
        assert!(matches!(err, TrackxError::CsvNoCoordinates { .. }));
    }

    #[test]
    fn test_no_stopped_points() {
        let data = "\
lat,lng,status
-26.107567,28.056702,moving
-26.200000,28.100000,moving
";
        let err = ingest(data).unwrap_err();
        assert!(matches!(err, TrackxError::NoStoppedPoints));
    }

    #[test]
    fn test_timestamp_column_absent_synthesizes_labels() {
        let data = "\
lat,lng,status
-26.107567,28.056702,stopped
";
        let (extraction, summary) = ingest(data).unwrap();

        assert_eq!(extraction.raw[0].timestamp.as_deref(), Some("Record 1"));
        assert!(summary.columns_used.timestamp.is_none());
    }

    #[test]
    fn test_empty_timestamp_cell_stays_empty() {
        let data = "\
time,lat,lng,status
,-26.107567,28.056702,stopped
";
        let (extraction, _) = ingest(data).unwrap();

        // Present column, empty cell: no synthesized label
        assert!(extraction.raw[0].timestamp.is_none());
    }

    #[test]
    fn test_fuzzy_header_resolution_prefers_first_match() {
        let data = "\
Plate,GPS Lat,GPS Long,Engine
ABC123,-26.107567,28.056702,off
";
        // "Plate" contains "lat" and wins the latitude slot, so no row
        // yields a coordinate; the known cost of fragment matching
        let err = ingest(data).unwrap_err();
        assert!(matches!(err, TrackxError::CsvNoCoordinates { .. }));
    }

    #[test]
    fn test_raw_context_preserves_row() {
        let data = "\
lat,lng,status
-26.107567,28.056702,stopped
";
        let (extraction, _) = ingest(data).unwrap();
        assert_eq!(extraction.raw[0].raw_context, "-26.107567,28.056702,stopped");
    }
}
