//! Record assembly and spatial deduplication
//!
//! Validated candidates become [`GpsRecord`]s here: each gets a context
//! window, a timestamp, a description, and a classified status. Assembled
//! records are then thinned by metric distance and partitioned into the
//! final output sets.

use crate::config::ExtractorConfig;
use crate::geo::planar_distance_m;
use crate::models::{AssembledRecord, Extraction, GpsRecord, RawCoordinateCandidate, SourcePattern};

use super::context::{classify_status, context_window, ContextPatterns};

/// Build one record per candidate. Timestamps are matched positionally:
/// the Nth candidate gets the Nth timestamp found in the document, then
/// the candidate's own table time, then a synthesized `Point N` label.
pub fn assemble_records(
    text: &str,
    candidates: &[RawCoordinateCandidate],
    timestamps: &[String],
    patterns: &ContextPatterns,
    config: &ExtractorConfig,
) -> Vec<AssembledRecord> {
    candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| {
            let context = context_window(
                text,
                &candidate.original_text,
                config.context_before,
                config.context_after,
            );

            let timestamp = timestamps
                .get(index)
                .cloned()
                .or_else(|| candidate.time.clone())
                .unwrap_or_else(|| format!("Point {}", index + 1));

            let mut description = if candidate.source_pattern == SourcePattern::StructuredTable {
                format!("GPS Point {} (from table)", index + 1)
            } else {
                format!("GPS Point {} ({})", index + 1, candidate.source_pattern)
            };
            if let Some(name) = patterns.location_name(&context) {
                description.push_str(&format!(" - {}", name));
            }

            // Table rows carry their own status column; everything else is
            // classified from the surrounding text
            let ignition_status = candidate
                .status
                .unwrap_or_else(|| classify_status(&context, &candidate.original_text));

            AssembledRecord {
                record: GpsRecord {
                    id: index,
                    lat: candidate.latitude,
                    lng: candidate.longitude,
                    timestamp: Some(timestamp),
                    description,
                    ignition_status,
                    raw_context: context,
                },
                source_pattern: candidate.source_pattern,
            }
        })
        .collect()
}

/// Drop records within `radius_m` meters of an earlier record. First
/// occurrence wins; ids keep their assembly values, so the surviving
/// sequence may have gaps.
pub fn dedup_by_distance(records: Vec<AssembledRecord>, radius_m: f64) -> Vec<AssembledRecord> {
    let mut unique: Vec<AssembledRecord> = Vec::new();

    for candidate in records {
        let collision = unique
            .iter()
            .find(|kept| {
                planar_distance_m(
                    kept.record.lat,
                    kept.record.lng,
                    candidate.record.lat,
                    candidate.record.lng,
                ) < radius_m
            })
            .map(|kept| kept.record.id);

        match collision {
            Some(kept_id) => {
                tracing::debug!(
                    dropped = candidate.record.id,
                    kept = kept_id,
                    radius_m,
                    "dropped record within dedup radius of an earlier record"
                );
            }
            None => unique.push(candidate),
        }
    }

    unique
}

/// Split assembled records into the output sets. `raw` holds every
/// record; `stopped_points` holds the points of interest, or falls back
/// to the full set when nothing qualifies so downstream consumers always
/// have a track to work with.
pub fn partition(records: Vec<AssembledRecord>) -> Extraction {
    let interest: Vec<GpsRecord> = records
        .iter()
        .filter(|assembled| assembled.is_point_of_interest())
        .map(|assembled| assembled.record.clone())
        .collect();

    let raw: Vec<GpsRecord> = records.into_iter().map(|assembled| assembled.record).collect();

    let stopped_points = if interest.is_empty() { raw.clone() } else { interest };

    Extraction { raw, stopped_points }
}
