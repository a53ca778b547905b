//! Coordinate pattern matchers
//!
//! Six independent patterns cover the format variance seen across tracking
//! companies. Every pattern is applied to the whole text; the validator
//! resolves candidates that more than one pattern reports. The structured
//! row scan runs first and the multi-line scan last so that an explicitly
//! labeled row claims its coordinate ahead of the generic matchers under
//! first-seen-wins deduplication.

use regex::{Captures, Regex};

use crate::error::Result;
use crate::models::{IgnitionStatus, RawCoordinateCandidate, SourcePattern};

/// Compiled coordinate patterns, built once and reused across documents
#[derive(Debug)]
pub struct CoordinatePatterns {
    /// `-33.918861, 18.423300` or `-26.1367 28.2411`
    decimal: Regex,
    /// `Latitude: -34.357000 Longitude: 18.497200`, `Lat: -34.03 Lon: 23.04`
    labeled: Regex,
    /// `25°44'52.4"S 28°11'18.6"E`
    dms: Regex,
    /// `Coordinates: -26.1367, 28.2411`, `GPS: -33.9628 18.4098`
    coord_prefix: Regex,
    /// `14:32:10 -26.1367 28.2411 stopped`
    table_row: Regex,
    /// A bare decimal number, for the multi-line block scan
    decimal_number: Regex,
}

impl CoordinatePatterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            decimal: Regex::new(r"(-?\d+\.\d+)[,\s]+(-?\d+\.\d+)")?,
            labeled: Regex::new(
                r"(?i)(?:lat|latitude)[:\s]*(-?\d+\.\d+)[\s\w]*(?:lon|lng|longitude)[:\s]*(-?\d+\.\d+)",
            )?,
            dms: Regex::new(
                r#"(\d+)°(\d+)'([\d.]+)"([NSEW])\s+(\d+)°(\d+)'([\d.]+)"([NSEW])"#,
            )?,
            coord_prefix: Regex::new(r"(?i)(?:coordinates?|gps)[:\s]*(-?\d+\.\d+)[,\s]+(-?\d+\.\d+)")?,
            table_row: Regex::new(
                r"(?i)(\d{2}:\d{2}(?::\d{2})?)\s+(-?\d+\.\d+)\s+(-?\d+\.\d+)\s+(stopped|idle|moving)",
            )?,
            decimal_number: Regex::new(r"-?\d+\.\d+")?,
        })
    }

    /// Run every pattern over the text and collect raw candidates.
    /// No validation happens here; an empty result is a valid result.
    pub fn scan(&self, text: &str) -> Vec<RawCoordinateCandidate> {
        let mut candidates = Vec::new();

        self.scan_table_rows(text, &mut candidates);
        self.scan_pair_pattern(text, &self.decimal, SourcePattern::DecimalStandard, &mut candidates);
        self.scan_pair_pattern(text, &self.labeled, SourcePattern::Labeled, &mut candidates);
        self.scan_dms(text, &mut candidates);
        self.scan_pair_pattern(text, &self.coord_prefix, SourcePattern::CoordPrefix, &mut candidates);
        self.scan_multi_line(text, &mut candidates);

        candidates
    }

    /// Patterns that capture a plain (lat, lng) pair in groups 1 and 2
    fn scan_pair_pattern(
        &self,
        text: &str,
        pattern: &Regex,
        source: SourcePattern,
        candidates: &mut Vec<RawCoordinateCandidate>,
    ) {
        for caps in pattern.captures_iter(text) {
            if let (Ok(lat), Ok(lng)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
                candidates.push(RawCoordinateCandidate::new(lat, lng, source, &caps[0]));
            }
        }
    }

    fn scan_dms(&self, text: &str, candidates: &mut Vec<RawCoordinateCandidate>) {
        for caps in self.dms.captures_iter(text) {
            match dms_to_decimal(&caps) {
                Some((lat, lng)) => {
                    candidates.push(RawCoordinateCandidate::new(
                        lat,
                        lng,
                        SourcePattern::Dms,
                        &caps[0],
                    ));
                }
                None => {
                    tracing::debug!("Skipping malformed DMS match: {}", &caps[0]);
                }
            }
        }
    }

    /// One structured row per line: the first `HH:MM[:SS] lat lng status`
    /// match in a line becomes a candidate carrying the row's own time
    /// and status.
    fn scan_table_rows(&self, text: &str, candidates: &mut Vec<RawCoordinateCandidate>) {
        for line in text.lines() {
            let line = line.trim();
            let Some(caps) = self.table_row.captures(line) else {
                continue;
            };

            if let (Ok(lat), Ok(lng)) = (caps[2].parse::<f64>(), caps[3].parse::<f64>()) {
                let status = IgnitionStatus::from_column_text(&caps[4])
                    .unwrap_or(IgnitionStatus::Unknown);
                candidates.push(RawCoordinateCandidate::from_table_row(
                    lat,
                    lng,
                    &caps[0],
                    &caps[1],
                    status,
                ));
            }
        }
    }

    /// A `latitude`/`lat:` label line immediately followed by a line whose
    /// first decimal number is the longitude
    fn scan_multi_line(&self, text: &str, candidates: &mut Vec<RawCoordinateCandidate>) {
        let lines: Vec<&str> = text.lines().collect();

        for (i, raw_line) in lines.iter().enumerate() {
            let line = raw_line.trim();
            let lower = line.to_lowercase();
            if !lower.contains("latitude") && !lower.contains("lat:") {
                continue;
            }

            let Some(lat_match) = self.decimal_number.find(line) else {
                continue;
            };
            let Some(next_line) = lines.get(i + 1) else {
                continue;
            };
            let Some(lng_match) = self.decimal_number.find(next_line) else {
                continue;
            };

            if let (Ok(lat), Ok(lng)) =
                (lat_match.as_str().parse::<f64>(), lng_match.as_str().parse::<f64>())
            {
                candidates.push(RawCoordinateCandidate::new(
                    lat,
                    lng,
                    SourcePattern::MultiLine,
                    line,
                ));
            }
        }
    }
}

/// Convert a DMS capture to signed decimal degrees.
/// `None` when a numeric component does not parse; the caller skips the match.
fn dms_to_decimal(caps: &Captures<'_>) -> Option<(f64, f64)> {
    let lat_deg: f64 = caps[1].parse().ok()?;
    let lat_min: f64 = caps[2].parse().ok()?;
    let lat_sec: f64 = caps[3].parse().ok()?;
    let lng_deg: f64 = caps[5].parse().ok()?;
    let lng_min: f64 = caps[6].parse().ok()?;
    let lng_sec: f64 = caps[7].parse().ok()?;

    let mut lat = lat_deg + lat_min / 60.0 + lat_sec / 3600.0;
    let mut lng = lng_deg + lng_min / 60.0 + lng_sec / 3600.0;

    if &caps[4] == "S" {
        lat = -lat;
    }
    if &caps[8] == "W" {
        lng = -lng;
    }

    Some((lat, lng))
}
