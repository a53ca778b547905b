//! Coordinate validation and pattern-level deduplication

use crate::models::RawCoordinateCandidate;

/// Range check plus the null-fix heuristic. Trackers that lose signal
/// report exact zeros, so `lat == 0` and `lng == 0` are rejected even
/// though points on the equator or prime meridian are dropped with them.
pub fn is_valid_coordinate(lat: f64, lng: f64) -> bool {
    (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lng)
        && lat != 0.0
        && lng != 0.0
}

/// Drop invalid candidates, then collapse near-duplicates within
/// `dedup_degrees` on both axes. First seen wins; discovery order is
/// preserved.
pub fn validate_and_dedup(
    candidates: Vec<RawCoordinateCandidate>,
    dedup_degrees: f64,
) -> Vec<RawCoordinateCandidate> {
    let mut unique: Vec<RawCoordinateCandidate> = Vec::new();

    for candidate in candidates {
        if !is_valid_coordinate(candidate.latitude, candidate.longitude) {
            tracing::debug!(
                "Dropping out-of-range or null coordinate: {}, {}",
                candidate.latitude,
                candidate.longitude
            );
            continue;
        }

        let is_duplicate = unique.iter().any(|existing| {
            (existing.latitude - candidate.latitude).abs() < dedup_degrees
                && (existing.longitude - candidate.longitude).abs() < dedup_degrees
        });

        if is_duplicate {
            tracing::debug!(
                "Dropping duplicate candidate at {}, {} ({})",
                candidate.latitude,
                candidate.longitude,
                candidate.source_pattern
            );
            continue;
        }

        unique.push(candidate);
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourcePattern;

    fn candidate(lat: f64, lng: f64, source: SourcePattern) -> RawCoordinateCandidate {
        RawCoordinateCandidate::new(lat, lng, source, format!("{}, {}", lat, lng))
    }

    #[test]
    fn test_valid_ranges() {
        assert!(is_valid_coordinate(-33.918861, 18.4233));
        assert!(is_valid_coordinate(90.0, 180.0));
        assert!(is_valid_coordinate(-90.0, -180.0));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(!is_valid_coordinate(90.1, 18.4));
        assert!(!is_valid_coordinate(-33.9, 180.5));
        assert!(!is_valid_coordinate(f64::NAN, 18.4));
        assert!(!is_valid_coordinate(-33.9, f64::INFINITY));
    }

    #[test]
    fn test_zero_axis_rejected() {
        // Null-fix heuristic: zeros are treated as missing fixes
        assert!(!is_valid_coordinate(0.0, 18.4233));
        assert!(!is_valid_coordinate(-33.918861, 0.0));
        assert!(!is_valid_coordinate(0.0, 0.0));
    }

    #[test]
    fn test_dedup_first_seen_wins() {
        let candidates = vec![
            candidate(-26.1367, 28.2411, SourcePattern::StructuredTable),
            candidate(-26.13675, 28.24115, SourcePattern::DecimalStandard),
            candidate(-26.2000, 28.3000, SourcePattern::DecimalStandard),
        ];

        let unique = validate_and_dedup(candidates, 0.001);

        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].source_pattern, SourcePattern::StructuredTable);
        assert_eq!(unique[1].latitude, -26.2);
    }

    #[test]
    fn test_dedup_requires_both_axes_close() {
        let candidates = vec![
            candidate(-26.1367, 28.2411, SourcePattern::DecimalStandard),
            // Latitude close, longitude far: not a duplicate
            candidate(-26.1368, 28.9, SourcePattern::DecimalStandard),
        ];

        let unique = validate_and_dedup(candidates, 0.001);
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let candidates = vec![
            candidate(-26.1367, 28.2411, SourcePattern::DecimalStandard),
            candidate(-26.1368, 28.2412, SourcePattern::Labeled),
            candidate(-30.0, 25.0, SourcePattern::Dms),
        ];

        let once = validate_and_dedup(candidates, 0.001);
        let twice = validate_and_dedup(once.clone(), 0.001);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_invalid_candidates_never_claim_dedup_slots() {
        let candidates = vec![
            candidate(95.0, 28.2411, SourcePattern::DecimalStandard),
            candidate(-26.1367, 28.2411, SourcePattern::Labeled),
        ];

        let unique = validate_and_dedup(candidates, 0.001);

        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].source_pattern, SourcePattern::Labeled);
    }

    #[test]
    fn test_discovery_order_preserved() {
        let candidates = vec![
            candidate(-30.0, 25.0, SourcePattern::Dms),
            candidate(-26.0, 28.0, SourcePattern::DecimalStandard),
            candidate(-28.0, 26.0, SourcePattern::Labeled),
        ];

        let unique = validate_and_dedup(candidates, 0.001);
        let lats: Vec<f64> = unique.iter().map(|c| c.latitude).collect();
        assert_eq!(lats, vec![-30.0, -26.0, -28.0]);
    }
}
