//! Distance helpers for deduplication and track reporting

use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

use crate::models::GpsRecord;

/// Meters per degree of latitude, and of longitude at the equator
const METERS_PER_DEGREE: f64 = 111_000.0;

/// Planar approximation of the distance in meters between two points.
///
/// This is the deduplication metric: degree deltas scaled to meters, with
/// the longitude axis shrunk by the cosine of the second point's latitude.
/// Good enough below ~1km; not a great-circle distance.
pub fn planar_distance_m(lat_a: f64, lng_a: f64, lat_b: f64, lng_b: f64) -> f64 {
    let dlat = (lat_a - lat_b) * METERS_PER_DEGREE;
    let dlng = (lng_a - lng_b) * METERS_PER_DEGREE * (lat_b.to_radians()).cos();
    (dlat * dlat + dlng * dlng).sqrt()
}

/// Great-circle distance in meters between two points
pub fn haversine_distance_m(lat_a: f64, lng_a: f64, lat_b: f64, lng_b: f64) -> f64 {
    let a = Point::new(lng_a, lat_a);
    let b = Point::new(lng_b, lat_b);
    Haversine.distance(a, b)
}

/// Total great-circle length in meters along a sequence of records
pub fn track_length_m(records: &[GpsRecord]) -> f64 {
    records
        .windows(2)
        .map(|pair| haversine_distance_m(pair[0].lat, pair[0].lng, pair[1].lat, pair[1].lng))
        .sum()
}

/// Axis-aligned bounding box over a set of records
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

/// Compute the bounding box of a record set, `None` when empty
pub fn bounding_box(records: &[GpsRecord]) -> Option<BoundingBox> {
    let first = records.first()?;
    let mut bounds = BoundingBox {
        min_lat: first.lat,
        min_lng: first.lng,
        max_lat: first.lat,
        max_lng: first.lng,
    };

    for record in &records[1..] {
        bounds.min_lat = bounds.min_lat.min(record.lat);
        bounds.min_lng = bounds.min_lng.min(record.lng);
        bounds.max_lat = bounds.max_lat.max(record.lat);
        bounds.max_lng = bounds.max_lng.max(record.lng);
    }

    Some(bounds)
}
