//! Great-circle distance between coordinates.
//!
//! Every distance in the workspace (place ranking, weather coordinate
//! mismatch, movement detection) goes through [`distance_meters`] so all
//! call sites share one Earth-radius constant.

use crate::coordinate::Coordinate;

/// Mean Earth radius in meters, as used by the haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine great-circle distance between `a` and `b`, in meters.
///
/// Pure and deterministic. Non-finite inputs propagate as NaN.
#[must_use]
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let sin_d_lat = (d_lat / 2.0).sin();
    let sin_d_lon = (d_lon / 2.0).sin();

    let h = sin_d_lat * sin_d_lat + lat1.cos() * lat2.cos() * sin_d_lon * sin_d_lon;

    2.0 * EARTH_RADIUS_METERS * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Whether `new` lies more than `threshold_meters` from `old`.
///
/// Host applications use this to decide when a location change is large
/// enough to warrant re-querying places or weather.
#[must_use]
pub fn has_moved(old: Coordinate, new: Coordinate, threshold_meters: f64) -> bool {
    distance_meters(old, new) > threshold_meters
}
