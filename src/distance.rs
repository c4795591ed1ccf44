//! Great-circle distance.

use crate::config::EARTH_RADIUS_METRES;

/// Haversine distance in metres between two `(lat, lng)` points in degrees.
///
/// Uses the WGS-84 equatorial radius (6 378 137 m). The result is always
/// non-negative.
pub(crate) fn haversine_metres(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lng1 = lng1.to_radians();
    let lat2 = lat2.to_radians();
    let lng2 = lng2.to_radians();

    let a = ((lat1 - lat2) / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * ((lng1 - lng2) / 2.0).sin().powi(2);

    2.0 * a.sqrt().asin() * EARTH_RADIUS_METRES
}
