//! Haversine distance calculation.
//!
//! Used for the straight-line distance hint shown alongside a route; campus
//! distances are small enough that the spherical model is plenty.

use crate::Coordinate;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates in meters.
///
/// # Example
/// ```
/// use campus_nav_geo::{haversine_distance_meters, Coordinate};
///
/// let gate = Coordinate::new(13.3255, 77.1229);
/// let library = Coordinate::new(13.3281, 77.1266);
///
/// let meters = haversine_distance_meters(&gate, &library);
/// assert!(meters > 400.0 && meters < 600.0);
/// ```
#[inline]
pub fn haversine_distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}
