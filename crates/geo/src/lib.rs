//! Static geographic data for campus navigation.
//!
//! This crate provides:
//! - The `Coordinate` type and the fixed `CampusBounds` rectangle
//! - `Location` records and `GeoPath` walkway polylines
//! - GeoJSON ingestion with `(lng, lat)` to `(lat, lng)` conversion
//! - `GeoDataStore`, the validated read-only data set bundled with the build
//! - Haversine distance for route hints
//!
//! # Example
//!
//! ```
//! use campus_nav_geo::{GeoDataStore, CAMPUS_BOUNDS};
//!
//! let store = GeoDataStore::bundled().unwrap();
//! assert!(!store.locations().is_empty());
//! assert!(store.locations().iter().all(|loc| CAMPUS_BOUNDS.contains(&loc.coordinate())));
//! ```

mod bounds;
mod error;
mod haversine;
mod location;
mod path;
mod store;

pub use bounds::{CampusBounds, CAMPUS_BOUNDS};
pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{haversine_distance_meters, EARTH_RADIUS_M};
pub use location::{Location, LocationId};
pub use path::{parse_feature_collection, GeoPath};
pub use store::{GeoDataStore, LOCATIONS_FILE, PATHS_FILE};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Builds a coordinate from a GeoJSON-style `[lng, lat]` position.
    #[inline]
    pub fn from_lng_lat([lng, lat]: [f64; 2]) -> Self {
        Self::new(lat, lng)
    }

    /// Returns the GeoJSON-style `[lng, lat]` position.
    #[inline]
    pub fn to_lng_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Returns true if the coordinate is finite and within WGS84 ranges.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(&self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = GeoError;

    /// Parses `"lat,lng"`.
    fn from_str(s: &str) -> Result<Self> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| GeoError::InvalidCoordinate(format!("expected 'lat,lng', got '{s}'")))?;

        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| GeoError::InvalidCoordinate(format!("invalid latitude: {}", lat.trim())))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| GeoError::InvalidCoordinate(format!("invalid longitude: {}", lng.trim())))?;

        let coord = Self::new(lat, lng);
        if !coord.is_valid() {
            return Err(GeoError::InvalidCoordinate(format!("out of range: {coord}")));
        }
        Ok(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_creation() {
        let coord = Coordinate::new(13.3269, 77.1261);
        assert_eq!(coord.latitude, 13.3269);
        assert_eq!(coord.longitude, 77.1261);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_lng_lat_order() {
        let coord = Coordinate::from_lng_lat([77.1261, 13.3269]);
        assert_eq!(coord.latitude, 13.3269);
        assert_eq!(coord.to_lng_lat(), [77.1261, 13.3269]);
    }

    #[test]
    fn test_parse_from_str() {
        let coord: Coordinate = "13.30, 77.12".parse().unwrap();
        assert_eq!(coord, Coordinate::new(13.30, 77.12));

        assert!("13.30".parse::<Coordinate>().is_err());
        assert!("abc,77.1".parse::<Coordinate>().is_err());
        assert!("95.0,77.1".parse::<Coordinate>().is_err());
    }
}
