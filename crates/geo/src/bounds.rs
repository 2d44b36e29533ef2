//! The fixed campus rectangle the map may not leave.

use crate::Coordinate;
use serde::{Deserialize, Serialize};

/// South-west / north-east rectangle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CampusBounds {
    /// Minimum latitude and longitude corner
    pub south_west: Coordinate,
    /// Maximum latitude and longitude corner
    pub north_east: Coordinate,
}

/// SIT Tumkur campus.
pub const CAMPUS_BOUNDS: CampusBounds = CampusBounds {
    south_west: Coordinate::new(13.3210, 77.1200),
    north_east: Coordinate::new(13.3350, 77.1350),
};

impl CampusBounds {
    /// Returns true if `coord` lies inside or on the edge of the rectangle.
    #[inline]
    pub fn contains(&self, coord: &Coordinate) -> bool {
        coord.latitude >= self.south_west.latitude
            && coord.latitude <= self.north_east.latitude
            && coord.longitude >= self.south_west.longitude
            && coord.longitude <= self.north_east.longitude
    }

    /// Nearest point inside the rectangle.
    #[inline]
    pub fn clamp(&self, coord: Coordinate) -> Coordinate {
        Coordinate::new(
            coord
                .latitude
                .clamp(self.south_west.latitude, self.north_east.latitude),
            coord
                .longitude
                .clamp(self.south_west.longitude, self.north_east.longitude),
        )
    }

    /// Pulls an out-of-bounds coordinate back toward the edge.
    ///
    /// The overshoot past each edge is scaled by `1 - viscosity`: a viscosity
    /// of 1.0 stops exactly at the edge, 0.0 leaves the coordinate alone.
    pub fn limit_viscous(&self, coord: Coordinate, viscosity: f64) -> Coordinate {
        let viscosity = viscosity.clamp(0.0, 1.0);
        Coordinate::new(
            viscous_axis(
                coord.latitude,
                self.south_west.latitude,
                self.north_east.latitude,
                viscosity,
            ),
            viscous_axis(
                coord.longitude,
                self.south_west.longitude,
                self.north_east.longitude,
                viscosity,
            ),
        )
    }

    /// Midpoint of the rectangle.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.south_west.latitude + self.north_east.latitude) / 2.0,
            (self.south_west.longitude + self.north_east.longitude) / 2.0,
        )
    }
}

fn viscous_axis(value: f64, min: f64, max: f64, viscosity: f64) -> f64 {
    if value < min {
        min + (value - min) * (1.0 - viscosity)
    } else if value > max {
        max + (value - max) * (1.0 - viscosity)
    } else {
        value
    }
}
