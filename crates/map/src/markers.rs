//! Point markers shown over the map.

use campus_nav_geo::{Coordinate, Location};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    User,
    Destination,
}

/// A marker with its popup text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: Coordinate,
    pub title: String,
    pub subtitle: String,
}

impl Marker {
    pub fn user(position: Coordinate) -> Self {
        Self {
            kind: MarkerKind::User,
            position,
            title: "Your Location".to_string(),
            subtitle: "Current Position".to_string(),
        }
    }

    pub fn destination(location: &Location) -> Self {
        Self {
            kind: MarkerKind::Destination,
            position: location.coordinate(),
            title: location.name.clone(),
            subtitle: location.category.clone(),
        }
    }
}
