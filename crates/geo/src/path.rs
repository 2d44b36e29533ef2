//! Walkway geometry parsed from a GeoJSON `FeatureCollection`.
//!
//! GeoJSON stores positions as `[lng, lat]`; everything past this module uses
//! `(lat, lng)`. Swapping the axes yields plausible but wrong geometry, so the
//! flip happens here and nowhere else.

use crate::{Coordinate, GeoError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An ordered polyline of campus walkway, in display order `(lat, lng)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPath {
    /// `properties.name` of the source feature, if any
    pub name: Option<String>,
    /// Vertices in `(lat, lng)` order
    pub points: Vec<Coordinate>,
}

impl GeoPath {
    /// Builds a path from GeoJSON-ordered `[lng, lat]` positions.
    pub fn from_lng_lat(name: Option<String>, positions: &[[f64; 2]]) -> Self {
        Self {
            name,
            points: positions.iter().copied().map(Coordinate::from_lng_lat).collect(),
        }
    }

    /// Positions back in GeoJSON `[lng, lat]` order.
    pub fn to_lng_lat(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(Coordinate::to_lng_lat).collect()
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the path has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    collection_type: String,
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Value>,
    geometry: Option<Geometry>,
}

#[derive(Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    geometry_type: String,
    #[serde(default)]
    coordinates: Value,
}

/// Parse every `LineString` feature of a GeoJSON `FeatureCollection`.
///
/// Features with other geometry types (or none) are skipped. A `LineString`
/// with fewer than two positions, or with a position that is not a pair of
/// valid numbers, is an error.
///
/// # Example
/// ```
/// use campus_nav_geo::{parse_feature_collection, Coordinate};
///
/// let json = r#"{"type": "FeatureCollection", "features": [
///     {"type": "Feature", "geometry": {"type": "LineString",
///      "coordinates": [[77.1229, 13.3255], [77.1258, 13.3272]]}}
/// ]}"#;
///
/// let paths = parse_feature_collection(json).unwrap();
/// assert_eq!(paths[0].points[0], Coordinate::new(13.3255, 77.1229));
/// ```
pub fn parse_feature_collection(json: &str) -> Result<Vec<GeoPath>> {
    let collection: FeatureCollection = serde_json::from_str(json)?;

    if collection.collection_type != "FeatureCollection" {
        return Err(GeoError::InvalidPath {
            index: 0,
            reason: format!("expected FeatureCollection, got {}", collection.collection_type),
        });
    }

    let mut paths = Vec::new();
    for (index, feature) in collection.features.iter().enumerate() {
        let Some(geometry) = &feature.geometry else {
            tracing::debug!(index, "Skipping feature without geometry");
            continue;
        };

        if geometry.geometry_type != "LineString" {
            tracing::debug!(index, geometry = %geometry.geometry_type, "Skipping non-LineString feature");
            continue;
        }

        let positions = parse_line_positions(index, &geometry.coordinates)?;
        let name = feature
            .properties
            .as_ref()
            .and_then(|p| p.get("name"))
            .and_then(Value::as_str)
            .map(String::from);

        paths.push(GeoPath::from_lng_lat(name, &positions));
    }

    Ok(paths)
}

fn parse_line_positions(index: usize, coordinates: &Value) -> Result<Vec<[f64; 2]>> {
    let invalid = |reason: String| GeoError::InvalidPath { index, reason };

    let array = coordinates
        .as_array()
        .ok_or_else(|| invalid("coordinates is not an array".into()))?;

    if array.len() < 2 {
        return Err(invalid(format!("expected at least 2 positions, got {}", array.len())));
    }

    array
        .iter()
        .enumerate()
        .map(|(i, position)| {
            let pair = position
                .as_array()
                .filter(|p| p.len() >= 2)
                .ok_or_else(|| invalid(format!("position {i} is not a [lng, lat] pair")))?;

            let lng = pair[0]
                .as_f64()
                .ok_or_else(|| invalid(format!("position {i} has a non-numeric longitude")))?;
            let lat = pair[1]
                .as_f64()
                .ok_or_else(|| invalid(format!("position {i} has a non-numeric latitude")))?;

            if !Coordinate::new(lat, lng).is_valid() {
                return Err(invalid(format!("position {i} is out of range: [{lng}, {lat}]")));
            }
            Ok([lng, lat])
        })
        .collect()
}
