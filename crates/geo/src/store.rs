//! The read-only data set: named locations and walkway paths.

use crate::{parse_feature_collection, GeoError, GeoPath, Location, Result, CAMPUS_BOUNDS};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

const BUNDLED_LOCATIONS: &str = include_str!("../data/locations.json");
const BUNDLED_PATHS: &str = include_str!("../data/campus-paths.json");

/// File names looked up by [`GeoDataStore::from_dir`].
pub const LOCATIONS_FILE: &str = "locations.json";
/// See [`LOCATIONS_FILE`].
pub const PATHS_FILE: &str = "campus-paths.json";

/// Validated, immutable locations and paths.
///
/// Cloning is cheap; clones share the same data.
#[derive(Debug, Clone)]
pub struct GeoDataStore {
    locations: Arc<[Location]>,
    paths: Arc<[GeoPath]>,
}

impl GeoDataStore {
    /// Load the data compiled into the build.
    ///
    /// An error here means the shipped data is broken; callers should treat
    /// it as fatal.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_LOCATIONS, BUNDLED_PATHS)
    }

    /// Load from a locations JSON array and a GeoJSON `FeatureCollection`.
    pub fn from_json(locations_json: &str, paths_json: &str) -> Result<Self> {
        let locations: Vec<Location> = serde_json::from_str(locations_json)?;

        let mut seen = HashSet::with_capacity(locations.len());
        for location in &locations {
            location.validate(&CAMPUS_BOUNDS)?;
            if !seen.insert(&location.id) {
                return Err(GeoError::DuplicateLocation(location.id.to_string()));
            }
        }

        let paths = parse_feature_collection(paths_json)?;

        tracing::info!(
            locations = locations.len(),
            paths = paths.len(),
            "Loaded campus geographic data"
        );

        Ok(Self {
            locations: locations.into(),
            paths: paths.into(),
        })
    }

    /// Load `locations.json` and `campus-paths.json` from a directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|source| GeoError::Io {
                path: path.display().to_string(),
                source,
            })
        };

        Self::from_json(&read(LOCATIONS_FILE)?, &read(PATHS_FILE)?)
    }

    /// All locations in their original order.
    #[inline]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// All walkway paths in their original order.
    #[inline]
    pub fn paths(&self) -> &[GeoPath] {
        &self.paths
    }

    /// Find a location by id.
    pub fn location(&self, id: &crate::LocationId) -> Option<&Location> {
        self.locations.iter().find(|loc| &loc.id == id)
    }

    /// Find a location by exact name, ignoring case.
    pub fn location_by_name(&self, name: &str) -> Option<&Location> {
        self.locations
            .iter()
            .find(|loc| loc.name.eq_ignore_ascii_case(name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocationId;
    use tempfile::TempDir;

    const EMPTY_PATHS: &str = r#"{"type": "FeatureCollection", "features": []}"#;

    #[test]
    fn test_bundled_data_loads() {
        let store = GeoDataStore::bundled().unwrap();
        assert!(store.locations().len() >= 10);
        assert!(!store.paths().is_empty());
        assert!(store.paths().iter().all(|p| p.len() >= 2));
    }

    #[test]
    fn test_bundled_paths_are_lat_lng() {
        let store = GeoDataStore::bundled().unwrap();
        // Campus latitudes are ~13.3 and longitudes ~77.1; a swapped axis would show here
        for path in store.paths() {
            for point in &path.points {
                assert!(point.latitude < 20.0, "{point}");
                assert!(point.longitude > 70.0, "{point}");
            }
        }
    }

    #[test]
    fn test_original_order_preserved() {
        let json = r#"[
            {"id": 2, "name": "B", "category": "x", "lat": 13.33, "lng": 77.13},
            {"id": 1, "name": "A", "category": "x", "lat": 13.33, "lng": 77.13}
        ]"#;
        let store = GeoDataStore::from_json(json, EMPTY_PATHS).unwrap();
        let names: Vec<_> = store.locations().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn test_duplicate_id_is_fatal() {
        let json = r#"[
            {"id": 1, "name": "A", "category": "x", "lat": 13.33, "lng": 77.13},
            {"id": 1, "name": "B", "category": "x", "lat": 13.33, "lng": 77.13}
        ]"#;
        let err = GeoDataStore::from_json(json, EMPTY_PATHS).unwrap_err();
        assert!(matches!(err, GeoError::DuplicateLocation(_)));
    }

    #[test]
    fn test_numeric_string_and_number_ids_collide() {
        let json = r#"[
            {"id": 7, "name": "A", "category": "x", "lat": 13.33, "lng": 77.13},
            {"id": "7", "name": "B", "category": "x", "lat": 13.33, "lng": 77.13}
        ]"#;
        let err = GeoDataStore::from_json(json, EMPTY_PATHS).unwrap_err();
        assert!(matches!(err, GeoError::DuplicateLocation(id) if id == "7"));
    }

    #[test]
    fn test_string_id_found_by_numeric_lookup() {
        let json = r#"[{"id": "7", "name": "Gate", "category": "Entrance", "lat": 13.33, "lng": 77.13}]"#;
        let store = GeoDataStore::from_json(json, EMPTY_PATHS).unwrap();
        assert_eq!(store.location(&LocationId::from("7")).map(|l| l.name.as_str()), Some("Gate"));
        assert!(store.location(&LocationId::Number(7)).is_some());
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let err = GeoDataStore::from_json("[{\"id\": 1}]", EMPTY_PATHS).unwrap_err();
        assert!(matches!(err, GeoError::JsonError(_)));
    }

    #[test]
    fn test_lookup_by_id_and_name() {
        let store = GeoDataStore::bundled().unwrap();
        let first = &store.locations()[0];

        assert_eq!(store.location(&first.id), Some(first));
        assert_eq!(store.location_by_name(&first.name.to_uppercase()), Some(first));
        assert!(store.location(&LocationId::Text("nowhere".into())).is_none());
    }

    #[test]
    fn test_from_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(LOCATIONS_FILE),
            r#"[{"id": "gate", "name": "Gate", "category": "Entrance", "lat": 13.3255, "lng": 77.1229}]"#,
        )
        .unwrap();
        std::fs::write(dir.path().join(PATHS_FILE), EMPTY_PATHS).unwrap();

        let store = GeoDataStore::from_dir(dir.path()).unwrap();
        assert_eq!(store.locations().len(), 1);
        assert!(store.paths().is_empty());
    }

    #[test]
    fn test_from_dir_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = GeoDataStore::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, GeoError::Io { .. }));
    }
}
