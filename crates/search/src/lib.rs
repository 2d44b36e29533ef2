//! Location search for campus navigation.
//!
//! A query matches a location when its text is a case-insensitive substring
//! of the location's name or category. Results keep the data set's original
//! order; this is a filter, not a ranking.
//!
//! # Example
//!
//! ```
//! use campus_nav_geo::GeoDataStore;
//! use campus_nav_search::SearchIndex;
//!
//! let store = GeoDataStore::bundled().unwrap();
//! let index = SearchIndex::new(store.locations());
//!
//! assert_eq!(index.query("").len(), store.locations().len());
//! assert!(index.query("LIBRARY").iter().any(|loc| loc.name.contains("Library")));
//! ```

mod error;

pub use error::{Result, SearchError};

use campus_nav_geo::Location;

/// Above this many locations the scan is split across threads.
#[cfg(feature = "parallel")]
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Substring search over a borrowed location slice.
///
/// Nothing is precomputed; each query is one linear scan.
#[derive(Debug, Clone, Copy)]
pub struct SearchIndex<'a> {
    locations: &'a [Location],
}

impl<'a> SearchIndex<'a> {
    /// Creates an index over `locations`.
    pub fn new(locations: &'a [Location]) -> Self {
        Self { locations }
    }

    /// Number of searchable locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns true if there is nothing to search.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Locations whose name or category contains `text`, ignoring case.
    ///
    /// Blank text (empty or whitespace only) returns every location. Result
    /// count is not limited.
    pub fn query(&self, text: &str) -> Vec<&'a Location> {
        if text.trim().is_empty() {
            return self.locations.iter().collect();
        }

        let needle = text.to_lowercase();
        let results = self.scan(&needle);

        tracing::trace!(query = text, results = results.len(), "Search query evaluated");
        results
    }

    /// The location at `index` in the results for `text`.
    ///
    /// This is how a click on a result list row turns into a selection.
    pub fn select(&self, text: &str, index: usize) -> Result<&'a Location> {
        let results = self.query(text);
        let len = results.len();
        results
            .into_iter()
            .nth(index)
            .ok_or(SearchError::NoSuchResult { index, len })
    }

    #[cfg(feature = "parallel")]
    fn scan(&self, needle: &str) -> Vec<&'a Location> {
        if self.locations.len() >= PARALLEL_THRESHOLD {
            use rayon::prelude::*;
            return self
                .locations
                .par_iter()
                .filter(|loc| matches(loc, needle))
                .collect();
        }
        self.scan_sequential(needle)
    }

    #[cfg(not(feature = "parallel"))]
    fn scan(&self, needle: &str) -> Vec<&'a Location> {
        self.scan_sequential(needle)
    }

    fn scan_sequential(&self, needle: &str) -> Vec<&'a Location> {
        self.locations
            .iter()
            .filter(|loc| matches(loc, needle))
            .collect()
    }
}

/// Match predicate; `needle` must already be lowercase.
#[inline]
pub fn matches(location: &Location, needle: &str) -> bool {
    location.name.to_lowercase().contains(needle)
        || location.category.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_nav_geo::LocationId;
    use proptest::prelude::*;

    fn loc(id: u64, name: &str, category: &str) -> Location {
        Location {
            id: LocationId::Number(id),
            name: name.into(),
            category: category.into(),
            lat: 13.33,
            lng: 77.13,
        }
    }

    fn sample() -> Vec<Location> {
        vec![
            loc(1, "Library", "Academic"),
            loc(2, "Food Court", "Food"),
            loc(3, "CS Block", "Academic"),
            loc(4, "Boys Hostel", "Hostel"),
            loc(5, "Coffee Kiosk", "Food"),
        ]
    }

    #[test]
    fn test_library_scenario() {
        let locations = vec![loc(1, "Library", "Academic")];
        let index = SearchIndex::new(&locations);

        let hits = index.query("lib");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, LocationId::Number(1));
        assert!(index.query("xyz").is_empty());
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let locations = sample();
        let index = SearchIndex::new(&locations);

        let ids: Vec<_> = index.query("").iter().map(|l| l.id.clone()).collect();
        let expected: Vec<_> = locations.iter().map(|l| l.id.clone()).collect();
        assert_eq!(ids, expected);
        assert_eq!(index.query("   ").len(), locations.len());
    }

    #[test]
    fn test_matches_category() {
        let locations = sample();
        let index = SearchIndex::new(&locations);

        let names: Vec<_> = index.query("FOOD").iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Food Court", "Coffee Kiosk"]);
    }

    #[test]
    fn test_stable_order_not_ranked() {
        let locations = sample();
        let index = SearchIndex::new(&locations);

        // "Academic" matches by category before "CS Block" would by any ranking
        let names: Vec<_> = index.query("academic").iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Library", "CS Block"]);
    }

    #[test]
    fn test_select_by_result_index() {
        let locations = sample();
        let index = SearchIndex::new(&locations);

        assert_eq!(index.select("food", 1).unwrap().name, "Coffee Kiosk");
        let err = index.select("food", 2).unwrap_err();
        assert!(matches!(err, SearchError::NoSuchResult { index: 2, len: 2 }));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_scan_preserves_order() {
        let locations: Vec<Location> = (0..PARALLEL_THRESHOLD as u64 + 10)
            .map(|i| loc(i, &format!("Room {i}"), if i % 3 == 0 { "Lab" } else { "Office" }))
            .collect();
        let index = SearchIndex::new(&locations);

        let hits = index.query("lab");
        assert_eq!(hits.len(), locations.iter().filter(|l| l.category == "Lab").count());
        assert!(hits.windows(2).all(|w| w[0].id < w[1].id));
    }

    fn arb_location() -> impl Strategy<Value = (String, String)> {
        ("[a-zA-Z ]{0,12}", "[a-zA-Z]{0,8}")
    }

    proptest! {
        #[test]
        fn prop_results_are_exactly_the_matching_subset(
            records in prop::collection::vec(arb_location(), 0..20),
            query in "[a-zA-Z]{1,3}",
        ) {
            let locations: Vec<Location> = records
                .iter()
                .enumerate()
                .map(|(i, (name, category))| loc(i as u64, name, category))
                .collect();
            let index = SearchIndex::new(&locations);
            let hits = index.query(&query);
            let needle = query.to_lowercase();

            for hit in &hits {
                prop_assert!(matches(hit, &needle));
            }
            let expected: Vec<&Location> = locations.iter().filter(|l| matches(l, &needle)).collect();
            prop_assert_eq!(hits.len(), expected.len());
            for (hit, want) in hits.iter().zip(&expected) {
                prop_assert_eq!(&hit.id, &want.id);
            }
        }

        #[test]
        fn prop_results_are_subset_of_full_set(
            records in prop::collection::vec(arb_location(), 0..20),
            query in ".{0,4}",
        ) {
            let locations: Vec<Location> = records
                .iter()
                .enumerate()
                .map(|(i, (name, category))| loc(i as u64, name, category))
                .collect();
            let index = SearchIndex::new(&locations);

            let hits = index.query(&query);
            prop_assert!(hits.len() <= locations.len());
            prop_assert!(hits.iter().all(|h| locations.iter().any(|l| l.id == h.id)));
        }
    }
}
