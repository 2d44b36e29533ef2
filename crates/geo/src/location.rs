//! Named point locations (buildings, gates, facilities).

use crate::{CampusBounds, Coordinate, GeoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Location identifier as it appears in the data feed: a number or a string.
///
/// Numeric strings are read as `Number`, so `"7"` and `7` are the same id
/// both in the data and on lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged, from = "RawLocationId")]
pub enum LocationId {
    /// Numeric id
    Number(u64),
    /// Textual id
    Text(String),
}

/// Wire shape of an id before numeric strings are folded into `Number`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLocationId {
    Number(u64),
    Text(String),
}

impl From<RawLocationId> for LocationId {
    fn from(raw: RawLocationId) -> Self {
        match raw {
            RawLocationId::Number(n) => LocationId::Number(n),
            RawLocationId::Text(s) => LocationId::from(s.as_str()),
        }
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationId::Number(n) => write!(f, "{n}"),
            LocationId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for LocationId {
    fn from(id: u64) -> Self {
        LocationId::Number(id)
    }
}

impl From<&str> for LocationId {
    /// Numeric strings become `Number`.
    fn from(id: &str) -> Self {
        id.parse::<u64>()
            .map(LocationId::Number)
            .unwrap_or_else(|_| LocationId::Text(id.to_string()))
    }
}

/// A named place on campus. Identity is `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub category: String,
    pub lat: f64,
    pub lng: f64,
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Location {}

impl Location {
    /// Position of the location.
    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    /// Checks the record once at ingestion so use sites never have to.
    pub(crate) fn validate(&self, bounds: &CampusBounds) -> Result<()> {
        let invalid = |reason: &str| GeoError::InvalidLocation {
            id: self.id.to_string(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if !self.coordinate().is_valid() {
            return Err(invalid("coordinate is not a valid latitude/longitude"));
        }
        if !bounds.contains(&self.coordinate()) {
            return Err(invalid("coordinate lies outside the campus bounds"));
        }
        Ok(())
    }
}
