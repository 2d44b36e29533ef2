//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors raised while ingesting static geographic data.
///
/// All of these are fatal at startup: the data ships with the build.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Invalid coordinate values
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// A location record failed validation
    #[error("Invalid location {id}: {reason}")]
    InvalidLocation {
        /// Identifier of the offending record
        id: String,
        /// What was wrong with it
        reason: String,
    },

    /// Two location records share an id
    #[error("Duplicate location id: {0}")]
    DuplicateLocation(String),

    /// A path geometry failed validation
    #[error("Invalid path geometry (feature #{index}): {reason}")]
    InvalidPath {
        /// Position of the feature in the collection
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Data file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Error code for integration with campus-nav-core error reporting.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid coordinate values
    InvalidCoordinate = 10001,
    /// Invalid location record
    InvalidLocation = 10002,
    /// Duplicate location id
    DuplicateLocation = 10003,
    /// Invalid path geometry
    InvalidPath = 10004,
    /// IO failure
    Io = 10005,
    /// JSON parsing error
    JsonParsing = 10006,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::InvalidLocation { .. } => GeoErrorCode::InvalidLocation,
            GeoError::DuplicateLocation(_) => GeoErrorCode::DuplicateLocation,
            GeoError::InvalidPath { .. } => GeoErrorCode::InvalidPath,
            GeoError::Io { .. } => GeoErrorCode::Io,
            GeoError::JsonError(_) => GeoErrorCode::JsonParsing,
        }
    }
}
