//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A result index handed back by the UI does not exist
    #[error("No result at index {index} (query returned {len} results)")]
    NoSuchResult {
        /// Requested index
        index: usize,
        /// Number of results available
        len: usize,
    },
}
