//! Core utilities for campus navigation
//!
//! This crate provides functionality shared by the navigation crates and the CLI:
//!
//! - **Error handling**: structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//! - **Storage**: an injectable key-value store for session data
//!
//! # Example
//!
//! ```rust,no_run
//! use campus_nav_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("initial zoom: {}", config.schema.map.zoom);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod store;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema, MapLayer};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::store::{FileStore, KeyValueStore, MemoryStore};
}
