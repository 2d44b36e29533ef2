//! Terminal helpers for the campus navigation tools
//!
//! Provides shared CLI functionality:
//! - Status messages and error reports
//! - Distance, duration and count formatting
//! - Spinners for waits on the location provider

#![warn(missing_docs)]

pub mod output;
pub mod progress;
