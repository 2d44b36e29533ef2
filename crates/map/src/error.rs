//! Error types for the map crate.

use serde::Serialize;
use thiserror::Error;

/// Raw status codes reported by a location provider.
///
/// These follow the W3C Geolocation API numbering.
pub mod provider_codes {
    pub const PERMISSION_DENIED: u16 = 1;
    pub const POSITION_UNAVAILABLE: u16 = 2;
    pub const TIMEOUT: u16 = 3;
}

/// Why a position request failed.
///
/// The `Display` text is the fixed message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeolocationError {
    /// The user or platform refused location access
    #[error("Location permission denied. Please enable location access in your device settings.")]
    PermissionDenied,

    /// The provider could not determine a position
    #[error("Location information is unavailable.")]
    PositionUnavailable,

    /// No fix arrived within the request timeout
    #[error("Location request timed out.")]
    Timeout,

    /// No location capability, or an unrecognized provider failure
    #[error("Unable to retrieve your location.")]
    Unavailable,
}

impl GeolocationError {
    /// Map a provider status code onto the error taxonomy.
    pub fn from_provider_code(code: u16) -> Self {
        match code {
            provider_codes::PERMISSION_DENIED => GeolocationError::PermissionDenied,
            provider_codes::POSITION_UNAVAILABLE => GeolocationError::PositionUnavailable,
            provider_codes::TIMEOUT => GeolocationError::Timeout,
            _ => GeolocationError::Unavailable,
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> MapErrorCode {
        match self {
            GeolocationError::PermissionDenied => MapErrorCode::PermissionDenied,
            GeolocationError::PositionUnavailable => MapErrorCode::PositionUnavailable,
            GeolocationError::Timeout => MapErrorCode::Timeout,
            GeolocationError::Unavailable => MapErrorCode::GeolocationUnavailable,
        }
    }
}

/// Failure reported by a routing engine for an attached overlay.
///
/// These never reach the user; the overlay logs and drops them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// No route exists between the waypoints
    #[error("No route found between waypoints: {0}")]
    NoRoute(String),

    /// The routing backend could not be reached or answered badly
    #[error("Routing service error: {0}")]
    Service(String),
}

impl RoutingError {
    /// Returns the error code for this error.
    pub fn code(&self) -> MapErrorCode {
        match self {
            RoutingError::NoRoute(_) => MapErrorCode::NoRoute,
            RoutingError::Service(_) => MapErrorCode::RoutingService,
        }
    }
}

/// Error codes for the map crate.
/// Range: 12xxx geolocation, 13xxx routing.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapErrorCode {
    PermissionDenied = 12001,
    PositionUnavailable = 12002,
    Timeout = 12003,
    GeolocationUnavailable = 12004,
    NoRoute = 13001,
    RoutingService = 13002,
}
