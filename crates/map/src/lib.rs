//! Map and navigation state for the campus map.
//!
//! This crate provides:
//! - `SelectionModel`: the chosen destination and the user's position
//! - `ViewportController`: bounded camera with interruptible fly-to transitions
//! - `RouteOverlay`: attach/detach lifecycle for an external routing engine
//! - `GeolocationBridge`: single-shot position requests with error classification
//! - `StaticPathOverlay`, `TileLayer` and `Marker` for what gets drawn
//! - `NavigationSession`: wires the pieces together and publishes `NavEvent`s
//!
//! # Example
//!
//! ```
//! use campus_nav_core::config::ConfigSchema;
//! use campus_nav_geo::{Coordinate, GeoDataStore};
//! use campus_nav_map::{NavigationSession, RecordingEngine};
//!
//! let data = GeoDataStore::bundled().unwrap();
//! let mut session = NavigationSession::new(data, RecordingEngine::new(), &ConfigSchema::default());
//!
//! let library = session.search("library")[0].clone();
//! session.set_user_position(Coordinate::new(13.3255, 77.1229));
//! session.select_destination(library);
//! assert!(session.route_state().is_active());
//! ```

pub mod error;
pub mod events;
pub mod geolocation;
pub mod layers;
pub mod markers;
pub mod overlay;
pub mod routing;
pub mod selection;
pub mod session;
pub mod viewport;

pub use error::{GeolocationError, MapErrorCode, RoutingError};
pub use events::{EventBus, NavEvent};
pub use geolocation::{GeolocationBridge, LocationProvider, PositionOptions, ProviderError, SimulatedProvider};
pub use layers::TileLayer;
pub use markers::{Marker, MarkerKind};
pub use overlay::{PathStyle, Polyline, StaticPathOverlay};
pub use routing::{
    EngineCall, OverlayState, OverlayTransition, RecordingEngine, RouteHandle, RouteOverlay, RoutingEngine,
    RoutingOptions,
};
pub use selection::{RouteRequest, SelectionModel, SelectionUpdate};
pub use session::NavigationSession;
pub use viewport::{ease_out, Camera, ViewportController, ViewportIntent, ViewportSettings, ViewportState};
