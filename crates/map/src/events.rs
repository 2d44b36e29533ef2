//! Notifications for the surrounding UI.

use crate::error::GeolocationError;
use campus_nav_core::config::MapLayer;
use campus_nav_geo::{Coordinate, Location};
use serde::Serialize;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavEvent {
    /// Data is loaded and the static overlay is drawn
    MapReady { locations: usize, paths: usize },
    DestinationSelected { location: Location },
    UserPositionChanged { position: Coordinate },
    GeolocationFailed {
        kind: GeolocationError,
        message: String,
    },
    RouteAttached {
        start: Coordinate,
        end: Coordinate,
        distance_m: f64,
    },
    RouteDetached,
    LayerChanged { layer: MapLayer },
}

impl NavEvent {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            NavEvent::MapReady { .. } => "map_ready",
            NavEvent::DestinationSelected { .. } => "destination_selected",
            NavEvent::UserPositionChanged { .. } => "user_position_changed",
            NavEvent::GeolocationFailed { .. } => "geolocation_failed",
            NavEvent::RouteAttached { .. } => "route_attached",
            NavEvent::RouteDetached => "route_detached",
            NavEvent::LayerChanged { .. } => "layer_changed",
        }
    }
}

/// Fan-out of [`NavEvent`]s. Slow subscribers may miss events.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<NavEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NavEvent> {
        self.sender.subscribe()
    }

    /// Send to current subscribers; having none is fine.
    pub fn emit(&self, event: NavEvent) {
        tracing::trace!(event = event.name(), "Emitting");
        let _ = self.sender.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
