//! What the user is navigating to, and from where.

use campus_nav_geo::{Coordinate, Location};
use serde::Serialize;

/// One mutation of the selection state.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionUpdate {
    /// The user picked a search result
    Destination(Location),
    /// A geolocation request succeeded
    UserPosition(Coordinate),
}

impl SelectionUpdate {
    /// Where the camera should go for this update.
    pub fn focus(&self) -> Coordinate {
        match self {
            SelectionUpdate::Destination(location) => location.coordinate(),
            SelectionUpdate::UserPosition(coord) => *coord,
        }
    }
}

/// A route between the user and the destination.
///
/// Derived from the selection, never stored; identity is the endpoint pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteRequest {
    pub start: Coordinate,
    pub end: Coordinate,
}

/// Current destination and user position.
///
/// Both start empty. Each setter replaces its field wholesale and leaves the
/// other alone; there is no way to clear either once set.
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    destination: Option<Location>,
    user_position: Option<Coordinate>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destination(&self) -> Option<&Location> {
        self.destination.as_ref()
    }

    pub fn user_position(&self) -> Option<Coordinate> {
        self.user_position
    }

    pub fn select_destination(&mut self, location: Location) {
        self.destination = Some(location);
    }

    pub fn set_user_position(&mut self, coord: Coordinate) {
        self.user_position = Some(coord);
    }

    /// Apply one update.
    pub fn apply(&mut self, update: SelectionUpdate) {
        match update {
            SelectionUpdate::Destination(location) => self.select_destination(location),
            SelectionUpdate::UserPosition(coord) => self.set_user_position(coord),
        }
    }

    /// The route to draw, present only when both endpoints are known.
    pub fn route_request(&self) -> Option<RouteRequest> {
        match (self.user_position, &self.destination) {
            (Some(start), Some(destination)) => Some(RouteRequest {
                start,
                end: destination.coordinate(),
            }),
            _ => None,
        }
    }

    /// Returns true if a route can be requested right now.
    pub fn is_route_requestable(&self) -> bool {
        self.user_position.is_some() && self.destination.is_some()
    }
}
