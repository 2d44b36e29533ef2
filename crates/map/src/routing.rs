//! The routing overlay: at most one engine-drawn route on the map.
//!
//! A [`RoutingEngine`] is bound to the map when it is constructed and is
//! treated as a black box that draws a route between two waypoints. The
//! [`RouteOverlay`] state machine decides when to attach and detach it.
//! Every change of endpoints detaches the old route before a new one is
//! attached, so there is never a moment with two routes live.

use crate::error::RoutingError;
use crate::selection::RouteRequest;
use campus_nav_core::config::RoutingConfig;
use campus_nav_geo::haversine_distance_meters;
use campus_nav_telemetry::{metrics, names};
use serde::Serialize;
use std::collections::BTreeSet;

/// Opaque token for one attached route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RouteHandle(u64);

impl RouteHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Presentation options handed to the engine with every attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoutingOptions {
    pub route_while_dragging: bool,
    pub show_alternatives: bool,
    pub fit_selected_routes: bool,
    pub show_itinerary: bool,
}

impl Default for RoutingOptions {
    fn default() -> Self {
        Self::from(&RoutingConfig::default())
    }
}

impl From<&RoutingConfig> for RoutingOptions {
    fn from(config: &RoutingConfig) -> Self {
        Self {
            route_while_dragging: config.route_while_dragging,
            show_alternatives: config.show_alternatives,
            fit_selected_routes: config.fit_selected_routes,
            show_itinerary: config.show_itinerary,
        }
    }
}

/// An external routing engine already bound to the map.
///
/// `attach` draws a route and registers whatever listeners the engine needs;
/// `detach` must release all of them. Route geometry never comes back to the
/// caller.
pub trait RoutingEngine {
    fn attach(&mut self, request: RouteRequest, options: &RoutingOptions) -> RouteHandle;
    fn detach(&mut self, handle: RouteHandle);
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OverlayState {
    Absent,
    Active {
        request: RouteRequest,
        handle: RouteHandle,
    },
}

impl OverlayState {
    pub fn is_active(&self) -> bool {
        matches!(self, OverlayState::Active { .. })
    }

    pub fn request(&self) -> Option<RouteRequest> {
        match self {
            OverlayState::Active { request, .. } => Some(*request),
            OverlayState::Absent => None,
        }
    }
}

/// What a call to [`RouteOverlay::sync`] did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverlayTransition {
    Unchanged,
    Attached {
        request: RouteRequest,
        distance_m: f64,
    },
    Detached,
    Replaced {
        request: RouteRequest,
        distance_m: f64,
    },
}

/// Owns the single routing overlay on the map.
///
/// Dropping the overlay detaches any live route.
pub struct RouteOverlay<E: RoutingEngine> {
    engine: E,
    options: RoutingOptions,
    state: OverlayState,
}

impl<E: RoutingEngine> RouteOverlay<E> {
    pub fn new(engine: E, options: RoutingOptions) -> Self {
        Self {
            engine,
            options,
            state: OverlayState::Absent,
        }
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn options(&self) -> &RoutingOptions {
        &self.options
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Bring the overlay in line with the current route request.
    ///
    /// `None` means an endpoint is missing. The same endpoints as the live
    /// route leave it alone.
    pub fn sync(&mut self, request: Option<RouteRequest>) -> OverlayTransition {
        if self.state.request() == request {
            return OverlayTransition::Unchanged;
        }

        let had_route = self.detach_current();

        let Some(request) = request else {
            return if had_route {
                OverlayTransition::Detached
            } else {
                OverlayTransition::Unchanged
            };
        };

        let handle = self.engine.attach(request, &self.options);
        self.state = OverlayState::Active { request, handle };
        metrics().increment(names::ROUTE_ATTACHED);

        let distance_m = haversine_distance_meters(&request.start, &request.end);
        tracing::info!(
            handle = handle.id(),
            start = %request.start,
            end = %request.end,
            distance_m = format!("{distance_m:.0}"),
            "Route attached"
        );

        if had_route {
            OverlayTransition::Replaced { request, distance_m }
        } else {
            OverlayTransition::Attached { request, distance_m }
        }
    }

    /// Detach any live route. Safe to call repeatedly.
    pub fn teardown(&mut self) -> bool {
        self.detach_current()
    }

    /// Record a failure the engine reported for `handle`.
    ///
    /// Routing failures are not surfaced to the user. The overlay stays as it
    /// is; reports for a route that is no longer live are ignored.
    pub fn route_failed(&mut self, handle: RouteHandle, error: RoutingError) {
        match self.state {
            OverlayState::Active { handle: live, .. } if live == handle => {
                metrics().increment(names::ROUTE_FAILURES);
                tracing::warn!(handle = handle.id(), code = error.code() as u32, "{error}");
            }
            _ => {
                tracing::debug!(handle = handle.id(), "Ignoring failure for stale route");
            }
        }
    }

    fn detach_current(&mut self) -> bool {
        match std::mem::replace(&mut self.state, OverlayState::Absent) {
            OverlayState::Active { handle, .. } => {
                self.engine.detach(handle);
                metrics().increment(names::ROUTE_DETACHED);
                tracing::info!(handle = handle.id(), "Route detached");
                true
            }
            OverlayState::Absent => false,
        }
    }
}

impl<E: RoutingEngine> Drop for RouteOverlay<E> {
    fn drop(&mut self) {
        self.detach_current();
    }
}

impl<E: RoutingEngine + std::fmt::Debug> std::fmt::Debug for RouteOverlay<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteOverlay")
            .field("engine", &self.engine)
            .field("state", &self.state)
            .finish()
    }
}

/// One call made to a [`RecordingEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum EngineCall {
    Attach {
        handle: RouteHandle,
        request: RouteRequest,
    },
    Detach {
        handle: RouteHandle,
    },
}

/// A routing engine that draws nothing and remembers every call.
///
/// Used by the CLI and tests. Detaching an unknown handle is logged and
/// otherwise ignored.
#[derive(Debug, Default, Clone)]
pub struct RecordingEngine {
    next_id: u64,
    live: BTreeSet<RouteHandle>,
    calls: Vec<EngineCall>,
    max_live: usize,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles attached and not yet detached.
    pub fn live(&self) -> impl Iterator<Item = RouteHandle> + '_ {
        self.live.iter().copied()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Highest number of simultaneously live routes ever seen.
    pub fn max_live(&self) -> usize {
        self.max_live
    }

    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }
}

impl RoutingEngine for RecordingEngine {
    fn attach(&mut self, request: RouteRequest, _options: &RoutingOptions) -> RouteHandle {
        self.next_id += 1;
        let handle = RouteHandle::new(self.next_id);
        self.live.insert(handle);
        self.max_live = self.max_live.max(self.live.len());
        self.calls.push(EngineCall::Attach { handle, request });
        handle
    }

    fn detach(&mut self, handle: RouteHandle) {
        if !self.live.remove(&handle) {
            tracing::warn!(handle = handle.id(), "Detach of unknown route");
        }
        self.calls.push(EngineCall::Detach { handle });
    }
}

/// Lets a session borrow an engine owned elsewhere.
impl<E: RoutingEngine + ?Sized> RoutingEngine for &mut E {
    fn attach(&mut self, request: RouteRequest, options: &RoutingOptions) -> RouteHandle {
        (**self).attach(request, options)
    }

    fn detach(&mut self, handle: RouteHandle) {
        (**self).detach(handle)
    }
}
