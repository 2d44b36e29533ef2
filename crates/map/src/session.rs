//! The navigation session: one map, its selection, and everything that
//! reacts to it.
//!
//! Every selection change runs the same turn: update the selection, emit
//! notifications, issue one viewport intent for the latest write, then bring
//! the route overlay in line. Nothing else writes to the viewport or the
//! overlay.

use crate::error::{GeolocationError, RoutingError};
use crate::events::{EventBus, NavEvent};
use crate::geolocation::{GeolocationBridge, LocationProvider};
use crate::layers::TileLayer;
use crate::markers::Marker;
use crate::overlay::{PathStyle, StaticPathOverlay};
use crate::routing::{OverlayState, OverlayTransition, RouteHandle, RouteOverlay, RoutingEngine, RoutingOptions};
use crate::selection::{SelectionModel, SelectionUpdate};
use crate::viewport::{Camera, ViewportController, ViewportIntent, ViewportSettings};
use campus_nav_core::config::{ConfigSchema, MapLayer};
use campus_nav_geo::{Coordinate, GeoDataStore, Location};
use campus_nav_search::SearchIndex;
use campus_nav_telemetry::{metrics, names};
use std::time::Duration;
use tokio::sync::broadcast;

pub struct NavigationSession<E: RoutingEngine> {
    data: GeoDataStore,
    selection: SelectionModel,
    viewport: ViewportController,
    route: RouteOverlay<E>,
    static_paths: StaticPathOverlay,
    layer: MapLayer,
    focus_zoom: u8,
    seq: u64,
    located: bool,
    ready: bool,
    events: EventBus,
}

impl<E: RoutingEngine> NavigationSession<E> {
    /// Build a session over loaded data with `engine` bound to the map.
    pub fn new(data: GeoDataStore, engine: E, config: &ConfigSchema) -> Self {
        let static_paths = StaticPathOverlay::render(data.paths(), &PathStyle::from(&config.paths));
        Self {
            selection: SelectionModel::new(),
            viewport: ViewportController::new(ViewportSettings::from_config(config)),
            route: RouteOverlay::new(engine, RoutingOptions::from(&config.routing)),
            static_paths,
            layer: config.map.layer,
            focus_zoom: config.map.focus_zoom,
            seq: 0,
            located: false,
            ready: false,
            events: EventBus::new(),
            data,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NavEvent> {
        self.events.subscribe()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Announce that the map is ready. Only the first call emits.
    pub fn ready(&mut self) {
        if self.ready {
            return;
        }
        self.ready = true;
        tracing::info!(
            locations = self.data.locations().len(),
            paths = self.static_paths.len(),
            layer = %self.layer,
            "Map ready"
        );
        self.events.emit(NavEvent::MapReady {
            locations: self.data.locations().len(),
            paths: self.static_paths.len(),
        });
    }

    /// Locations matching `text`, in data order.
    pub fn search(&self, text: &str) -> Vec<&Location> {
        metrics().increment(names::SEARCH_QUERIES);
        SearchIndex::new(self.data.locations()).query(text)
    }

    pub fn select_destination(&mut self, location: Location) -> OverlayTransition {
        self.apply([SelectionUpdate::Destination(location)])
    }

    pub fn set_user_position(&mut self, position: Coordinate) -> OverlayTransition {
        self.apply([SelectionUpdate::UserPosition(position)])
    }

    /// Apply several updates as one turn.
    ///
    /// The camera flies to whichever update came last; the route overlay is
    /// synced once, after all of them.
    pub fn apply(&mut self, updates: impl IntoIterator<Item = SelectionUpdate>) -> OverlayTransition {
        let mut focus = None;

        for update in updates {
            focus = Some(update.focus());
            match &update {
                SelectionUpdate::Destination(location) => {
                    tracing::debug!(id = %location.id, name = %location.name, "Destination selected");
                    self.events.emit(NavEvent::DestinationSelected {
                        location: location.clone(),
                    });
                }
                SelectionUpdate::UserPosition(position) => {
                    tracing::debug!(position = %position, "User position updated");
                    self.events.emit(NavEvent::UserPositionChanged { position: *position });
                }
            }
            self.selection.apply(update);
        }

        if let Some(center) = focus {
            self.seq += 1;
            self.viewport.fly_to(ViewportIntent {
                center,
                zoom: Some(self.focus_zoom),
                seq: self.seq,
            });
        }

        self.sync_route()
    }

    /// Ask `bridge` for a fix and, on success, make it the user position.
    ///
    /// On failure the selection is left alone and a `GeolocationFailed`
    /// event carries the user-facing message.
    pub async fn locate_user<P: LocationProvider>(
        &mut self,
        bridge: &GeolocationBridge<P>,
    ) -> Result<Coordinate, GeolocationError> {
        match bridge.request_position().await {
            Ok(position) => {
                self.located = true;
                self.set_user_position(position);
                Ok(position)
            }
            Err(kind) => {
                self.events.emit(NavEvent::GeolocationFailed {
                    kind,
                    message: kind.to_string(),
                });
                Err(kind)
            }
        }
    }

    /// Record an engine-reported failure for a live or stale route.
    pub fn report_route_failure(&mut self, handle: RouteHandle, error: RoutingError) {
        self.route.route_failed(handle, error);
    }

    /// Tick the camera transition.
    pub fn advance(&mut self, elapsed: Duration) -> Camera {
        self.viewport.advance(elapsed)
    }

    pub fn pan_by(&mut self, d_lat: f64, d_lng: f64) -> Camera {
        self.viewport.pan_by(d_lat, d_lng)
    }

    pub fn set_zoom(&mut self, zoom: u8) -> Camera {
        self.viewport.set_zoom(zoom)
    }

    /// Switch the base layer. Returns false if it was already showing.
    pub fn set_layer(&mut self, layer: MapLayer) -> bool {
        if self.layer == layer {
            return false;
        }
        tracing::info!(from = %self.layer, to = %layer, "Switching base layer");
        self.layer = layer;
        self.events.emit(NavEvent::LayerChanged { layer });
        true
    }

    pub fn layer(&self) -> MapLayer {
        self.layer
    }

    pub fn tile_layer(&self) -> TileLayer {
        TileLayer::for_layer(self.layer)
    }

    /// Markers to draw: user first, then destination.
    pub fn markers(&self) -> Vec<Marker> {
        let user = self.selection.user_position().map(Marker::user);
        let destination = self.selection.destination().map(Marker::destination);
        user.into_iter().chain(destination).collect()
    }

    pub fn static_paths(&self) -> &StaticPathOverlay {
        &self.static_paths
    }

    pub fn data(&self) -> &GeoDataStore {
        &self.data
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn camera(&self) -> Camera {
        self.viewport.camera()
    }

    pub fn route_state(&self) -> &OverlayState {
        self.route.state()
    }

    pub fn engine(&self) -> &E {
        self.route.engine()
    }

    /// True once a geolocation request has succeeded.
    pub fn is_located(&self) -> bool {
        self.located
    }

    /// Detach the route overlay. The session stays usable.
    pub fn teardown(&mut self) {
        if self.route.teardown() {
            self.events.emit(NavEvent::RouteDetached);
        }
    }

    fn sync_route(&mut self) -> OverlayTransition {
        let transition = self.route.sync(self.selection.route_request());
        match transition {
            OverlayTransition::Attached { request, distance_m } => {
                self.events.emit(NavEvent::RouteAttached {
                    start: request.start,
                    end: request.end,
                    distance_m,
                });
            }
            OverlayTransition::Replaced { request, distance_m } => {
                self.events.emit(NavEvent::RouteDetached);
                self.events.emit(NavEvent::RouteAttached {
                    start: request.start,
                    end: request.end,
                    distance_m,
                });
            }
            OverlayTransition::Detached => self.events.emit(NavEvent::RouteDetached),
            OverlayTransition::Unchanged => {}
        }
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::provider_codes;
    use crate::geolocation::SimulatedProvider;
    use crate::routing::RecordingEngine;
    use proptest::prelude::*;

    fn session() -> NavigationSession<RecordingEngine> {
        let data = GeoDataStore::bundled().unwrap();
        NavigationSession::new(data, RecordingEngine::new(), &ConfigSchema::default())
    }

    fn drain(rx: &mut broadcast::Receiver<NavEvent>) -> Vec<NavEvent> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    #[test]
    fn test_ready_emits_once() {
        let mut session = session();
        let mut rx = session.subscribe();
        session.ready();
        session.ready();

        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], NavEvent::MapReady { locations, .. } if locations > 0));
    }

    #[test]
    fn test_select_flies_to_destination() {
        let mut session = session();
        let target = session.data().locations()[1].clone();
        session.select_destination(target.clone());

        assert!(session.viewport().is_transitioning());
        let camera = session.advance(Duration::from_secs(2));
        assert_eq!(camera.center, target.coordinate());
        assert_eq!(camera.zoom, 17.0);
        assert!(!session.route_state().is_active());
    }

    #[test]
    fn test_latest_write_in_turn_wins_camera() {
        let mut session = session();
        let target = session.data().locations()[0].clone();
        let here = Coordinate::new(13.3300, 77.1300);

        session.apply([
            SelectionUpdate::Destination(target),
            SelectionUpdate::UserPosition(here),
        ]);
        assert_eq!(session.advance(Duration::from_secs(2)).center, here);
        assert_eq!(session.engine().calls().len(), 1);
    }

    #[test]
    fn test_route_events() {
        let mut session = session();
        let mut rx = session.subscribe();
        let target = session.data().locations()[0].clone();

        session.set_user_position(Coordinate::new(13.3250, 77.1250));
        session.select_destination(target);
        session.teardown();

        let names: Vec<_> = drain(&mut rx).iter().map(NavEvent::name).collect();
        assert_eq!(
            names,
            [
                "user_position_changed",
                "destination_selected",
                "route_attached",
                "route_detached"
            ]
        );
    }

    #[test]
    fn test_markers_follow_selection() {
        let mut session = session();
        assert!(session.markers().is_empty());

        session.set_user_position(Coordinate::new(13.3250, 77.1250));
        let target = session.data().locations()[0].clone();
        session.select_destination(target.clone());

        let markers = session.markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].title, "Your Location");
        assert_eq!(markers[1].title, target.name);
    }

    #[test]
    fn test_set_layer() {
        let mut session = session();
        let mut rx = session.subscribe();
        assert_eq!(session.layer(), MapLayer::Satellite);
        assert!(!session.set_layer(MapLayer::Satellite));
        assert!(session.set_layer(MapLayer::Standard));
        assert!(session.tile_layer().url_template.contains("openstreetmap"));
        assert_eq!(drain(&mut rx), vec![NavEvent::LayerChanged { layer: MapLayer::Standard }]);
    }

    #[test]
    fn test_search_uses_bundled_data() {
        let session = session();
        assert_eq!(session.search("").len(), session.data().locations().len());
        assert!(session.search("zzzz-nothing").is_empty());
    }

    #[tokio::test]
    async fn test_locate_success_sets_position() {
        let mut session = session();
        let here = Coordinate::new(13.3260, 77.1240);
        let bridge = GeolocationBridge::new(SimulatedProvider::Fix(here));

        assert_eq!(session.locate_user(&bridge).await, Ok(here));
        assert!(session.is_located());
        assert_eq!(session.selection().user_position(), Some(here));
    }

    #[tokio::test]
    async fn test_locate_failure_keeps_state() {
        let mut session = session();
        let before = Coordinate::new(13.3260, 77.1240);
        session.set_user_position(before);
        let mut rx = session.subscribe();

        let bridge = GeolocationBridge::new(SimulatedProvider::Error(provider_codes::PERMISSION_DENIED));
        assert_eq!(
            session.locate_user(&bridge).await,
            Err(GeolocationError::PermissionDenied)
        );
        assert_eq!(session.selection().user_position(), Some(before));
        assert!(!session.is_located());

        let events = drain(&mut rx);
        assert!(matches!(
            &events[..],
            [NavEvent::GeolocationFailed { kind: GeolocationError::PermissionDenied, message }]
                if message.starts_with("Location permission denied")
        ));
    }

    #[derive(Debug, Clone)]
    enum Step {
        Destination(usize),
        Position(Coordinate),
        Both(usize, Coordinate),
    }

    fn step() -> impl Strategy<Value = Step> {
        let position = (13.3210f64..13.3350, 77.1200f64..77.1350).prop_map(Coordinate::from);
        prop_oneof![
            any::<usize>().prop_map(Step::Destination),
            position.clone().prop_map(Step::Position),
            (any::<usize>(), position).prop_map(|(i, p)| Step::Both(i, p)),
        ]
    }

    proptest! {
        #[test]
        fn test_route_tracks_selection_over_any_update_order(
            steps in prop::collection::vec(step(), 0..30),
            teardown in any::<bool>(),
        ) {
            let mut session = session();
            let count = session.data().locations().len();
            for step in steps {
                match step {
                    Step::Destination(i) => {
                        let target = session.data().locations()[i % count].clone();
                        session.select_destination(target);
                    }
                    Step::Position(p) => {
                        session.set_user_position(p);
                    }
                    Step::Both(i, p) => {
                        let target = session.data().locations()[i % count].clone();
                        session.apply([
                            SelectionUpdate::Destination(target),
                            SelectionUpdate::UserPosition(p),
                        ]);
                    }
                }

                let selection = session.selection();
                let complete = selection.user_position().is_some() && selection.destination().is_some();
                prop_assert_eq!(session.route_state().is_active(), complete);
                prop_assert!(session.engine().live_count() <= 1);
            }

            prop_assert!(session.engine().max_live() <= 1);
            if teardown {
                session.teardown();
                prop_assert_eq!(session.engine().live_count(), 0);
            }
        }
    }
}
