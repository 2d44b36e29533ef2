//! End-to-end selection, routing and locate flows over a navigation session.

use campus_nav_core::config::ConfigSchema;
use campus_nav_geo::{Coordinate, GeoDataStore, Location, LocationId};
use campus_nav_map::{
    EngineCall, GeolocationBridge, GeolocationError, NavEvent, NavigationSession, OverlayState, RecordingEngine,
    RouteRequest, SimulatedProvider,
};
use std::time::Duration;

const LOCATIONS: &str = r#"[
    {"id": 1, "name": "Library", "category": "Academic", "lat": 13.33, "lng": 77.13}
]"#;

const PATHS: &str = r#"{
    "type": "FeatureCollection",
    "features": [{
        "type": "Feature",
        "properties": {"name": "Walkway"},
        "geometry": {"type": "LineString", "coordinates": [[77.125, 13.325], [77.13, 13.33]]}
    }]
}"#;

fn session() -> NavigationSession<RecordingEngine> {
    let data = GeoDataStore::from_json(LOCATIONS, PATHS).unwrap();
    NavigationSession::new(data, RecordingEngine::new(), &ConfigSchema::default())
}

fn library(session: &NavigationSession<RecordingEngine>) -> Location {
    session.data().location(&LocationId::Number(1)).unwrap().clone()
}

#[test]
fn test_search_scenario() {
    let session = session();
    let hits = session.search("lib");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, LocationId::Number(1));
    assert!(session.search("xyz").is_empty());
}

#[test]
fn test_route_follows_user_position() {
    let mut session = session();
    let library = library(&session);
    let end = Coordinate::new(13.33, 77.13);

    session.set_user_position(Coordinate::new(13.30, 77.12));
    assert_eq!(session.route_state(), &OverlayState::Absent);

    session.select_destination(library);
    assert_eq!(
        session.route_state().request(),
        Some(RouteRequest {
            start: Coordinate::new(13.30, 77.12),
            end,
        })
    );

    session.set_user_position(Coordinate::new(13.31, 77.13));
    assert_eq!(
        session.route_state().request(),
        Some(RouteRequest {
            start: Coordinate::new(13.31, 77.13),
            end,
        })
    );

    let engine = session.engine();
    assert_eq!(engine.max_live(), 1);
    assert_eq!(engine.live_count(), 1);
    assert!(matches!(
        engine.calls(),
        [
            EngineCall::Attach { .. },
            EngineCall::Detach { .. },
            EngineCall::Attach { request, .. },
        ] if request.start == Coordinate::new(13.31, 77.13)
    ));
}

#[test]
fn test_static_paths_drawn_in_lat_lng() {
    let mut session = session();
    let mut events = session.subscribe();
    session.ready();

    assert_eq!(
        session.static_paths().polylines()[0].positions(),
        vec![[13.325, 77.125], [13.33, 77.13]]
    );
    assert_eq!(
        events.try_recv().unwrap(),
        NavEvent::MapReady { locations: 1, paths: 1 }
    );
}

#[test]
fn test_camera_stays_on_campus() {
    let mut session = session();
    session.set_user_position(Coordinate::new(13.30, 77.12));
    let camera = session.advance(Duration::from_millis(1500));

    // (13.30, 77.12) is south of campus; the camera stops at the edge
    assert_eq!(camera.center, Coordinate::new(13.3210, 77.1200));
    assert!(!session.viewport().is_transitioning());
}

#[tokio::test]
async fn test_locate_then_route() {
    let mut session = session();
    let library = library(&session);
    session.select_destination(library);

    let failing = GeolocationBridge::new(SimulatedProvider::Error(3));
    assert_eq!(session.locate_user(&failing).await, Err(GeolocationError::Timeout));
    assert!(!session.route_state().is_active());

    let here = Coordinate::new(13.3255, 77.1229);
    let working = GeolocationBridge::new(SimulatedProvider::Fix(here));
    assert_eq!(session.locate_user(&working).await, Ok(here));
    assert!(session.is_located());
    assert_eq!(session.route_state().request().map(|r| r.start), Some(here));
}

#[test]
fn test_drop_detaches_route() {
    let data = GeoDataStore::from_json(LOCATIONS, PATHS).unwrap();
    let mut engine = RecordingEngine::new();
    {
        let mut session = NavigationSession::new(data, &mut engine, &ConfigSchema::default());
        let library = session.data().locations()[0].clone();
        session.set_user_position(Coordinate::new(13.325, 77.125));
        session.select_destination(library);
    }
    assert_eq!(engine.live_count(), 0);
    assert_eq!(engine.calls().len(), 2);
}
