use campus_nav_cli::output::{format_distance, Status};
use campus_nav_cli::progress;
use campus_nav_core::config::ConfigSchema;
use campus_nav_core::error::exit_codes;
use campus_nav_core::store::{FileStore, KeyValueStore};
use campus_nav_geo::{Coordinate, GeoDataStore, Location, LocationId};
use campus_nav_map::{GeolocationBridge, NavEvent, NavigationSession, RecordingEngine, SimulatedProvider};
use campus_nav_telemetry::Event;
use owo_colors::OwoColorize;
use std::time::Duration;
use tokio::sync::broadcast;

const LAST_DESTINATION: &str = "last_destination";

pub struct Args {
    pub to: Option<String>,
    pub from: Option<String>,
    pub simulate_error: Option<u16>,
    pub json: bool,
}

pub async fn run(data: GeoDataStore, config: &ConfigSchema, args: Args) -> anyhow::Result<i32> {
    let store = match FileStore::open(FileStore::default_path()) {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!(error = %e, "Session store unavailable; last destination will not be remembered");
            None
        }
    };

    let destination = match resolve_destination(&data, args.to.as_deref(), store.as_ref()) {
        Ok(location) => location,
        Err(code) => return Ok(code),
    };

    let provider = match (args.simulate_error, args.from.as_deref()) {
        (Some(code), _) => SimulatedProvider::Error(code),
        (None, Some(from)) => match from.parse::<Coordinate>() {
            Ok(coord) => SimulatedProvider::Fix(coord),
            Err(e) => {
                Status::error(&format!("--from: {e}"));
                return Ok(exit_codes::USAGE_ERROR);
            }
        },
        (None, None) => {
            let [lat, lng] = config.map.center;
            SimulatedProvider::Fix(Coordinate::new(lat, lng))
        }
    };
    let bridge = GeolocationBridge::new(provider);

    let mut session = NavigationSession::new(data, RecordingEngine::new(), config);
    let mut events = session.subscribe();
    session.ready();
    session.select_destination(destination.clone());

    let spinner = (!args.json).then(progress::locating);
    let located = session.locate_user(&bridge).await;
    if let Some(spinner) = &spinner {
        match &located {
            Ok(position) => progress::finish_success(spinner, &format!("Located at {position}")),
            Err(e) => progress::finish_error(spinner, &e.to_string()),
        }
    }

    let camera = session.advance(Duration::from_millis(config.transition.duration_ms));
    let route = *session.route_state();
    let markers = session.markers();
    session.teardown();

    let log = drain(&mut events);
    for event in &log {
        Event::new(event.name(), serde_json::to_value(event)?).log();
    }

    if let Some(store) = &store {
        if let Err(e) = store.set_json(LAST_DESTINATION, &destination.id) {
            tracing::warn!(error = %e, "Could not remember destination");
        }
    }

    if args.json {
        super::print_json(&serde_json::json!({
            "destination": destination,
            "located": located.is_ok(),
            "camera": camera,
            "route": route,
            "markers": markers,
            "tiles": session.tile_layer(),
            "engine_calls": session.engine().calls(),
            "events": log,
        }))?;
    } else {
        Status::header(&format!("Navigate to {}", destination.name));
        log.iter().for_each(print_event);
        println!();
        Status::field("camera", format!("{} zoom {:.0}", camera.center, camera.zoom));
        Status::field("tiles", session.tile_layer().url_template);
    }

    Ok(if located.is_ok() {
        exit_codes::SUCCESS
    } else {
        exit_codes::FAILURE
    })
}

/// `--to` by id then by name, or the remembered destination.
fn resolve_destination(
    data: &GeoDataStore,
    to: Option<&str>,
    store: Option<&FileStore>,
) -> Result<Location, i32> {
    let Some(to) = to else {
        let remembered = store
            .and_then(|s| s.get_json::<LocationId>(LAST_DESTINATION).ok().flatten())
            .and_then(|id| data.location(&id));
        return match remembered {
            Some(location) => {
                Status::info(&format!("Using last destination: {}", location.name));
                Ok(location.clone())
            }
            None => {
                Status::error("No destination given and none remembered; pass --to <id|name>");
                Err(exit_codes::USAGE_ERROR)
            }
        };
    };

    data.location(&LocationId::from(to))
        .or_else(|| data.location_by_name(to))
        .cloned()
        .ok_or_else(|| {
            Status::error(&format!("No location with id or name '{to}'"));
            Status::info("Try `campus-nav search <text>`");
            exit_codes::NOT_FOUND
        })
}

fn drain(rx: &mut broadcast::Receiver<NavEvent>) -> Vec<NavEvent> {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(broadcast::error::TryRecvError::Lagged(missed)) => {
                tracing::warn!(missed, "Event log lagged");
            }
            Err(_) => break,
        }
    }
    events
}

fn print_event(event: &NavEvent) {
    let line = match event {
        NavEvent::MapReady { locations, paths } => {
            format!("map ready: {locations} locations, {paths} paths")
        }
        NavEvent::DestinationSelected { location } => {
            format!("destination: {} ({})", location.name, location.category)
        }
        NavEvent::UserPositionChanged { position } => format!("position: {position}"),
        NavEvent::GeolocationFailed { message, .. } => {
            println!("  {} {}", "!".yellow(), message.yellow());
            return;
        }
        NavEvent::RouteAttached {
            start,
            end,
            distance_m,
        } => format!(
            "route attached: {start} -> {end} ({} straight line)",
            format_distance(*distance_m)
        ),
        NavEvent::RouteDetached => "route detached".to_string(),
        NavEvent::LayerChanged { layer } => format!("layer: {layer}"),
    };
    println!("  {} {}", "·".dimmed(), line);
}
