//! Camera state and fly-to transitions inside the campus bounds.
//!
//! The controller is driven by the host: `fly_to` starts a transition and
//! `advance` moves it forward by however much time the host's frame took.
//! A new intent always replaces the running transition, starting from
//! wherever the camera currently is.

use campus_nav_core::config::ConfigSchema;
use campus_nav_geo::{CampusBounds, Coordinate, CAMPUS_BOUNDS};
use campus_nav_telemetry::{metrics, names};
use serde::Serialize;
use std::time::Duration;

/// Center and (fractional, while animating) zoom of the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    pub center: Coordinate,
    pub zoom: f64,
}

/// A request to move the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportIntent {
    pub center: Coordinate,
    /// `None` keeps the current zoom
    pub zoom: Option<u8>,
    /// Monotonic write order; intents older than the last applied one are dropped
    pub seq: u64,
}

/// Settings fixed for the life of the viewport.
#[derive(Debug, Clone)]
pub struct ViewportSettings {
    pub bounds: CampusBounds,
    pub initial: Camera,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub viscosity: f64,
    pub duration: Duration,
    pub ease_linearity: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self::from_config(&ConfigSchema::default())
    }
}

impl ViewportSettings {
    pub fn from_config(config: &ConfigSchema) -> Self {
        let [lat, lng] = config.map.center;
        Self {
            bounds: CAMPUS_BOUNDS,
            initial: Camera {
                center: Coordinate::new(lat, lng),
                zoom: f64::from(config.map.zoom),
            },
            min_zoom: config.map.min_zoom,
            max_zoom: config.map.max_zoom,
            viscosity: config.map.bounds_viscosity,
            duration: Duration::from_millis(config.transition.duration_ms),
            ease_linearity: config.transition.ease_linearity,
        }
    }
}

/// An in-progress fly-to.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: Camera,
    pub to: Camera,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewportState {
    Idle,
    Transitioning(Transition),
}

/// Owns the camera. Only this type moves it.
#[derive(Debug)]
pub struct ViewportController {
    settings: ViewportSettings,
    camera: Camera,
    state: ViewportState,
    last_seq: Option<u64>,
}

impl ViewportController {
    /// Starts idle at the configured camera, clamped into bounds.
    pub fn new(settings: ViewportSettings) -> Self {
        let camera = Camera {
            center: settings.bounds.clamp(settings.initial.center),
            zoom: settings
                .initial
                .zoom
                .clamp(f64::from(settings.min_zoom), f64::from(settings.max_zoom)),
        };
        Self {
            settings,
            camera,
            state: ViewportState::Idle,
            last_seq: None,
        }
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, ViewportState::Transitioning(_))
    }

    pub fn settings(&self) -> &ViewportSettings {
        &self.settings
    }

    /// Start flying toward `intent`, interrupting any running transition.
    ///
    /// Returns false (and does nothing) for an intent older than one already applied.
    pub fn fly_to(&mut self, intent: ViewportIntent) -> bool {
        if self.last_seq.is_some_and(|last| intent.seq <= last) {
            tracing::debug!(seq = intent.seq, last = ?self.last_seq, "Dropping stale viewport intent");
            return false;
        }
        self.last_seq = Some(intent.seq);

        let target = Camera {
            center: self.settings.bounds.clamp(intent.center),
            zoom: intent
                .zoom
                .map_or(self.camera.zoom, |z| self.clamp_zoom(f64::from(z))),
        };

        if self.is_transitioning() {
            tracing::debug!("Interrupting transition for newer intent");
        }
        tracing::debug!(center = %target.center, zoom = target.zoom, seq = intent.seq, "Flying to");
        metrics().increment(names::VIEWPORT_TRANSITIONS);

        self.state = ViewportState::Transitioning(Transition {
            from: self.camera,
            to: target,
            elapsed: Duration::ZERO,
        });
        true
    }

    /// Move a running transition forward by `elapsed`.
    ///
    /// Once the configured duration has passed the camera sits exactly on the
    /// target and the controller is idle again.
    pub fn advance(&mut self, elapsed: Duration) -> Camera {
        let ViewportState::Transitioning(transition) = &mut self.state else {
            return self.camera;
        };

        transition.elapsed += elapsed;
        let duration = self.settings.duration;

        if transition.elapsed >= duration || duration.is_zero() {
            self.camera = transition.to;
            self.state = ViewportState::Idle;
            return self.camera;
        }

        let t = transition.elapsed.as_secs_f64() / duration.as_secs_f64();
        let k = ease_out(t, self.settings.ease_linearity);
        let (from, to) = (transition.from, transition.to);

        self.camera = Camera {
            center: Coordinate::new(
                lerp(from.center.latitude, to.center.latitude, k),
                lerp(from.center.longitude, to.center.longitude, k),
            ),
            zoom: lerp(from.zoom, to.zoom, k),
        };
        self.camera
    }

    /// Run the current transition to completion.
    pub fn finish(&mut self) -> Camera {
        self.advance(self.settings.duration)
    }

    /// Drag the map by a delta in degrees.
    ///
    /// Dragging cancels any transition. Movement past the campus edge is
    /// damped by the configured viscosity; if the drag leaves the camera
    /// outside, a transition back to the nearest edge point starts, so the
    /// camera always comes to rest inside the bounds.
    pub fn pan_by(&mut self, d_lat: f64, d_lng: f64) -> Camera {
        let bounds = self.settings.bounds;
        let moved = Coordinate::new(
            self.camera.center.latitude + d_lat,
            self.camera.center.longitude + d_lng,
        );
        self.camera.center = bounds.limit_viscous(moved, self.settings.viscosity);

        self.state = if bounds.contains(&self.camera.center) {
            ViewportState::Idle
        } else {
            tracing::debug!(center = %self.camera.center, "Dragged past campus edge; settling back");
            ViewportState::Transitioning(Transition {
                from: self.camera,
                to: Camera {
                    center: bounds.clamp(self.camera.center),
                    zoom: self.camera.zoom,
                },
                elapsed: Duration::ZERO,
            })
        };
        self.camera
    }

    /// Jump to a zoom level, clamped to the configured limits.
    pub fn set_zoom(&mut self, zoom: u8) -> Camera {
        self.state = ViewportState::Idle;
        self.camera.zoom = self.clamp_zoom(f64::from(zoom));
        self.camera
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(f64::from(self.settings.min_zoom), f64::from(self.settings.max_zoom))
    }
}

/// Decelerating curve: `1 - (1 - t)^(1 / linearity)`.
///
/// Linearity below 0.2 is treated as 0.2.
pub fn ease_out(t: f64, linearity: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let power = 1.0 / linearity.max(0.2);
    1.0 - (1.0 - t).powf(power)
}

#[inline]
fn lerp(a: f64, b: f64, k: f64) -> f64 {
    a + (b - a) * k
}
