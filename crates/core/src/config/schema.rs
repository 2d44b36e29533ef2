//! Configuration schema definitions
//!
//! Every field carries a serde default so a partial file (or no file) is valid.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub map: MapConfig,

    #[serde(default)]
    pub transition: TransitionConfig,

    #[serde(default)]
    pub paths: PathStyleConfig,

    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub telemetry: TelemetrySection,
}

impl ConfigSchema {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let map = &self.map;
        if map.min_zoom > map.max_zoom {
            return Err(Error::config_invalid(format!(
                "min_zoom ({}) is greater than max_zoom ({})",
                map.min_zoom, map.max_zoom
            ))
            .with_context("[map]"));
        }
        if map.zoom < map.min_zoom || map.zoom > map.max_zoom {
            return Err(Error::config_invalid(format!(
                "zoom {} is outside {}..={}",
                map.zoom, map.min_zoom, map.max_zoom
            ))
            .with_context("[map]"));
        }
        if map.focus_zoom < map.min_zoom || map.focus_zoom > map.max_zoom {
            return Err(Error::config_invalid(format!(
                "focus_zoom {} is outside {}..={}",
                map.focus_zoom, map.min_zoom, map.max_zoom
            ))
            .with_context("[map]"));
        }
        let [lat, lng] = map.center;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(Error::config_invalid(format!("center [{lat}, {lng}] is not a valid coordinate"))
                .with_context("[map]"));
        }
        if !(0.0..=1.0).contains(&map.bounds_viscosity) {
            return Err(Error::config_invalid("bounds_viscosity must be within 0.0..=1.0")
                .with_context("[map]"));
        }
        if self.transition.duration_ms == 0 {
            return Err(Error::config_invalid("duration_ms must be greater than zero")
                .with_context("[transition]"));
        }
        if !(self.transition.ease_linearity > 0.0 && self.transition.ease_linearity <= 1.0) {
            return Err(Error::config_invalid("ease_linearity must be within (0.0, 1.0]")
                .with_context("[transition]"));
        }
        if !(0.0..=1.0).contains(&self.paths.opacity) {
            return Err(Error::config_invalid("opacity must be within 0.0..=1.0")
                .with_context("[paths]"));
        }
        Ok(())
    }
}

/// Base map tiles shown under the overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MapLayer {
    /// Aerial imagery
    #[default]
    Satellite,
    /// Street map
    Standard,
}

impl std::fmt::Display for MapLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapLayer::Satellite => f.write_str("satellite"),
            MapLayer::Standard => f.write_str("standard"),
        }
    }
}

/// Initial camera and zoom limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Initial center as `[lat, lng]`
    #[serde(default = "default_center")]
    pub center: [f64; 2],

    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    #[serde(default = "default_min_zoom")]
    pub min_zoom: u8,

    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,

    /// Zoom used when flying to a selected destination or the user
    #[serde(default = "default_zoom")]
    pub focus_zoom: u8,

    #[serde(default)]
    pub layer: MapLayer,

    /// 1.0 stops panning exactly at the campus bounds, 0.0 disables the limit
    #[serde(default = "default_viscosity")]
    pub bounds_viscosity: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: default_center(),
            zoom: default_zoom(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            focus_zoom: default_zoom(),
            layer: MapLayer::default(),
            bounds_viscosity: default_viscosity(),
        }
    }
}

fn default_center() -> [f64; 2] {
    [13.3269, 77.1261]
}

fn default_zoom() -> u8 {
    17
}

fn default_min_zoom() -> u8 {
    15
}

fn default_max_zoom() -> u8 {
    19
}

fn default_viscosity() -> f64 {
    1.0
}

/// Fly-to animation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionConfig {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,

    /// Lower values ease out harder
    #[serde(default = "default_ease_linearity")]
    pub ease_linearity: f64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            ease_linearity: default_ease_linearity(),
        }
    }
}

fn default_duration_ms() -> u64 {
    1500
}

fn default_ease_linearity() -> f64 {
    0.25
}

/// Style of the static walkway overlay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathStyleConfig {
    #[serde(default = "default_path_color")]
    pub color: String,

    #[serde(default = "default_path_weight")]
    pub weight: u32,

    #[serde(default = "default_path_opacity")]
    pub opacity: f64,
}

impl Default for PathStyleConfig {
    fn default() -> Self {
        Self {
            color: default_path_color(),
            weight: default_path_weight(),
            opacity: default_path_opacity(),
        }
    }
}

fn default_path_color() -> String {
    "#facc15".to_string()
}

fn default_path_weight() -> u32 {
    4
}

fn default_path_opacity() -> f64 {
    0.8
}

/// Options handed to the routing engine on attach
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    #[serde(default = "default_true")]
    pub route_while_dragging: bool,

    #[serde(default)]
    pub show_alternatives: bool,

    #[serde(default = "default_true")]
    pub fit_selected_routes: bool,

    /// Show the turn-by-turn panel
    #[serde(default)]
    pub show_itinerary: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            route_while_dragging: true,
            show_alternatives: false,
            fit_selected_routes: true,
            show_itinerary: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Logging output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetrySection {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub show_target: bool,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,

    /// Also write logs to this file
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for TelemetrySection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            show_target: false,
            json: false,
            log_file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
