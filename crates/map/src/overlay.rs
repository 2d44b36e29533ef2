//! Fixed-style polylines for the campus walkways.

use campus_nav_core::config::PathStyleConfig;
use campus_nav_geo::{Coordinate, GeoPath};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStyle {
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self::from(&PathStyleConfig::default())
    }
}

impl From<&PathStyleConfig> for PathStyle {
    fn from(config: &PathStyleConfig) -> Self {
        Self {
            color: config.color.clone(),
            weight: config.weight,
            opacity: config.opacity,
        }
    }
}

/// One drawn walkway.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub name: Option<String>,
    pub points: Vec<Coordinate>,
    pub style: PathStyle,
}

impl Polyline {
    /// Vertices as `[lat, lng]`, the order map surfaces expect.
    pub fn positions(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|p| [p.latitude, p.longitude]).collect()
    }
}

/// Every walkway, rendered once and never touched by selection changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticPathOverlay {
    polylines: Vec<Polyline>,
}

impl StaticPathOverlay {
    pub fn render(paths: &[GeoPath], style: &PathStyle) -> Self {
        let polylines: Vec<Polyline> = paths
            .iter()
            .map(|path| Polyline {
                name: path.name.clone(),
                points: path.points.clone(),
                style: style.clone(),
            })
            .collect();

        tracing::debug!(count = polylines.len(), color = %style.color, "Rendered static paths");
        Self { polylines }
    }

    pub fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }

    pub fn len(&self) -> usize {
        self.polylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }
}
