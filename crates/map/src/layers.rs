//! Base tile layers.

use campus_nav_core::config::MapLayer;
use serde::Serialize;

const ESRI_IMAGERY_URL: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";
const ESRI_ATTRIBUTION: &str = "Tiles &copy; Esri &mdash; Source: Esri, i-cubed, USDA, USGS, AEX, GeoEye, Getmapping, Aerogrid, IGN, IGP, UPR-EGP, and the GIS User Community";

const OSM_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const OSM_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

/// A tile source the map can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileLayer {
    pub layer: MapLayer,
    pub url_template: &'static str,
    pub attribution: &'static str,
}

impl TileLayer {
    pub fn for_layer(layer: MapLayer) -> Self {
        let (url_template, attribution) = match layer {
            MapLayer::Satellite => (ESRI_IMAGERY_URL, ESRI_ATTRIBUTION),
            MapLayer::Standard => (OSM_URL, OSM_ATTRIBUTION),
        };
        Self {
            layer,
            url_template,
            attribution,
        }
    }

    /// URL of one tile.
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> String {
        self.url_template
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}
