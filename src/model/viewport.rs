//! Viewport state and zoom mathematics.
//!
//! Viewport transitions are pure: each operation returns a new [`Viewport`]
//! and the canvas compares old and new to decide whether anything changed.

use serde::{Deserialize, Serialize};

use super::feature::GeoPoint;
use crate::constants::{DEFAULT_CENTER, DEFAULT_ZOOM, TILE_SIZE, ZOOM_STEP};

/// Base map tile providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseMap {
    #[default]
    Bhuvan,
    Osm,
    Satellite,
}

impl BaseMap {
    /// Display name for the base map switcher.
    pub fn name(&self) -> &'static str {
        match self {
            BaseMap::Bhuvan => "Bhuvan",
            BaseMap::Osm => "OSM",
            BaseMap::Satellite => "Satellite",
        }
    }

    /// Supported zoom range `(min, max)` of the provider.
    pub fn zoom_range(&self) -> (u8, u8) {
        match self {
            BaseMap::Bhuvan => (4, 18),
            BaseMap::Osm => (1, 19),
            BaseMap::Satellite => (1, 18),
        }
    }

    /// Tile URL template handed to the surface on mount and on switch.
    pub fn tile_template(&self) -> &'static str {
        match self {
            BaseMap::Bhuvan => "https://bhuvan-vec1.nrsc.gov.in/bhuvan/gwc/service/wmts/{z}/{x}/{y}",
            BaseMap::Osm => "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            BaseMap::Satellite => {
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
            }
        }
    }

    /// Attribution line for the provider.
    pub fn attribution(&self) -> &'static str {
        match self {
            BaseMap::Bhuvan => "NIC | ISRO Bhuvan",
            BaseMap::Osm => "© OpenStreetMap contributors",
            BaseMap::Satellite => "Esri World Imagery",
        }
    }

    /// All base maps in switcher order.
    pub fn all() -> &'static [BaseMap] {
        &[BaseMap::Bhuvan, BaseMap::Osm, BaseMap::Satellite]
    }

    /// Clamp a zoom level into this provider's range.
    pub fn clamp_zoom(&self, zoom: u8) -> u8 {
        let (min, max) = self.zoom_range();
        zoom.clamp(min, max)
    }
}

/// Map center, zoom level and active base map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: u8,
    pub base_map: BaseMap,
}

impl Viewport {
    /// Create a viewport, clamping the zoom into the base map's range.
    pub fn new(center: GeoPoint, zoom: u8, base_map: BaseMap) -> Self {
        Self {
            center,
            zoom: base_map.clamp_zoom(zoom),
            base_map,
        }
    }

    /// One step closer, stopping at the provider's maximum.
    pub fn zoomed_in(&self) -> Viewport {
        Viewport {
            zoom: self.base_map.clamp_zoom(self.zoom.saturating_add(ZOOM_STEP)),
            ..*self
        }
    }

    /// One step further out, stopping at the provider's minimum.
    pub fn zoomed_out(&self) -> Viewport {
        Viewport {
            zoom: self.base_map.clamp_zoom(self.zoom.saturating_sub(ZOOM_STEP)),
            ..*self
        }
    }

    /// Recenter at `center` with `zoom` clamped into range.
    pub fn panned_to(&self, center: GeoPoint, zoom: u8) -> Viewport {
        Viewport {
            center,
            zoom: self.base_map.clamp_zoom(zoom),
            base_map: self.base_map,
        }
    }

    /// Swap the base map, keeping the center. The zoom is kept unless it
    /// falls outside the new provider's range.
    pub fn with_base_map(&self, base_map: BaseMap) -> Viewport {
        Viewport {
            center: self.center,
            zoom: base_map.clamp_zoom(self.zoom),
            base_map,
        }
    }

    /// Map width in pixels per degree of longitude at this zoom.
    pub fn pixels_per_degree(&self) -> f64 {
        TILE_SIZE * 2f64.powi(i32::from(self.zoom)) / 360.0
    }

    /// Whether the zoom sits at the provider's maximum.
    pub fn at_max_zoom(&self) -> bool {
        self.zoom >= self.base_map.zoom_range().1
    }

    /// Whether the zoom sits at the provider's minimum.
    pub fn at_min_zoom(&self) -> bool {
        self.zoom <= self.base_map.zoom_range().0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(
            GeoPoint::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            DEFAULT_ZOOM,
            BaseMap::default(),
        )
    }
}
