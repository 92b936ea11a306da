//! Map canvas: viewport state, the rendered marker set and the surface lifecycle.
//!
//! Lifecycle: `Uninitialized → Loading → Ready`, or `Failed` if the surface
//! cannot mount. `Ready` and `Failed` are terminal for the session; a failed
//! mount is never retried.

mod headless;
mod surface;
mod svg;

pub use headless::RecordingSurface;
pub use surface::MapSurface;
pub use svg::SvgSurface;

use web_time::Instant;

use crate::error::{AtlasError, AtlasResult};
use crate::model::{BaseMap, Feature, FeatureId, GeoPoint, LayerId, Viewport};
use crate::registry::LayerRegistry;
use crate::styler::{MarkerStyle, StyleRules};

/// Canvas lifecycle state.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasState {
    Uninitialized,
    Loading,
    Ready,
    /// Mount failed; the view should show an error affordance
    Failed(String),
}

impl CanvasState {
    pub fn is_ready(&self) -> bool {
        matches!(self, CanvasState::Ready)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CanvasState::Failed(_))
    }
}

/// A feature that passed visibility and position checks, with its style.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMarker {
    pub feature_id: FeatureId,
    pub layer_id: LayerId,
    pub position: GeoPoint,
    pub style: MarkerStyle,
}

/// Optional state/district restriction on the render set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionFilter {
    pub state: Option<String>,
    pub district: Option<String>,
}

impl RegionFilter {
    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.district.is_none()
    }

    /// Whether a feature passes. A feature lacking a filtered field fails.
    pub fn matches(&self, feature: &Feature) -> bool {
        fn field_matches(wanted: &Option<String>, actual: &Option<String>) -> bool {
            match (wanted, actual) {
                (None, _) => true,
                (Some(w), Some(a)) => w.eq_ignore_ascii_case(a),
                (Some(_), None) => false,
            }
        }
        field_matches(&self.state, &feature.metrics.state)
            && field_matches(&self.district, &feature.metrics.district)
    }
}

/// Outcome counts of one render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderReport {
    /// Markers in the render set
    pub drawn: usize,
    /// Features on disabled layers
    pub hidden: usize,
    /// Features excluded by the region filter
    pub filtered: usize,
    /// Features whose layer id is not registered
    pub unknown_layer: usize,
    /// Features without a resolvable position
    pub dropped: Vec<FeatureId>,
}

/// The map canvas, generic over its drawing surface.
pub struct MapCanvas<S: MapSurface> {
    surface: S,
    state: CanvasState,
    viewport: Viewport,
    markers: Vec<RenderedMarker>,
}

impl<S: MapSurface> MapCanvas<S> {
    /// The viewport's zoom is clamped into its base map's range.
    pub fn new(surface: S, viewport: Viewport) -> Self {
        Self {
            surface,
            state: CanvasState::Uninitialized,
            viewport: Viewport::new(viewport.center, viewport.zoom, viewport.base_map),
            markers: Vec::new(),
        }
    }

    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The current render set.
    pub fn markers(&self) -> &[RenderedMarker] {
        &self.markers
    }

    pub fn contains(&self, id: &FeatureId) -> bool {
        self.markers.iter().any(|m| &m.feature_id == id)
    }

    /// Whether the feature is drawn on that particular layer.
    pub fn renders(&self, id: &FeatureId, layer_id: &LayerId) -> bool {
        self.markers
            .iter()
            .any(|m| &m.feature_id == id && &m.layer_id == layer_id)
    }

    /// Enter `Loading`. Only valid from `Uninitialized`; otherwise a no-op.
    pub fn begin_loading(&mut self) {
        if self.state == CanvasState::Uninitialized {
            log::debug!("Mounting {} surface", self.surface.name());
            self.state = CanvasState::Loading;
        }
    }

    /// Mount the surface and move to `Ready`, drawing any markers rendered
    /// while loading.
    ///
    /// # Errors
    /// [`AtlasError::SurfaceMount`] when the surface fails; the canvas is then
    /// `Failed` for good and later calls return [`AtlasError::CanvasFailed`].
    pub fn mount(&mut self) -> AtlasResult<()> {
        if let CanvasState::Failed(reason) = &self.state {
            return Err(AtlasError::CanvasFailed {
                reason: reason.clone(),
            });
        }
        if self.state.is_ready() {
            return Ok(());
        }
        self.begin_loading();

        if let Err(e) = self.surface.mount(&self.viewport) {
            log::error!("Map surface '{}' failed to mount: {}", self.surface.name(), e);
            self.state = CanvasState::Failed(e.to_string());
            return Err(e.into());
        }

        self.state = CanvasState::Ready;
        self.redraw();
        log::info!(
            "Map canvas ready ({} surface, {} markers)",
            self.surface.name(),
            self.markers.len()
        );
        Ok(())
    }

    /// Rebuild the render set from a snapshot.
    ///
    /// Features on disabled or unknown layers, features outside the region
    /// filter and features without a valid position are left out. Drawing
    /// is deferred until the canvas is `Ready`.
    ///
    /// # Errors
    /// [`AtlasError::CanvasFailed`] once the canvas has failed to mount.
    pub fn render(
        &mut self,
        registry: &LayerRegistry,
        rules: &StyleRules,
        features: &[Feature],
        filter: &RegionFilter,
    ) -> AtlasResult<RenderReport> {
        if let CanvasState::Failed(reason) = &self.state {
            return Err(AtlasError::CanvasFailed {
                reason: reason.clone(),
            });
        }

        let started = Instant::now();
        let mut report = RenderReport::default();
        let mut markers = Vec::with_capacity(features.len());

        for feature in features {
            let Some(layer) = registry.get(&feature.layer_id) else {
                log::debug!(
                    "Feature '{}' references unknown layer '{}'",
                    feature.id,
                    feature.layer_id
                );
                report.unknown_layer += 1;
                continue;
            };
            if !layer.enabled {
                report.hidden += 1;
                continue;
            }
            if !filter.matches(feature) {
                report.filtered += 1;
                continue;
            }
            let Some(position) = feature.resolved_position() else {
                log::warn!(
                    "Dropping feature '{}' on layer '{}': no resolvable position",
                    feature.id,
                    feature.layer_id
                );
                report.dropped.push(feature.id.clone());
                continue;
            };

            markers.push(RenderedMarker {
                feature_id: feature.id.clone(),
                layer_id: feature.layer_id.clone(),
                position,
                style: rules.marker_style(layer, feature),
            });
        }

        report.drawn = markers.len();
        self.markers = markers;
        self.redraw();

        log::debug!(
            "Rendered {} markers ({} hidden, {} filtered, {} dropped) in {:.2}ms",
            report.drawn,
            report.hidden,
            report.filtered,
            report.dropped.len(),
            started.elapsed().as_secs_f64() * 1000.0
        );
        Ok(report)
    }

    fn redraw(&mut self) {
        if !self.state.is_ready() {
            return;
        }
        self.surface.clear_markers();
        for marker in &self.markers {
            self.surface.draw_marker(marker);
        }
    }

    fn apply_viewport(&mut self, next: Viewport) -> bool {
        if next == self.viewport {
            return false;
        }
        let base_changed = next.base_map != self.viewport.base_map;
        self.viewport = next;
        if self.state.is_ready() {
            if base_changed {
                self.surface.set_base_map(next.base_map);
            }
            self.surface.set_view(&next);
        }
        true
    }

    /// Recenter the map. Returns whether the viewport changed.
    ///
    /// An invalid coordinate leaves the viewport untouched.
    pub fn pan_to(&mut self, center: GeoPoint, zoom: u8) -> bool {
        if !center.is_valid() {
            log::warn!("Ignoring pan to invalid coordinate ({}, {})", center.lat, center.lon);
            return false;
        }
        let changed = self.apply_viewport(self.viewport.panned_to(center, zoom));
        if changed {
            log::debug!(
                "Pan to ({:.4}, {:.4}) at zoom {}",
                self.viewport.center.lat,
                self.viewport.center.lon,
                self.viewport.zoom
            );
        }
        changed
    }

    /// Zoom in one step. A no-op at the provider's maximum.
    pub fn zoom_in(&mut self) -> bool {
        let changed = self.apply_viewport(self.viewport.zoomed_in());
        if changed {
            log::debug!("🔍 Zoom in: {}", self.viewport.zoom);
        }
        changed
    }

    /// Zoom out one step. A no-op at the provider's minimum.
    pub fn zoom_out(&mut self) -> bool {
        let changed = self.apply_viewport(self.viewport.zoomed_out());
        if changed {
            log::debug!("🔍 Zoom out: {}", self.viewport.zoom);
        }
        changed
    }

    /// Swap the tile source, keeping center and zoom.
    pub fn switch_base_map(&mut self, base_map: BaseMap) -> bool {
        let changed = self.apply_viewport(self.viewport.with_base_map(base_map));
        if changed {
            log::debug!("Base map switched to {}", base_map.name());
        }
        changed
    }

    /// Nearest rendered marker whose drawn circle contains `point`.
    pub fn feature_at(&self, point: GeoPoint) -> Option<&RenderedMarker> {
        let degrees_per_pixel = 1.0 / self.viewport.pixels_per_degree();
        self.markers
            .iter()
            .map(|m| (m, m.position.distance_sq(&point)))
            .filter(|(m, d)| {
                let tolerance = f64::from(m.style.radius) * degrees_per_pixel;
                *d <= tolerance * tolerance
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(m, _)| m)
    }
}
