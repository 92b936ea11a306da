//! Headless surface that records draw calls instead of drawing.
//!
//! Used by tests and by embedders that only need the render set.

use crate::error::SurfaceError;
use crate::model::{BaseMap, Viewport};

use super::{MapSurface, RenderedMarker};

/// A [`MapSurface`] that keeps everything it is asked to draw.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub mounted: bool,
    pub mount_calls: usize,
    /// Last viewport pushed to the surface
    pub view: Option<Viewport>,
    /// Last base map pushed to the surface
    pub base_map: Option<BaseMap>,
    /// Markers currently on the surface
    pub markers: Vec<RenderedMarker>,
    /// Total markers drawn since mount, across redraws
    pub draw_calls: usize,
    fail_with: Option<String>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose mount always fails with `reason`.
    pub fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            ..Self::default()
        }
    }
}

impl MapSurface for RecordingSurface {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn mount(&mut self, viewport: &Viewport) -> Result<(), SurfaceError> {
        self.mount_calls += 1;
        if let Some(reason) = &self.fail_with {
            return Err(SurfaceError::mount_failed(reason.as_str()));
        }
        self.mounted = true;
        self.view = Some(*viewport);
        self.base_map = Some(viewport.base_map);
        Ok(())
    }

    fn set_view(&mut self, viewport: &Viewport) {
        self.view = Some(*viewport);
    }

    fn set_base_map(&mut self, base_map: BaseMap) {
        self.base_map = Some(base_map);
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
    }

    fn draw_marker(&mut self, marker: &RenderedMarker) {
        self.draw_calls += 1;
        self.markers.push(marker.clone());
    }
}
