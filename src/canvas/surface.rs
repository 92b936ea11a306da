//! Rendering adapter interface.
//!
//! The canvas owns all map logic; a [`MapSurface`] only draws what it is told.
//! Concrete map libraries plug in by implementing this trait.

use crate::error::SurfaceError;
use crate::model::{BaseMap, Viewport};

use super::RenderedMarker;

/// A drawable map surface.
pub trait MapSurface {
    /// Short adapter name used in log lines.
    fn name(&self) -> &'static str;

    /// Mount the surface at the initial viewport. Called at most once.
    fn mount(&mut self, viewport: &Viewport) -> Result<(), SurfaceError>;

    /// Move the visible area.
    fn set_view(&mut self, viewport: &Viewport);

    /// Swap the tile source.
    fn set_base_map(&mut self, base_map: BaseMap);

    /// Remove every marker drawn so far.
    fn clear_markers(&mut self);

    /// Draw one marker.
    fn draw_marker(&mut self, marker: &RenderedMarker);
}
