//! Global constants for the atlas engine

/// Default map center (latitude, longitude), roughly central India
pub const DEFAULT_CENTER: (f64, f64) = (21.5, 82.5);

/// Default zoom level on mount
pub const DEFAULT_ZOOM: u8 = 5;

/// Zoom change per zoom-in/zoom-out step
pub const ZOOM_STEP: u8 = 1;

/// Marker radius in pixels when no size scale is configured
pub const DEFAULT_MARKER_RADIUS: f32 = 5.0;

/// Tile edge length in pixels, used to convert marker radius to degrees
pub const TILE_SIZE: f64 = 256.0;

/// Default SVG output width
pub const DEFAULT_SVG_WIDTH: u32 = 1024;

/// Default SVG output height
pub const DEFAULT_SVG_HEIGHT: u32 = 768;
