//! SVG surface for static map exports.
//!
//! Markers are placed with a linear lon/lat-to-pixel mapping around the
//! viewport center. This is a placement, not a cartographic projection.

use std::io::Write;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::color_utils::palette;
use crate::error::SurfaceError;
use crate::model::{BaseMap, GeoPoint, Viewport};

use super::{MapSurface, RenderedMarker};

/// A [`MapSurface`] that renders to an SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    viewport: Option<Viewport>,
    markers: Vec<RenderedMarker>,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            viewport: None,
            markers: Vec::new(),
        }
    }

    /// Pixel position of `point` in the current view, if mounted.
    pub fn to_pixel(&self, point: GeoPoint) -> Option<(f64, f64)> {
        let viewport = self.viewport?;
        let pixels_per_degree = viewport.pixels_per_degree();
        let x = f64::from(self.width) / 2.0 + (point.lon - viewport.center.lon) * pixels_per_degree;
        let y = f64::from(self.height) / 2.0 - (point.lat - viewport.center.lat) * pixels_per_degree;
        Some((x, y))
    }

    fn is_visible(&self, x: f64, y: f64, r: f64) -> bool {
        x + r >= 0.0
            && y + r >= 0.0
            && x - r <= f64::from(self.width)
            && y - r <= f64::from(self.height)
    }

    /// Render the current state as an SVG document.
    pub fn to_svg(&self) -> Result<String, SurfaceError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        let width = self.width.to_string();
        let height = self.height.to_string();
        let view_box = format!("0 0 {} {}", self.width, self.height);

        writer
            .write_event(Event::Start(BytesStart::new("svg").with_attributes([
                ("xmlns", "http://www.w3.org/2000/svg"),
                ("width", width.as_str()),
                ("height", height.as_str()),
                ("viewBox", view_box.as_str()),
            ])))
            .map_err(|e| SurfaceError::Xml(e.into()))?;

        if let Some(viewport) = &self.viewport {
            let summary = format!(
                "base={} zoom={} center={:.4},{:.4}",
                viewport.base_map.name(),
                viewport.zoom,
                viewport.center.lat,
                viewport.center.lon
            );
            write_text_element(&mut writer, BytesStart::new("metadata"), &summary)?;
        }

        writer
            .write_event(Event::Empty(BytesStart::new("rect").with_attributes([
                ("width", "100%"),
                ("height", "100%"),
                ("fill", "#f3f4f6"),
            ])))
            .map_err(|e| SurfaceError::Xml(e.into()))?;

        let outline = palette::OUTLINE.to_hex();
        for marker in &self.markers {
            let Some((x, y)) = self.to_pixel(marker.position) else {
                continue;
            };
            let r = f64::from(marker.style.radius);
            if !self.is_visible(x, y, r) {
                continue;
            }
            let (cx, cy, radius) = (format!("{:.1}", x), format!("{:.1}", y), format!("{:.1}", r));
            let fill = marker.style.fill.to_hex();
            let opacity = format!("{:.2}", marker.style.opacity);
            writer
                .write_event(Event::Empty(BytesStart::new("circle").with_attributes([
                    ("data-feature", marker.feature_id.as_str()),
                    ("data-layer", marker.layer_id.as_str()),
                    ("cx", cx.as_str()),
                    ("cy", cy.as_str()),
                    ("r", radius.as_str()),
                    ("fill", fill.as_str()),
                    ("fill-opacity", opacity.as_str()),
                    ("stroke", outline.as_str()),
                    ("stroke-width", "2"),
                ])))
                .map_err(|e| SurfaceError::Xml(e.into()))?;
        }

        if let Some(viewport) = &self.viewport {
            let y = self.height.saturating_sub(4).to_string();
            let attribution = BytesStart::new("text").with_attributes([
                ("x", "4"),
                ("y", y.as_str()),
                ("font-size", "10"),
                ("fill", "#6b7280"),
            ]);
            write_text_element(&mut writer, attribution, viewport.base_map.attribution())?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("svg")))
            .map_err(|e| SurfaceError::Xml(e.into()))?;

        let mut out = String::from_utf8_lossy(&writer.into_inner()).into_owned();
        out.push('\n');
        Ok(out)
    }

    /// Write the SVG document to `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), SurfaceError> {
        std::fs::write(path, self.to_svg()?)?;
        log::info!("Wrote {} markers to {:?}", self.markers.len(), path);
        Ok(())
    }
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    start: BytesStart<'_>,
    value: &str,
) -> Result<(), SurfaceError> {
    let end = start.to_end().into_owned();
    writer
        .write_event(Event::Start(start))
        .map_err(|e| SurfaceError::Xml(e.into()))?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(|e| SurfaceError::Xml(e.into()))?;
    writer
        .write_event(Event::End(end))
        .map_err(|e| SurfaceError::Xml(e.into()))?;
    Ok(())
}

impl MapSurface for SvgSurface {
    fn name(&self) -> &'static str {
        "svg"
    }

    fn mount(&mut self, viewport: &Viewport) -> Result<(), SurfaceError> {
        if self.width == 0 || self.height == 0 {
            return Err(SurfaceError::mount_failed(format!(
                "SVG surface has zero size ({}x{})",
                self.width, self.height
            )));
        }
        self.viewport = Some(*viewport);
        Ok(())
    }

    fn set_view(&mut self, viewport: &Viewport) {
        self.viewport = Some(*viewport);
    }

    fn set_base_map(&mut self, base_map: BaseMap) {
        if let Some(viewport) = &mut self.viewport {
            viewport.base_map = base_map;
        }
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
    }

    fn draw_marker(&mut self, marker: &RenderedMarker) {
        self.markers.push(marker.clone());
    }
}
