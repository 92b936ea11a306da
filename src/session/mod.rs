//! The atlas session: one embedded map view and everything it owns.
//!
//! A session holds the layer registry, the canvas, the selection controller
//! and the layer panel for a single view. All state changes go through
//! [`AtlasSession::update`] or the equivalent direct methods, run to
//! completion, and are announced on the event bus only when something
//! actually changed.

mod handlers;

#[cfg(test)]
mod tests;

use std::sync::mpsc::Receiver;

use crate::canvas::{CanvasState, MapCanvas, MapSurface, RegionFilter, RenderReport};
use crate::config::AtlasConfig;
use crate::error::{AtlasError, AtlasResult};
use crate::events::{AtlasEvent, EventBus};
use crate::message::Message;
use crate::model::{BaseMap, Feature, FeatureId, GeoPoint, LayerDefinition, LayerId, Viewport};
use crate::panel::{LayerPanel, PanelView};
use crate::registry::LayerRegistry;
use crate::selection::{Selection, SelectionController};
use crate::styler::{LegendEntry, MetricKind, StyleRules};

/// A single atlas view.
pub struct AtlasSession<S: MapSurface> {
    registry: LayerRegistry,
    rules: StyleRules,
    canvas: MapCanvas<S>,
    selection: SelectionController,
    panel: LayerPanel,
    /// Latest snapshot from the aggregation collaborator
    features: Vec<Feature>,
    filter: RegionFilter,
    last_report: RenderReport,
    events: EventBus,
}

impl<S: MapSurface> AtlasSession<S> {
    /// Build a session from a catalogue with default styling and viewport.
    ///
    /// # Errors
    /// Configuration errors from [`LayerRegistry::initialize`].
    pub fn new(catalogue: &[LayerDefinition], surface: S) -> AtlasResult<Self> {
        Ok(Self::assemble(
            LayerRegistry::initialize(catalogue)?,
            StyleRules::default(),
            MapCanvas::new(surface, Viewport::default()),
            LayerPanel::default(),
        ))
    }

    /// Build a session from a loaded configuration.
    pub fn from_config(config: &AtlasConfig, surface: S) -> AtlasResult<Self> {
        Ok(Self::assemble(
            LayerRegistry::initialize(&config.layers)?,
            config.style_rules(),
            MapCanvas::new(surface, config.preferences.initial_viewport()),
            LayerPanel::new(config.preferences.layer_panel_open),
        ))
    }

    fn assemble(
        registry: LayerRegistry,
        rules: StyleRules,
        canvas: MapCanvas<S>,
        panel: LayerPanel,
    ) -> Self {
        Self {
            registry,
            rules,
            canvas,
            selection: SelectionController::new(),
            panel,
            features: Vec::new(),
            filter: RegionFilter::default(),
            last_report: RenderReport::default(),
            events: EventBus::new(),
        }
    }

    // === Accessors ===

    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    pub fn canvas(&self) -> &MapCanvas<S> {
        &self.canvas
    }

    pub fn canvas_state(&self) -> &CanvasState {
        self.canvas.state()
    }

    pub fn viewport(&self) -> &Viewport {
        self.canvas.viewport()
    }

    pub fn style_rules(&self) -> &StyleRules {
        &self.rules
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn region_filter(&self) -> &RegionFilter {
        &self.filter
    }

    /// Counts from the most recent render pass.
    pub fn last_report(&self) -> &RenderReport {
        &self.last_report
    }

    pub fn selected(&self) -> Option<&Selection> {
        self.selection.selected()
    }

    pub fn panel(&self) -> &LayerPanel {
        &self.panel
    }

    /// The panel's view model, `None` while the panel is closed.
    pub fn panel_view(&self) -> Option<PanelView> {
        self.panel.view(&self.registry)
    }

    pub fn enabled_count(&self) -> usize {
        self.registry.enabled_count()
    }

    /// e.g. `Zoom: 5`
    pub fn zoom_badge(&self) -> String {
        format!("Zoom: {}", self.viewport().zoom)
    }

    /// e.g. `6 layers active`
    pub fn layers_badge(&self) -> String {
        format!("{} layers active", self.enabled_count())
    }

    pub fn legend(&self, kind: MetricKind) -> Vec<LegendEntry> {
        self.rules.bands(kind).legend(kind)
    }

    /// Register an observer for [`AtlasEvent`]s.
    pub fn subscribe(&mut self) -> Receiver<AtlasEvent> {
        self.events.subscribe()
    }

    // === Lifecycle ===

    /// Mount the map surface.
    ///
    /// A failure is terminal: subscribers receive [`AtlasEvent::CanvasFailed`]
    /// once and every later render returns [`AtlasError::CanvasFailed`].
    pub fn mount(&mut self) -> AtlasResult<()> {
        let was_failed = self.canvas.state().is_failed();
        let result = self.canvas.mount();
        if let (false, CanvasState::Failed(reason)) = (was_failed, self.canvas.state()) {
            let reason = reason.clone();
            self.events.emit(AtlasEvent::CanvasFailed(reason));
        }
        result
    }

    /// Dispatch a message to its handler.
    pub fn update(&mut self, message: Message) -> AtlasResult<()> {
        match message {
            Message::Layer(msg) => self.handle_layer(msg),
            Message::Viewport(msg) => {
                self.handle_viewport(msg);
                Ok(())
            }
            Message::Selection(msg) => self.handle_selection(msg),
            Message::Panel(msg) => {
                self.handle_panel(msg);
                Ok(())
            }
            Message::SnapshotLoaded(features) => self.load_snapshot(features).map(|_| ()),
        }
    }

    // === Layers ===

    /// Flip one layer and re-render.
    ///
    /// # Returns
    /// The layer's new `enabled` value.
    ///
    /// # Errors
    /// [`AtlasError::LayerNotFound`] for an unknown id, leaving every flag
    /// untouched.
    pub fn toggle(&mut self, id: &LayerId) -> AtlasResult<bool> {
        self.ensure_usable()?;
        let enabled = self.registry.toggle(id)?;
        self.announce_enabled_layers();
        self.rerender()?;
        Ok(enabled)
    }

    /// Show or hide every layer. Returns whether any flag changed.
    pub fn set_all(&mut self, enabled: bool) -> AtlasResult<bool> {
        self.ensure_usable()?;
        if !self.registry.set_all(enabled) {
            return Ok(false);
        }
        self.announce_enabled_layers();
        self.rerender()?;
        Ok(true)
    }

    // === Feature data ===

    /// Replace the snapshot and re-render. A selected feature that is no
    /// longer rendered is deselected; one that is still rendered has its
    /// detail re-resolved from the new metrics.
    pub fn load_snapshot(&mut self, features: Vec<Feature>) -> AtlasResult<RenderReport> {
        self.ensure_usable()?;
        log::debug!("Snapshot refreshed with {} features", features.len());
        self.features = features;
        self.rerender()
    }

    /// Restrict rendering to a state and/or district.
    pub fn set_region_filter(&mut self, filter: RegionFilter) -> AtlasResult<RenderReport> {
        self.ensure_usable()?;
        self.filter = filter;
        self.rerender()
    }

    // === Viewport ===

    pub fn zoom_in(&mut self) -> bool {
        self.usable() && self.canvas.zoom_in() && self.announce_viewport()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.usable() && self.canvas.zoom_out() && self.announce_viewport()
    }

    pub fn pan_to(&mut self, center: GeoPoint, zoom: u8) -> bool {
        self.usable() && self.canvas.pan_to(center, zoom) && self.announce_viewport()
    }

    pub fn switch_base_map(&mut self, base_map: BaseMap) -> bool {
        self.usable() && self.canvas.switch_base_map(base_map) && self.announce_viewport()
    }

    // === Selection ===

    /// Select a rendered feature, replacing any previous selection.
    ///
    /// # Errors
    /// [`AtlasError::FeatureNotFound`] if the id is not in the rendered set;
    /// hidden, filtered and unpositioned features cannot be selected.
    pub fn select(&mut self, id: &FeatureId) -> AtlasResult<()> {
        let marker = self
            .canvas
            .markers()
            .iter()
            .find(|m| &m.feature_id == id)
            .ok_or_else(|| AtlasError::feature_not_found(id.as_str()))?;
        let feature = self
            .features
            .iter()
            .find(|f| f.id == marker.feature_id && f.layer_id == marker.layer_id)
            .ok_or_else(|| AtlasError::feature_not_found(id.as_str()))?;

        if self.selection.select(feature) {
            self.announce_selection();
        }
        Ok(())
    }

    /// Select whatever marker lies under `point`; an empty spot dismisses.
    ///
    /// # Returns
    /// The feature hit, if any.
    pub fn click_at(&mut self, point: GeoPoint) -> AtlasResult<Option<FeatureId>> {
        let hit = self.canvas.feature_at(point).map(|m| m.feature_id.clone());
        match &hit {
            Some(id) => self.select(id)?,
            None => {
                self.dismiss();
            }
        }
        Ok(hit)
    }

    /// Close the popup. Returns whether something was selected.
    pub fn dismiss(&mut self) -> bool {
        let changed = self.selection.dismiss();
        if changed {
            self.announce_selection();
        }
        changed
    }

    // === Internals ===

    fn usable(&self) -> bool {
        !self.canvas.state().is_failed()
    }

    fn ensure_usable(&self) -> AtlasResult<()> {
        match self.canvas.state() {
            CanvasState::Failed(reason) => Err(AtlasError::CanvasFailed {
                reason: reason.clone(),
            }),
            _ => Ok(()),
        }
    }

    fn rerender(&mut self) -> AtlasResult<RenderReport> {
        let report = self
            .canvas
            .render(&self.registry, &self.rules, &self.features, &self.filter)?;
        if !report.dropped.is_empty() {
            log::warn!(
                "{} features not drawn: no resolvable position",
                report.dropped.len()
            );
        }

        let canvas = &self.canvas;
        let mut selection_changed = self.selection.retain(|id, layer| canvas.renders(id, layer));
        let current = self.selection.selected().and_then(|selected| {
            self.features
                .iter()
                .find(|f| f.id == selected.feature_id && f.layer_id == selected.layer_id)
        });
        if let Some(feature) = current {
            selection_changed |= self.selection.refresh(feature);
        }
        if selection_changed {
            self.announce_selection();
        }

        self.last_report = report.clone();
        Ok(report)
    }

    fn announce_enabled_layers(&mut self) {
        self.events
            .emit(AtlasEvent::EnabledLayersChanged(self.registry.enabled_ids()));
    }

    /// Always returns `true` so it can end a change-detecting chain.
    fn announce_viewport(&mut self) -> bool {
        self.events
            .emit(AtlasEvent::ViewportChanged(*self.canvas.viewport()));
        true
    }

    fn announce_selection(&mut self) {
        let selection = self.selection.selected().cloned().map(Box::new);
        self.events.emit(AtlasEvent::SelectionChanged(selection));
    }
}
