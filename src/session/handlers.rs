//! Message handlers for the atlas session.
//!
//! Each handler processes one category of messages, keeping
//! [`AtlasSession::update`] a plain dispatch.

use crate::canvas::MapSurface;
use crate::error::AtlasResult;
use crate::message::{LayerMessage, PanelMessage, SelectionMessage, ViewportMessage};

use super::AtlasSession;

impl<S: MapSurface> AtlasSession<S> {
    /// Handle layer panel intents.
    pub(super) fn handle_layer(&mut self, msg: LayerMessage) -> AtlasResult<()> {
        match msg {
            LayerMessage::Toggle(id) => {
                self.toggle(&id)?;
            }
            LayerMessage::ShowAll => {
                self.set_all(true)?;
            }
            LayerMessage::HideAll => {
                self.set_all(false)?;
            }
        }
        Ok(())
    }

    /// Handle map controls. Clamped or invalid requests are silent no-ops.
    pub(super) fn handle_viewport(&mut self, msg: ViewportMessage) {
        let changed = match msg {
            ViewportMessage::ZoomIn => self.zoom_in(),
            ViewportMessage::ZoomOut => self.zoom_out(),
            ViewportMessage::PanTo(center, zoom) => self.pan_to(center, zoom),
            ViewportMessage::SwitchBaseMap(base_map) => self.switch_base_map(base_map),
        };
        if !changed {
            log::trace!("Viewport message left view unchanged: {:?}", self.viewport());
        }
    }

    /// Handle marker activation and popup dismissal.
    pub(super) fn handle_selection(&mut self, msg: SelectionMessage) -> AtlasResult<()> {
        match msg {
            SelectionMessage::Activate(id) => self.select(&id)?,
            SelectionMessage::ClickAt(point) => {
                self.click_at(point)?;
            }
            SelectionMessage::Dismiss => {
                self.dismiss();
            }
        }
        Ok(())
    }

    /// Handle the panel's open/closed toggle.
    pub(super) fn handle_panel(&mut self, msg: PanelMessage) {
        self.panel.update(msg);
    }
}
