//! Message types for the atlas session.
//!
//! All user input reaches the engine as a [`Message`] in the Elm
//! architecture style; views only ever produce messages.

use crate::model::{BaseMap, Feature, FeatureId, GeoPoint, LayerId};

/// Layer visibility intents, produced by the layer panel.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerMessage {
    Toggle(LayerId),
    ShowAll,
    HideAll,
}

/// Viewport intents from the map controls.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportMessage {
    ZoomIn,
    ZoomOut,
    PanTo(GeoPoint, u8),
    SwitchBaseMap(BaseMap),
}

/// Feature activation and popup dismissal.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionMessage {
    /// A marker was activated by id
    Activate(FeatureId),
    /// A click on the map at a coordinate; hits the nearest marker if any
    ClickAt(GeoPoint),
    Dismiss,
}

/// Layer panel open/closed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMessage {
    Toggle,
    Open,
    Close,
}

/// Top-level message enum that delegates to sub-message types.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Layer(LayerMessage),
    Viewport(ViewportMessage),
    Selection(SelectionMessage),
    Panel(PanelMessage),
    /// A new feature snapshot from the aggregation collaborator
    SnapshotLoaded(Vec<Feature>),
}

impl Message {
    pub fn toggle_layer(id: &str) -> Self {
        Message::Layer(LayerMessage::Toggle(LayerId::new(id)))
    }

    pub fn show_all() -> Self {
        Message::Layer(LayerMessage::ShowAll)
    }

    pub fn hide_all() -> Self {
        Message::Layer(LayerMessage::HideAll)
    }

    pub fn zoom_in() -> Self {
        Message::Viewport(ViewportMessage::ZoomIn)
    }

    pub fn zoom_out() -> Self {
        Message::Viewport(ViewportMessage::ZoomOut)
    }

    pub fn select(id: &str) -> Self {
        Message::Selection(SelectionMessage::Activate(FeatureId::new(id)))
    }

    pub fn dismiss() -> Self {
        Message::Selection(SelectionMessage::Dismiss)
    }
}
