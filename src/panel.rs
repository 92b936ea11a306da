//! Layer panel view model.
//!
//! The panel holds only its own open/closed flag. Everything it shows is
//! projected from the registry through the category grouper, and every
//! action is handed back as a [`LayerMessage`].

use std::fmt;

use crate::color_utils::Rgb;
use crate::grouping::group_by_category;
use crate::message::{LayerMessage, PanelMessage};
use crate::model::{LayerCategory, LayerId};
use crate::registry::LayerRegistry;

/// One togglable row.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub id: LayerId,
    pub name: String,
    pub source: String,
    /// Shown as tooltip
    pub description: String,
    pub color: Rgb,
    pub enabled: bool,
    pub on_click: LayerMessage,
}

/// A category heading and its rows.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSection {
    pub category: LayerCategory,
    pub label: &'static str,
    pub rows: Vec<PanelRow>,
}

/// Everything needed to draw the open panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub enabled_count: usize,
    pub sections: Vec<PanelSection>,
    pub show_all: LayerMessage,
    pub hide_all: LayerMessage,
}

impl PanelView {
    /// Header text, e.g. `Map Layers (6 on)`.
    pub fn header(&self) -> String {
        format!("Map Layers ({} on)", self.enabled_count)
    }
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;
        for section in &self.sections {
            writeln!(f, "  {}", section.label.to_uppercase())?;
            for row in &section.rows {
                let mark = if row.enabled { '●' } else { '○' };
                writeln!(f, "    {} {} [{}] {}", mark, row.name, row.source, row.color)?;
            }
        }
        writeln!(f, "  [Show All] [Hide All]")
    }
}

/// The layer panel.
#[derive(Debug, Clone)]
pub struct LayerPanel {
    open: bool,
}

impl LayerPanel {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn update(&mut self, msg: PanelMessage) {
        self.open = match msg {
            PanelMessage::Toggle => !self.open,
            PanelMessage::Open => true,
            PanelMessage::Close => false,
        };
        log::debug!("Layer panel {}", if self.open { "opened" } else { "closed" });
    }

    /// Build the panel view, or `None` while closed.
    pub fn view(&self, registry: &LayerRegistry) -> Option<PanelView> {
        if !self.open {
            return None;
        }
        let sections = group_by_category(registry.layers())
            .into_iter()
            .map(|group| PanelSection {
                category: group.category,
                label: group.category.label(),
                rows: group
                    .layers
                    .iter()
                    .map(|layer| PanelRow {
                        id: layer.id.clone(),
                        name: layer.name.clone(),
                        source: layer.source.clone(),
                        description: layer.description.clone(),
                        color: layer.color,
                        enabled: layer.enabled,
                        on_click: LayerMessage::Toggle(layer.id.clone()),
                    })
                    .collect(),
            })
            .collect();

        Some(PanelView {
            enabled_count: registry.enabled_count(),
            sections,
            show_all: LayerMessage::ShowAll,
            hide_all: LayerMessage::HideAll,
        })
    }
}

impl Default for LayerPanel {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::default_catalogue;

    #[test]
    fn test_closed_panel_has_no_view() {
        let registry = LayerRegistry::initialize(&default_catalogue()).unwrap();
        let mut panel = LayerPanel::new(true);
        assert!(panel.view(&registry).is_some());
        panel.update(PanelMessage::Toggle);
        assert!(!panel.is_open());
        assert!(panel.view(&registry).is_none());
        panel.update(PanelMessage::Open);
        assert!(panel.is_open());
    }

    #[test]
    fn test_view_reflects_registry() {
        let mut registry = LayerRegistry::initialize(&default_catalogue()).unwrap();
        let panel = LayerPanel::default();

        let view = panel.view(&registry).unwrap();
        assert_eq!(view.header(), "Map Layers (6 on)");
        assert_eq!(view.sections.len(), 6);
        assert_eq!(view.sections[1].label, "FRA Boundaries");
        let row = &view.sections[1].rows[0];
        assert_eq!(row.on_click, LayerMessage::Toggle(LayerId::new("ifr-boundaries")));

        registry.toggle(&"ifr-boundaries".into()).unwrap();
        let view = panel.view(&registry).unwrap();
        assert_eq!(view.enabled_count, 5);
        assert!(!view.sections[1].rows[0].enabled);
    }

    #[test]
    fn test_text_rendering() {
        let registry = LayerRegistry::initialize(&default_catalogue()).unwrap();
        let text = LayerPanel::default().view(&registry).unwrap().to_string();
        assert!(text.starts_with("Map Layers (6 on)"));
        assert!(text.contains("● Forest Fire Alerts [ISRO FIRMS]"));
        assert!(text.contains("○ JJM Coverage"));
        assert!(text.contains("CSS SCHEMES"));
    }
}
