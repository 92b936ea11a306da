//! Layer data model for map overlays.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color_utils::Rgb;
use crate::error::{AtlasError, AtlasResult};
use crate::styler::MetricKind;

/// Stable identifier of a layer, unique within a registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The closed set of layer categories shown as panel sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayerCategory {
    Administrative,
    FraRights,
    Environment,
    VillageAssets,
    SchemeCoverage,
    Alerts,
}

impl LayerCategory {
    /// Parse a catalogue category tag.
    ///
    /// Accepts the kebab-case names and the short tags used by older
    /// catalogues (`fra`, `assets`, `schemes`).
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "administrative" => Some(Self::Administrative),
            "fra-rights" | "fra" => Some(Self::FraRights),
            "environment" => Some(Self::Environment),
            "village-assets" | "assets" => Some(Self::VillageAssets),
            "scheme-coverage" | "schemes" => Some(Self::SchemeCoverage),
            "alerts" => Some(Self::Alerts),
            _ => None,
        }
    }

    /// Canonical kebab-case tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Administrative => "administrative",
            Self::FraRights => "fra-rights",
            Self::Environment => "environment",
            Self::VillageAssets => "village-assets",
            Self::SchemeCoverage => "scheme-coverage",
            Self::Alerts => "alerts",
        }
    }

    /// Section heading in the layer panel.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Administrative => "Administrative",
            Self::FraRights => "FRA Boundaries",
            Self::Environment => "Environment",
            Self::VillageAssets => "Village Assets",
            Self::SchemeCoverage => "CSS Schemes",
            Self::Alerts => "Alerts",
        }
    }

    /// All categories in declaration order.
    pub fn all() -> &'static [LayerCategory] {
        &[
            Self::Administrative,
            Self::FraRights,
            Self::Environment,
            Self::VillageAssets,
            Self::SchemeCoverage,
            Self::Alerts,
        ]
    }
}

/// Static definition of a layer as it appears in the catalogue.
///
/// The category stays a plain string here so that an unknown tag surfaces
/// as [`AtlasError::UnknownCategory`] at registry initialization rather than
/// as an opaque parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDefinition {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Visibility when the registry is seeded
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    pub color: Rgb,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source: String,
    /// Metric that drives marker color for features on this layer
    #[serde(default)]
    pub metric: MetricKind,
}

fn default_opacity() -> f32 {
    1.0
}

impl LayerDefinition {
    /// Create a definition with the required fields; the rest take defaults.
    pub fn new(id: &str, name: &str, category: &str, enabled: bool, color: Rgb) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            enabled,
            opacity: default_opacity(),
            color,
            description: String::new(),
            source: String::new(),
            metric: MetricKind::default(),
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    pub fn with_metric(mut self, metric: MetricKind) -> Self {
        self.metric = metric;
        self
    }
}

/// A registered map overlay. Only `enabled` changes after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub category: LayerCategory,
    pub enabled: bool,
    pub opacity: f32,
    pub color: Rgb,
    pub description: String,
    pub source: String,
    pub metric: MetricKind,
}

impl TryFrom<&LayerDefinition> for Layer {
    type Error = AtlasError;

    fn try_from(def: &LayerDefinition) -> AtlasResult<Self> {
        let category =
            LayerCategory::parse(&def.category).ok_or_else(|| AtlasError::UnknownCategory {
                id: def.id.clone(),
                category: def.category.clone(),
            })?;

        if !(0.0..=1.0).contains(&def.opacity) {
            return Err(AtlasError::InvalidOpacity {
                id: def.id.clone(),
                opacity: def.opacity,
            });
        }

        Ok(Self {
            id: LayerId::new(def.id.as_str()),
            name: def.name.clone(),
            category,
            enabled: def.enabled,
            opacity: def.opacity,
            color: def.color,
            description: def.description.clone(),
            source: def.source.clone(),
            metric: def.metric,
        })
    }
}

impl From<&Layer> for LayerDefinition {
    fn from(layer: &Layer) -> Self {
        Self {
            id: layer.id.to_string(),
            name: layer.name.clone(),
            category: layer.category.tag().to_string(),
            enabled: layer.enabled,
            opacity: layer.opacity,
            color: layer.color,
            description: layer.description.clone(),
            source: layer.source.clone(),
            metric: layer.metric,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_utils::palette;

    #[test]
    fn test_category_parse_accepts_short_tags() {
        assert_eq!(LayerCategory::parse("fra"), Some(LayerCategory::FraRights));
        assert_eq!(
            LayerCategory::parse("assets"),
            Some(LayerCategory::VillageAssets)
        );
        assert_eq!(
            LayerCategory::parse("scheme-coverage"),
            Some(LayerCategory::SchemeCoverage)
        );
        assert_eq!(LayerCategory::parse("roads"), None);
    }

    #[test]
    fn test_category_tag_parses_back() {
        for cat in LayerCategory::all() {
            assert_eq!(LayerCategory::parse(cat.tag()), Some(*cat));
        }
    }

    #[test]
    fn test_layer_from_unknown_category() {
        let def = LayerDefinition::new("roads", "Roads", "transport", true, palette::WARNING);
        let err = Layer::try_from(&def).unwrap_err();
        assert!(matches!(err, AtlasError::UnknownCategory { ref category, .. } if category == "transport"));
    }

    #[test]
    fn test_layer_rejects_out_of_range_opacity() {
        let def = LayerDefinition::new("fire", "Fire", "alerts", true, palette::DANGER)
            .with_opacity(1.5);
        assert!(matches!(
            Layer::try_from(&def),
            Err(AtlasError::InvalidOpacity { .. })
        ));
    }

    #[test]
    fn test_definition_deserializes_with_defaults() {
        let json = r##"{"id":"fire-alerts","name":"Forest Fire Alerts","category":"alerts","color":"#ef4444"}"##;
        let def: LayerDefinition = serde_json::from_str(json).unwrap();
        assert!(!def.enabled);
        assert_eq!(def.opacity, 1.0);
        assert_eq!(def.metric, MetricKind::Saturation);
        let layer = Layer::try_from(&def).unwrap();
        assert_eq!(layer.category, LayerCategory::Alerts);
    }
}
