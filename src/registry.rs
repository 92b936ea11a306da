//! Layer registry: the catalogue of overlays and their per-session visibility.
//!
//! A registry is owned by one atlas view and seeded once from static
//! definitions. Afterwards only the `enabled` flags change.

use std::collections::{HashMap, HashSet};

use crate::error::{AtlasError, AtlasResult};
use crate::model::{Layer, LayerDefinition, LayerId};

/// Registry of the layers available to an atlas view.
#[derive(Debug, Clone, Default)]
pub struct LayerRegistry {
    /// Layers in catalogue order
    layers: Vec<Layer>,
    /// Position of each id in `layers`
    index: HashMap<LayerId, usize>,
}

impl LayerRegistry {
    /// Seed a registry from catalogue definitions.
    ///
    /// # Errors
    /// Fails fast with a configuration error on duplicate ids, unknown
    /// categories or out-of-range opacity.
    pub fn initialize(catalogue: &[LayerDefinition]) -> AtlasResult<Self> {
        let mut registry = Self {
            layers: Vec::with_capacity(catalogue.len()),
            index: HashMap::with_capacity(catalogue.len()),
        };

        for def in catalogue {
            let layer = Layer::try_from(def)?;
            if registry.index.contains_key(&layer.id) {
                return Err(AtlasError::DuplicateLayerId { id: def.id.clone() });
            }
            registry
                .index
                .insert(layer.id.clone(), registry.layers.len());
            registry.layers.push(layer);
        }

        log::info!(
            "Layer registry initialized: {} layers, {} enabled",
            registry.len(),
            registry.enabled_count()
        );
        Ok(registry)
    }

    /// Flip a layer's visibility.
    ///
    /// # Returns
    /// The layer's new `enabled` value.
    pub fn toggle(&mut self, id: &LayerId) -> AtlasResult<bool> {
        let layer = self.get_mut(id).ok_or_else(|| AtlasError::not_found(id.as_str()))?;
        layer.enabled = !layer.enabled;
        log::debug!(
            "Layer '{}' {}",
            layer.id,
            if layer.enabled { "enabled" } else { "disabled" }
        );
        Ok(layer.enabled)
    }

    /// Show or hide every layer.
    ///
    /// # Returns
    /// Whether any flag actually changed.
    pub fn set_all(&mut self, enabled: bool) -> bool {
        let mut changed = false;
        for layer in &mut self.layers {
            changed |= layer.enabled != enabled;
            layer.enabled = enabled;
        }
        log::debug!(
            "{} all {} layers",
            if enabled { "Showing" } else { "Hiding" },
            self.layers.len()
        );
        changed
    }

    /// Number of layers currently enabled.
    pub fn enabled_count(&self) -> usize {
        self.layers.iter().filter(|l| l.enabled).count()
    }

    /// Ids of enabled layers, in catalogue order.
    pub fn enabled_ids(&self) -> Vec<LayerId> {
        self.layers
            .iter()
            .filter(|l| l.enabled)
            .map(|l| l.id.clone())
            .collect()
    }

    /// Enabled ids as a set, for visibility filtering.
    pub fn enabled_set(&self) -> HashSet<LayerId> {
        self.layers
            .iter()
            .filter(|l| l.enabled)
            .map(|l| l.id.clone())
            .collect()
    }

    pub fn is_enabled(&self, id: &LayerId) -> bool {
        self.get(id).is_some_and(|l| l.enabled)
    }

    pub fn get(&self, id: &LayerId) -> Option<&Layer> {
        self.index.get(id).map(|&i| &self.layers[i])
    }

    fn get_mut(&mut self, id: &LayerId) -> Option<&mut Layer> {
        let i = *self.index.get(id)?;
        self.layers.get_mut(i)
    }

    /// All layers in catalogue order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
