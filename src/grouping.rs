//! Category grouping of registry layers for panel display.
//!
//! Derived on demand, never stored: categories appear in the order they are
//! first seen and each keeps its layers in registry order.

use crate::model::{Layer, LayerCategory};

/// Layers of one category, in registry order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: LayerCategory,
    pub layers: Vec<&'a Layer>,
}

impl CategoryGroup<'_> {
    pub fn enabled_count(&self) -> usize {
        self.layers.iter().filter(|l| l.enabled).count()
    }
}

/// Group layers by category, preserving first-seen category order.
pub fn group_by_category(layers: &[Layer]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    for layer in layers {
        // At most six categories.
        match groups.iter_mut().find(|g| g.category == layer.category) {
            Some(group) => group.layers.push(layer),
            None => groups.push(CategoryGroup {
                category: layer.category,
                layers: vec![layer],
            }),
        }
    }
    groups
}
