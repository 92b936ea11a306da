//! Data models for the atlas engine.

mod feature;
mod layer;
mod viewport;

pub use feature::{Feature, FeatureId, FeatureMetrics, GeoPoint};
pub use layer::{Layer, LayerCategory, LayerDefinition, LayerId};
pub use viewport::{BaseMap, Viewport};
