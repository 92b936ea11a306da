//! Point features supplied by the external aggregation collaborator.
//!
//! Features are a read-only snapshot: the engine never mutates them, it
//! filters, styles and draws whatever the latest snapshot holds.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::layer::LayerId;
use crate::styler::MetricKind;

/// Stable identifier of a feature (e.g. a village code).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(String);

impl FeatureId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FeatureId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether both components are finite and within WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Squared planar distance in degrees. Only used for nearest-marker picks.
    pub fn distance_sq(&self, other: &GeoPoint) -> f64 {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        dlat * dlat + dlon * dlon
    }
}

/// Metric payload carried by a feature. Every field is optional; missing
/// display fields become placeholders in the detail payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureMetrics {
    pub name: Option<String>,
    pub block: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub total_claims: Option<u32>,
    pub granted_claims: Option<u32>,
    /// Saturation percentage, 0-100
    pub saturation: Option<f64>,
    /// Vegetation index, 0-1
    pub ndvi: Option<f64>,
    pub water_bodies: Option<u32>,
}

impl FeatureMetrics {
    /// Value of the metric that drives marker color, if present.
    pub fn value(&self, kind: MetricKind) -> Option<f64> {
        match kind {
            MetricKind::Saturation => self.saturation,
            MetricKind::Ndvi => self.ndvi,
        }
    }
}

/// One renderable point belonging to a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: FeatureId,
    pub layer_id: LayerId,
    /// `None` when the source could not resolve a coordinate
    pub position: Option<GeoPoint>,
    pub metrics: FeatureMetrics,
}

impl Feature {
    pub fn new(id: &str, layer_id: &str, position: Option<GeoPoint>) -> Self {
        Self {
            id: FeatureId::new(id),
            layer_id: LayerId::new(layer_id),
            position,
            metrics: FeatureMetrics::default(),
        }
    }

    pub fn with_metrics(mut self, metrics: FeatureMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// The position if it is present and valid.
    pub fn resolved_position(&self) -> Option<GeoPoint> {
        self.position.filter(GeoPoint::is_valid)
    }
}
