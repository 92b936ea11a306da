//! Threshold-driven feature styling.
//!
//! A feature's marker color comes from an ordered list of threshold bands
//! (highest threshold first). The first band whose `min_inclusive` the metric
//! meets wins; a metric below every threshold falls back to the last band.
//! Bands are always supplied by the caller, never baked into the lookup.

use serde::{Deserialize, Serialize};

use crate::color_utils::{Rgb, palette};
use crate::constants::DEFAULT_MARKER_RADIUS;
use crate::error::{AtlasError, AtlasResult};
use crate::model::{Feature, Layer};

/// Metric types that can drive marker color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Scheme/rights saturation percentage (0-100)
    #[default]
    Saturation,
    /// Vegetation index (0-1)
    Ndvi,
}

impl MetricKind {
    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::Saturation => "Saturation",
            MetricKind::Ndvi => "NDVI",
        }
    }

    /// Unit suffix used in legend labels.
    pub fn unit(&self) -> &'static str {
        match self {
            MetricKind::Saturation => "%",
            MetricKind::Ndvi => "",
        }
    }
}

/// A numeric cutoff mapped to a color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBand {
    pub min_inclusive: f64,
    pub color: Rgb,
    /// Legend wording; derived from the band's position when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ThresholdBand {
    pub fn new(min_inclusive: f64, color: Rgb) -> Self {
        Self {
            min_inclusive,
            color,
            label: None,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }
}

/// A validated, strictly descending list of threshold bands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ThresholdBands(Vec<ThresholdBand>);

impl ThresholdBands {
    /// Validate and wrap a band list.
    ///
    /// # Errors
    /// [`AtlasError::InvalidBands`] if the list is empty, contains a
    /// non-finite threshold, or is not strictly descending.
    pub fn new(bands: Vec<ThresholdBand>) -> AtlasResult<Self> {
        if bands.is_empty() {
            return Err(AtlasError::invalid_bands("at least one band is required"));
        }
        if let Some(band) = bands.iter().find(|b| !b.min_inclusive.is_finite()) {
            return Err(AtlasError::invalid_bands(format!(
                "threshold {} is not finite",
                band.min_inclusive
            )));
        }
        if let Some(pair) = bands
            .windows(2)
            .find(|w| w[0].min_inclusive <= w[1].min_inclusive)
        {
            return Err(AtlasError::invalid_bands(format!(
                "thresholds must be strictly descending, found {} before {}",
                pair[0].min_inclusive, pair[1].min_inclusive
            )));
        }
        Ok(Self(bands))
    }

    /// Default saturation bands: ≥70 success, ≥50 warning, else danger.
    pub fn saturation() -> Self {
        Self(vec![
            ThresholdBand::new(70.0, palette::SUCCESS),
            ThresholdBand::new(50.0, palette::WARNING),
            ThresholdBand::new(0.0, palette::DANGER),
        ])
    }

    /// Default NDVI bands: ≥0.6 healthy, ≥0.3 moderate, else sparse.
    pub fn ndvi() -> Self {
        Self(vec![
            ThresholdBand::new(0.6, palette::SUCCESS),
            ThresholdBand::new(0.3, palette::WARNING),
            ThresholdBand::new(0.0, palette::DANGER),
        ])
    }

    pub fn as_slice(&self) -> &[ThresholdBand] {
        &self.0
    }

    /// The band a metric falls into.
    pub fn band_for(&self, metric: f64) -> &ThresholdBand {
        self.0
            .iter()
            .find(|band| metric >= band.min_inclusive)
            .unwrap_or_else(|| self.lowest())
    }

    /// The fallback band.
    pub fn lowest(&self) -> &ThresholdBand {
        // Non-empty by construction.
        &self.0[self.0.len() - 1]
    }

    /// Legend entries, one per band, highest first.
    pub fn legend(&self, kind: MetricKind) -> Vec<LegendEntry> {
        let unit = kind.unit();
        let count = self.0.len();
        self.0
            .iter()
            .enumerate()
            .map(|(i, band)| {
                let tier = match (i, count) {
                    (_, 1) => "All",
                    (0, _) => "High",
                    (i, n) if i + 1 == n => "Low",
                    _ => "Medium",
                };
                let range = if count == 1 {
                    String::new()
                } else if i == 0 {
                    format!(" (≥{}{})", format_threshold(band.min_inclusive), unit)
                } else if i + 1 == count {
                    format!(" (<{}{})", format_threshold(self.0[i - 1].min_inclusive), unit)
                } else {
                    format!(
                        " ({}–{}{})",
                        format_threshold(band.min_inclusive),
                        format_threshold(self.0[i - 1].min_inclusive),
                        unit
                    )
                };
                LegendEntry {
                    color: band.color,
                    label: band
                        .label
                        .clone()
                        .unwrap_or_else(|| format!("{}{}", tier, range)),
                }
            })
            .collect()
    }
}

impl<'de> Deserialize<'de> for ThresholdBands {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bands = Vec::<ThresholdBand>::deserialize(deserializer)?;
        ThresholdBands::new(bands).map_err(serde::de::Error::custom)
    }
}

fn format_threshold(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// One line of a map legend.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub color: Rgb,
    pub label: String,
}

/// Color for `metric` under `bands`.
///
/// Total over every input: non-finite metrics fail every comparison and
/// therefore land in the lowest band.
pub fn style_for(metric: f64, bands: &ThresholdBands) -> Rgb {
    bands.band_for(metric).color
}

/// Linear marker sizing over a feature's total claims.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeScale {
    pub min_radius: f32,
    pub max_radius: f32,
    /// Claims count at which `max_radius` is reached
    pub max_value: f64,
}

impl SizeScale {
    pub fn radius_for(&self, value: Option<f64>) -> f32 {
        let Some(value) = value.filter(|v| v.is_finite()) else {
            return self.min_radius;
        };
        if self.max_value <= 0.0 {
            return self.min_radius;
        }
        let t = (value / self.max_value).clamp(0.0, 1.0) as f32;
        self.min_radius + (self.max_radius - self.min_radius) * t
    }
}

/// Resolved visual encoding of one marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub fill: Rgb,
    pub radius: f32,
    pub opacity: f32,
}

/// Caller-supplied styling policy: bands per metric and optional sizing.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRules {
    pub saturation: ThresholdBands,
    pub ndvi: ThresholdBands,
    pub size: Option<SizeScale>,
}

impl StyleRules {
    pub fn bands(&self, kind: MetricKind) -> &ThresholdBands {
        match kind {
            MetricKind::Saturation => &self.saturation,
            MetricKind::Ndvi => &self.ndvi,
        }
    }

    /// Marker style for a feature drawn on `layer`.
    ///
    /// Features without the layer's metric are drawn in the layer color.
    pub fn marker_style(&self, layer: &Layer, feature: &Feature) -> MarkerStyle {
        let fill = feature
            .metrics
            .value(layer.metric)
            .map(|value| style_for(value, self.bands(layer.metric)))
            .unwrap_or(layer.color);
        let radius = self
            .size
            .map(|scale| scale.radius_for(feature.metrics.total_claims.map(f64::from)))
            .unwrap_or(DEFAULT_MARKER_RADIUS);
        MarkerStyle {
            fill,
            radius,
            opacity: layer.opacity,
        }
    }
}

impl Default for StyleRules {
    fn default() -> Self {
        Self {
            saturation: ThresholdBands::saturation(),
            ndvi: ThresholdBands::ndvi(),
            size: None,
        }
    }
}
