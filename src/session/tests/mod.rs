//! Tests for the atlas session.
//!
//! These drive a session end to end against a headless recording surface,
//! covering the documented scenarios, event delivery and invariants that
//! must hold across arbitrary input sequences.

mod property_tests;
mod scenario_tests;

use crate::canvas::RecordingSurface;
use crate::catalogue::default_catalogue;
use crate::color_utils::palette;
use crate::model::{Feature, FeatureMetrics, GeoPoint, LayerDefinition};

use super::AtlasSession;

/// A positioned village feature with a saturation metric.
fn village(id: &str, layer: &str, lat: f64, lon: f64, saturation: f64) -> Feature {
    Feature::new(id, layer, Some(GeoPoint::new(lat, lon))).with_metrics(FeatureMetrics {
        name: Some(format!("Village {}", id)),
        district: Some("Barwani".to_string()),
        state: Some("Madhya Pradesh".to_string()),
        total_claims: Some(100),
        granted_claims: Some(saturation.round() as u32),
        saturation: Some(saturation),
        ..Default::default()
    })
}

/// Mounted session with three enabled layers: `ifr`, `cfr` and `fire`.
fn three_layer_session() -> AtlasSession<RecordingSurface> {
    let catalogue = [
        LayerDefinition::new("ifr", "IFR", "fra", true, palette::SUCCESS),
        LayerDefinition::new("cfr", "CFR", "fra", true, palette::SUCCESS),
        LayerDefinition::new("fire", "Fire", "alerts", true, palette::DANGER),
    ];
    let mut session = AtlasSession::new(&catalogue, RecordingSurface::new()).unwrap();
    session.mount().unwrap();
    session
}

/// Mounted session over the built-in 14-layer catalogue.
fn default_session() -> AtlasSession<RecordingSurface> {
    let mut session = AtlasSession::new(&default_catalogue(), RecordingSurface::new()).unwrap();
    session.mount().unwrap();
    session
}

/// Two features per layer of `three_layer_session`, well apart from each other.
fn three_layer_snapshot() -> Vec<Feature> {
    ["ifr", "cfr", "fire"]
        .iter()
        .enumerate()
        .flat_map(|(i, layer)| {
            (0..2).map(move |j| {
                let n = i * 2 + j;
                village(
                    &format!("{}-{}", layer, j),
                    layer,
                    18.0 + n as f64,
                    76.0 + n as f64,
                    40.0 + 10.0 * n as f64,
                )
            })
        })
        .collect()
}
