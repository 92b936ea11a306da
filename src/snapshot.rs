//! Feature snapshot loading.
//!
//! Snapshots come from the aggregation collaborator as a JSON array of
//! village-style records. Positions are taken from `latitude`/`longitude`
//! when both are present, otherwise from `gpsCenter`. Records with neither
//! keep `position: None` and are dropped by the canvas, never placed at a
//! made-up default.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::model::{Feature, FeatureId, FeatureMetrics, GeoPoint, LayerId};

/// Errors that can occur while reading a snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// I/O error reading the snapshot file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: Option<f64>,
    lng: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AssetRecord {
    ndvi_score: Option<f64>,
    water_bodies_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeatureRecord {
    #[serde(alias = "code")]
    id: String,
    #[serde(default)]
    layer_id: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    gps_center: Option<LatLng>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    block: Option<String>,
    #[serde(default)]
    district: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    total_claims: Option<u32>,
    #[serde(default)]
    granted_claims: Option<u32>,
    #[serde(default, alias = "saturationScore")]
    saturation: Option<f64>,
    #[serde(default)]
    ndvi: Option<f64>,
    #[serde(default)]
    water_bodies: Option<u32>,
    #[serde(default)]
    assets: Option<AssetRecord>,
}

impl FeatureRecord {
    fn position(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => self
                .gps_center
                .as_ref()
                .and_then(|c| Some(GeoPoint::new(c.lat?, c.lng?))),
        }
    }

    fn into_feature(self, default_layer: &LayerId) -> Feature {
        let position = self.position();
        let assets = self.assets.unwrap_or_default();
        Feature {
            id: FeatureId::new(self.id),
            layer_id: self
                .layer_id
                .map(LayerId::new)
                .unwrap_or_else(|| default_layer.clone()),
            position,
            metrics: FeatureMetrics {
                name: self.name,
                block: self.block,
                district: self.district,
                state: self.state,
                total_claims: self.total_claims,
                granted_claims: self.granted_claims,
                saturation: self.saturation,
                ndvi: self.ndvi.or(assets.ndvi_score),
                water_bodies: self.water_bodies.or(assets.water_bodies_count),
            },
        }
    }
}

/// Parse a snapshot. Records without `layerId` are assigned `default_layer`.
pub fn parse_snapshot(json: &str, default_layer: &LayerId) -> Result<Vec<Feature>, SnapshotError> {
    let records: Vec<FeatureRecord> = serde_json::from_str(json)?;
    let features: Vec<Feature> = records
        .into_iter()
        .map(|r| r.into_feature(default_layer))
        .collect();
    let unresolved = features.iter().filter(|f| f.resolved_position().is_none()).count();
    if unresolved > 0 {
        log::warn!(
            "Snapshot has {} of {} features without a resolvable position",
            unresolved,
            features.len()
        );
    }
    Ok(features)
}

/// Read and parse a snapshot file.
pub fn load_snapshot(path: &Path, default_layer: &LayerId) -> Result<Vec<Feature>, SnapshotError> {
    let json = std::fs::read_to_string(path)?;
    let features = parse_snapshot(&json, default_layer)?;
    log::info!("Loaded {} features from {:?}", features.len(), path);
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_layer() -> LayerId {
        LayerId::new("ifr-boundaries")
    }

    #[test]
    fn test_village_record_with_gps_center_and_assets() {
        let json = r#"[{
            "code": "MP-BRW-001",
            "name": "Sendhwa",
            "block": "Sendhwa",
            "district": "Barwani",
            "state": "MP",
            "totalClaims": 120,
            "grantedClaims": 90,
            "saturationScore": 68.5,
            "gpsCenter": {"lat": 21.68, "lng": 75.1},
            "assets": {"ndviScore": 0.61, "waterBodiesCount": 4}
        }]"#;
        let features = parse_snapshot(json, &default_layer()).unwrap();
        assert_eq!(features.len(), 1);
        let f = &features[0];
        assert_eq!(f.id, FeatureId::new("MP-BRW-001"));
        assert_eq!(f.layer_id, default_layer());
        assert_eq!(f.position, Some(GeoPoint::new(21.68, 75.1)));
        assert_eq!(f.metrics.saturation, Some(68.5));
        assert_eq!(f.metrics.ndvi, Some(0.61));
        assert_eq!(f.metrics.water_bodies, Some(4));
    }

    #[test]
    fn test_explicit_coordinates_win_over_gps_center() {
        let json = r#"[{"id":"v1","layerId":"cfr-boundaries","latitude":22.0,"longitude":80.0,
                        "gpsCenter":{"lat":1.0,"lng":1.0}}]"#;
        let f = &parse_snapshot(json, &default_layer()).unwrap()[0];
        assert_eq!(f.position, Some(GeoPoint::new(22.0, 80.0)));
        assert_eq!(f.layer_id, LayerId::new("cfr-boundaries"));
    }

    #[test]
    fn test_missing_position_stays_missing() {
        let json = r#"[{"id":"v1","latitude":22.0},{"id":"v2","gpsCenter":{"lat":22.0}},{"id":"v3"}]"#;
        let features = parse_snapshot(json, &default_layer()).unwrap();
        assert!(features.iter().all(|f| f.position.is_none()));
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            parse_snapshot("{not json", &default_layer()),
            Err(SnapshotError::Json(_))
        ));
    }
}
