//! Default layer catalogue for the FRA atlas.

use crate::color_utils::Rgb;
use crate::model::LayerDefinition;
use crate::styler::MetricKind;

#[expect(clippy::too_many_arguments)]
fn layer(
    id: &str,
    name: &str,
    category: &str,
    enabled: bool,
    opacity: f32,
    color: Rgb,
    description: &str,
    source: &str,
) -> LayerDefinition {
    LayerDefinition::new(id, name, category, enabled, color)
        .with_opacity(opacity)
        .with_description(description)
        .with_source(source)
}

/// The built-in catalogue: 14 overlays across all six categories.
pub fn default_catalogue() -> Vec<LayerDefinition> {
    vec![
        layer(
            "admin-boundaries",
            "Administrative Boundaries",
            "administrative",
            true,
            0.8,
            Rgb::new(0x6b, 0x72, 0x80),
            "State, district, block, village boundaries",
            "Census 2011 / LGD",
        ),
        layer(
            "ifr-boundaries",
            "IFR Patta Boundaries",
            "fra-rights",
            true,
            0.7,
            Rgb::new(0x4f, 0x46, 0xe5),
            "Individual Forest Rights granted areas",
            "State FRA Cells",
        ),
        layer(
            "cfr-boundaries",
            "CFR Boundaries",
            "fra-rights",
            true,
            0.6,
            Rgb::new(0x16, 0xa3, 0x4a),
            "Community Forest Resource Rights",
            "State FRA Cells",
        ),
        layer(
            "cr-boundaries",
            "Community Rights",
            "fra-rights",
            false,
            0.6,
            Rgb::new(0xd9, 0x77, 0x06),
            "Community Rights areas",
            "State FRA Cells",
        ),
        layer(
            "fsi-forest-cover",
            "Forest Cover (FSI)",
            "environment",
            true,
            0.5,
            Rgb::new(0x15, 0x80, 0x3d),
            "Forest Survey of India biennial forest cover",
            "FSI 2023",
        ),
        layer(
            "ndvi-health",
            "NDVI Vegetation Health",
            "environment",
            false,
            0.6,
            Rgb::new(0x84, 0xcc, 0x16),
            "Sentinel-2 derived NDVI, quarterly",
            "ESA Sentinel-2",
        )
        .with_metric(MetricKind::Ndvi),
        layer(
            "water-bodies",
            "Water Bodies (AI-detected)",
            "village-assets",
            true,
            0.7,
            Rgb::new(0x0e, 0xa5, 0xe9),
            "AI-detected ponds, streams, water sources",
            "Satellite CV",
        ),
        layer(
            "farmland",
            "Agricultural Land",
            "village-assets",
            false,
            0.6,
            Rgb::new(0xca, 0x8a, 0x04),
            "AI-detected agricultural areas in FRA villages",
            "Satellite CV",
        ),
        layer(
            "groundwater",
            "Groundwater Depth",
            "village-assets",
            false,
            0.5,
            Rgb::new(0x02, 0x84, 0xc7),
            "CGWB district-level depth to water table",
            "CGWB",
        ),
        layer(
            "css-pmkisan",
            "PM-KISAN Coverage",
            "scheme-coverage",
            false,
            0.6,
            Rgb::new(0x22, 0xc5, 0x5e),
            "PM-KISAN enrollment saturation",
            "MoA API",
        ),
        layer(
            "css-jjm",
            "JJM Coverage",
            "scheme-coverage",
            false,
            0.6,
            Rgb::new(0x0e, 0xa5, 0xe9),
            "Jal Jeevan Mission household connections",
            "JJM IMIS",
        ),
        layer(
            "dajgua-saturation",
            "DA-JGUA Saturation",
            "scheme-coverage",
            false,
            0.6,
            Rgb::new(0xe8, 0x77, 0x22),
            "Dharti Aaba Janjatiya Gram Utkarsh Abhiyan",
            "MoTA",
        ),
        layer(
            "gati-shakti-infra",
            "PM GatiShakti Infra",
            "scheme-coverage",
            false,
            0.5,
            Rgb::new(0x7c, 0x3a, 0xed),
            "Infrastructure layers from PM GatiShakti",
            "PM GatiShakti NMP",
        ),
        layer(
            "fire-alerts",
            "Forest Fire Alerts",
            "alerts",
            true,
            1.0,
            Rgb::new(0xef, 0x44, 0x44),
            "Real-time fire alerts from ISRO FIRMS / VIIRS",
            "ISRO FIRMS",
        ),
    ]
}
