//! End-to-end scenarios for layer visibility, styling, selection and data gaps.

use crate::canvas::{RecordingSurface, RegionFilter};
use crate::catalogue::default_catalogue;
use crate::color_utils::{Rgb, palette};
use crate::config::AtlasConfig;
use crate::error::{AtlasError, SurfaceError};
use crate::message::{Message, PanelMessage, SelectionMessage, ViewportMessage};
use crate::model::{BaseMap, Feature, FeatureId, GeoPoint, LayerId};
use crate::selection::{Field, SelectionState};
use crate::styler::{MetricKind, ThresholdBand, ThresholdBands, style_for};

use crate::session::AtlasSession;
use super::{default_session, three_layer_session, three_layer_snapshot, village};

#[test]
fn test_toggle_off_excludes_layer_from_render_set() {
    let mut session = three_layer_session();
    session.load_snapshot(three_layer_snapshot()).unwrap();
    assert_eq!(session.canvas().markers().len(), 6);

    let enabled = session.toggle(&LayerId::new("cfr")).unwrap();

    assert!(!enabled);
    assert_eq!(session.enabled_count(), 2);
    assert_eq!(session.layers_badge(), "2 layers active");
    let markers = session.canvas().markers();
    assert_eq!(markers.len(), 4);
    assert!(markers.iter().all(|m| m.layer_id != LayerId::new("cfr")));
    assert_eq!(session.canvas().surface().markers.len(), 4);
    assert_eq!(session.last_report().hidden, 2);
}

#[test]
fn test_threshold_band_boundaries() {
    let green = Rgb::new(0, 200, 0);
    let amber = Rgb::new(255, 190, 0);
    let red = Rgb::new(220, 0, 0);
    let bands = ThresholdBands::new(vec![
        ThresholdBand::new(70.0, green),
        ThresholdBand::new(50.0, amber),
        ThresholdBand::new(0.0, red),
    ])
    .unwrap();

    assert_eq!(style_for(72.0, &bands), green);
    assert_eq!(style_for(49.0, &bands), red);
    assert_eq!(style_for(50.0, &bands), amber);
}

#[test]
fn test_rendered_markers_use_saturation_bands() {
    let mut session = three_layer_session();
    session
        .load_snapshot(vec![
            village("hi", "ifr", 20.0, 78.0, 72.0),
            village("mid", "ifr", 21.0, 79.0, 50.0),
            village("lo", "ifr", 22.0, 80.0, 49.0),
        ])
        .unwrap();

    let fills: Vec<Rgb> = session.canvas().markers().iter().map(|m| m.style.fill).collect();
    assert_eq!(fills, vec![palette::SUCCESS, palette::WARNING, palette::DANGER]);
}

#[test]
fn test_select_replaces_then_dismiss_returns_to_idle() {
    let mut session = three_layer_session();
    session.load_snapshot(three_layer_snapshot()).unwrap();

    session.select(&FeatureId::new("ifr-0")).unwrap();
    session.select(&FeatureId::new("cfr-1")).unwrap();

    let selected = session.selected().unwrap();
    assert_eq!(selected.feature_id, FeatureId::new("cfr-1"));
    assert_eq!(selected.layer_id, LayerId::new("cfr"));
    assert_eq!(
        selected.detail.name,
        Field::Available("Village cfr-1".to_string())
    );

    assert!(session.dismiss());
    assert!(session.selected().is_none());
    assert!(!session.dismiss());
}

#[test]
fn test_set_all_on_full_catalogue() {
    let mut session = default_session();
    assert_eq!(session.enabled_count(), 6);

    assert!(session.set_all(false).unwrap());
    assert_eq!(session.enabled_count(), 0);
    assert_eq!(session.layers_badge(), "0 layers active");

    assert!(session.set_all(true).unwrap());
    assert_eq!(session.enabled_count(), 14);
    assert!(!session.set_all(true).unwrap());
}

#[test]
fn test_feature_without_position_is_dropped_not_fatal() {
    let mut session = default_session();
    let mut snapshot: Vec<Feature> = (0..9)
        .map(|i| {
            village(
                &format!("v{}", i),
                "ifr-boundaries",
                20.0 + i as f64 * 0.5,
                80.0,
                60.0,
            )
        })
        .collect();
    snapshot.insert(4, Feature::new("lost", "ifr-boundaries", None));

    let report = session.load_snapshot(snapshot).unwrap();

    assert_eq!(report.drawn, 9);
    assert_eq!(report.dropped, vec![FeatureId::new("lost")]);
    assert_eq!(session.canvas().markers().len(), 9);
}

#[test]
fn test_toggle_unknown_layer_is_reported_and_harmless() {
    let mut session = three_layer_session();
    let events = session.subscribe();

    let err = session.toggle(&LayerId::new("roads")).unwrap_err();

    assert!(matches!(err, AtlasError::LayerNotFound { ref id } if id == "roads"));
    assert_eq!(session.enabled_count(), 3);
    assert!(events.try_recv().is_err());
}

#[test]
fn test_hidden_feature_cannot_be_selected() {
    let mut session = three_layer_session();
    session.load_snapshot(three_layer_snapshot()).unwrap();
    session.toggle(&LayerId::new("fire")).unwrap();

    let err = session.select(&FeatureId::new("fire-0")).unwrap_err();
    assert!(matches!(err, AtlasError::FeatureNotFound { .. }));
    assert!(session.selected().is_none());
}

#[test]
fn test_disabling_selected_layer_clears_selection() {
    let mut session = three_layer_session();
    session.load_snapshot(three_layer_snapshot()).unwrap();
    session.select(&FeatureId::new("fire-1")).unwrap();

    session.toggle(&LayerId::new("fire")).unwrap();

    assert!(session.selected().is_none());
}

#[test]
fn test_refreshed_snapshot_without_selected_feature_clears_it() {
    let mut session = three_layer_session();
    session.load_snapshot(three_layer_snapshot()).unwrap();
    session.select(&FeatureId::new("ifr-0")).unwrap();

    // Still present, so kept.
    session.load_snapshot(three_layer_snapshot()).unwrap();
    assert!(session.selected().is_some());

    let without: Vec<Feature> = three_layer_snapshot()
        .into_iter()
        .filter(|f| f.id.as_str() != "ifr-0")
        .collect();
    session.load_snapshot(without).unwrap();
    assert!(session.selected().is_none());
}

#[test]
fn test_disabling_layer_of_selected_instance_clears_shared_id() {
    let mut session = three_layer_session();
    session
        .load_snapshot(vec![
            village("V", "ifr", 20.0, 78.0, 60.0),
            village("V", "cfr", 20.0, 78.0, 60.0),
        ])
        .unwrap();
    session.select(&FeatureId::new("V")).unwrap();
    assert_eq!(session.selected().unwrap().layer_id, LayerId::new("ifr"));

    session.toggle(&LayerId::new("ifr")).unwrap();

    // The cfr instance is still drawn, but it is not the selected one.
    assert!(session.canvas().contains(&FeatureId::new("V")));
    assert!(session.selected().is_none());
}

#[test]
fn test_refreshed_metrics_update_selected_detail() {
    let mut session = three_layer_session();
    session
        .load_snapshot(vec![village("V", "ifr", 20.0, 78.0, 40.0)])
        .unwrap();
    session.select(&FeatureId::new("V")).unwrap();
    assert_eq!(
        session.selected().unwrap().detail.saturation,
        Field::Available(40.0)
    );

    session
        .load_snapshot(vec![village("V", "ifr", 20.0, 78.0, 90.0)])
        .unwrap();

    assert_eq!(session.canvas().markers()[0].style.fill, palette::SUCCESS);
    let detail = &session.selected().unwrap().detail;
    assert_eq!(detail.saturation, Field::Available(90.0));
    assert_eq!(detail.granted_claims, Field::Available(90));
}

#[test]
fn test_click_selects_marker_and_empty_click_dismisses() {
    let mut session = three_layer_session();
    session.pan_to(GeoPoint::new(18.0, 76.0), 12);
    session.load_snapshot(three_layer_snapshot()).unwrap();

    let hit = session.click_at(GeoPoint::new(18.0002, 76.0002)).unwrap();
    assert_eq!(hit, Some(FeatureId::new("ifr-0")));
    assert!(session.selected().is_some());

    let miss = session.click_at(GeoPoint::new(30.0, 70.0)).unwrap();
    assert_eq!(miss, None);
    assert!(session.selected().is_none());
}

#[test]
fn test_region_filter_narrows_render_set() {
    let mut session = three_layer_session();
    let mut snapshot = three_layer_snapshot();
    snapshot[0].metrics.state = Some("Odisha".to_string());
    session.load_snapshot(snapshot).unwrap();

    let report = session
        .set_region_filter(RegionFilter {
            state: Some("odisha".to_string()),
            district: None,
        })
        .unwrap();

    assert_eq!(report.drawn, 1);
    assert_eq!(report.filtered, 5);
    assert!(session.canvas().contains(&FeatureId::new("ifr-0")));
}

#[test]
fn test_viewport_messages_and_badge() {
    let mut session = default_session();
    assert_eq!(session.zoom_badge(), "Zoom: 5");

    session.update(Message::zoom_in()).unwrap();
    assert_eq!(session.zoom_badge(), "Zoom: 6");

    session
        .update(Message::Viewport(ViewportMessage::PanTo(
            GeoPoint::new(23.25, 77.41),
            30,
        )))
        .unwrap();
    assert_eq!(session.viewport().zoom, 18);
    assert!(session.viewport().at_max_zoom());

    session
        .update(Message::Viewport(ViewportMessage::SwitchBaseMap(BaseMap::Osm)))
        .unwrap();
    assert_eq!(session.viewport().base_map, BaseMap::Osm);
    assert_eq!(session.viewport().center, GeoPoint::new(23.25, 77.41));
    assert_eq!(session.canvas().surface().base_map, Some(BaseMap::Osm));
}

#[test]
fn test_message_dispatch_covers_layers_selection_and_panel() {
    let mut session = three_layer_session();
    session
        .update(Message::SnapshotLoaded(three_layer_snapshot()))
        .unwrap();

    session.update(Message::toggle_layer("ifr")).unwrap();
    assert_eq!(session.enabled_count(), 2);
    session.update(Message::hide_all()).unwrap();
    assert!(session.canvas().markers().is_empty());
    session.update(Message::show_all()).unwrap();
    assert_eq!(session.canvas().markers().len(), 6);

    session.update(Message::select("fire-0")).unwrap();
    assert!(session.selected().is_some());
    session
        .update(Message::Selection(SelectionMessage::Dismiss))
        .unwrap();
    assert!(session.selected().is_none());
    assert!(session.update(Message::select("missing")).is_err());

    assert!(session.panel_view().is_some());
    session.update(Message::Panel(PanelMessage::Close)).unwrap();
    assert!(!session.panel().is_open());
    assert!(session.panel_view().is_none());
}

#[test]
fn test_failed_mount_is_terminal() {
    let surface = RecordingSurface::failing("no container");
    let mut session = AtlasSession::new(&default_catalogue(), surface).unwrap();

    let err = session.mount().unwrap_err();
    assert!(matches!(
        err,
        AtlasError::SurfaceMount(SurfaceError::MountFailed { .. })
    ));
    assert!(session.canvas_state().is_failed());

    assert!(matches!(
        session.toggle(&LayerId::new("ifr-boundaries")),
        Err(AtlasError::CanvasFailed { .. })
    ));
    assert_eq!(session.enabled_count(), 6);
    assert!(!session.zoom_in());
    assert!(session.load_snapshot(Vec::new()).is_err());
    assert_eq!(session.canvas().surface().mount_calls, 1);
}

#[test]
fn test_session_from_config() {
    let mut config = AtlasConfig::new();
    config.preferences.initial_zoom = 8;
    config.preferences.base_map = BaseMap::Satellite;
    config.preferences.layer_panel_open = false;

    let mut session = AtlasSession::from_config(&config, RecordingSurface::new()).unwrap();
    session.mount().unwrap();

    assert_eq!(session.zoom_badge(), "Zoom: 8");
    assert_eq!(session.canvas().surface().base_map, Some(BaseMap::Satellite));
    assert!(session.panel_view().is_none());
    assert_eq!(session.legend(MetricKind::Saturation).len(), 3);
    assert_eq!(session.legend(MetricKind::Saturation)[0].label, "High (≥70%)");
}

#[test]
fn test_selection_state_detail_for_partial_metrics() {
    let mut session = three_layer_session();
    let mut sparse = Feature::new("sparse", "fire", Some(GeoPoint::new(21.0, 79.0)));
    sparse.metrics.name = Some("Kesla".to_string());
    session.load_snapshot(vec![sparse]).unwrap();

    session.select(&FeatureId::new("sparse")).unwrap();

    let detail = &session.selected().unwrap().detail;
    assert_eq!(detail.name, Field::Available("Kesla".to_string()));
    assert_eq!(detail.saturation, Field::Unavailable);
    assert_eq!(detail.pending_claims, Field::Unavailable);
    assert!(!matches!(session.selection.state(), SelectionState::Idle));
    // No metric means the layer colour.
    assert_eq!(session.canvas().markers()[0].style.fill, palette::DANGER);
}
