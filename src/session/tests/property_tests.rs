//! Invariants checked over generated input sequences.

use std::collections::HashSet;

use proptest::prelude::*;

use crate::canvas::RecordingSurface;
use crate::catalogue::default_catalogue;
use crate::model::{Feature, FeatureId, LayerDefinition, LayerId};
use crate::session::AtlasSession;

use super::{default_session, village};

/// Layer operations a user can issue from the panel.
#[derive(Debug, Clone)]
enum LayerOp {
    Toggle(usize),
    HideAll,
    ShowAll,
}

fn layer_op() -> impl Strategy<Value = LayerOp> {
    prop_oneof![
        8 => (0usize..14).prop_map(LayerOp::Toggle),
        1 => Just(LayerOp::HideAll),
        1 => Just(LayerOp::ShowAll),
    ]
}

fn apply(session: &mut AtlasSession<RecordingSurface>, ids: &[LayerId], op: &LayerOp) {
    match op {
        LayerOp::Toggle(i) => {
            session.toggle(&ids[i % ids.len()]).unwrap();
        }
        LayerOp::HideAll => {
            session.set_all(false).unwrap();
        }
        LayerOp::ShowAll => {
            session.set_all(true).unwrap();
        }
    }
}

fn layer_ids(session: &AtlasSession<RecordingSurface>) -> Vec<LayerId> {
    session.registry().layers().iter().map(|l| l.id.clone()).collect()
}

/// Three features on every layer of the default catalogue, spread on a grid.
fn catalogue_snapshot(ids: &[LayerId]) -> Vec<Feature> {
    ids.iter()
        .enumerate()
        .flat_map(|(i, id)| {
            (0..3).map(move |j| {
                village(
                    &format!("{}-{}", id, j),
                    id.as_str(),
                    10.0 + i as f64,
                    72.0 + j as f64 * 3.0,
                    (i * 7 + j * 13) as f64 % 100.0,
                )
            })
        })
        .collect()
}

fn loaded_session() -> (AtlasSession<RecordingSurface>, Vec<LayerId>) {
    let mut session = default_session();
    let ids = layer_ids(&session);
    session.load_snapshot(catalogue_snapshot(&ids)).unwrap();
    (session, ids)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_double_toggle_is_identity(
        history in prop::collection::vec(layer_op(), 0..20),
        target in 0usize..14,
    ) {
        let (mut session, ids) = loaded_session();
        for op in &history {
            apply(&mut session, &ids, op);
        }
        let id = &ids[target % ids.len()];
        let enabled = session.registry().is_enabled(id);
        let count = session.enabled_count();
        let markers = session.canvas().markers().len();

        session.toggle(id).unwrap();
        session.toggle(id).unwrap();

        prop_assert_eq!(session.registry().is_enabled(id), enabled);
        prop_assert_eq!(session.enabled_count(), count);
        prop_assert_eq!(session.canvas().markers().len(), markers);
    }

    #[test]
    fn test_disabled_layers_never_rendered_or_counted(
        ops in prop::collection::vec(layer_op(), 1..60),
    ) {
        let (mut session, ids) = loaded_session();
        for op in &ops {
            apply(&mut session, &ids, op);

            let enabled = session.registry().enabled_set();
            let markers = session.canvas().markers();
            prop_assert!(markers.iter().all(|m| enabled.contains(&m.layer_id)));
            // Three features per layer, all positioned.
            prop_assert_eq!(markers.len(), enabled.len() * 3);
            prop_assert_eq!(
                session.layers_badge(),
                format!("{} layers active", enabled.len())
            );
            prop_assert_eq!(session.canvas().surface().markers.len(), markers.len());
        }
    }

    #[test]
    fn test_panel_sections_partition_registry(
        mask in prop::collection::vec(any::<bool>(), 14),
    ) {
        let subset: Vec<LayerDefinition> = default_catalogue()
            .into_iter()
            .zip(&mask)
            .filter(|(_, keep)| **keep)
            .map(|(layer, _)| layer)
            .collect();
        prop_assume!(!subset.is_empty());

        let session = AtlasSession::new(&subset, RecordingSurface::new()).unwrap();
        let view = session.panel_view().unwrap();

        let rows: Vec<&LayerId> = view
            .sections
            .iter()
            .flat_map(|s| s.rows.iter().map(|r| &r.id))
            .collect();
        prop_assert_eq!(rows.len(), subset.len());
        let unique: HashSet<&LayerId> = rows.iter().copied().collect();
        prop_assert_eq!(unique.len(), subset.len());

        let categories: HashSet<_> = view.sections.iter().map(|s| s.category).collect();
        prop_assert_eq!(categories.len(), view.sections.len());
        prop_assert!(view.sections.iter().all(|s| !s.rows.is_empty()));
    }

    #[test]
    fn test_at_most_one_feature_selected(
        picks in prop::collection::vec(prop::option::of(any::<usize>()), 1..60),
    ) {
        let (mut session, _) = loaded_session();
        let rendered: Vec<FeatureId> = session
            .canvas()
            .markers()
            .iter()
            .map(|m| m.feature_id.clone())
            .collect();

        for pick in picks {
            let Some(i) = pick else {
                session.dismiss();
                prop_assert!(session.selected().is_none());
                continue;
            };
            let target = &rendered[i % rendered.len()];
            session.select(target).unwrap();

            let selected: Vec<&FeatureId> = rendered
                .iter()
                .filter(|id| session.selected().is_some_and(|s| &s.feature_id == *id))
                .collect();
            prop_assert_eq!(selected, vec![target]);
        }
    }
}
