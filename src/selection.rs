//! Selection and popup controller.
//!
//! At most one feature is selected at a time. Selecting a feature resolves a
//! detail payload for the popup; fields the feature does not carry become
//! explicit [`Field::Unavailable`] placeholders instead of errors.

use std::fmt;

use crate::model::{Feature, FeatureId, LayerId};

/// A display value that may be missing from the source data.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Available(T),
    Unavailable,
}

impl<T> Field<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Field::Available(_))
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Field::Available(v) => Some(v),
            Field::Unavailable => None,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Field::Unavailable, Field::Available)
    }
}

impl<T: fmt::Display> fmt::Display for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Available(v) => v.fmt(f),
            Field::Unavailable => f.write_str("unavailable"),
        }
    }
}

/// Popup payload resolved from a feature's metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureDetail {
    pub name: Field<String>,
    pub block: Field<String>,
    pub district: Field<String>,
    pub state: Field<String>,
    pub total_claims: Field<u32>,
    pub granted_claims: Field<u32>,
    /// `total - granted`
    pub pending_claims: Field<u32>,
    /// `granted / total * 100`, unavailable when total is zero
    pub granted_percentage: Field<f64>,
    pub saturation: Field<f64>,
    /// Secondary metrics are shown only when present
    pub ndvi: Option<f64>,
    pub water_bodies: Option<u32>,
}

impl FeatureDetail {
    /// Resolve the payload for a feature.
    pub fn resolve(feature: &Feature) -> Self {
        let m = &feature.metrics;
        let pending = match (m.total_claims, m.granted_claims) {
            (Some(total), Some(granted)) => Some(total.saturating_sub(granted)),
            _ => None,
        };
        let percentage = match (m.total_claims, m.granted_claims) {
            (Some(total), Some(granted)) if total > 0 => {
                Some(f64::from(granted) / f64::from(total) * 100.0)
            }
            _ => None,
        };

        Self {
            name: m.name.clone().into(),
            block: m.block.clone().into(),
            district: m.district.clone().into(),
            state: m.state.clone().into(),
            total_claims: m.total_claims.into(),
            granted_claims: m.granted_claims.into(),
            pending_claims: pending.into(),
            granted_percentage: percentage.into(),
            saturation: m.saturation.filter(|s| s.is_finite()).into(),
            ndvi: m.ndvi.filter(|v| v.is_finite()),
            water_bodies: m.water_bodies,
        }
    }
}

impl fmt::Display for FeatureDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "  {}, {}", self.district, self.state)?;
        writeln!(f, "  Claims Granted: {}", self.granted_claims)?;
        writeln!(f, "  Pending:        {}", self.pending_claims)?;
        match &self.saturation {
            Field::Available(s) => writeln!(f, "  Saturation:     {:.0}%", s)?,
            Field::Unavailable => writeln!(f, "  Saturation:     unavailable")?,
        }
        if let Some(ndvi) = self.ndvi {
            writeln!(f, "  NDVI Score:     {:.2}", ndvi)?;
        }
        if let Some(count) = self.water_bodies {
            writeln!(f, "  Water Bodies:   {}", count)?;
        }
        Ok(())
    }
}

/// The currently selected feature and its detail payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub feature_id: FeatureId,
    pub layer_id: LayerId,
    pub detail: FeatureDetail,
}

/// Controller state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SelectionState {
    #[default]
    Idle,
    Selected(Selection),
}

/// Tracks the single selected feature.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn selected(&self) -> Option<&Selection> {
        match &self.state {
            SelectionState::Selected(selection) => Some(selection),
            SelectionState::Idle => None,
        }
    }

    pub fn is_selected(&self, id: &FeatureId) -> bool {
        self.selected().is_some_and(|s| &s.feature_id == id)
    }

    /// Select a feature, replacing any previous selection.
    ///
    /// # Returns
    /// Whether the state changed.
    pub fn select(&mut self, feature: &Feature) -> bool {
        let next = SelectionState::Selected(Selection {
            feature_id: feature.id.clone(),
            layer_id: feature.layer_id.clone(),
            detail: FeatureDetail::resolve(feature),
        });
        if next == self.state {
            return false;
        }
        log::debug!("Selected feature '{}'", feature.id);
        self.state = next;
        true
    }

    /// Return to `Idle`. Returns whether something was selected.
    pub fn dismiss(&mut self) -> bool {
        let was_selected = self.selected().is_some();
        if was_selected {
            log::debug!("Selection dismissed");
        }
        self.state = SelectionState::Idle;
        was_selected
    }

    /// Clear the selection if its `(feature, layer)` pair fails `present`.
    ///
    /// # Returns
    /// Whether the selection was cleared.
    pub fn retain(&mut self, present: impl Fn(&FeatureId, &LayerId) -> bool) -> bool {
        let stale = match &self.state {
            SelectionState::Selected(selection)
                if !present(&selection.feature_id, &selection.layer_id) =>
            {
                Some(selection.feature_id.clone())
            }
            _ => None,
        };
        let Some(id) = stale else {
            return false;
        };
        log::debug!("Clearing selection of '{}': no longer rendered", id);
        self.state = SelectionState::Idle;
        true
    }

    /// Re-resolve the detail payload from a newer copy of the selected
    /// feature. Other features are ignored.
    ///
    /// # Returns
    /// Whether the payload changed.
    pub fn refresh(&mut self, feature: &Feature) -> bool {
        let SelectionState::Selected(selection) = &mut self.state else {
            return false;
        };
        if selection.feature_id != feature.id || selection.layer_id != feature.layer_id {
            return false;
        }
        let detail = FeatureDetail::resolve(feature);
        if detail == selection.detail {
            return false;
        }
        log::debug!("Selection detail for '{}' updated", feature.id);
        selection.detail = detail;
        true
    }
}
