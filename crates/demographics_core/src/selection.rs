//! Per-category selection state: AI defaults, user overrides and the active
//! category driving the shared detail view.
//!
//! [`SelectionManager`] is the only owner of a [`UiState`]. One manager is
//! created per analysis result and per view entry; nothing is persisted.

use crate::category::{CategoryKind, CategoryMap};
use crate::normalizer::{CategoryPrediction, Normalizer, PredictionEntry};
use crate::payload::{AnalysisResult, ResultFingerprint};
use serde::{Deserialize, Serialize};

/// Currently displayed label and confidence for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub label: String,
    pub confidence_percent: u8,
}

impl From<&PredictionEntry> for Selection {
    fn from(entry: &PredictionEntry) -> Self {
        Self {
            label: entry.label.clone(),
            confidence_percent: entry.confidence_percent,
        }
    }
}

impl Selection {
    pub fn matches(&self, entry: &PredictionEntry) -> bool {
        self.label == entry.label
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub active_category: CategoryKind,
    pub selections: CategoryMap<Selection>,
}

impl UiState {
    /// Every category selects its primary; Race is active.
    pub fn initial(predictions: &CategoryMap<CategoryPrediction>) -> Self {
        Self {
            active_category: CategoryKind::default(),
            selections: predictions.map(|_, pred| Selection::from(&pred.primary)),
        }
    }

    pub fn selection(&self, kind: CategoryKind) -> &Selection {
        self.selections.get(kind)
    }

    pub fn active_selection(&self) -> &Selection {
        self.selection(self.active_category)
    }
}

#[derive(Debug, Clone)]
pub struct SelectionManager {
    normalizer: Normalizer,
    fingerprint: ResultFingerprint,
    predictions: CategoryMap<CategoryPrediction>,
    state: UiState,
}

impl SelectionManager {
    pub fn new(normalizer: Normalizer, result: &AnalysisResult) -> Self {
        let predictions = normalizer.normalize_all(result);
        let state = UiState::initial(&predictions);
        let fingerprint = result.fingerprint();
        tracing::debug!("selection state initialized for {fingerprint:?}");
        Self {
            normalizer,
            fingerprint,
            predictions,
            state,
        }
    }

    /// Loads `result` unless it is the one already held, in which case user
    /// overrides are kept.
    pub fn initialize(&mut self, result: &AnalysisResult) -> &UiState {
        let fingerprint = result.fingerprint();
        if fingerprint == self.fingerprint {
            tracing::debug!("initialize skipped: {fingerprint:?} already loaded");
        } else {
            self.load(result, fingerprint);
        }
        &self.state
    }

    pub fn set_active_category(&mut self, kind: CategoryKind) {
        self.state.active_category = kind;
    }

    /// `entry` must come from the ranked list of `kind`.
    pub fn select_entry(&mut self, kind: CategoryKind, entry: &PredictionEntry) {
        debug_assert!(
            self.predictions.get(kind).contains(entry),
            "{entry:?} is not a ranked {kind} entry"
        );
        tracing::debug!(
            "{kind} selection -> {} ({}%)",
            entry.label,
            entry.confidence_percent
        );
        *self.state.selections.get_mut(kind) = Selection::from(entry);
    }

    /// Discards all overrides and restores the primaries of `result`.
    pub fn reset(&mut self, result: &AnalysisResult) {
        self.load(result, result.fingerprint());
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn predictions(&self) -> &CategoryMap<CategoryPrediction> {
        &self.predictions
    }

    pub fn prediction(&self, kind: CategoryKind) -> &CategoryPrediction {
        self.predictions.get(kind)
    }

    pub fn fingerprint(&self) -> ResultFingerprint {
        self.fingerprint
    }

    /// True while no category deviates from its primary.
    pub fn is_default(&self) -> bool {
        self.state
            .selections
            .iter()
            .all(|(kind, sel)| *sel == Selection::from(&self.prediction(kind).primary))
    }

    fn load(&mut self, result: &AnalysisResult, fingerprint: ResultFingerprint) {
        tracing::debug!("loading analysis {fingerprint:?}");
        self.predictions = self.normalizer.normalize_all(result);
        self.state = UiState::initial(&self.predictions);
        self.fingerprint = fingerprint;
    }
}
