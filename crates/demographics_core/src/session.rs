//! The demographics detail view: one instance per view entry.
//!
//! Exposes the four UI entry points (choose active category, choose entry,
//! confirm, reset) and the distinguishable "no data" state.

use crate::category::{CategoryKind, CategoryMap};
use crate::normalizer::Normalizer;
use crate::payload::AnalysisResult;
use crate::projection::{DisplayModel, project};
use crate::selection::{Selection, SelectionManager, UiState};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What the user can do from the "no data" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    ReturnToUpload,
}

impl RecoveryAction {
    pub fn label(self) -> &'static str {
        match self {
            RecoveryAction::ReturnToUpload => "Return to Upload",
        }
    }
}

pub const NO_DATA_MESSAGE: &str = "No analysis data available";

#[derive(Debug)]
pub enum DemographicsView {
    NoData { recovery: RecoveryAction },
    Ready(ReadyView),
}

impl DemographicsView {
    pub fn open(result: Option<AnalysisResult>) -> Self {
        Self::open_with(Normalizer::default(), result)
    }

    pub fn open_with(normalizer: Normalizer, result: Option<AnalysisResult>) -> Self {
        match result {
            Some(result) => DemographicsView::Ready(ReadyView::new(normalizer, result)),
            None => {
                tracing::info!("demographics view opened without analysis data");
                DemographicsView::NoData {
                    recovery: RecoveryAction::ReturnToUpload,
                }
            }
        }
    }

    pub fn ready(&self) -> Option<&ReadyView> {
        match self {
            DemographicsView::Ready(view) => Some(view),
            DemographicsView::NoData { .. } => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut ReadyView> {
        match self {
            DemographicsView::Ready(view) => Some(view),
            DemographicsView::NoData { .. } => None,
        }
    }
}

/// A view backed by an analysis result.
#[derive(Debug)]
pub struct ReadyView {
    result: AnalysisResult,
    manager: SelectionManager,
}

impl ReadyView {
    pub fn new(normalizer: Normalizer, result: AnalysisResult) -> Self {
        let manager = SelectionManager::new(normalizer, &result);
        Self { result, manager }
    }

    pub fn result(&self) -> &AnalysisResult {
        &self.result
    }

    pub fn manager(&self) -> &SelectionManager {
        &self.manager
    }

    pub fn state(&self) -> &UiState {
        self.manager.state()
    }

    pub fn display(&self) -> DisplayModel {
        project(self.manager.state(), self.manager.predictions())
    }

    pub fn choose_active_category(&mut self, kind: CategoryKind) {
        self.manager.set_active_category(kind);
    }

    /// Selects the ranked entry of `kind` labelled `label`. Unknown labels
    /// leave the state untouched and return `None`.
    pub fn choose_entry(&mut self, kind: CategoryKind, label: &str) -> Option<Selection> {
        let Some(entry) = self.manager.prediction(kind).find(label).cloned() else {
            tracing::warn!("ignoring selection of {label:?}: not a ranked {kind} entry");
            return None;
        };
        self.manager.select_entry(kind, &entry);
        Some(Selection::from(&entry))
    }

    pub fn reset(&mut self) {
        self.manager.reset(&self.result);
    }

    /// Hands the current selections to the next screen. No internal effect.
    pub fn confirm(&self) -> ConfirmedSelections {
        let confirmed = ConfirmedSelections(self.manager.state().selections.clone());
        tracing::info!(
            "confirmed selections: race={:?} age={:?} sex={:?}",
            confirmed.race().label,
            confirmed.age().label,
            confirmed.sex().label
        );
        confirmed
    }
}

/// Final per-category selections for the navigation consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfirmedSelections(pub CategoryMap<Selection>);

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("failed to flush {path}: {source}")]
    Flush {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ConfirmedSelections {
    pub fn race(&self) -> &Selection {
        &self.0.race
    }

    pub fn age(&self) -> &Selection {
        &self.0.age
    }

    pub fn sex(&self) -> &Selection {
        &self.0.sex
    }

    /// Writes `category,label,confidence_percent`, one row per category.
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        let csv_err = |source| ExportError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut wtr = csv::Writer::from_path(path).map_err(csv_err)?;
        wtr.write_record(["category", "label", "confidence_percent"])
            .map_err(csv_err)?;
        for (kind, sel) in self.0.iter() {
            let pct = sel.confidence_percent.to_string();
            wtr.write_record([kind.payload_key(), sel.label.as_str(), pct.as_str()])
                .map_err(csv_err)?;
        }
        wtr.flush().map_err(|source| ExportError::Flush {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}
