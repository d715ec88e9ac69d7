//! Reconciliation and selection engine for demographic classification
//! results: ranks each raw distribution, picks the AI default per category
//! and tracks user overrides behind a single shared detail view.

/// Categories and the per-category table type.
pub mod category;
/// Normalizer configuration and label formatting.
pub mod config;
/// Ranking and primary selection.
pub mod normalizer;
/// Classifier payload intake.
pub mod payload;
/// Render-ready projection of the selection state.
pub mod projection;
/// Selection state and its transitions.
pub mod selection;
/// View lifecycle and confirmation hand-off.
pub mod session;

pub use category::{CategoryKind, CategoryMap, ParseCategoryError};
pub use config::{ConfigError, LabelFormat, NormalizerConfig};
pub use normalizer::{CategoryPrediction, Normalizer, PredictionEntry, confidence_percent};
pub use payload::{AnalysisPayload, AnalysisResult, PayloadError, RawDistribution, ResultFingerprint};
pub use projection::{DisplayList, DisplayModel, Focus, ListEntry, SummaryTile, project};
pub use selection::{Selection, SelectionManager, UiState};
pub use session::{
    ConfirmedSelections, DemographicsView, ExportError, NO_DATA_MESSAGE, ReadyView, RecoveryAction,
};
