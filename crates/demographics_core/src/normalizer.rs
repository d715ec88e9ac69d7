//! Turns a raw distribution into a ranked, display-ready prediction list.

use crate::category::{CategoryKind, CategoryMap};
use crate::config::NormalizerConfig;
use crate::payload::{AnalysisResult, RawDistribution};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One row of a ranked prediction list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredictionEntry {
    /// Display-formatted label.
    pub label: String,
    /// `round(probability * 100)`, clamped to `0..=100`.
    pub confidence_percent: u8,
}

/// Ranked predictions for one category plus the AI default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPrediction {
    pub primary: PredictionEntry,
    /// Descending confidence; `ranked[0] == primary` when non-empty.
    pub ranked: Vec<PredictionEntry>,
}

impl CategoryPrediction {
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn find(&self, label: &str) -> Option<&PredictionEntry> {
        self.ranked.iter().find(|entry| entry.label == label)
    }

    pub fn contains(&self, entry: &PredictionEntry) -> bool {
        self.ranked.contains(entry)
    }
}

/// Converts a probability to an integer percentage.
pub fn confidence_percent(probability: f64) -> u8 {
    if !probability.is_finite() {
        return 0;
    }
    (probability * 100.0).round().clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn normalize(&self, kind: CategoryKind, raw: &RawDistribution) -> CategoryPrediction {
        let format = self.config.format_for(kind);

        // sort_by is stable: equal probabilities keep payload order
        let mut sorted: Vec<(&str, f64)> = raw.iter().collect();
        sorted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let ranked: Vec<PredictionEntry> = sorted
            .into_iter()
            .map(|(label, p)| PredictionEntry {
                label: format.apply(label),
                confidence_percent: confidence_percent(p),
            })
            .collect();

        let primary = match arg_max(raw) {
            Some((label, p)) => PredictionEntry {
                label: format.apply(label),
                confidence_percent: confidence_percent(p),
            },
            None => {
                tracing::debug!("{kind} distribution is empty; using fallback label");
                PredictionEntry {
                    label: self.config.fallback_label.clone(),
                    confidence_percent: 0,
                }
            }
        };
        debug_assert!(ranked.first().is_none_or(|first| *first == primary));

        CategoryPrediction { primary, ranked }
    }

    pub fn normalize_all(&self, result: &AnalysisResult) -> CategoryMap<CategoryPrediction> {
        CategoryMap::from_fn(|kind| self.normalize(kind, result.distribution(kind)))
    }
}

/// First-seen entry with the highest probability.
fn arg_max(raw: &RawDistribution) -> Option<(&str, f64)> {
    raw.iter().fold(None, |best, (label, p)| match best {
        Some((_, best_p)) if best_p >= p => best,
        _ => Some((label, p)),
    })
}
