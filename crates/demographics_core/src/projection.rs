//! Pure projection of the selection state into render-ready values.

use crate::category::{CategoryKind, CategoryMap};
use crate::normalizer::CategoryPrediction;
use crate::selection::UiState;
use serde::Serialize;

/// One of the three always-visible category tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryTile {
    pub kind: CategoryKind,
    pub label: String,
    pub active: bool,
}

/// The large label and confidence readout for the active category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Focus {
    pub kind: CategoryKind,
    pub label: String,
    pub confidence_percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub label: String,
    pub confidence_percent: u8,
    pub is_selected: bool,
}

/// Ranked list of the active category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayList {
    pub kind: CategoryKind,
    pub entries: Vec<ListEntry>,
    /// Set when the category has no predictions.
    pub empty_notice: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayModel {
    pub summary: Vec<SummaryTile>,
    pub focus: Focus,
    pub list: DisplayList,
}

pub fn project(state: &UiState, predictions: &CategoryMap<CategoryPrediction>) -> DisplayModel {
    let active = state.active_category;

    let summary = state
        .selections
        .iter()
        .map(|(kind, sel)| SummaryTile {
            kind,
            label: sel.label.clone(),
            active: kind == active,
        })
        .collect();

    let selected = state.active_selection();
    let focus = Focus {
        kind: active,
        label: selected.label.clone(),
        confidence_percent: selected.confidence_percent,
    };

    let prediction = predictions.get(active);
    let entries = prediction
        .ranked
        .iter()
        .map(|entry| ListEntry {
            label: entry.label.clone(),
            confidence_percent: entry.confidence_percent,
            is_selected: selected.matches(entry),
        })
        .collect();
    let list = DisplayList {
        kind: active,
        entries,
        empty_notice: prediction.is_empty().then(|| active.empty_notice()),
    };

    DisplayModel {
        summary,
        focus,
        list,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::Normalizer;
    use crate::payload::AnalysisResult;
    use crate::selection::SelectionManager;

    fn manager() -> SelectionManager {
        let result = AnalysisResult {
            race: [("black", 0.62), ("white", 0.21)].into_iter().collect(),
            age: Default::default(),
            gender: [("male", 0.55), ("female", 0.45)].into_iter().collect(),
        };
        SelectionManager::new(Normalizer::default(), &result)
    }

    #[test]
    fn summary_lists_every_category_in_tile_order() {
        let mgr = manager();
        let model = project(mgr.state(), mgr.predictions());
        let tiles: Vec<_> = model
            .summary
            .iter()
            .map(|t| (t.kind, t.label.as_str(), t.active))
            .collect();
        assert_eq!(
            tiles,
            vec![
                (CategoryKind::Race, "Black", true),
                (CategoryKind::AgeRange, "Unknown", false),
                (CategoryKind::Sex, "Male", false),
            ]
        );
    }

    #[test]
    fn list_highlights_current_selection() {
        let mut mgr = manager();
        let female = mgr.prediction(CategoryKind::Sex).ranked[1].clone();
        mgr.select_entry(CategoryKind::Sex, &female);
        mgr.set_active_category(CategoryKind::Sex);

        let model = project(mgr.state(), mgr.predictions());
        assert_eq!(model.focus.label, "Female");
        assert_eq!(model.focus.confidence_percent, 45);
        let flags: Vec<_> = model.list.entries.iter().map(|e| e.is_selected).collect();
        assert_eq!(flags, vec![false, true]);
        assert_eq!(model.list.empty_notice, None);
    }

    #[test]
    fn empty_category_projects_notice() {
        let mut mgr = manager();
        mgr.set_active_category(CategoryKind::AgeRange);
        let model = project(mgr.state(), mgr.predictions());
        assert!(model.list.entries.is_empty());
        assert_eq!(model.list.empty_notice, Some("No age data available"));
        assert_eq!(model.focus.label, "Unknown");
        assert_eq!(model.focus.confidence_percent, 0);
    }

    #[test]
    fn projection_is_rederivable() {
        let mgr = manager();
        let a = project(mgr.state(), mgr.predictions());
        let b = project(mgr.state(), mgr.predictions());
        assert_eq!(a, b);
    }
}
