//! Property tests for ranking, rounding, primary choice and selection state.
//!
//! Distributions are generated with a small pool of probabilities so ties are
//! common, and with values outside `[0, 1]` to exercise clamping.

use demographics_core::{
    AnalysisResult, CategoryKind, Normalizer, RawDistribution, SelectionManager, UiState,
    confidence_percent,
};
use proptest::prelude::*;

fn probability() -> impl Strategy<Value = f64> {
    prop_oneof![
        (0u8..=4).prop_map(|k| f64::from(k) * 0.25),
        Just(0.1),
        -1.0..2.0f64,
    ]
}

fn distribution() -> impl Strategy<Value = RawDistribution> {
    prop::collection::vec(("[a-z]{1,5}( [a-z]{1,5})?", probability()), 0..10)
        .prop_map(|pairs| pairs.into_iter().collect())
}

fn analysis() -> impl Strategy<Value = AnalysisResult> {
    (distribution(), distribution(), distribution()).prop_map(|(race, age, gender)| {
        AnalysisResult { race, age, gender }
    })
}

fn kind() -> impl Strategy<Value = CategoryKind> {
    prop::sample::select(CategoryKind::ALL.to_vec())
}

/// Picks the `idx`-th ranked entry of `kind`, if it has any.
fn pick(mgr: &mut SelectionManager, kind: CategoryKind, idx: usize) {
    let ranked = &mgr.prediction(kind).ranked;
    if ranked.is_empty() {
        return;
    }
    let entry = ranked[idx % ranked.len()].clone();
    mgr.select_entry(kind, &entry);
}

proptest! {
    #[test]
    fn ranking_is_descending_with_stable_ties(raw in distribution()) {
        // verbatim labels map ranked entries back to their raw probability
        let pred = Normalizer::default().normalize(CategoryKind::AgeRange, &raw);

        let mut expected: Vec<(usize, &str, f64)> = raw
            .iter()
            .enumerate()
            .map(|(i, (label, p))| (i, label, p))
            .collect();
        expected.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap().then(a.0.cmp(&b.0)));

        let labels: Vec<&str> = pred.ranked.iter().map(|e| e.label.as_str()).collect();
        let expected_labels: Vec<&str> = expected.iter().map(|(_, l, _)| *l).collect();
        prop_assert_eq!(labels, expected_labels);
        prop_assert!(pred
            .ranked
            .windows(2)
            .all(|w| w[0].confidence_percent >= w[1].confidence_percent));
    }

    #[test]
    fn percent_is_rounded_and_in_range(raw in distribution()) {
        let pred = Normalizer::default().normalize(CategoryKind::AgeRange, &raw);
        prop_assert_eq!(pred.ranked.len(), raw.len());
        for entry in &pred.ranked {
            let p = raw
                .iter()
                .find(|(label, _)| *label == entry.label)
                .map(|(_, p)| p)
                .unwrap();
            prop_assert!(entry.confidence_percent <= 100);
            let expected = (p * 100.0).round().clamp(0.0, 100.0) as u8;
            prop_assert_eq!(entry.confidence_percent, expected);
            prop_assert_eq!(entry.confidence_percent, confidence_percent(p));
        }
    }

    #[test]
    fn primary_heads_the_ranked_list(raw in distribution(), kind in kind()) {
        let pred = Normalizer::default().normalize(kind, &raw);
        match pred.ranked.first() {
            Some(first) => {
                prop_assert_eq!(first, &pred.primary);
                let max = raw.iter().map(|(_, p)| p).fold(f64::NEG_INFINITY, f64::max);
                let first_max = raw.iter().find(|(_, p)| *p == max).map(|(l, _)| l).unwrap();
                let format = Normalizer::default().config().format_for(kind);
                prop_assert_eq!(&pred.primary.label, &format.apply(first_max));
            }
            None => {
                prop_assert_eq!(pred.primary.label.as_str(), "Unknown");
                prop_assert_eq!(pred.primary.confidence_percent, 0);
            }
        }
    }

    #[test]
    fn initialize_selects_every_primary(result in analysis()) {
        let mgr = SelectionManager::new(Normalizer::default(), &result);
        prop_assert_eq!(mgr.state().active_category, CategoryKind::Race);
        for kind in CategoryKind::ALL {
            let sel = mgr.state().selection(kind);
            let primary = &mgr.prediction(kind).primary;
            prop_assert_eq!(&sel.label, &primary.label);
            prop_assert_eq!(sel.confidence_percent, primary.confidence_percent);
        }
    }

    #[test]
    fn reset_restores_primaries_and_is_idempotent(
        result in analysis(),
        picks in prop::collection::vec((kind(), any::<usize>()), 0..8),
        active in kind(),
    ) {
        let mut mgr = SelectionManager::new(Normalizer::default(), &result);
        for (kind, idx) in picks {
            pick(&mut mgr, kind, idx);
        }
        mgr.set_active_category(active);

        mgr.reset(&result);
        let once = mgr.state().clone();
        mgr.reset(&result);
        prop_assert_eq!(mgr.state(), &once);
        prop_assert_eq!(&once, &UiState::initial(mgr.predictions()));
    }

    #[test]
    fn select_entry_changes_only_its_category(
        result in analysis(),
        kind in kind(),
        idx in any::<usize>(),
    ) {
        let mut mgr = SelectionManager::new(Normalizer::default(), &result);
        let before = mgr.state().clone();
        pick(&mut mgr, kind, idx);
        let after = mgr.state();

        prop_assert_eq!(after.active_category, before.active_category);
        for other in CategoryKind::ALL.into_iter().filter(|k| *k != kind) {
            prop_assert_eq!(after.selection(other), before.selection(other));
        }
    }

    #[test]
    fn set_active_category_never_changes_selections(
        result in analysis(),
        picks in prop::collection::vec((kind(), any::<usize>()), 0..4),
        focus in prop::collection::vec(kind(), 1..6),
    ) {
        let mut mgr = SelectionManager::new(Normalizer::default(), &result);
        for (kind, idx) in picks {
            pick(&mut mgr, kind, idx);
        }
        let selections = mgr.state().selections.clone();
        for kind in focus {
            mgr.set_active_category(kind);
            prop_assert_eq!(mgr.state().active_category, kind);
            prop_assert_eq!(&mgr.state().selections, &selections);
        }
    }
}
