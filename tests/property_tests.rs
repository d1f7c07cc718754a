use keyclimb::geometry::{EffortGrid, Geometry, Layout, KEY_COUNT};
use keyclimb::model::FrequencyModel;
use keyclimb::scorer::{Penalties, Scorer};
use proptest::prelude::*;

const QWERTY: &str = "qwertyuiopasdfghjkl;zxcvbnm,./";

// --- STRATEGIES ---

prop_compose! {
    fn arb_penalties()(
        same_hand in 0.0..10.0f64,
        missing in 0.0..20.0f64,
        same_finger in 0.0..10.0f64
    ) -> Penalties {
        Penalties { same_hand, missing, same_finger }
    }
}

fn arb_key() -> impl Strategy<Value = char> {
    prop::sample::select("abcdefghijklmnopqrstuvwxyz;,./ 5".chars().collect::<Vec<_>>())
}

fn arb_entries() -> impl Strategy<Value = Vec<(Option<char>, char, u64)>> {
    prop::collection::vec((prop::option::of(arb_key()), arb_key(), 1u64..1000), 1..60)
}

/// A random permutation of QWERTY's keys.
fn arb_layout() -> impl Strategy<Value = Layout> {
    Just(QWERTY.chars().collect::<Vec<char>>())
        .prop_shuffle()
        .prop_map(|keys| Layout::parse(&keys.into_iter().collect::<String>()).unwrap())
}

proptest! {
    #[test]
    fn prop_score_ignores_insertion_order(
        penalties in arb_penalties(),
        layout in arb_layout(),
        entries in arb_entries()
    ) {
        let scorer = Scorer::new(penalties, EffortGrid::default());
        let forward: FrequencyModel = entries.iter().copied().collect();
        let reversed: FrequencyModel = entries.iter().rev().copied().collect();

        prop_assert_eq!(scorer.score(&layout, &forward), scorer.score(&layout, &reversed));
    }

    #[test]
    fn prop_score_non_negative_and_bounded(
        penalties in arb_penalties(),
        layout in arb_layout(),
        entries in arb_entries()
    ) {
        let scorer = Scorer::new(penalties, EffortGrid::default());
        let model: FrequencyModel = entries.iter().copied().collect();
        let score = scorer.score(&layout, &model);

        // Every unit cost is at most max(effort) + both penalties.
        let worst_unit = 3.2 + penalties.same_hand + penalties.same_finger;
        prop_assert!(score >= 0.0);
        prop_assert!(score <= worst_unit * model.total() as f64 + 1e-6);
    }

    #[test]
    fn prop_swap_back_restores_geometry(
        layout in arb_layout(),
        a in 0..KEY_COUNT,
        b in 0..KEY_COUNT
    ) {
        let grid = EffortGrid::default();
        let restored = layout.swap(a, b).swap(a, b);
        prop_assert_eq!(restored, layout);
        prop_assert_eq!(Geometry::derive(&restored, &grid), Geometry::derive(&layout, &grid));
    }

    #[test]
    fn prop_missing_key_cost_ignores_prev(
        penalties in arb_penalties(),
        prev in prop::option::of(arb_key()),
        count in 1u64..10_000
    ) {
        // 'a' replaced by a digit.
        let layout = Layout::parse("qwertyuiop1sdfghjkl;zxcvbnm,./").unwrap();
        let scorer = Scorer::new(penalties, EffortGrid::default());
        let model: FrequencyModel = [(prev, 'a', count)].into_iter().collect();

        let expected = penalties.missing * count as f64;
        prop_assert!((scorer.score(&layout, &model) - expected).abs() < 1e-9);
    }

    #[test]
    fn prop_details_total_matches_score(
        penalties in arb_penalties(),
        layout in arb_layout(),
        entries in arb_entries()
    ) {
        let scorer = Scorer::new(penalties, EffortGrid::default());
        let model: FrequencyModel = entries.iter().copied().collect();
        let details = scorer.score_details(&layout, &model);
        prop_assert_eq!(details.layout_score, scorer.score(&layout, &model));
    }
}
