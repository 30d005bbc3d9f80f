//! Property-based invariant tests for the data model.
//!
//! 1. Generated values stay inside the configured range.
//! 2. Same seed -> same sequence.
//! 3. Requested sizes are clamped into the configured bounds.
//! 4. Delays shrink as speed grows, for every pause kind.
//! 5. Algorithm ids round-trip through `FromStr`, ignoring case.
//! 6. A cumulative sorted set covers exactly `0..=last`.

use proptest::prelude::*;
use sortviz_core::sequence::{is_non_decreasing, is_permutation};
use sortviz_core::{
    AlgorithmId, EngineConfig, Highlight, HighlightSet, Pacing, PauseKind, SeededRng, Sequence,
    Speed,
};
use std::time::Duration;

proptest! {
    #[test]
    fn generated_values_in_range(seed in any::<u64>(), len in 0usize..300, lo in 0u32..1000, span in 1u32..1000) {
        let mut rng = SeededRng::new(seed);
        let seq = Sequence::random(len, lo..lo + span, &mut rng);
        prop_assert_eq!(seq.len(), len);
        prop_assert!(seq.as_slice().iter().all(|v| (lo..lo + span).contains(v)));
    }

    #[test]
    fn same_seed_same_sequence(seed in any::<u64>(), len in 1usize..200) {
        let a = Sequence::random(len, 10..310, &mut SeededRng::new(seed));
        let b = Sequence::random(len, 10..310, &mut SeededRng::new(seed));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn sizes_are_clamped(lo in 1usize..50, extra in 0usize..150, size in 0usize..1000) {
        let config = EngineConfig::default().with_size_bounds(lo..=lo + extra);
        let clamped = config.clamp_size(size);
        prop_assert!(clamped >= lo && clamped <= lo + extra);
        if (lo..=lo + extra).contains(&size) {
            prop_assert_eq!(clamped, size);
        }
    }

    #[test]
    fn faster_is_shorter(base_ms in 1u64..5000, slow in 0.1f64..50.0, factor in 1.01f64..10.0) {
        let pacing = Pacing::new(Duration::from_millis(base_ms));
        let slow_speed = Speed::new(slow).unwrap();
        let fast_speed = Speed::new(slow * factor).unwrap();
        for kind in [PauseKind::Highlight, PauseKind::MergeWrite, PauseKind::SortedSweep] {
            prop_assert!(pacing.delay(fast_speed, kind) < pacing.delay(slow_speed, kind));
        }
    }

    #[test]
    fn algorithm_ids_parse_case_insensitively(idx in 0usize..6, upper in any::<bool>()) {
        let algo = AlgorithmId::ALL[idx];
        let text = if upper { algo.id().to_ascii_uppercase() } else { algo.id().to_string() };
        prop_assert_eq!(text.parse::<AlgorithmId>().unwrap(), algo);
    }

    #[test]
    fn sorted_sweep_is_cumulative(last in 0usize..200) {
        let set = HighlightSet::sorted_through(last);
        prop_assert_eq!(set.indices().len(), last + 1);
        prop_assert!(set.iter().all(|(_, tag)| tag == Highlight::Sorted));
        prop_assert_eq!(set.state_of(last), Some(Highlight::Sorted));
        prop_assert_eq!(set.state_of(last + 1), None);
    }

    #[test]
    fn std_sort_satisfies_helpers(mut values in prop::collection::vec(any::<u32>(), 0..100)) {
        let original = values.clone();
        values.sort_unstable();
        prop_assert!(is_non_decreasing(&values));
        prop_assert!(is_permutation(&values, &original));
    }
}
