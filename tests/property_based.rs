//! Property-based tests for the aggregation and ranking core
//!
//! Kept fast enough for a pre-commit gate; each property runs against
//! arbitrary (kernel name, duration) streams.

use proptest::prelude::*;
use resumen::stats::StatsTracker;

fn tracker_from(names: &[String], durations: &[f64]) -> StatsTracker {
    let mut tracker = StatsTracker::new();
    for (name, duration) in names.iter().zip(durations.iter()) {
        tracker.record(name, *duration);
    }
    tracker
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_count_conservation(
        names in prop::collection::vec("[a-e]{1,3}", 1..50),
        durations in prop::collection::vec(0.0f64..1e9, 50),
    ) {
        let tracker = tracker_from(&names, &durations);
        let rows = tracker.summarize();

        let total: u64 = rows.iter().map(|r| r.count).sum();
        prop_assert_eq!(total as usize, names.len());
    }

    #[test]
    fn prop_percentages_sum_to_100(
        names in prop::collection::vec("[a-e]{1,3}", 1..50),
        durations in prop::collection::vec(1.0f64..1e9, 50),
    ) {
        let tracker = tracker_from(&names, &durations);
        let rows = tracker.summarize();

        let total_percent: f64 = rows.iter().map(|r| r.percent).sum();
        prop_assert!((total_percent - 100.0).abs() < 1e-6);
    }

    #[test]
    fn prop_rows_sorted_descending_by_total(
        names in prop::collection::vec("[a-e]{1,3}", 1..50),
        durations in prop::collection::vec(0.0f64..1e9, 50),
    ) {
        let tracker = tracker_from(&names, &durations);
        let rows = tracker.summarize();

        for pair in rows.windows(2) {
            prop_assert!(pair[0].total_ns >= pair[1].total_ns);
        }
    }

    #[test]
    fn prop_average_is_total_over_count(
        names in prop::collection::vec("[a-e]{1,3}", 1..50),
        durations in prop::collection::vec(0.0f64..1e9, 50),
    ) {
        let tracker = tracker_from(&names, &durations);

        for row in tracker.summarize() {
            prop_assert!((row.avg_ns - row.total_ns / row.count as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_min_le_median_le_max(
        names in prop::collection::vec("[a-e]{1,3}", 1..50),
        durations in prop::collection::vec(0.0f64..1e9, 50),
    ) {
        let tracker = tracker_from(&names, &durations);

        for row in tracker.summarize() {
            prop_assert!(row.min_ns <= row.median_ns);
            prop_assert!(row.median_ns <= row.max_ns);
        }
    }

    #[test]
    fn prop_idempotent_summaries(
        names in prop::collection::vec("[a-e]{1,3}", 1..50),
        durations in prop::collection::vec(0.0f64..1e9, 50),
    ) {
        let first = tracker_from(&names, &durations).summarize();
        let second = tracker_from(&names, &durations).summarize();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_render_never_panics(
        names in prop::collection::vec("[a-z<>, :]{0,100}", 0..30),
        durations in prop::collection::vec(0.0f64..1e12, 30),
    ) {
        let tracker = tracker_from(&names, &durations);
        let out = resumen::report::render(&tracker, &Default::default());
        prop_assert!(!out.is_empty());
    }
}
