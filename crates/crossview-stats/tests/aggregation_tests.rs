//! Aggregation engine integration tests
//!
//! Property tests for the invariants every chart relies on.

use crossview_stats::{
    count_by, mean_by, mean_over, stack_matrix, stack_series, top_n_with_other, Bucket, Mean,
    OffsetPolicy, TieBreak, TopN,
};
use proptest::prelude::*;
use rstest::rstest;

#[derive(Debug, Clone)]
struct Row {
    year: i32,
    category: &'static str,
    value: f64,
}

fn scenario_rows() -> Vec<Row> {
    vec![
        Row { year: 2021, category: "A", value: 1.0 },
        Row { year: 2021, category: "A", value: 2.0 },
        Row { year: 2022, category: "B", value: 3.0 },
        Row { year: 2022, category: "B", value: 4.0 },
        Row { year: 2023, category: "A", value: 5.0 },
    ]
}

// === Scenarios ===

#[test]
fn test_count_year_2021_by_category() {
    let rows = scenario_rows();
    let in_2021: Vec<&Row> = rows.iter().filter(|r| r.year == 2021).collect();
    let counts = count_by(in_2021.iter().copied(), |r| r.category);

    assert_eq!(counts.entries(), &[("A", 2)]);
}

#[test]
fn test_three_series_four_years_zero_baseline() {
    let years = [2020, 2021, 2022, 2023];
    let keys = ["x", "y", "z"];
    let mut rows = Vec::new();
    for (i, year) in years.iter().enumerate() {
        for (s, key) in keys.iter().enumerate() {
            for _ in 0..(i + s + 1) {
                rows.push((*year, *key));
            }
        }
    }

    let layers = stack_series(rows.iter(), |(y, _)| *y, |(_, k)| *k, &years, &keys, OffsetPolicy::Zero);

    assert_eq!(layers.len(), 3);
    for j in 0..years.len() {
        assert_eq!(layers[0].points[j].0, 0.0);
        for k in 1..layers.len() {
            assert_eq!(layers[k].points[j].0, layers[k - 1].points[j].1);
        }
    }
    assert_eq!(layers[2].points[3].1, (4 + 5 + 6) as f64);
}

#[test]
fn test_mean_for_missing_year_is_no_data() {
    let rows = scenario_rows();
    let means = mean_over(
        &[2020, 2021, 2022],
        rows.iter().filter(|r| r.category == "B"),
        |r| r.year,
        |r| r.value,
    );

    assert_eq!(means.get(&2020), Mean::NoData);
    assert_eq!(means.get(&2021), Mean::NoData);
    assert_eq!(means.get(&2022), Mean::Value(3.5));
}

#[rstest]
#[case(TieBreak::FirstSeen, "b")]
#[case(TieBreak::KeyOrder, "a")]
fn test_tie_policy_is_configurable(#[case] tie: TieBreak, #[case] expected_first: &str) {
    let items = ["b", "a", "c", "c"];
    let counts = count_by(items.iter(), |s| s.to_string());
    let ranked = top_n_with_other(&counts, &TopN::new(2).with_tie_break(tie));

    assert_eq!(ranked[0].bucket, Bucket::Key("c".to_string()));
    assert_eq!(ranked[1].bucket, Bucket::Key(expected_first.to_string()));
    assert_eq!(ranked[2].count, 1);
}

// === Property-Based Tests ===

fn keys_strategy() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(0u8..12, 0..200)
}

proptest! {
    #[test]
    fn test_counts_sum_to_len(keys in keys_strategy()) {
        let counts = count_by(keys.iter(), |k| *k);
        prop_assert_eq!(counts.total(), keys.len());
    }

    #[test]
    fn test_other_bucket_holds_remainder(keys in keys_strategy(), n in 0usize..12) {
        let counts = count_by(keys.iter(), |k| *k);
        let ranked = top_n_with_other(&counts, &TopN::new(n));
        let others: Vec<_> = ranked.iter().filter(|b| b.bucket.is_other()).collect();

        if n < counts.len() {
            let top_sum: usize = ranked.iter().take(n).map(|b| b.count).sum();
            prop_assert_eq!(others.len(), 1);
            prop_assert_eq!(others[0].count, counts.total() - top_sum);
            prop_assert!(ranked.last().map(|b| b.bucket.is_other()).unwrap_or(false));
        } else {
            prop_assert!(others.is_empty());
        }

        let sum: usize = ranked.iter().map(|b| b.count).sum();
        prop_assert_eq!(sum, keys.len());
    }

    #[test]
    fn test_mean_by_never_reports_zero_for_empty(values in proptest::collection::vec(0.0f64..1e6, 0..50)) {
        let means = mean_by(values.iter(), |_| "group", |v| *v);
        if values.is_empty() {
            prop_assert!(means.is_empty());
            prop_assert_eq!(means.get(&"group"), Mean::NoData);
        } else {
            prop_assert!(means.get(&"group").value().is_some());
        }
    }

    #[test]
    fn test_stack_is_deterministic(
        matrix in proptest::collection::vec(proptest::collection::vec(0.0f64..1000.0, 4), 0..10),
        silhouette in any::<bool>(),
    ) {
        let offset = if silhouette { OffsetPolicy::Silhouette } else { OffsetPolicy::Zero };
        let keys = ["a", "b", "c", "d"];
        let first = stack_matrix(&matrix, &keys, offset);
        let second = stack_matrix(&matrix, &keys, offset);

        for (l1, l2) in first.iter().zip(second.iter()) {
            for (p1, p2) in l1.points.iter().zip(l2.points.iter()) {
                prop_assert_eq!(p1.0.to_bits(), p2.0.to_bits());
                prop_assert_eq!(p1.1.to_bits(), p2.1.to_bits());
            }
        }
    }

    #[test]
    fn test_silhouette_is_symmetric(row in proptest::collection::vec(0.0f64..1000.0, 1..6)) {
        let keys: Vec<usize> = (0..row.len()).collect();
        let layers = stack_matrix(&[row.clone()], &keys, OffsetPolicy::Silhouette);
        let bottom = layers[0].points[0].0;
        let top = layers[layers.len() - 1].points[0].1;
        prop_assert!((bottom + top).abs() < 1e-6);
    }
}
