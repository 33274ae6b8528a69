//! Property-based tests using proptest
//!
//! These tests verify mathematical properties and invariants that should
//! always hold regardless of the input values.

use circle_eval::evaluator::score_image;
use circle_eval::metrics::{calculate_f1_score, compute_f1, compute_mde, compute_overlap};
use circle_eval::types::{AggregateMetricsRecord, Circle};
use proptest::prelude::*;

fn circle_strategy() -> impl Strategy<Value = Circle> {
    (-100.0f64..100.0, -100.0f64..100.0, 0.5f64..40.0)
        .prop_map(|(x, y, radius)| Circle::new(x, y, radius))
}

// Property: a circle fully overlaps itself
proptest! {
    #[test]
    fn prop_overlap_self_is_one(a in circle_strategy()) {
        prop_assert_eq!(compute_overlap(&a, &a).unwrap(), 1.0);
    }
}

// Property: overlap is symmetric and bounded
proptest! {
    #[test]
    fn prop_overlap_symmetric(a in circle_strategy(), b in circle_strategy()) {
        let ab = compute_overlap(&a, &b).unwrap();
        let ba = compute_overlap(&b, &a).unwrap();
        prop_assert!((ab - ba).abs() < 1e-9,
                     "Overlap should be symmetric: {} vs {}", ab, ba);
    }

    #[test]
    fn prop_overlap_range(a in circle_strategy(), b in circle_strategy()) {
        let overlap = compute_overlap(&a, &b).unwrap();
        prop_assert!(!overlap.is_nan());
        prop_assert!(overlap >= 0.0 && overlap <= 1.0,
                     "Overlap should be in [0,1], got {}", overlap);
    }
}

// Property: very unequal radii stay in [0, 1) just inside both boundaries
proptest! {
    #[test]
    fn prop_unequal_radii_boundaries_in_range(
        small_r in 0.2f64..2.0,
        ratio in 80.0f64..120.0,
        eps in 1e-9f64..1e-3,
    ) {
        let big_r = small_r * ratio;
        let big = Circle::new(0.0, 0.0, big_r);
        for d in [big_r + small_r - eps, big_r - small_r + eps] {
            let small = Circle::new(d, 0.0, small_r);
            let overlap = compute_overlap(&big, &small).unwrap();
            prop_assert!((0.0..1.0).contains(&overlap),
                         "Partial overlap out of range at d={}: {}", d, overlap);
        }
    }
}

// Property: disjoint circles do not overlap
proptest! {
    #[test]
    fn prop_disjoint_is_zero(
        a in circle_strategy(),
        r2 in 0.5f64..40.0,
        gap in 0.001f64..50.0,
        angle in 0.0f64..std::f64::consts::TAU,
    ) {
        let d = a.radius + r2 + gap;
        let b = Circle::new(a.x + d * angle.cos(), a.y + d * angle.sin(), r2);
        prop_assert_eq!(compute_overlap(&a, &b).unwrap(), 0.0);
    }
}

// Property: predicting exactly a set of well-separated ground truths gives a perfect score
proptest! {
    #[test]
    fn prop_identical_sets_perfect_f1(
        radii in prop::collection::vec(0.5f64..40.0, 1..12),
        y in -100.0f64..100.0,
        threshold in 0.01f64..=1.0,
    ) {
        let circles: Vec<Circle> = radii
            .iter()
            .enumerate()
            .map(|(i, &radius)| Circle::new(100.0 * i as f64, y, radius))
            .collect();
        let f1 = compute_f1(&circles, &circles, threshold).unwrap();
        prop_assert_eq!(f1, 1.0);
        prop_assert_eq!(compute_mde(&circles, &circles).unwrap(), 0.0);
    }
}

// Property: metrics are finite and non-negative
// (F1 has no upper bound of 1 here: duplicate predictions of one coin all count as true positives)
proptest! {
    #[test]
    fn prop_metrics_bounded(
        predictions in prop::collection::vec(circle_strategy(), 1..10),
        ground_truths in prop::collection::vec(circle_strategy(), 1..10),
        threshold in 0.0f64..=1.0,
    ) {
        let record = score_image(&predictions, &ground_truths, threshold).unwrap();
        prop_assert!(record.f1_score.is_finite() && record.f1_score >= 0.0,
                     "F1 should be finite and non-negative, got {}", record.f1_score);
        prop_assert!(record.mean_detection_error >= 0.0);
        prop_assert_eq!(record.detected_count, predictions.len());
        prop_assert_eq!(record.annotated_count, ground_truths.len());
    }

    #[test]
    fn prop_f1_harmonic_mean(precision in 0.0f64..=1.0, recall in 0.0f64..=1.0) {
        let f1 = calculate_f1_score(precision, recall);
        if precision + recall > 0.0 {
            let expected = 2.0 * precision * recall / (precision + recall);
            prop_assert!((f1 - expected).abs() < 1e-10);
        } else {
            prop_assert_eq!(f1, 0.0);
        }
    }
}

// Property: no overlap reaching the threshold means F1 is zero
proptest! {
    #[test]
    fn prop_far_predictions_score_zero(
        ground_truths in prop::collection::vec(circle_strategy(), 1..8),
        count in 1usize..8,
    ) {
        let predictions: Vec<Circle> = (0..count)
            .map(|i| Circle::new(10_000.0 + 100.0 * i as f64, 10_000.0, 5.0))
            .collect();
        prop_assert_eq!(compute_f1(&predictions, &ground_truths, 0.5).unwrap(), 0.0);
    }
}

// Property: dataset aggregates are the plain mean of per-image values
proptest! {
    #[test]
    fn prop_aggregate_is_unweighted_mean(
        images in prop::collection::vec(
            (
                prop::collection::vec(circle_strategy(), 1..6),
                prop::collection::vec(circle_strategy(), 1..6),
            ),
            1..6,
        ),
    ) {
        let records: Vec<_> = images
            .iter()
            .map(|(p, g)| score_image(p, g, 0.5).unwrap())
            .collect();
        let aggregate = AggregateMetricsRecord::from_records(&records).unwrap();

        let mean_f1 = records.iter().map(|r| r.f1_score).sum::<f64>() / records.len() as f64;
        let mean_mde = records.iter().map(|r| r.mean_detection_error).sum::<f64>()
            / records.len() as f64;
        prop_assert!((aggregate.average_f1_score - mean_f1).abs() < 1e-9);
        prop_assert!((aggregate.mean_detection_error - mean_mde).abs() < 1e-9);
        prop_assert_eq!(
            aggregate.annotated_count,
            images.iter().map(|(_, g)| g.len()).sum::<usize>()
        );
    }
}
