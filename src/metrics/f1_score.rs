//! F1 Score calculation.

use crate::error::{CircleEvalError, Result};
use crate::matching::{GreedyNonExclusive, MatchCounts, MatchingPolicy};
use crate::threshold::validate_threshold;
use crate::types::Circle;

/// Default minimum overlap for a prediction to count as a positive.
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.5;

/// Calculate F1 score from precision and recall.
///
/// F1 score is the harmonic mean of precision and recall:
/// F1 = 2 × (Precision × Recall) / (Precision + Recall)
///
/// Returns 0.0 if both precision and recall are 0.
///
/// # Example
///
/// ```
/// use circle_eval::metrics::f1_score::calculate_f1_score;
///
/// let f1 = calculate_f1_score(0.8, 0.6);
/// assert!((f1 - 0.6857).abs() < 0.001);
/// ```
pub fn calculate_f1_score(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        return 0.0;
    }

    2.0 * (precision * recall) / (precision + recall)
}

/// Derive the F1 score from the counts of a matching pass.
///
/// `positives == 0` yields 0.0 without touching precision or recall.
/// Positives without any true positive (only partial overlaps) also yield 0.0,
/// since precision and recall are then both zero.
///
/// # Errors
///
/// Returns `EmptyGroundTruth` if there are positives but no ground truths to
/// take the recall over.
pub fn f1_from_counts(counts: MatchCounts, ground_truth_count: usize) -> Result<f64> {
    if counts.positives == 0 {
        return Ok(0.0);
    }
    if ground_truth_count == 0 {
        return Err(CircleEvalError::EmptyGroundTruth(
            "recall needs at least one ground-truth circle".to_string(),
        ));
    }

    let precision = counts.true_positives as f64 / counts.positives as f64;
    let recall = counts.true_positives as f64 / ground_truth_count as f64;
    Ok(calculate_f1_score(precision, recall))
}

/// Compute the F1 score of `predictions` against `ground_truths` using greedy,
/// non-exclusive matching.
///
/// # Example
///
/// ```
/// use circle_eval::metrics::f1_score::compute_f1;
/// use circle_eval::types::Circle;
///
/// let circles = vec![Circle::new(0.0, 0.0, 5.0)];
/// assert_eq!(compute_f1(&circles, &circles, 0.5).unwrap(), 1.0);
/// ```
pub fn compute_f1(predictions: &[Circle], ground_truths: &[Circle], threshold: f64) -> Result<f64> {
    compute_f1_with(&GreedyNonExclusive, predictions, ground_truths, threshold)
}

/// Compute the F1 score with an explicit matching policy.
pub fn compute_f1_with<P: MatchingPolicy + ?Sized>(
    policy: &P,
    predictions: &[Circle],
    ground_truths: &[Circle],
    threshold: f64,
) -> Result<f64> {
    validate_threshold(threshold)?;
    let counts = policy.count_matches(predictions, ground_truths, threshold)?;
    f1_from_counts(counts, ground_truths.len())
}
