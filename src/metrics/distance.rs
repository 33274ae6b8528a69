//! Mean Detection Error (MDE): nearest-center distance from predictions to ground truth.

use crate::error::{CircleEvalError, Result};
use crate::types::Circle;

/// Compute the mean, over predictions, of the distance from each prediction's
/// center to the nearest ground-truth center. Radii are ignored.
///
/// # Errors
///
/// - `EmptyPredictions` if `predictions` is empty;
/// - `EmptyGroundTruth` if `ground_truths` is empty;
/// - `InvalidGeometry` if any circle is malformed.
///
/// # Example
///
/// ```
/// use circle_eval::metrics::distance::compute_mde;
/// use circle_eval::types::Circle;
///
/// let predictions = vec![Circle::new(3.0, 4.0, 2.0)];
/// let ground_truths = vec![Circle::new(0.0, 0.0, 2.0)];
/// assert_eq!(compute_mde(&predictions, &ground_truths).unwrap(), 5.0);
/// ```
pub fn compute_mde(predictions: &[Circle], ground_truths: &[Circle]) -> Result<f64> {
    if predictions.is_empty() {
        return Err(CircleEvalError::EmptyPredictions(
            "mean detection error needs at least one prediction".to_string(),
        ));
    }
    if ground_truths.is_empty() {
        return Err(CircleEvalError::EmptyGroundTruth(
            "mean detection error needs at least one ground-truth circle".to_string(),
        ));
    }
    for circle in predictions.iter().chain(ground_truths) {
        circle.validate()?;
    }

    let total: f64 = predictions
        .iter()
        .map(|prediction| nearest_center_distance(prediction, ground_truths))
        .sum();

    Ok(total / predictions.len() as f64)
}

/// Distance from `circle` to the closest center in `others`.
///
/// Returns `f64::INFINITY` for an empty slice.
pub fn nearest_center_distance(circle: &Circle, others: &[Circle]) -> f64 {
    others
        .iter()
        .map(|other| circle.center_distance(other))
        .fold(f64::INFINITY, f64::min)
}
