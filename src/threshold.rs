//! Overlap threshold utilities.

use tracing::warn;

use crate::error::{CircleEvalError, Result};
use crate::metrics::f1_score::compute_f1;
use crate::types::Circle;

/// Validate that a threshold is in the valid range [0.0, 1.0].
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(CircleEvalError::InvalidThreshold(format!(
            "Threshold must be between 0.0 and 1.0, got {}",
            threshold
        )));
    }
    Ok(())
}

/// Generate a range of threshold values for evaluation.
///
/// # Arguments
///
/// * `start` - Starting threshold value (inclusive)
/// * `end` - Ending threshold value (inclusive)
/// * `steps` - Number of threshold values to generate
///
/// # Example
///
/// ```
/// use circle_eval::threshold::generate_threshold_range;
///
/// let thresholds = generate_threshold_range(0.0, 1.0, 11).unwrap();
/// assert_eq!(thresholds.len(), 11);
/// assert_eq!(thresholds[0], 0.0);
/// assert_eq!(thresholds[10], 1.0);
/// ```
pub fn generate_threshold_range(start: f64, end: f64, steps: usize) -> Result<Vec<f64>> {
    if steps == 0 {
        return Err(CircleEvalError::InvalidThreshold(
            "Number of steps must be greater than 0".to_string(),
        ));
    }

    validate_threshold(start)?;
    validate_threshold(end)?;

    if start > end {
        return Err(CircleEvalError::InvalidThreshold(format!(
            "Start threshold ({}) must be <= end threshold ({})",
            start, end
        )));
    }

    if steps == 1 {
        return Ok(vec![start]);
    }

    let step_size = (end - start) / (steps - 1) as f64;
    Ok((0..steps).map(|i| start + step_size * i as f64).collect())
}

/// Compute the F1 score of one image at each overlap threshold.
///
/// Returns `(threshold, f1)` pairs in the order of `thresholds`.
pub fn sweep_f1(
    predictions: &[Circle],
    ground_truths: &[Circle],
    thresholds: &[f64],
) -> Result<Vec<(f64, f64)>> {
    if thresholds.is_empty() {
        warn!("threshold sweep requested with no thresholds");
    }

    thresholds
        .iter()
        .map(|&threshold| Ok((threshold, compute_f1(predictions, ground_truths, threshold)?)))
        .collect()
}

/// Pick the threshold with the highest F1 from a sweep.
///
/// Ties keep the earliest threshold. Returns `None` for an empty sweep.
pub fn find_best_threshold(sweep: &[(f64, f64)]) -> Option<(f64, f64)> {
    sweep.iter().copied().fold(None, |best, (threshold, f1)| match best {
        Some((_, best_f1)) if best_f1 >= f1 => best,
        _ => Some((threshold, f1)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_threshold() {
        assert!(validate_threshold(0.0).is_ok());
        assert!(validate_threshold(1.0).is_ok());
        assert!(validate_threshold(1.5).is_err());
        assert!(validate_threshold(-0.1).is_err());
        assert!(validate_threshold(f64::NAN).is_err());
    }

    #[test]
    fn test_generate_threshold_range() {
        let thresholds = generate_threshold_range(0.0, 1.0, 11).unwrap();
        assert_eq!(thresholds.len(), 11);
        assert!((thresholds[0] - 0.0).abs() < 1e-10);
        assert!((thresholds[10] - 1.0).abs() < 1e-10);
        assert!((thresholds[5] - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_generate_threshold_range_errors() {
        assert!(generate_threshold_range(0.0, 1.0, 0).is_err());
        assert!(generate_threshold_range(0.8, 0.2, 3).is_err());
        assert_eq!(generate_threshold_range(0.3, 0.9, 1).unwrap(), vec![0.3]);
    }

    #[test]
    fn test_sweep_f1() {
        // Overlap of this pair is ~0.624: a positive below that, nothing above.
        let predictions = vec![Circle::new(0.0, 0.0, 5.0), Circle::new(50.0, 50.0, 5.0)];
        let ground_truths = vec![Circle::new(3.0, 0.0, 5.0), Circle::new(50.0, 50.0, 5.0)];

        let sweep = sweep_f1(&predictions, &ground_truths, &[0.5, 0.7]).unwrap();
        assert_eq!(sweep.len(), 2);
        // 0.5: positives 2, tp 1 → P 0.5, R 0.5
        assert!((sweep[0].1 - 0.5).abs() < 1e-12);
        // 0.7: positives 1, tp 1 → P 1.0, R 0.5
        assert!((sweep[1].1 - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_find_best_threshold() {
        let sweep = vec![(0.3, 0.4), (0.5, 0.9), (0.7, 0.9), (0.9, 0.1)];
        assert_eq!(find_best_threshold(&sweep), Some((0.5, 0.9)));
        assert_eq!(find_best_threshold(&[]), None);
    }
}
