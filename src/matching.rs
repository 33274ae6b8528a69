//! Matching policies that pair predictions with ground-truth circles.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::metrics::overlap::compute_overlap;
use crate::types::Circle;

/// Counts produced by a matching pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchCounts {
    /// Prediction/ground-truth pairs whose overlap reached the threshold.
    pub positives: usize,
    /// Pairs with complete overlap.
    pub true_positives: usize,
}

/// Strategy deciding which prediction/ground-truth pairs count as matches.
pub trait MatchingPolicy {
    /// Match `predictions` against `ground_truths` at the given overlap threshold.
    fn count_matches(
        &self,
        predictions: &[Circle],
        ground_truths: &[Circle],
        threshold: f64,
    ) -> Result<MatchCounts>;
}

/// Single greedy pass with no exclusivity.
///
/// Each prediction scans the ground truths in order. Every ground truth with
/// overlap `>= threshold` adds a positive; the first one with overlap exactly
/// `1.0` adds a true positive and ends the scan for that prediction. A ground
/// truth is never marked as consumed, so several predictions may match it.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyNonExclusive;

impl MatchingPolicy for GreedyNonExclusive {
    fn count_matches(
        &self,
        predictions: &[Circle],
        ground_truths: &[Circle],
        threshold: f64,
    ) -> Result<MatchCounts> {
        let mut counts = MatchCounts::default();

        for prediction in predictions {
            for ground_truth in ground_truths {
                let overlap = compute_overlap(prediction, ground_truth)?;
                if overlap >= threshold {
                    counts.positives += 1;
                    if overlap == 1.0 {
                        counts.true_positives += 1;
                        break;
                    }
                }
            }
        }

        Ok(counts)
    }
}

/// Configurable name for a matching policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingStrategy {
    #[default]
    GreedyNonExclusive,
}

impl MatchingPolicy for MatchingStrategy {
    fn count_matches(
        &self,
        predictions: &[Circle],
        ground_truths: &[Circle],
        threshold: f64,
    ) -> Result<MatchCounts> {
        match self {
            MatchingStrategy::GreedyNonExclusive => {
                GreedyNonExclusive.count_matches(predictions, ground_truths, threshold)
            }
        }
    }
}
