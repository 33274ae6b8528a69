//! Evaluation settings.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CircleEvalError, Result};
use crate::matching::MatchingStrategy;
use crate::metrics::f1_score::DEFAULT_OVERLAP_THRESHOLD;
use crate::threshold::validate_threshold;

/// Settings shared by image and dataset evaluation.
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```json
/// { "threshold": 0.6, "parallel": true }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluationConfig {
    /// Minimum overlap for a prediction/ground-truth pair to count as a positive.
    pub threshold: f64,
    /// Policy used to pair predictions with ground truths.
    pub matching: MatchingStrategy,
    /// Evaluate dataset images on the rayon thread pool.
    pub parallel: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_OVERLAP_THRESHOLD,
            matching: MatchingStrategy::default(),
            parallel: false,
        }
    }
}

impl EvaluationConfig {
    /// Default settings with a custom threshold.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Read settings from a JSON file and validate them.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings can be used for evaluation.
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold)
            .map_err(|e| CircleEvalError::InvalidConfig(e.to_string()))
    }
}
