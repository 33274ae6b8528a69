//! # circle-eval
//!
//! A Rust library for evaluating circular-object detectors (coin counters and
//! the like) against hand-annotated ground truth.
//!
//! This library provides:
//! - **Overlap fraction** between two circles, normalised by the smaller circle
//! - **F1 Score** from a greedy, non-exclusive matching of predictions to ground truth
//! - **MDE** (Mean Detection Error), the mean nearest-center distance
//! - Per-image and per-dataset evaluation with pluggable detectors and annotation loaders
//!
//! ## Quick Start
//!
//! ```rust
//! use circle_eval::evaluator::score_image;
//! use circle_eval::types::Circle;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let predictions = vec![Circle::new(100.0, 80.0, 12.0), Circle::new(40.0, 40.0, 9.0)];
//! let ground_truths = vec![Circle::new(100.0, 80.0, 12.0)];
//!
//! let record = score_image(&predictions, &ground_truths, 0.5)?;
//! println!("F1: {:.4}", record.f1_score);
//! println!("MDE: {:.2}", record.mean_detection_error);
//! # Ok(())
//! # }
//! ```
//!
//! ## Annotation Format
//!
//! Ground truth is read from LabelMe-style JSON. Each shape holds two points:
//! the circle center and a second point at twice the radius away.
//!
//! ```json
//! {
//!   "shapes": [
//!     { "label": "coin", "points": [[412.0, 230.5], [436.0, 230.5]] }
//!   ]
//! }
//! ```

pub mod error;
pub mod types;
pub mod loader;
pub mod detector;
pub mod dataset;
pub mod config;
pub mod threshold;
pub mod metrics;
pub mod matching;
pub mod evaluator;

// Re-export commonly used types and functions
pub use error::{CircleEvalError, DetectorError, Result};
pub use types::{AggregateMetricsRecord, Circle, MetricsRecord};
pub use loader::{load_from_file, load_from_string, AnnotationLoader, LabelMeLoader};
pub use detector::{Detector, PredictionFileDetector};
pub use dataset::CoinDataset;
pub use config::EvaluationConfig;
pub use matching::{GreedyNonExclusive, MatchCounts, MatchingPolicy, MatchingStrategy};
pub use evaluator::{evaluate_dataset, evaluate_dataset_parallel, evaluate_image, score_image};
