//! Core data types for circles and evaluation records.

use serde::{Deserialize, Serialize};

use crate::error::{CircleEvalError, Result};

/// A disk given by its center and radius, either predicted or annotated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Circle {
    /// Create a new circle.
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }

    /// Build a circle from two boundary points of an annotation shape.
    ///
    /// The first point is the center and the radius is half the distance
    /// between the two points.
    pub fn from_points(first: [f64; 2], second: [f64; 2]) -> Self {
        let radius = (first[0] - second[0]).hypot(first[1] - second[1]) / 2.0;
        Self::new(first[0], first[1], radius)
    }

    /// Euclidean distance between the centers of two circles. Radii are ignored.
    pub fn center_distance(&self, other: &Circle) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Area of the disk.
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    /// Check if the circle can take part in metric computation.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.radius.is_finite() && self.radius > 0.0
    }

    /// Same as [`Circle::is_valid`], but returns an `InvalidGeometry` error describing the circle.
    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(CircleEvalError::InvalidGeometry(format!(
                "circle at ({}, {}) has radius {}",
                self.x, self.y, self.radius
            )))
        }
    }
}

impl From<(f64, f64, f64)> for Circle {
    fn from((x, y, radius): (f64, f64, f64)) -> Self {
        Self::new(x, y, radius)
    }
}

/// Metrics for a single evaluated image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    #[serde(rename = "F1 Score")]
    pub f1_score: f64,
    #[serde(rename = "Mean Detection Error (MDE)")]
    pub mean_detection_error: f64,
    #[serde(rename = "Nb Detected Coins")]
    pub detected_count: usize,
    #[serde(rename = "Nb Annotated Coins")]
    pub annotated_count: usize,
}

/// Metrics aggregated over a dataset.
///
/// F1 and MDE are unweighted means over images; the counts are totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetricsRecord {
    #[serde(rename = "Average F1 Score")]
    pub average_f1_score: f64,
    #[serde(rename = "Mean Detection Error (MDE)")]
    pub mean_detection_error: f64,
    #[serde(rename = "Nb Detected Coins")]
    pub detected_count: usize,
    #[serde(rename = "Nb Annotated Coins")]
    pub annotated_count: usize,
    /// Number of images the averages were taken over.
    #[serde(skip)]
    pub image_count: usize,
}

impl AggregateMetricsRecord {
    /// Aggregate per-image records, summing in slice order.
    ///
    /// # Errors
    ///
    /// Returns `EmptyDataset` if `records` is empty.
    pub fn from_records(records: &[MetricsRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(CircleEvalError::EmptyDataset(
                "cannot average metrics over zero images".to_string(),
            ));
        }

        let mut total_f1 = 0.0;
        let mut total_mde = 0.0;
        let mut detected_count = 0;
        let mut annotated_count = 0;

        for record in records {
            total_f1 += record.f1_score;
            total_mde += record.mean_detection_error;
            detected_count += record.detected_count;
            annotated_count += record.annotated_count;
        }

        let image_count = records.len();
        Ok(Self {
            average_f1_score: total_f1 / image_count as f64,
            mean_detection_error: total_mde / image_count as f64,
            detected_count,
            annotated_count,
            image_count,
        })
    }
}
