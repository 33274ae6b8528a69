//! Metric calculation modules for circle detection evaluation.

pub mod overlap;
pub mod f1_score;
pub mod distance;

pub use overlap::{compute_overlap, overlap_matrix};
pub use f1_score::{
    calculate_f1_score, compute_f1, compute_f1_with, f1_from_counts, DEFAULT_OVERLAP_THRESHOLD,
};
pub use distance::{compute_mde, nearest_center_distance};
