//! Image and dataset evaluation against ground-truth annotations.

use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::EvaluationConfig;
use crate::dataset::CoinDataset;
use crate::detector::Detector;
use crate::error::{CircleEvalError, Result};
use crate::loader::AnnotationLoader;
use crate::matching::{GreedyNonExclusive, MatchingPolicy};
use crate::metrics::distance::compute_mde;
use crate::metrics::f1_score::compute_f1_with;
use crate::threshold::validate_threshold;
use crate::types::{AggregateMetricsRecord, Circle, MetricsRecord};

/// Score one image's predictions against its ground truths.
///
/// Computes F1 with greedy non-exclusive matching and the mean detection
/// error on the same two sets.
///
/// # Example
///
/// ```
/// use circle_eval::evaluator::score_image;
/// use circle_eval::types::Circle;
///
/// let circles = vec![Circle::new(0.0, 0.0, 5.0)];
/// let record = score_image(&circles, &circles, 0.5).unwrap();
/// assert_eq!(record.f1_score, 1.0);
/// assert_eq!(record.mean_detection_error, 0.0);
/// ```
pub fn score_image(
    predictions: &[Circle],
    ground_truths: &[Circle],
    threshold: f64,
) -> Result<MetricsRecord> {
    score_image_with(&GreedyNonExclusive, predictions, ground_truths, threshold)
}

/// Same as [`score_image`] with an explicit matching policy.
pub fn score_image_with<P: MatchingPolicy + ?Sized>(
    policy: &P,
    predictions: &[Circle],
    ground_truths: &[Circle],
    threshold: f64,
) -> Result<MetricsRecord> {
    let f1_score = compute_f1_with(policy, predictions, ground_truths, threshold)?;
    let mean_detection_error = compute_mde(predictions, ground_truths)?;

    Ok(MetricsRecord {
        f1_score,
        mean_detection_error,
        detected_count: predictions.len(),
        annotated_count: ground_truths.len(),
    })
}

/// Evaluate the detector on a single image.
///
/// Runs `detector` on `image_path`, loads the ground truths from
/// `annotation_path` and scores them. Either a full record is returned or the
/// first error is propagated.
///
/// # Errors
///
/// `DetectorFailure` wraps any error returned by the detector. Loader and
/// metric errors are returned as is.
pub fn evaluate_image<D, L>(
    detector: &D,
    loader: &L,
    image_path: &Path,
    annotation_path: &Path,
    threshold: f64,
) -> Result<MetricsRecord>
where
    D: Detector + ?Sized,
    L: AnnotationLoader + ?Sized,
{
    validate_threshold(threshold)?;
    evaluate_pair(
        detector,
        loader,
        &GreedyNonExclusive,
        image_path,
        annotation_path,
        threshold,
    )
}

/// Evaluate a single image using the threshold and matching policy from `config`.
pub fn evaluate_image_with_config<D, L>(
    detector: &D,
    loader: &L,
    image_path: &Path,
    annotation_path: &Path,
    config: &EvaluationConfig,
) -> Result<MetricsRecord>
where
    D: Detector + ?Sized,
    L: AnnotationLoader + ?Sized,
{
    config.validate()?;
    evaluate_pair(
        detector,
        loader,
        &config.matching,
        image_path,
        annotation_path,
        config.threshold,
    )
}

/// Evaluate the detector over every image of a dataset.
///
/// F1 and MDE are simple means over images, not weighted by how many coins
/// each image holds. Detected and annotated counts are totals. A failing image
/// aborts the whole evaluation.
///
/// # Errors
///
/// Returns `EmptyDataset` if the dataset has no images, otherwise the first
/// per-image error.
pub fn evaluate_dataset<D, L>(
    detector: &D,
    loader: &L,
    dataset: &CoinDataset,
    threshold: f64,
) -> Result<AggregateMetricsRecord>
where
    D: Detector + ?Sized,
    L: AnnotationLoader + ?Sized,
{
    validate_threshold(threshold)?;
    evaluate_sequential(detector, loader, &GreedyNonExclusive, dataset, threshold)
}

/// Parallel version of [`evaluate_dataset`].
///
/// Images are evaluated on the rayon thread pool. Per-image records are
/// collected in dataset order and summed in that order, so the result is
/// identical to the sequential one.
pub fn evaluate_dataset_parallel<D, L>(
    detector: &D,
    loader: &L,
    dataset: &CoinDataset,
    threshold: f64,
) -> Result<AggregateMetricsRecord>
where
    D: Detector + Sync + ?Sized,
    L: AnnotationLoader + Sync + ?Sized,
{
    validate_threshold(threshold)?;
    evaluate_parallel(detector, loader, &GreedyNonExclusive, dataset, threshold)
}

/// Evaluate a dataset with the settings from `config`.
pub fn evaluate_dataset_with_config<D, L>(
    detector: &D,
    loader: &L,
    dataset: &CoinDataset,
    config: &EvaluationConfig,
) -> Result<AggregateMetricsRecord>
where
    D: Detector + Sync + ?Sized,
    L: AnnotationLoader + Sync + ?Sized,
{
    config.validate()?;
    if config.parallel {
        evaluate_parallel(detector, loader, &config.matching, dataset, config.threshold)
    } else {
        evaluate_sequential(detector, loader, &config.matching, dataset, config.threshold)
    }
}

fn evaluate_pair<D, L, P>(
    detector: &D,
    loader: &L,
    policy: &P,
    image_path: &Path,
    annotation_path: &Path,
    threshold: f64,
) -> Result<MetricsRecord>
where
    D: Detector + ?Sized,
    L: AnnotationLoader + ?Sized,
    P: MatchingPolicy + ?Sized,
{
    let (predictions, _) = detector
        .detect(image_path)
        .map_err(CircleEvalError::DetectorFailure)?;
    let ground_truths = loader.load(annotation_path)?;

    debug!(
        image = %image_path.display(),
        predictions = predictions.len(),
        ground_truths = ground_truths.len(),
        "scoring image"
    );

    let record = score_image_with(policy, &predictions, &ground_truths, threshold)?;
    debug!(
        image = %image_path.display(),
        f1 = record.f1_score,
        mde = record.mean_detection_error,
        "image scored"
    );
    Ok(record)
}

fn evaluate_sequential<D, L, P>(
    detector: &D,
    loader: &L,
    policy: &P,
    dataset: &CoinDataset,
    threshold: f64,
) -> Result<AggregateMetricsRecord>
where
    D: Detector + ?Sized,
    L: AnnotationLoader + ?Sized,
    P: MatchingPolicy + ?Sized,
{
    ensure_not_empty(dataset)?;
    info!(images = dataset.len(), threshold, "evaluating dataset");

    let records = dataset
        .pairs()
        .map(|(image, annotation)| {
            evaluate_pair(detector, loader, policy, image, annotation, threshold)
        })
        .collect::<Result<Vec<_>>>()?;

    summarize(&records)
}

fn evaluate_parallel<D, L, P>(
    detector: &D,
    loader: &L,
    policy: &P,
    dataset: &CoinDataset,
    threshold: f64,
) -> Result<AggregateMetricsRecord>
where
    D: Detector + Sync + ?Sized,
    L: AnnotationLoader + Sync + ?Sized,
    P: MatchingPolicy + Sync + ?Sized,
{
    ensure_not_empty(dataset)?;
    info!(
        images = dataset.len(),
        threshold,
        threads = rayon::current_num_threads(),
        "evaluating dataset in parallel"
    );

    let records = dataset
        .image_paths
        .par_iter()
        .zip(dataset.annotation_paths.par_iter())
        .map(|(image, annotation)| {
            evaluate_pair(detector, loader, policy, image, annotation, threshold)
        })
        .collect::<Result<Vec<_>>>()?;

    summarize(&records)
}

fn ensure_not_empty(dataset: &CoinDataset) -> Result<()> {
    if dataset.is_empty() {
        return Err(CircleEvalError::EmptyDataset(
            "dataset contains no images".to_string(),
        ));
    }
    Ok(())
}

fn summarize(records: &[MetricsRecord]) -> Result<AggregateMetricsRecord> {
    let aggregate = AggregateMetricsRecord::from_records(records)?;
    info!(
        images = aggregate.image_count,
        average_f1 = aggregate.average_f1_score,
        mde = aggregate.mean_detection_error,
        detected = aggregate.detected_count,
        annotated = aggregate.annotated_count,
        "dataset evaluated"
    );
    Ok(aggregate)
}
