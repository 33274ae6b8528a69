//! Basic evaluation example demonstrating core functionality.

use std::path::Path;

use circle_eval::{
    evaluator::score_image, load_from_string, metrics::overlap::compute_overlap,
    threshold::{find_best_threshold, generate_threshold_range, sweep_f1},
    AggregateMetricsRecord, Circle, DetectorError,
};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    println!("=== Circle Evaluation Example ===\n");

    // Example 1: Overlap calculation
    println!("1. Overlap Calculation");
    let a = Circle::new(0.0, 0.0, 5.0);
    let b = Circle::new(3.0, 0.0, 5.0);
    println!("   Overlap between partially overlapping coins: {:.4}", compute_overlap(&a, &b)?);
    let inner = Circle::new(1.0, 0.0, 2.0);
    println!("   Overlap of a coin lying inside another: {:.4}", compute_overlap(&a, &inner)?);
    println!();

    // Example 2: Load ground truth
    println!("2. Loading Annotations");
    let annotation_json = r#"{
        "version": "5.2.1",
        "shapes": [
            {"label": "coin", "points": [[120.0, 80.0], [120.0, 110.0]], "shape_type": "circle"},
            {"label": "coin", "points": [[260.0, 95.0], [260.0, 131.0]], "shape_type": "circle"},
            {"label": "coin", "points": [[400.0, 300.0], [424.0, 300.0]], "shape_type": "circle"}
        ],
        "imagePath": "40.jpg"
    }"#;
    let ground_truths = load_from_string(annotation_json)?;
    println!("   Loaded {} annotated coins", ground_truths.len());
    println!();

    // Example 3: A detector is any function from an image path to circles
    println!("3. Running a Detector");
    let detector = |_: &Path| -> Result<(Vec<Circle>, f64), DetectorError> {
        let circles = vec![
            Circle::new(120.0, 80.0, 15.0),
            Circle::new(262.0, 97.0, 17.0),
            Circle::new(600.0, 50.0, 10.0),
        ];
        Ok((circles, 0.012))
    };
    let (predictions, inference_seconds) = detector(Path::new("dataset/images/40.jpg"))?;
    println!("   Detected {} coins in {:.3}s", predictions.len(), inference_seconds);
    println!();

    // Example 4: Score the image
    println!("4. Scoring");
    let record = score_image(&predictions, &ground_truths, 0.5)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    println!();

    // Example 5: Threshold sweep
    println!("5. Threshold Sweep");
    let thresholds = generate_threshold_range(0.1, 1.0, 10)?;
    let sweep = sweep_f1(&predictions, &ground_truths, &thresholds)?;
    for (threshold, f1) in &sweep {
        println!("   threshold {:.2}: F1 {:.4}", threshold, f1);
    }
    if let Some((threshold, f1)) = find_best_threshold(&sweep) {
        println!("   Best: threshold {:.2} with F1 {:.4}", threshold, f1);
    }
    println!();

    // Example 6: Aggregating several images
    println!("6. Dataset Aggregate");
    let second = score_image(&ground_truths[..1], &ground_truths, 0.5)?;
    let aggregate = AggregateMetricsRecord::from_records(&[record, second])?;
    println!("{}", serde_json::to_string_pretty(&aggregate)?);

    Ok(())
}
