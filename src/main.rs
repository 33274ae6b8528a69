//! circle-eval CLI — score detector output against annotated circles.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use circle_eval::evaluator::{evaluate_dataset_with_config, evaluate_image_with_config};
use circle_eval::threshold::{find_best_threshold, generate_threshold_range, sweep_f1};
use circle_eval::{CoinDataset, Detector, EvaluationConfig, LabelMeLoader, PredictionFileDetector};

#[derive(Parser)]
#[command(name = "circle-eval")]
#[command(about = "Evaluate circle detections (F1 and mean detection error) against annotations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single image.
    Image(ImageArgs),

    /// Evaluate every image of a dataset directory (`images/` + `labels/`).
    Dataset(DatasetArgs),

    /// Compute F1 over a range of overlap thresholds for one image.
    Sweep(SweepArgs),
}

#[derive(Debug, Clone, Args)]
struct CommonArgs {
    /// Directory holding `<image stem>.json` prediction files.
    #[arg(long)]
    predictions: PathBuf,

    /// JSON file with evaluation settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum overlap for a match (overrides the config file).
    #[arg(long)]
    threshold: Option<f64>,

    /// Write the resulting record to this JSON file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct ImageArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Path to the annotation JSON.
    #[arg(long)]
    annotation: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Clone, Args)]
struct DatasetArgs {
    /// Dataset root containing `images/` and `labels/`.
    #[arg(long)]
    root: PathBuf,

    /// Evaluate images on all cores.
    #[arg(long)]
    parallel: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Clone, Args)]
struct SweepArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Path to the annotation JSON.
    #[arg(long)]
    annotation: PathBuf,

    /// Directory holding `<image stem>.json` prediction files.
    #[arg(long)]
    predictions: PathBuf,

    /// First threshold of the sweep.
    #[arg(long, default_value = "0.1")]
    start: f64,

    /// Last threshold of the sweep.
    #[arg(long, default_value = "1.0")]
    end: f64,

    /// Number of thresholds.
    #[arg(long, default_value = "10")]
    steps: usize,
}

#[derive(Serialize)]
struct SweepPoint {
    threshold: f64,
    f1: f64,
}

#[derive(Serialize)]
struct SweepReport {
    points: Vec<SweepPoint>,
    best: Option<SweepPoint>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Image(args) => run_image(args),
        Commands::Dataset(args) => run_dataset(args),
        Commands::Sweep(args) => run_sweep(args),
    }
}

fn load_config(common: &CommonArgs) -> Result<EvaluationConfig> {
    let mut config = match &common.config {
        Some(path) => EvaluationConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EvaluationConfig::default(),
    };
    if let Some(threshold) = common.threshold {
        config.threshold = threshold;
    }
    Ok(config)
}

fn run_image(args: ImageArgs) -> Result<()> {
    let config = load_config(&args.common)?;
    let detector = PredictionFileDetector::new(&args.common.predictions);

    info!(image = %args.image.display(), threshold = config.threshold, "evaluating image");
    let record = evaluate_image_with_config(
        &detector,
        &LabelMeLoader,
        &args.image,
        &args.annotation,
        &config,
    )
    .with_context(|| format!("evaluating {}", args.image.display()))?;

    emit(&record, args.common.output.as_deref())
}

fn run_dataset(args: DatasetArgs) -> Result<()> {
    let mut config = load_config(&args.common)?;
    config.parallel |= args.parallel;

    let dataset = CoinDataset::from_directory(&args.root)
        .with_context(|| format!("reading dataset {}", args.root.display()))?;
    let detector = PredictionFileDetector::new(&args.common.predictions);

    let aggregate = evaluate_dataset_with_config(&detector, &LabelMeLoader, &dataset, &config)
        .with_context(|| format!("evaluating dataset {}", args.root.display()))?;

    emit(&aggregate, args.common.output.as_deref())
}

fn run_sweep(args: SweepArgs) -> Result<()> {
    let detector = PredictionFileDetector::new(&args.predictions);
    let (predictions, _) = detector
        .detect(&args.image)
        .map_err(|e| anyhow::anyhow!(e))
        .with_context(|| format!("reading predictions for {}", args.image.display()))?;
    let ground_truths = circle_eval::load_from_file(&args.annotation)
        .with_context(|| format!("loading annotation {}", args.annotation.display()))?;

    let thresholds = generate_threshold_range(args.start, args.end, args.steps)?;
    let sweep = sweep_f1(&predictions, &ground_truths, &thresholds)?;

    let report = SweepReport {
        best: find_best_threshold(&sweep).map(|(threshold, f1)| SweepPoint { threshold, f1 }),
        points: sweep
            .into_iter()
            .map(|(threshold, f1)| SweepPoint { threshold, f1 })
            .collect(),
    };
    emit(&report, None)
}

fn emit<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote results");
        }
        None => println!("{}", json),
    }
    Ok(())
}
