use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use kmeanseval::{
    make_blobs, BlobsConfig, ChartStyle, EvaluatorError, EvaluatorParams, KMeansEvaluator,
    MetricValue,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kmeanseval")]
#[command(about = "Compare k-means clusterings over a range of k with WSS and silhouette scores")]
#[command(version)]
struct Cli {
    /// CSV file of numeric rows to cluster (a non-numeric header line is skipped)
    #[arg(required_unless_present = "demo")]
    input: Option<PathBuf>,

    /// Cluster synthetic Gaussian blobs instead of reading a file
    #[arg(long, conflicts_with = "input")]
    demo: bool,

    /// Smallest number of clusters to evaluate
    #[arg(long, default_value_t = 2)]
    k_min: usize,

    /// Largest number of clusters to evaluate
    #[arg(long, default_value_t = 10)]
    k_max: usize,

    /// K-means runs per k; the run with the lowest inertia is kept
    #[arg(long, default_value_t = 10)]
    n_runs: usize,

    /// Maximum iterations of a single k-means run
    #[arg(long, default_value_t = 300)]
    max_iter: u64,

    /// Convergence tolerance of a k-means run
    #[arg(long, default_value_t = 1e-4)]
    tolerance: f64,

    /// Random seed, for reproducible results
    #[arg(long)]
    seed: Option<u64>,

    /// Print the named metric: wss, silhouette_score or silhouette_sample
    #[arg(long)]
    metric: Option<String>,

    /// Directory to write the elbow and silhouette charts to, as SVG
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), EvaluatorError> {
    let mut builder = EvaluatorParams::builder()
        .k_range(cli.k_min..cli.k_max.saturating_add(1))
        .n_runs(cli.n_runs)
        .max_n_iterations(cli.max_iter)
        .tolerance(cli.tolerance);
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    let params = builder.build();

    let evaluator = match &cli.input {
        Some(path) => KMeansEvaluator::from_rows(&read_csv(path)?, params)?,
        None => {
            let config = BlobsConfig {
                n_samples: 500,
                centers: 4,
                cluster_std: 0.6,
                seed: cli.seed.unwrap_or(0),
                ..BlobsConfig::default()
            };
            KMeansEvaluator::fit(make_blobs(&config).0, params)?
        }
    };

    println!("{:>4} {:>16} {:>16}", "k", "wss", "silhouette");
    let scores = evaluator.silhouette_scores()?;
    for ((k, wss), score) in evaluator.k_values().iter().zip(evaluator.wss()).zip(scores) {
        println!("{k:>4} {wss:>16.4} {score:>16.4}");
    }

    if let Some(name) = &cli.metric {
        for (k, value) in evaluator.k_values().iter().zip(evaluator.get_metrics_by_name(name)?) {
            match value {
                MetricValue::Scalar(value) => println!("k = {k}: {value}"),
                MetricValue::Samples(samples) => println!("k = {k}: {samples}"),
            }
        }
    }

    if let Some(out_dir) = &cli.out_dir {
        write_charts(&evaluator, out_dir)?;
    }
    Ok(())
}

fn write_charts(evaluator: &KMeansEvaluator<f64>, out_dir: &Path) -> Result<(), EvaluatorError> {
    fs::create_dir_all(out_dir)?;
    evaluator
        .plot_elbow(ChartStyle::metric_default())
        .save(out_dir.join("elbow.svg"))?;
    evaluator
        .plot_avg_silhouette_scores(ChartStyle::metric_default())?
        .save(out_dir.join("avg_silhouette.svg"))?;
    let charts = evaluator.plot_silhouette_scores(ChartStyle::silhouette_default())?;
    for (k, chart) in evaluator.k_values().iter().zip(charts) {
        chart.save(out_dir.join(format!("silhouette_k{k}.svg")))?;
    }
    tracing::info!("wrote charts to {}", out_dir.display());
    Ok(())
}

fn read_csv(path: &Path) -> Result<Vec<Vec<f64>>, EvaluatorError> {
    let contents = fs::read_to_string(path)?;
    let mut rows = Vec::new();
    for (n, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parsed: Result<Vec<f64>, _> =
            line.split(',').map(|num| num.trim().parse::<f64>()).collect();
        match parsed {
            Ok(row) => rows.push(row),
            Err(_) if n == 0 => tracing::debug!("skipping header line: {line}"),
            Err(e) => {
                return Err(EvaluatorError::InvalidInput(format!(
                    "line {} is not numeric: {e}",
                    n + 1
                )))
            }
        }
    }
    Ok(rows)
}
