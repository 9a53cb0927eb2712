//! Find the minimal number of K-means clusters that keeps every cluster
//! single-labeled, on raw and on z-score normalized features.
//!
//! Usage: `iris-kmeans [INPUT] [--seed N] [--final-k respective|larger] [-v]`
//!
//! INPUT is a comma-separated file of `feature,...,feature,label` records,
//! e.g. the UCI Iris data.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use iris_kmeans::{
    ClusterResult, Dataset, KMeansConfig, MinimalKSearch, RunReport, SearchConfig, ZScore,
    ZeroVariance,
};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Which k the final report uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FinalK {
    /// Each search's homogeneous run at its own minimal k
    Respective,
    /// A fresh run of both datasets at the larger of the two minimal k
    Larger,
}

/// How to standardize a feature column with zero variance
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ZeroVarianceArg {
    Fail,
    Zero,
}

impl From<ZeroVarianceArg> for ZeroVariance {
    fn from(arg: ZeroVarianceArg) -> Self {
        match arg {
            ZeroVarianceArg::Fail => ZeroVariance::Fail,
            ZeroVarianceArg::Zero => ZeroVariance::Zero,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "iris-kmeans")]
#[command(about = "Minimal homogeneous K-means cluster count, raw vs normalized features")]
struct Args {
    /// Comma-separated input file, one `features...,label` record per line.
    #[arg(default_value = "iris.txt")]
    input: PathBuf,

    /// Random seed. Drawn at random (and logged) when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Convergence tolerance on the largest centroid component change.
    #[arg(long, default_value_t = 1e-9, allow_hyphen_values = true)]
    tol: f64,

    /// Maximum assign/update iterations per run.
    #[arg(long, default_value_t = 300)]
    max_iters: usize,

    /// Largest k to try (defaults to the number of samples).
    #[arg(long)]
    max_k: Option<usize>,

    /// Which k the final centroids and assignments are reported for.
    #[arg(long, value_enum, default_value_t = FinalK::Respective)]
    final_k: FinalK,

    /// Zero-variance column policy for normalization.
    #[arg(long, value_enum, default_value_t = ZeroVarianceArg::Fail)]
    zero_variance: ZeroVarianceArg,

    /// Only print centroids, not the cluster of every sample.
    #[arg(long)]
    no_assignments: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "starting search");

    let raw = Dataset::from_path(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    let normalized = ZScore::fit(&raw)
        .with_zero_variance(args.zero_variance.into())
        .transform(&raw)
        .context("failed to normalize features")?;
    info!(
        samples = raw.len(),
        features = raw.n_features(),
        classes = raw.classes().len(),
        "loaded dataset"
    );

    let kmeans = KMeansConfig::new(seed)
        .with_tol(args.tol)
        .with_max_iters(args.max_iters);
    let mut config = SearchConfig::new(kmeans);
    config.max_k = args.max_k;

    let mut search = MinimalKSearch::new(config);
    let comparison = search
        .compare(&raw, &normalized)
        .context("minimal k search failed")?;

    let (raw_result, normalized_result): (ClusterResult, ClusterResult) = match args.final_k {
        FinalK::Respective => (
            comparison.raw.result.clone(),
            comparison.normalized.result.clone(),
        ),
        FinalK::Larger => {
            let k = comparison.larger_k();
            (search.rerun(&raw, k)?, search.rerun(&normalized, k)?)
        }
    };

    println!(
        "{}",
        RunReport::new("without normalization", comparison.raw.k, &raw, &raw_result)
            .with_assignments(!args.no_assignments)
    );
    println!(
        "{}",
        RunReport::new(
            "with normalization",
            comparison.normalized.k,
            &normalized,
            &normalized_result
        )
        .with_assignments(!args.no_assignments)
    );

    Ok(())
}
