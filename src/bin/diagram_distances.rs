use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tda_diagram_metrics::logging::init_subscriber;
use tda_diagram_metrics::{MetricConfig, MetricError, PersistenceDiagram};
use tracing::{error, info};

fn main() -> Result<(), MetricError> {
    init_subscriber(env!("CARGO_CRATE_NAME"));

    let args = DistanceArgs::parse();

    match run(&args) {
        Ok(()) => {
            info!("distance matrix written");
            Ok(())
        }
        Err(err) => {
            error!(%err, "distance computation failed");
            Err(err)
        }
    }
}

fn run(args: &DistanceArgs) -> Result<(), MetricError> {
    let mut config = match &args.config {
        Some(path) => MetricConfig::from_path(path)?,
        None => MetricConfig::default(),
    };
    if let Some(metric) = &args.metric {
        config.metric = metric.clone();
    }
    if let Some(num_directions) = args.num_directions {
        config.num_directions = num_directions;
    }
    if let Some(bandwidth) = args.bandwidth {
        config.bandwidth = bandwidth;
    }
    if args.sequential {
        config.parallel = false;
    }

    let metric = config.build_metric()?;
    let x = read_diagrams(&args.input)?;
    let y = args.other.as_deref().map(read_diagrams).transpose()?;

    info!(
        metric = metric.name(),
        rows = x.len(),
        cols = y.as_ref().map_or(x.len(), Vec::len),
        "computing distance matrix"
    );

    let matrix = config.dispatcher().pairwise(&x, y.as_deref(), &metric)?;
    let rows: Vec<Vec<f64>> = matrix.outer_iter().map(|row| row.to_vec()).collect();
    let json = serde_json::to_string_pretty(&rows)?;

    match &args.output {
        Some(path) => fs::write(path, json)?,
        None => println!("{}", json),
    }
    Ok(())
}

/// Read a JSON list of diagrams, each a list of [birth, death] pairs
fn read_diagrams(path: &Path) -> Result<Vec<PersistenceDiagram>, MetricError> {
    let contents = fs::read_to_string(path)?;
    let raw: Vec<Vec<[f64; 2]>> = serde_json::from_str(&contents)?;

    raw.iter()
        .map(|points| {
            let pairs: Vec<(f64, f64)> = points.iter().map(|&[b, d]| (b, d)).collect();
            PersistenceDiagram::from_points(&pairs)
        })
        .collect()
}

#[derive(Debug, Parser)]
#[command(about = "Pairwise distance matrix between persistence diagram collections")]
struct DistanceArgs {
    /// JSON file with the first collection of diagrams (required)
    #[arg(long = "input", short, required = true)]
    pub input: PathBuf,

    /// JSON file with the second collection; the first is compared with itself when omitted
    #[arg(long = "other", short = 'y')]
    pub other: Option<PathBuf>,

    /// Metric name: sliced_wasserstein, persistence_fisher, wasserstein, hera_wasserstein,
    /// pot_wasserstein or bottleneck
    #[arg(long = "metric", short)]
    pub metric: Option<String>,

    /// JSON metric configuration file
    #[arg(long = "config", short)]
    pub config: Option<PathBuf>,

    /// Number of sliced Wasserstein directions
    #[arg(long = "num_directions", short = 'M')]
    pub num_directions: Option<usize>,

    /// Persistence Fisher kernel bandwidth
    #[arg(long = "bandwidth", short)]
    pub bandwidth: Option<f64>,

    /// Evaluate rows on a single thread
    #[arg(long = "sequential")]
    pub sequential: bool,

    /// Write the matrix to this file instead of stdout
    #[arg(long = "output", short)]
    pub output: Option<PathBuf>,
}
