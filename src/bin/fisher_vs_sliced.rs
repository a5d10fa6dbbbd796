//! Fisher vs Sliced: Separation of Synthetic Diagram Families
//!
//! This binary compares the two approximate diagram distances on a toy
//! classification problem.
//!
//! ## Protocol
//!
//! 1. Sample diagrams from two families: one prominent feature or two
//!    prominent features, both with near-diagonal noise
//! 2. Compute the full pairwise matrix for sliced Wasserstein and for
//!    persistence Fisher (exact kernel and random Fourier features)
//! 3. Report mean within-family and between-family distances

use std::sync::Arc;
use std::time::Instant;

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};
use tda_diagram_metrics::logging::init_subscriber;
use tda_diagram_metrics::{
    DistanceDispatcher, FisherConfig, Metric, MetricError, PersistenceDiagram,
    RandomFourierFeatures,
};
use tracing::info;

fn main() -> Result<(), MetricError> {
    init_subscriber(env!("CARGO_CRATE_NAME"));

    println!("═══════════════════════════════════════════════════════════════");
    println!("  Diagram Distances: Sliced Wasserstein vs Persistence Fisher");
    println!("═══════════════════════════════════════════════════════════════\n");

    // Experiment parameters
    let n_per_family = 20;
    let n_noise = 15;
    let num_directions = 50;
    let bandwidth = 0.1;
    let n_features = 500;

    println!("Parameters:");
    println!("  Diagrams per family = {}", n_per_family);
    println!("  Noise points per diagram = {}", n_noise);
    println!("  Directions M = {}", num_directions);
    println!("  Bandwidth σ = {:.2}", bandwidth);
    println!("  Random features F = {}", n_features);
    println!();

    let mut rng = StdRng::seed_from_u64(2026);
    let mut diagrams = Vec::with_capacity(2 * n_per_family);
    for family in 0..2 {
        for _ in 0..n_per_family {
            diagrams.push(sample_diagram(&mut rng, family + 1, n_noise)?);
        }
    }
    let labels: Vec<usize> = (0..2 * n_per_family).map(|i| i / n_per_family).collect();

    let dispatcher = DistanceDispatcher::new();
    let features = RandomFourierFeatures::for_bandwidth(n_features, bandwidth, Some(7))?;
    let metrics = [
        ("Sliced Wasserstein", Metric::sliced_wasserstein(num_directions)),
        ("Persistence Fisher", Metric::persistence_fisher(FisherConfig::new(bandwidth)?)),
        (
            "Persistence Fisher (RFF)",
            Metric::persistence_fisher(
                FisherConfig::new(bandwidth)?.with_kernel_approx(Arc::new(features)),
            ),
        ),
    ];

    println!("─────────────────────────────────────────────────────────────");
    println!("  {:<26} {:>10} {:>10} {:>8} {:>9}", "Metric", "within", "between", "ratio", "time");
    println!("─────────────────────────────────────────────────────────────");

    for (label, metric) in &metrics {
        let start = Instant::now();
        let matrix = dispatcher.pairwise(&diagrams, None, metric)?;
        let elapsed = start.elapsed();

        let (within, between) = family_means(&matrix, &labels);
        info!(metric = metric.name(), ?elapsed, "distance matrix computed");
        println!(
            "  {:<26} {:>10.4} {:>10.4} {:>8.2} {:>7.1}ms",
            label,
            within,
            between,
            between / within.max(f64::EPSILON),
            elapsed.as_secs_f64() * 1e3
        );
    }

    println!("\n─────────────────────────────────────────────────────────────");
    println!("Note:");
    println!("  A ratio well above 1 means the metric separates the families.");
    println!(
        "  Persistence Fisher distances are bounded by π/2 = {:.4}.",
        std::f64::consts::FRAC_PI_2
    );

    println!("\n═══════════════════════════════════════════════════════════════");
    println!("  Analysis Complete");
    println!("═══════════════════════════════════════════════════════════════");

    Ok(())
}

/// Diagram with `n_features` prominent points and `n_noise` near-diagonal points
fn sample_diagram(
    rng: &mut StdRng,
    n_features: usize,
    n_noise: usize,
) -> Result<PersistenceDiagram, MetricError> {
    let jitter = Normal::new(0.0, 0.05).map_err(|e| MetricError::InvalidParameter {
        name: "jitter",
        reason: e.to_string(),
    })?;
    let births = Uniform::new(0.0, 1.0);

    let mut points = Vec::with_capacity(n_features + n_noise);
    for k in 0..n_features {
        let birth = 0.1 + 0.3 * k as f64 + jitter.sample(rng);
        let death = birth + 0.8 + jitter.sample(rng);
        points.push((birth, death.max(birth)));
    }
    for _ in 0..n_noise {
        let birth = births.sample(rng);
        let lifetime: f64 = jitter.sample(rng);
        points.push((birth, birth + lifetime.abs()));
    }

    PersistenceDiagram::from_points(&points)
}

/// Mean distance between diagrams of the same family and of different families
fn family_means(matrix: &Array2<f64>, labels: &[usize]) -> (f64, f64) {
    let (mut within, mut n_within) = (0.0, 0usize);
    let (mut between, mut n_between) = (0.0, 0usize);

    for i in 0..labels.len() {
        for j in i + 1..labels.len() {
            if labels[i] == labels[j] {
                within += matrix[[i, j]];
                n_within += 1;
            } else {
                between += matrix[[i, j]];
                n_between += 1;
            }
        }
    }

    (within / n_within.max(1) as f64, between / n_between.max(1) as f64)
}
