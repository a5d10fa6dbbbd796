//! # TDA-Diagram-Metrics
//!
//! Distances between persistence diagrams for machine-learning pipelines.
//!
//! ## Overview
//!
//! A persistence diagram summarizes the topology of data as a multiset of
//! (birth, death) points. Comparing diagrams turns topological summaries
//! into similarities usable by kernels, clustering and nearest-neighbor
//! methods. This crate provides:
//!
//! 1. **Sliced Wasserstein distance**: projects diagrams onto evenly
//!    sampled lines and averages closed-form 1-D transport costs
//!
//! 2. **Persistence Fisher distance**: smooths diagrams into Gaussian
//!    densities and takes their Fisher-Rao geodesic distance, optionally
//!    through an explicit feature map (random Fourier features)
//!
//! 3. **Pairwise distance matrices**: between two collections, or one
//!    collection and itself, reusing sliced projections across pairs and
//!    delegating exact bottleneck/Wasserstein distances to pluggable
//!    external backends
//!
//! Both approximate distances vanish on identical diagrams and are
//! symmetric. Diagrams must not contain essential (infinite) points.
//!
//! ## Example
//!
//! ```
//! use tda_diagram_metrics::{pairwise_persistence_diagram_distances, Metric, PersistenceDiagram};
//!
//! let diagrams = vec![
//!     PersistenceDiagram::from_points(&[(0.0, 1.0), (0.2, 0.5)]).unwrap(),
//!     PersistenceDiagram::from_points(&[(0.1, 1.1)]).unwrap(),
//! ];
//! let metric = Metric::sliced_wasserstein(10);
//! let matrix = pairwise_persistence_diagram_distances(&diagrams, None, &metric).unwrap();
//! assert_eq!(matrix.dim(), (2, 2));
//! assert_eq!(matrix[[0, 1]], matrix[[1, 0]]);
//! ```
//!
//! ## References
//!
//! - Carrière, Cuturi, Oudot, "Sliced Wasserstein Kernel for Persistence
//!   Diagrams", ICML (2017)
//! - Le & Yamada, "Persistence Fisher Kernel: A Riemannian Manifold Kernel
//!   for Persistence Diagrams", NeurIPS (2018)
//! - Rahimi & Recht, "Random Features for Large-Scale Kernel Machines",
//!   NeurIPS (2007)

pub mod config;
pub mod error;
pub mod estimators;
pub mod fisher;
pub mod logging;
pub mod pairwise;
pub mod sliced;
pub mod topology;

pub use error::{MetricError, Result};

pub use config::{KernelApproxConfig, MetricConfig};

// Re-exports from topology
pub use topology::{PersistenceDiagram, PersistenceInterval};

// Re-exports from sliced
pub use sliced::{
    project_diagram,
    project_diagrams,
    sliced_wasserstein_distance,
    sliced_wasserstein_distance_on_projections,
    sliced_wasserstein_distance_with,
    DirectionSet,
    ProjectedDiagram,
};

// Re-exports from fisher
pub use fisher::{
    persistence_fisher_distance,
    persistence_fisher_distance_with,
    FeatureMap,
    FisherConfig,
    RandomFourierFeatures,
};

// Re-exports from pairwise
pub use pairwise::{
    pairwise_persistence_diagram_distances,
    BackendAvailability,
    CustomMetric,
    DistanceDispatcher,
    ExactBackends,
    ExactDistanceBackend,
    Metric,
    MetricKind,
    WassersteinBackend,
    WassersteinParams,
};

// Re-exports from estimators
pub use estimators::{
    BottleneckDistance,
    DistanceEstimator,
    PersistenceFisherDistance,
    SlicedWassersteinDistance,
    WassersteinDistance,
};
