//! Estimators Module: fit/transform Wrappers
//!
//! Thin adapters for machine-learning pipelines: `fit` stores a reference
//! collection of diagrams, `transform` returns the distance matrix from
//! new diagrams to that collection.

mod distances;
mod traits;

pub use distances::{
    BottleneckDistance,
    PersistenceFisherDistance,
    SlicedWassersteinDistance,
    WassersteinDistance,
};
pub use traits::DistanceEstimator;
