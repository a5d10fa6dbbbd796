//! Distance Estimators
//!
//! Each estimator keeps the fitted collection and its metric parameters,
//! and forwards to the `DistanceDispatcher` on transform.

use std::sync::Arc;

use ndarray::Array2;
use tracing::debug;

use super::traits::DistanceEstimator;
use crate::error::{MetricError, Result};
use crate::fisher::{FeatureMap, FisherConfig};
use crate::pairwise::{DistanceDispatcher, Metric, WassersteinBackend, WassersteinParams};
use crate::topology::PersistenceDiagram;

/// Fitted diagrams plus the dispatcher used to compare against them
#[derive(Debug, Clone, Default)]
struct Reference {
    diagrams: Option<Vec<PersistenceDiagram>>,
    dispatcher: DistanceDispatcher,
}

impl Reference {
    fn fit(&mut self, diagrams: &[PersistenceDiagram], estimator: &'static str) {
        debug!(estimator, count = diagrams.len(), "fitted reference diagrams");
        self.diagrams = Some(diagrams.to_vec());
    }

    fn transform(&self, diagrams: &[PersistenceDiagram], metric: &Metric) -> Result<Array2<f64>> {
        let fitted = self.diagrams.as_deref().ok_or(MetricError::NotFitted)?;
        self.dispatcher.pairwise(diagrams, Some(fitted), metric)
    }
}

/// Sliced Wasserstein distance matrix
#[derive(Debug, Clone)]
pub struct SlicedWassersteinDistance {
    /// Number of directions sampled in [-π/2, π/2)
    pub num_directions: usize,
    reference: Reference,
}

impl SlicedWassersteinDistance {
    pub fn new(num_directions: usize) -> Self {
        Self {
            num_directions,
            reference: Reference::default(),
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: DistanceDispatcher) -> Self {
        self.reference.dispatcher = dispatcher;
        self
    }
}

impl Default for SlicedWassersteinDistance {
    fn default() -> Self {
        Self::new(10)
    }
}

impl DistanceEstimator for SlicedWassersteinDistance {
    fn fit(&mut self, diagrams: &[PersistenceDiagram]) -> &mut Self {
        self.reference.fit(diagrams, "sliced_wasserstein");
        self
    }

    fn transform(&self, diagrams: &[PersistenceDiagram]) -> Result<Array2<f64>> {
        self.reference
            .transform(diagrams, &Metric::sliced_wasserstein(self.num_directions))
    }
}

/// Bottleneck distance matrix (needs an exact backend)
#[derive(Debug, Clone, Default)]
pub struct BottleneckDistance {
    /// Additive error tolerated on the distance
    pub epsilon: Option<f64>,
    reference: Reference,
}

impl BottleneckDistance {
    pub fn new(epsilon: Option<f64>) -> Self {
        Self {
            epsilon,
            reference: Reference::default(),
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: DistanceDispatcher) -> Self {
        self.reference.dispatcher = dispatcher;
        self
    }
}

impl DistanceEstimator for BottleneckDistance {
    fn fit(&mut self, diagrams: &[PersistenceDiagram]) -> &mut Self {
        self.reference.fit(diagrams, "bottleneck");
        self
    }

    fn transform(&self, diagrams: &[PersistenceDiagram]) -> Result<Array2<f64>> {
        self.reference
            .transform(diagrams, &Metric::Bottleneck { epsilon: self.epsilon })
    }
}

/// Exact Wasserstein distance matrix (needs an exact backend)
#[derive(Debug, Clone)]
pub struct WassersteinDistance {
    pub order: f64,
    pub internal_p: f64,
    /// Solver used for the distances
    pub mode: WassersteinBackend,
    /// Relative error 1 + delta, forwarded in Hera mode only
    pub delta: f64,
    reference: Reference,
}

impl WassersteinDistance {
    pub fn new(order: f64, internal_p: f64, mode: WassersteinBackend, delta: f64) -> Self {
        Self {
            order,
            internal_p,
            mode,
            delta,
            reference: Reference::default(),
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: DistanceDispatcher) -> Self {
        self.reference.dispatcher = dispatcher;
        self
    }

    fn metric(&self) -> Metric {
        let delta = match self.mode {
            WassersteinBackend::Hera => Some(self.delta),
            WassersteinBackend::Pot => None,
        };
        Metric::Wasserstein {
            backend: self.mode,
            params: WassersteinParams {
                order: self.order,
                internal_p: self.internal_p,
                delta,
            },
        }
    }
}

impl Default for WassersteinDistance {
    fn default() -> Self {
        Self::new(2.0, 2.0, WassersteinBackend::Pot, 0.01)
    }
}

impl DistanceEstimator for WassersteinDistance {
    fn fit(&mut self, diagrams: &[PersistenceDiagram]) -> &mut Self {
        self.reference.fit(diagrams, "wasserstein");
        self
    }

    fn transform(&self, diagrams: &[PersistenceDiagram]) -> Result<Array2<f64>> {
        self.reference.transform(diagrams, &self.metric())
    }
}

/// Persistence Fisher distance matrix
#[derive(Debug, Clone)]
pub struct PersistenceFisherDistance {
    pub bandwidth: f64,
    pub kernel_approx: Option<Arc<dyn FeatureMap>>,
    reference: Reference,
}

impl PersistenceFisherDistance {
    pub fn new(bandwidth: f64, kernel_approx: Option<Arc<dyn FeatureMap>>) -> Self {
        Self {
            bandwidth,
            kernel_approx,
            reference: Reference::default(),
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: DistanceDispatcher) -> Self {
        self.reference.dispatcher = dispatcher;
        self
    }
}

impl Default for PersistenceFisherDistance {
    fn default() -> Self {
        Self::new(1.0, None)
    }
}

impl DistanceEstimator for PersistenceFisherDistance {
    fn fit(&mut self, diagrams: &[PersistenceDiagram]) -> &mut Self {
        self.reference.fit(diagrams, "persistence_fisher");
        self
    }

    fn transform(&self, diagrams: &[PersistenceDiagram]) -> Result<Array2<f64>> {
        let config = FisherConfig {
            bandwidth: self.bandwidth,
            kernel_approx: self.kernel_approx.clone(),
        };
        self.reference
            .transform(diagrams, &Metric::PersistenceFisher(config))
    }
}
