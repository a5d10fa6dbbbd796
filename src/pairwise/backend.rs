//! Exact Distance Backends
//!
//! Exact bottleneck and Wasserstein distances need optimal matching
//! solvers (Hera, POT, ...) that live outside this crate. They plug in
//! through `ExactDistanceBackend`; a slot without an implementation is
//! `Unavailable` and any metric that needs it fails before evaluation.

use std::fmt;
use std::sync::Arc;

use tracing::error;

use super::metric::{WassersteinBackend, WassersteinParams};
use crate::error::{MetricError, Result};
use crate::topology::PersistenceDiagram;

/// External solver for exact diagram distances
pub trait ExactDistanceBackend: Send + Sync + fmt::Debug {
    /// Name shown in diagnostics
    fn name(&self) -> &str;

    /// Bottleneck distance, with optional additive error `epsilon`
    fn bottleneck(
        &self,
        d1: &PersistenceDiagram,
        d2: &PersistenceDiagram,
        epsilon: Option<f64>,
    ) -> Result<f64> {
        let _ = (d1, d2, epsilon);
        Err(MetricError::Backend(format!(
            "{} does not compute bottleneck distances",
            self.name()
        )))
    }

    /// Wasserstein distance of order `params.order`
    fn wasserstein(
        &self,
        d1: &PersistenceDiagram,
        d2: &PersistenceDiagram,
        params: &WassersteinParams,
    ) -> Result<f64> {
        let _ = (d1, d2, params);
        Err(MetricError::Backend(format!(
            "{} does not compute Wasserstein distances",
            self.name()
        )))
    }
}

/// Whether a backend slot can be used
#[derive(Clone)]
pub enum BackendAvailability {
    Available(Arc<dyn ExactDistanceBackend>),
    Unavailable(String),
}

impl BackendAvailability {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        BackendAvailability::Unavailable(reason.into())
    }

    pub fn is_available(&self) -> bool {
        matches!(self, BackendAvailability::Available(_))
    }

    /// The backend, or a dependency error for `metric`
    pub fn require(&self, metric: &str) -> Result<&Arc<dyn ExactDistanceBackend>> {
        match self {
            BackendAvailability::Available(backend) => Ok(backend),
            BackendAvailability::Unavailable(reason) => {
                error!(metric, %reason, "exact distance backend unavailable");
                Err(MetricError::DependencyMissing {
                    metric: metric.to_string(),
                    reason: reason.clone(),
                })
            }
        }
    }
}

impl fmt::Debug for BackendAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendAvailability::Available(backend) => {
                f.debug_tuple("Available").field(&backend.name()).finish()
            }
            BackendAvailability::Unavailable(reason) => {
                f.debug_tuple("Unavailable").field(reason).finish()
            }
        }
    }
}

/// Registered exact backends, one slot per solver
#[derive(Debug, Clone)]
pub struct ExactBackends {
    bottleneck: BackendAvailability,
    hera: BackendAvailability,
    pot: BackendAvailability,
}

impl Default for ExactBackends {
    fn default() -> Self {
        Self {
            bottleneck: BackendAvailability::unavailable(
                "no bottleneck solver registered; \
                 exact bottleneck distances need an external backend",
            ),
            hera: BackendAvailability::unavailable(
                "no Hera solver registered; \
                 register one or use metric 'sliced_wasserstein' for an approximation",
            ),
            pot: BackendAvailability::unavailable(
                "no POT solver registered; \
                 register one or use metric 'wasserstein' or 'hera_wasserstein'",
            ),
        }
    }
}

impl ExactBackends {
    /// All slots unavailable
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bottleneck(mut self, backend: Arc<dyn ExactDistanceBackend>) -> Self {
        self.bottleneck = BackendAvailability::Available(backend);
        self
    }

    pub fn with_hera(mut self, backend: Arc<dyn ExactDistanceBackend>) -> Self {
        self.hera = BackendAvailability::Available(backend);
        self
    }

    pub fn with_pot(mut self, backend: Arc<dyn ExactDistanceBackend>) -> Self {
        self.pot = BackendAvailability::Available(backend);
        self
    }

    pub fn bottleneck(&self) -> &BackendAvailability {
        &self.bottleneck
    }

    pub fn wasserstein(&self, backend: WassersteinBackend) -> &BackendAvailability {
        match backend {
            WassersteinBackend::Hera => &self.hera,
            WassersteinBackend::Pot => &self.pot,
        }
    }
}
