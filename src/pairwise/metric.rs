//! Metric Selection
//!
//! Built-in metrics form a closed set; anything else is a caller-supplied
//! closure over raw diagram pairs.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::MetricConfig;
use crate::error::{MetricError, Result};
use crate::fisher::{FisherConfig, RandomFourierFeatures};
use crate::topology::PersistenceDiagram;

/// Recognized metric names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    SlicedWasserstein,
    /// Exact Wasserstein, computed by the Hera backend
    Wasserstein,
    HeraWasserstein,
    PotWasserstein,
    Bottleneck,
    PersistenceFisher,
}

impl MetricKind {
    pub const ALL: [MetricKind; 6] = [
        MetricKind::SlicedWasserstein,
        MetricKind::Wasserstein,
        MetricKind::HeraWasserstein,
        MetricKind::PotWasserstein,
        MetricKind::Bottleneck,
        MetricKind::PersistenceFisher,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::SlicedWasserstein => "sliced_wasserstein",
            MetricKind::Wasserstein => "wasserstein",
            MetricKind::HeraWasserstein => "hera_wasserstein",
            MetricKind::PotWasserstein => "pot_wasserstein",
            MetricKind::Bottleneck => "bottleneck",
            MetricKind::PersistenceFisher => "persistence_fisher",
        }
    }

    /// Does this metric need an external exact solver?
    pub fn is_exact(&self) -> bool {
        matches!(
            self,
            MetricKind::Wasserstein
                | MetricKind::HeraWasserstein
                | MetricKind::PotWasserstein
                | MetricKind::Bottleneck
        )
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self> {
        MetricKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| MetricError::UnknownMetric(s.to_string()))
    }
}

/// Exact Wasserstein solver implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WassersteinBackend {
    Hera,
    Pot,
}

/// Parameters forwarded untouched to an exact Wasserstein backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WassersteinParams {
    /// Exponent q of the q-Wasserstein distance
    pub order: f64,
    /// Ground metric l_p on the plane
    pub internal_p: f64,
    /// Relative error 1 + delta (Hera only)
    pub delta: Option<f64>,
}

impl Default for WassersteinParams {
    fn default() -> Self {
        Self {
            order: 2.0,
            internal_p: 2.0,
            delta: None,
        }
    }
}

/// Caller-supplied distance between two diagrams
pub type CustomMetric = Arc<dyn Fn(&PersistenceDiagram, &PersistenceDiagram) -> f64 + Send + Sync>;

/// A distance between persistence diagrams, with its parameters
#[derive(Clone)]
pub enum Metric {
    SlicedWasserstein { num_directions: usize },
    Bottleneck { epsilon: Option<f64> },
    Wasserstein { backend: WassersteinBackend, params: WassersteinParams },
    PersistenceFisher(FisherConfig),
    Custom(CustomMetric),
}

impl Metric {
    pub fn sliced_wasserstein(num_directions: usize) -> Self {
        Metric::SlicedWasserstein { num_directions }
    }

    pub fn persistence_fisher(config: FisherConfig) -> Self {
        Metric::PersistenceFisher(config)
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&PersistenceDiagram, &PersistenceDiagram) -> f64 + Send + Sync + 'static,
    {
        Metric::Custom(Arc::new(f))
    }

    /// Look up a metric by name and take its parameters from `config`
    pub fn from_name(name: &str, config: &MetricConfig) -> Result<Self> {
        Self::from_kind(name.parse()?, config)
    }

    pub fn from_kind(kind: MetricKind, config: &MetricConfig) -> Result<Self> {
        let metric = match kind {
            MetricKind::SlicedWasserstein => Metric::SlicedWasserstein {
                num_directions: config.num_directions,
            },
            MetricKind::Bottleneck => Metric::Bottleneck {
                epsilon: config.epsilon,
            },
            MetricKind::Wasserstein | MetricKind::HeraWasserstein => Metric::Wasserstein {
                backend: WassersteinBackend::Hera,
                params: WassersteinParams {
                    order: config.order,
                    internal_p: config.internal_p,
                    delta: Some(config.delta),
                },
            },
            MetricKind::PotWasserstein => Metric::Wasserstein {
                backend: WassersteinBackend::Pot,
                params: WassersteinParams {
                    order: config.order,
                    internal_p: config.internal_p,
                    delta: None,
                },
            },
            MetricKind::PersistenceFisher => {
                let mut fisher = FisherConfig::new(config.bandwidth)?;
                if let Some(approx) = &config.kernel_approx {
                    let features = match approx.gamma {
                        Some(gamma) => {
                            RandomFourierFeatures::new(approx.n_components, gamma, approx.seed)?
                        }
                        None => RandomFourierFeatures::for_bandwidth(
                            approx.n_components,
                            config.bandwidth,
                            approx.seed,
                        )?,
                    };
                    fisher = fisher.with_kernel_approx(Arc::new(features));
                }
                Metric::PersistenceFisher(fisher)
            }
        };
        Ok(metric)
    }

    /// Name used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Metric::SlicedWasserstein { .. } => MetricKind::SlicedWasserstein.as_str(),
            Metric::Bottleneck { .. } => MetricKind::Bottleneck.as_str(),
            Metric::Wasserstein {
                backend: WassersteinBackend::Hera,
                ..
            } => MetricKind::HeraWasserstein.as_str(),
            Metric::Wasserstein {
                backend: WassersteinBackend::Pot,
                ..
            } => MetricKind::PotWasserstein.as_str(),
            Metric::PersistenceFisher(_) => MetricKind::PersistenceFisher.as_str(),
            Metric::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::SlicedWasserstein { num_directions } => f
                .debug_struct("SlicedWasserstein")
                .field("num_directions", num_directions)
                .finish(),
            Metric::Bottleneck { epsilon } => {
                f.debug_struct("Bottleneck").field("epsilon", epsilon).finish()
            }
            Metric::Wasserstein { backend, params } => f
                .debug_struct("Wasserstein")
                .field("backend", backend)
                .field("params", params)
                .finish(),
            Metric::PersistenceFisher(config) => {
                f.debug_tuple("PersistenceFisher").field(config).finish()
            }
            Metric::Custom(_) => f.write_str("Custom(<fn>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KernelApproxConfig;

    #[test]
    fn test_parse_known_names() {
        for kind in MetricKind::ALL {
            assert_eq!(kind.as_str().parse::<MetricKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "not_a_metric".parse::<MetricKind>().unwrap_err();
        assert!(matches!(err, MetricError::UnknownMetric(ref name) if name == "not_a_metric"));

        let err = Metric::from_name("Sliced_Wasserstein", &MetricConfig::default()).unwrap_err();
        assert!(matches!(err, MetricError::UnknownMetric(_)));
    }

    #[test]
    fn test_wasserstein_aliases() {
        let config = MetricConfig::default();

        for name in ["wasserstein", "hera_wasserstein"] {
            match Metric::from_name(name, &config).unwrap() {
                Metric::Wasserstein { backend, params } => {
                    assert_eq!(backend, WassersteinBackend::Hera);
                    assert_eq!(params.delta, Some(config.delta));
                }
                other => panic!("unexpected metric {:?}", other),
            }
        }

        match Metric::from_name("pot_wasserstein", &config).unwrap() {
            Metric::Wasserstein { backend, params } => {
                assert_eq!(backend, WassersteinBackend::Pot);
                assert_eq!(params.delta, None);
            }
            other => panic!("unexpected metric {:?}", other),
        }
    }

    #[test]
    fn test_fisher_from_config() {
        let config = MetricConfig {
            bandwidth: 0.5,
            kernel_approx: Some(KernelApproxConfig {
                n_components: 32,
                gamma: None,
                seed: Some(1),
            }),
            ..MetricConfig::default()
        };

        match Metric::from_name("persistence_fisher", &config).unwrap() {
            Metric::PersistenceFisher(fisher) => {
                assert_eq!(fisher.bandwidth, 0.5);
                let map = fisher.kernel_approx.expect("feature map");
                assert_eq!(map.dimension(), 32);
            }
            other => panic!("unexpected metric {:?}", other),
        }
    }

    #[test]
    fn test_exact_kinds() {
        assert!(MetricKind::Bottleneck.is_exact());
        assert!(MetricKind::PotWasserstein.is_exact());
        assert!(!MetricKind::SlicedWasserstein.is_exact());
        assert!(!MetricKind::PersistenceFisher.is_exact());
    }
}
