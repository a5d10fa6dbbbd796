//! Metric Configuration
//!
//! One flat set of options covering every metric, loadable from JSON.
//! Options that do not apply to the selected metric are ignored.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pairwise::{DistanceDispatcher, Metric};

/// Random Fourier feature map for the persistence Fisher distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KernelApproxConfig {
    /// Number of features F
    pub n_components: usize,
    /// Kernel width; derived from `bandwidth` when absent
    #[serde(default)]
    pub gamma: Option<f64>,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Options for distance computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricConfig {
    /// Metric name
    pub metric: String,
    /// Sliced Wasserstein: number of sampled directions
    pub num_directions: usize,
    /// Persistence Fisher: Gaussian kernel bandwidth
    pub bandwidth: f64,
    /// Persistence Fisher: optional feature map
    pub kernel_approx: Option<KernelApproxConfig>,
    /// Exact Wasserstein: order
    pub order: f64,
    /// Exact Wasserstein: ground metric l_p
    pub internal_p: f64,
    /// Hera Wasserstein: relative error
    pub delta: f64,
    /// Bottleneck: additive error
    pub epsilon: Option<f64>,
    /// Fan rows out over the rayon pool
    pub parallel: bool,
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            metric: "sliced_wasserstein".to_string(),
            num_directions: 10,
            bandwidth: 1.0,
            kernel_approx: None,
            order: 2.0,
            internal_p: 2.0,
            delta: 0.01,
            epsilon: None,
            parallel: true,
        }
    }
}

impl MetricConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn with_metric(mut self, metric: impl Into<String>) -> Self {
        self.metric = metric.into();
        self
    }

    pub fn with_num_directions(mut self, num_directions: usize) -> Self {
        self.num_directions = num_directions;
        self
    }

    pub fn with_bandwidth(mut self, bandwidth: f64) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    /// Build the configured metric; fails on an unknown name
    pub fn build_metric(&self) -> Result<Metric> {
        Metric::from_name(&self.metric, self)
    }

    /// Dispatcher honoring `parallel`, without exact backends
    pub fn dispatcher(&self) -> DistanceDispatcher {
        DistanceDispatcher::new().with_parallel(self.parallel)
    }
}
