//! Pairwise Distance Matrices
//!
//! Entry (i, j) of the matrix is metric(X[i], Y[j]). Rows are evaluated
//! independently, so they fan out over the rayon pool once any shared
//! precomputation (sliced Wasserstein projections) is done.

use ndarray::Array2;
use rayon::prelude::*;
use tracing::debug;

use super::backend::ExactBackends;
use super::metric::Metric;
use crate::config::MetricConfig;
use crate::error::Result;
use crate::fisher::persistence_fisher_distance_with;
use crate::sliced::{project_diagrams, sliced_wasserstein_distance_on_projections, DirectionSet};
use crate::topology::PersistenceDiagram;

/// Builds distance matrices between diagram collections
#[derive(Debug, Clone)]
pub struct DistanceDispatcher {
    backends: ExactBackends,
    parallel: bool,
}

impl Default for DistanceDispatcher {
    fn default() -> Self {
        Self {
            backends: ExactBackends::default(),
            parallel: true,
        }
    }
}

impl DistanceDispatcher {
    /// Parallel dispatcher without exact backends
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-threaded dispatcher
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    pub fn with_backends(mut self, backends: ExactBackends) -> Self {
        self.backends = backends;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn backends(&self) -> &ExactBackends {
        &self.backends
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Distance matrix between `x` and `y`, or between `x` and itself when
    /// `y` is `None`.
    ///
    /// The single-collection matrix is filled from its upper triangle, so it
    /// is symmetric even for a non-symmetric custom metric.
    pub fn pairwise(
        &self,
        x: &[PersistenceDiagram],
        y: Option<&[PersistenceDiagram]>,
        metric: &Metric,
    ) -> Result<Array2<f64>> {
        let cols = y.map(<[PersistenceDiagram]>::len);
        let other = y.unwrap_or(x);

        debug!(
            metric = metric.name(),
            rows = x.len(),
            cols = other.len(),
            parallel = self.parallel,
            "computing pairwise diagram distances"
        );

        match metric {
            Metric::SlicedWasserstein { num_directions } => {
                let directions = DirectionSet::new(*num_directions)?;
                let x_proj = project_diagrams(x, &directions);
                let y_proj = y.map(|y| project_diagrams(y, &directions));
                let other_proj = y_proj.as_deref().unwrap_or(x_proj.as_slice());
                debug!(
                    projected = x_proj.len() + y_proj.as_ref().map_or(0, Vec::len),
                    directions = directions.len(),
                    "projected diagrams"
                );

                self.fill(x.len(), cols, |i, j| {
                    sliced_wasserstein_distance_on_projections(&x_proj[i], &other_proj[j])
                })
            }
            Metric::Bottleneck { epsilon } => {
                let backend = self.backends.bottleneck().require(metric.name())?;
                self.fill(x.len(), cols, |i, j| backend.bottleneck(&x[i], &other[j], *epsilon))
            }
            Metric::Wasserstein { backend, params } => {
                let backend = self.backends.wasserstein(*backend).require(metric.name())?;
                self.fill(x.len(), cols, |i, j| backend.wasserstein(&x[i], &other[j], params))
            }
            Metric::PersistenceFisher(config) => {
                config.validate()?;
                self.fill(x.len(), cols, |i, j| {
                    persistence_fisher_distance_with(&x[i], &other[j], config)
                })
            }
            Metric::Custom(f) => self.fill(x.len(), cols, |i, j| Ok(f(&x[i], &other[j]))),
        }
    }

    /// Same as `pairwise`, selecting the metric by name with parameters from `config`
    pub fn pairwise_named(
        &self,
        x: &[PersistenceDiagram],
        y: Option<&[PersistenceDiagram]>,
        name: &str,
        config: &MetricConfig,
    ) -> Result<Array2<f64>> {
        let metric = Metric::from_name(name, config)?;
        self.pairwise(x, y, &metric)
    }

    /// Evaluate `eval(i, j)` over a `rows x cols` grid, or over the upper
    /// triangle of a `rows x rows` grid when `cols` is `None`
    fn fill<F>(&self, rows: usize, cols: Option<usize>, eval: F) -> Result<Array2<f64>>
    where
        F: Fn(usize, usize) -> Result<f64> + Sync,
    {
        match cols {
            Some(cols) => {
                let row = |i: usize| (0..cols).map(|j| eval(i, j)).collect::<Result<Vec<f64>>>();
                let values = self.rows(rows, row)?;
                Ok(Array2::from_shape_vec((rows, cols), values.concat())?)
            }
            None => {
                let row = |i: usize| (i..rows).map(|j| eval(i, j)).collect::<Result<Vec<f64>>>();
                let upper = self.rows(rows, row)?;

                let mut matrix = Array2::zeros((rows, rows));
                for (i, values) in upper.into_iter().enumerate() {
                    for (offset, value) in values.into_iter().enumerate() {
                        let j = i + offset;
                        matrix[[i, j]] = value;
                        matrix[[j, i]] = value;
                    }
                }
                Ok(matrix)
            }
        }
    }

    fn rows<R>(&self, rows: usize, row: R) -> Result<Vec<Vec<f64>>>
    where
        R: Fn(usize) -> Result<Vec<f64>> + Sync + Send,
    {
        if self.parallel {
            (0..rows).into_par_iter().map(row).collect()
        } else {
            (0..rows).map(row).collect()
        }
    }
}

/// Distance matrix with the default (parallel, no exact backends) dispatcher
pub fn pairwise_persistence_diagram_distances(
    x: &[PersistenceDiagram],
    y: Option<&[PersistenceDiagram]>,
    metric: &Metric,
) -> Result<Array2<f64>> {
    DistanceDispatcher::default().pairwise(x, y, metric)
}
