//! Estimator Trait: fit/transform API over Diagram Collections
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  DistanceEstimator Trait                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  + fit(D)            - Store reference diagrams             │
//! │  + transform(X)      - |X| x |D| distance matrix            │
//! │  + fit_transform(X)  - fit(X) then transform(X)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use ndarray::Array2;

use crate::error::Result;
use crate::topology::PersistenceDiagram;

/// Distance-matrix estimator in the fit/transform style of ML pipelines
pub trait DistanceEstimator {
    /// Store the reference collection
    fn fit(&mut self, diagrams: &[PersistenceDiagram]) -> &mut Self;

    /// Distances from each of `diagrams` (rows) to the fitted diagrams (columns)
    fn transform(&self, diagrams: &[PersistenceDiagram]) -> Result<Array2<f64>>;

    /// Fit on `diagrams` and return their own distance matrix
    fn fit_transform(&mut self, diagrams: &[PersistenceDiagram]) -> Result<Array2<f64>> {
        self.fit(diagrams);
        self.transform(diagrams)
    }
}
