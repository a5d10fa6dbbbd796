//! Persistence Diagrams
//!
//! A persistence diagram is a finite multiset of points (b, d) in the
//! plane, one per topological feature "born" at filtration value b and
//! "dying" at value d. Distances between diagrams never depend on point
//! order, only on the multiset.
//!
//! ## Diagonal
//!
//! The diagonal b = d carries the "no feature" mass. Every point (b, d)
//! has a diagonal image ((b+d)/2, (b+d)/2), its closest point on the
//! diagonal. Diagrams of different cardinality are compared by matching
//! surplus points against the other diagram's diagonal images.

use ndarray::{Array2, ArrayView2};

use crate::error::{MetricError, Result};

/// A persistence interval [birth, death) in a given homology dimension
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersistenceInterval {
    pub birth: f64,
    pub death: f64,
    pub dimension: usize,
}

impl PersistenceInterval {
    pub fn new(birth: f64, death: f64, dimension: usize) -> Self {
        Self { birth, death, dimension }
    }

    /// Lifetime of the feature
    pub fn persistence(&self) -> f64 {
        self.death - self.birth
    }

    /// Is this an essential feature (infinite persistence)?
    pub fn is_essential(&self) -> bool {
        self.death.is_infinite()
    }
}

/// Finite persistence diagram stored as an `n x 2` array of (birth, death) rows.
///
/// Construction validates every row: two columns, finite coordinates and
/// `birth <= death`. Once built the diagram is read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistenceDiagram {
    points: Array2<f64>,
}

impl PersistenceDiagram {
    /// Diagram with no points
    pub fn empty() -> Self {
        Self {
            points: Array2::zeros((0, 2)),
        }
    }

    /// Build a diagram from an `n x 2` array
    pub fn from_array(points: Array2<f64>) -> Result<Self> {
        if points.ncols() != 2 {
            return Err(MetricError::InvalidShape {
                rows: points.nrows(),
                cols: points.ncols(),
            });
        }

        for (index, row) in points.outer_iter().enumerate() {
            let (birth, death) = (row[0], row[1]);
            if !birth.is_finite() || !death.is_finite() {
                return Err(MetricError::NonFinitePoint { index });
            }
            if birth > death {
                return Err(MetricError::InvertedPoint { index, birth, death });
            }
        }

        Ok(Self { points })
    }

    /// Build a diagram from (birth, death) pairs
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self> {
        let flat: Vec<f64> = points.iter().flat_map(|&(b, d)| [b, d]).collect();
        Self::from_array(Array2::from_shape_vec((points.len(), 2), flat)?)
    }

    /// Build the diagram of one homology dimension from raw intervals.
    ///
    /// Essential intervals (infinite death) are dropped, since none of the
    /// distances in this crate are defined for them.
    pub fn from_intervals(intervals: &[PersistenceInterval], dimension: usize) -> Result<Self> {
        let points: Vec<(f64, f64)> = intervals
            .iter()
            .filter(|i| i.dimension == dimension && !i.is_essential())
            .map(|i| (i.birth, i.death))
            .collect();
        Self::from_points(&points)
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    /// The `n x 2` point array
    pub fn points(&self) -> ArrayView2<'_, f64> {
        self.points.view()
    }

    /// Iterate over (birth, death) pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.outer_iter().map(|row| (row[0], row[1]))
    }

    /// Diagonal images ((b+d)/2, (b+d)/2) of every point, in point order
    pub fn diagonal_projections(&self) -> Array2<f64> {
        let mut diagonal = Array2::zeros((self.len(), 2));
        for (mut out, row) in diagonal.outer_iter_mut().zip(self.points.outer_iter()) {
            let mid = 0.5 * (row[0] + row[1]);
            out[0] = mid;
            out[1] = mid;
        }
        diagonal
    }

    /// Sum of lifetimes d - b
    pub fn total_persistence(&self) -> f64 {
        self.iter().map(|(b, d)| d - b).sum()
    }
}

impl Default for PersistenceDiagram {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Array2<f64>> for PersistenceDiagram {
    type Error = MetricError;

    fn try_from(points: Array2<f64>) -> Result<Self> {
        Self::from_array(points)
    }
}
