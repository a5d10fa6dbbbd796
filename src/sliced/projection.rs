//! Diagram Projection onto Sampled Directions
//!
//! Directions are evenly sampled angles θₖ = -π/2 + k·π/M, k = 0..M-1.
//! The range is half-open: -π/2 and +π/2 describe the same line, so the
//! last sample is left out to avoid counting it twice.

use std::f64::consts::PI;

use ndarray::{s, Array2, ArrayView1, ArrayView2};
use rayon::prelude::*;

use crate::error::{MetricError, Result};
use crate::topology::PersistenceDiagram;

/// Fixed set of M unit directions, stored as a `2 x M` matrix
/// (row 0: cos θₖ, row 1: sin θₖ)
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionSet {
    lines: Array2<f64>,
}

impl DirectionSet {
    /// Sample `num_directions` evenly spaced directions in [-π/2, π/2)
    pub fn new(num_directions: usize) -> Result<Self> {
        if num_directions == 0 {
            return Err(MetricError::InvalidParameter {
                name: "num_directions",
                reason: "must be at least 1".to_string(),
            });
        }

        let step = PI / num_directions as f64;
        let mut lines = Array2::zeros((2, num_directions));
        for k in 0..num_directions {
            let theta = -PI / 2.0 + k as f64 * step;
            lines[[0, k]] = theta.cos();
            lines[[1, k]] = theta.sin();
        }

        Ok(Self { lines })
    }

    /// Number of directions M
    pub fn len(&self) -> usize {
        self.lines.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.ncols() == 0
    }

    pub fn cosines(&self) -> ArrayView1<'_, f64> {
        self.lines.row(0)
    }

    pub fn sines(&self) -> ArrayView1<'_, f64> {
        self.lines.row(1)
    }

    /// Dot products of each row of an `n x 2` array with every direction (`n x M`)
    pub fn project(&self, points: ArrayView2<'_, f64>) -> Array2<f64> {
        points.dot(&self.lines)
    }
}

/// Projections of a diagram and of its diagonal images.
///
/// A `2n x M` matrix: rows `0..n` hold the projected points, rows `n..2n`
/// the projected diagonal images, in the same point order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedDiagram {
    data: Array2<f64>,
}

impl ProjectedDiagram {
    /// Wrap an existing `2n x M` projection matrix
    pub fn from_array(data: Array2<f64>) -> Result<Self> {
        if data.nrows() % 2 != 0 {
            return Err(MetricError::InvalidShape {
                rows: data.nrows(),
                cols: data.ncols(),
            });
        }
        Ok(Self { data })
    }

    /// Number of diagram points n
    pub fn num_points(&self) -> usize {
        self.data.nrows() / 2
    }

    /// Number of directions M
    pub fn num_directions(&self) -> usize {
        self.data.ncols()
    }

    /// Projected points (`n x M`)
    pub fn point_projections(&self) -> ArrayView2<'_, f64> {
        self.data.slice(s![..self.num_points(), ..])
    }

    /// Projected diagonal images (`n x M`)
    pub fn diagonal_projections(&self) -> ArrayView2<'_, f64> {
        self.data.slice(s![self.num_points().., ..])
    }

    /// The full `2n x M` matrix
    pub fn as_array(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }
}

/// Project a diagram and its diagonal images onto every direction
pub fn project_diagram(
    diagram: &PersistenceDiagram,
    directions: &DirectionSet,
) -> ProjectedDiagram {
    let n = diagram.len();
    let diagonal = diagram.diagonal_projections();

    let mut data = Array2::zeros((2 * n, directions.len()));
    data.slice_mut(s![..n, ..]).assign(&directions.project(diagram.points()));
    data.slice_mut(s![n.., ..]).assign(&directions.project(diagonal.view()));

    ProjectedDiagram { data }
}

/// Project every diagram of a collection once, in parallel
pub fn project_diagrams(
    diagrams: &[PersistenceDiagram],
    directions: &DirectionSet,
) -> Vec<ProjectedDiagram> {
    diagrams
        .par_iter()
        .map(|diagram| project_diagram(diagram, directions))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_directions_exclude_upper_endpoint() {
        let directions = DirectionSet::new(4).unwrap();
        assert_eq!(directions.len(), 4);

        // θ = -π/2, -π/4, 0, π/4
        let expected_sin = [-1.0, -(0.5_f64).sqrt(), 0.0, (0.5_f64).sqrt()];
        for (s, e) in directions.sines().iter().zip(expected_sin.iter()) {
            assert_abs_diff_eq!(*s, *e, epsilon = 1e-12);
        }
        for c in directions.cosines().iter() {
            assert!(*c >= -1e-12);
        }
    }

    #[test]
    fn test_zero_directions_rejected() {
        assert!(matches!(
            DirectionSet::new(0),
            Err(MetricError::InvalidParameter { name: "num_directions", .. })
        ));
    }

    #[test]
    fn test_projection_layout() {
        let directions = DirectionSet::new(3).unwrap();
        let pd = PersistenceDiagram::from_points(&[(0.0, 1.0), (2.0, 4.0)]).unwrap();
        let projected = project_diagram(&pd, &directions);

        assert_eq!(projected.as_array().dim(), (4, 3));
        assert_eq!(projected.num_points(), 2);

        for k in 0..3 {
            let (c, s) = (directions.cosines()[k], directions.sines()[k]);
            assert_abs_diff_eq!(
                projected.point_projections()[[1, k]],
                2.0 * c + 4.0 * s,
                epsilon = 1e-12
            );
            assert_abs_diff_eq!(
                projected.diagonal_projections()[[1, k]],
                3.0 * c + 3.0 * s,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_empty_diagram_projection() {
        let directions = DirectionSet::new(5).unwrap();
        let projected = project_diagram(&PersistenceDiagram::empty(), &directions);

        assert_eq!(projected.as_array().dim(), (0, 5));
        assert_eq!(projected.num_points(), 0);
    }

    #[test]
    fn test_odd_row_count_rejected() {
        let err = ProjectedDiagram::from_array(Array2::zeros((3, 2))).unwrap_err();
        assert!(matches!(err, MetricError::InvalidShape { rows: 3, cols: 2 }));
    }
}
