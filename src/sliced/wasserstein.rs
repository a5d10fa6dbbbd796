//! Sliced Wasserstein Evaluation
//!
//! For each direction θ the two measures compared are
//!
//!   A_θ = π_θ(D₁) ∪ π_θ(Δ(D₂)),   B_θ = π_θ(D₂) ∪ π_θ(Δ(D₁))
//!
//! which both hold n₁ + n₂ values. Sorting each and summing |A_θ - B_θ|
//! gives the exact 1-D transport cost; the distance is its mean over θ.

use ndarray::{s, Array2, ArrayView2, Axis};

use super::projection::{DirectionSet, ProjectedDiagram};
use crate::error::{MetricError, Result};
use crate::topology::PersistenceDiagram;

/// Sliced Wasserstein distance between two diagrams using `num_directions` lines
pub fn sliced_wasserstein_distance(
    d1: &PersistenceDiagram,
    d2: &PersistenceDiagram,
    num_directions: usize,
) -> Result<f64> {
    let directions = DirectionSet::new(num_directions)?;
    Ok(sliced_wasserstein_distance_with(d1, d2, &directions))
}

/// Sliced Wasserstein distance on an existing direction set
pub fn sliced_wasserstein_distance_with(
    d1: &PersistenceDiagram,
    d2: &PersistenceDiagram,
    directions: &DirectionSet,
) -> f64 {
    let approx1 = directions.project(d1.points());
    let approx_diag1 = directions.project(d1.diagonal_projections().view());
    let approx2 = directions.project(d2.points());
    let approx_diag2 = directions.project(d2.diagonal_projections().view());

    sorted_l1_mean(
        approx1.view(),
        approx_diag2.view(),
        approx2.view(),
        approx_diag1.view(),
    )
}

/// Sliced Wasserstein distance between two already projected diagrams
///
/// Both projections must come from the same direction set.
pub fn sliced_wasserstein_distance_on_projections(
    p1: &ProjectedDiagram,
    p2: &ProjectedDiagram,
) -> Result<f64> {
    if p1.num_directions() != p2.num_directions() {
        return Err(MetricError::DirectionMismatch {
            left: p1.num_directions(),
            right: p2.num_directions(),
        });
    }

    Ok(sorted_l1_mean(
        p1.point_projections(),
        p2.diagonal_projections(),
        p2.point_projections(),
        p1.diagonal_projections(),
    ))
}

/// Mean over columns of the L¹ distance between the column-sorted stacks
/// [points1; diag2] and [points2; diag1]
fn sorted_l1_mean(
    points1: ArrayView2<'_, f64>,
    diag2: ArrayView2<'_, f64>,
    points2: ArrayView2<'_, f64>,
    diag1: ArrayView2<'_, f64>,
) -> f64 {
    let a = stack_sorted(points1, diag2);
    let b = stack_sorted(points2, diag1);

    let l1 = (&a - &b).mapv(f64::abs).sum_axis(Axis(0));
    l1.mean().unwrap_or(0.0)
}

/// Stack two blocks vertically and sort every column ascending
fn stack_sorted(top: ArrayView2<'_, f64>, bottom: ArrayView2<'_, f64>) -> Array2<f64> {
    let split = top.nrows();
    let mut stacked = Array2::zeros((split + bottom.nrows(), top.ncols()));
    stacked.slice_mut(s![..split, ..]).assign(&top);
    stacked.slice_mut(s![split.., ..]).assign(&bottom);

    for mut column in stacked.columns_mut() {
        let mut values = column.to_vec();
        values.sort_by(f64::total_cmp);
        for (dst, v) in column.iter_mut().zip(values) {
            *dst = v;
        }
    }

    stacked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sliced::project_diagram;
    use approx::assert_abs_diff_eq;

    fn diagram(points: &[(f64, f64)]) -> PersistenceDiagram {
        PersistenceDiagram::from_points(points).unwrap()
    }

    #[test]
    fn test_identity() {
        let d = diagram(&[(0.0, 1.0), (0.2, 0.7), (1.5, 3.0)]);
        let dist = sliced_wasserstein_distance(&d, &d, 10).unwrap();
        assert_eq!(dist, 0.0);
    }

    #[test]
    fn test_single_point_against_empty() {
        let d1 = diagram(&[(0.0, 1.0)]);
        let d2 = PersistenceDiagram::empty();

        let dist = sliced_wasserstein_distance(&d1, &d2, 4).unwrap();

        // Offset from (0, 1) to its diagonal image (0.5, 0.5) is (-0.5, 0.5)
        let expected: f64 = (0..4)
            .map(|k| {
                let theta = -std::f64::consts::FRAC_PI_2 + k as f64 * std::f64::consts::PI / 4.0;
                (-0.5 * theta.cos() + 0.5 * theta.sin()).abs()
            })
            .sum::<f64>()
            / 4.0;

        assert_abs_diff_eq!(dist, expected, epsilon = 1e-12);
        assert_abs_diff_eq!(dist, (1.0 + 0.5_f64.sqrt()) / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_symmetry() {
        let d1 = diagram(&[(0.0, 1.0), (0.5, 2.5)]);
        let d2 = diagram(&[(0.1, 0.9), (1.0, 1.2), (0.3, 3.0)]);

        let a = sliced_wasserstein_distance(&d1, &d2, 25).unwrap();
        let b = sliced_wasserstein_distance(&d2, &d1, 25).unwrap();
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        assert!(a > 0.0);
    }

    #[test]
    fn test_projected_matches_raw() {
        let d1 = diagram(&[(0.0, 1.0), (0.5, 2.5)]);
        let d2 = diagram(&[(0.1, 0.9), (1.0, 1.2), (0.3, 3.0)]);
        let directions = DirectionSet::new(17).unwrap();

        let raw = sliced_wasserstein_distance_with(&d1, &d2, &directions);
        let projected = sliced_wasserstein_distance_on_projections(
            &project_diagram(&d1, &directions),
            &project_diagram(&d2, &directions),
        )
        .unwrap();

        assert_abs_diff_eq!(raw, projected, epsilon = 1e-12);
    }

    #[test]
    fn test_both_empty() {
        let empty = PersistenceDiagram::empty();
        assert_eq!(sliced_wasserstein_distance(&empty, &empty, 8).unwrap(), 0.0);
    }

    #[test]
    fn test_direction_mismatch() {
        let d = diagram(&[(0.0, 1.0)]);
        let p1 = project_diagram(&d, &DirectionSet::new(4).unwrap());
        let p2 = project_diagram(&d, &DirectionSet::new(5).unwrap());

        let err = sliced_wasserstein_distance_on_projections(&p1, &p2).unwrap_err();
        assert!(matches!(err, MetricError::DirectionMismatch { left: 4, right: 5 }));
    }
}
