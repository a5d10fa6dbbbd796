//! Persistence Fisher Distance
//!
//! Each diagram is smoothed into an unnormalized Gaussian density that
//! is evaluated on the shared support Z = D₁ ∪ Δ(D₁) ∪ D₂ ∪ Δ(D₂):
//!
//!   ρ₁(z) = Σ_{u ∈ D₁ ∪ Δ(D₂)} N(z; u, σ²)
//!   ρ₂(z) = Σ_{v ∈ D₂ ∪ Δ(D₁)} N(z; v, σ²)
//!
//! After normalization on Z the distance is the Fisher-Rao geodesic
//!
//!   d_FIM = arccos( Σ_z √(ρ₁(z) ρ₂(z)) )
//!
//! which lies in [0, π/2].

use std::f64::consts::PI;
use std::sync::Arc;

use ndarray::{concatenate, Array1, Array2, ArrayView2, Axis};

use super::kernel::FeatureMap;
use crate::error::{MetricError, Result};
use crate::topology::PersistenceDiagram;

/// Parameters of the persistence Fisher distance
#[derive(Debug, Clone)]
pub struct FisherConfig {
    /// Standard deviation of the Gaussian kernel
    pub bandwidth: f64,
    /// Explicit feature map replacing the exact kernel sums
    pub kernel_approx: Option<Arc<dyn FeatureMap>>,
}

impl Default for FisherConfig {
    fn default() -> Self {
        Self {
            bandwidth: 1.0,
            kernel_approx: None,
        }
    }
}

impl FisherConfig {
    pub fn new(bandwidth: f64) -> Result<Self> {
        let config = Self {
            bandwidth,
            kernel_approx: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_kernel_approx(mut self, feature_map: Arc<dyn FeatureMap>) -> Self {
        self.kernel_approx = Some(feature_map);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.bandwidth.is_finite() && self.bandwidth > 0.0) {
            return Err(MetricError::InvalidParameter {
                name: "bandwidth",
                reason: format!("must be positive and finite, got {}", self.bandwidth),
            });
        }
        Ok(())
    }
}

/// Persistence Fisher distance with the exact Gaussian kernel
pub fn persistence_fisher_distance(
    d1: &PersistenceDiagram,
    d2: &PersistenceDiagram,
    bandwidth: f64,
) -> Result<f64> {
    persistence_fisher_distance_with(d1, d2, &FisherConfig::new(bandwidth)?)
}

/// Persistence Fisher distance, using the feature map of `config` when set
pub fn persistence_fisher_distance_with(
    d1: &PersistenceDiagram,
    d2: &PersistenceDiagram,
    config: &FisherConfig,
) -> Result<f64> {
    config.validate()?;

    let diag1 = d1.diagonal_projections();
    let diag2 = d2.diagonal_projections();

    let (vectori, vectorj) = match &config.kernel_approx {
        Some(feature_map) => feature_densities(feature_map.as_ref(), d1, &diag1, d2, &diag2)?,
        None => {
            let z = concatenate(Axis(0), &[d1.points(), diag1.view(), d2.points(), diag2.view()])?;
            let u = concatenate(Axis(0), &[d1.points(), diag2.view()])?;
            let v = concatenate(Axis(0), &[d2.points(), diag1.view()])?;
            (
                gaussian_density(z.view(), u.view(), config.bandwidth),
                gaussian_density(z.view(), v.view(), config.bandwidth),
            )
        }
    };

    Ok(fisher_rao(vectori, vectorj))
}

/// Kernel density at every row of `support`, summed over `centers`
fn gaussian_density(
    support: ArrayView2<'_, f64>,
    centers: ArrayView2<'_, f64>,
    bandwidth: f64,
) -> Array1<f64> {
    let norm = 1.0 / (bandwidth * (2.0 * PI).sqrt());
    let denom = 2.0 * bandwidth * bandwidth;

    support
        .outer_iter()
        .map(|z| {
            centers
                .outer_iter()
                .map(|u| {
                    let dx = z[0] - u[0];
                    let dy = z[1] - u[1];
                    (-(dx * dx + dy * dy) / denom).exp() * norm
                })
                .sum::<f64>()
        })
        .collect()
}

/// Densities in feature space: |Φ(Z) · Σ Φ(U)| and |Φ(Z) · Σ Φ(V)|
fn feature_densities(
    feature_map: &dyn FeatureMap,
    d1: &PersistenceDiagram,
    diag1: &Array2<f64>,
    d2: &PersistenceDiagram,
    diag2: &Array2<f64>,
) -> Result<(Array1<f64>, Array1<f64>)> {
    let approx1 = feature_map.transform(d1.points());
    let approx_diag1 = feature_map.transform(diag1.view());
    let approx2 = feature_map.transform(d2.points());
    let approx_diag2 = feature_map.transform(diag2.view());

    let z = concatenate(
        Axis(0),
        &[approx1.view(), approx_diag1.view(), approx2.view(), approx_diag2.view()],
    )?;
    let u = concatenate(Axis(0), &[approx1.view(), approx_diag2.view()])?.sum_axis(Axis(0));
    let v = concatenate(Axis(0), &[approx2.view(), approx_diag1.view()])?.sum_axis(Axis(0));

    Ok((z.dot(&u).mapv(f64::abs), z.dot(&v).mapv(f64::abs)))
}

/// Fisher-Rao distance between two unnormalized densities on the same support
///
/// A density summing to zero stays the zero vector. Two zero densities
/// are equal and sit at distance 0.
fn fisher_rao(mut p: Array1<f64>, mut q: Array1<f64>) -> f64 {
    let p_sum = p.sum();
    let q_sum = q.sum();

    if p_sum == 0.0 && q_sum == 0.0 {
        return 0.0;
    }
    if p_sum != 0.0 {
        p /= p_sum;
    }
    if q_sum != 0.0 {
        q /= q_sum;
    }

    let coefficient = p.mapv(f64::sqrt).dot(&q.mapv(f64::sqrt));
    coefficient.min(1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fisher::RandomFourierFeatures;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    fn diagram(points: &[(f64, f64)]) -> PersistenceDiagram {
        PersistenceDiagram::from_points(points).unwrap()
    }

    #[test]
    fn test_identity_single_point() {
        let d = diagram(&[(0.0, 1.0)]);
        let dist = persistence_fisher_distance(&d, &d, 0.5).unwrap();
        assert_abs_diff_eq!(dist, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_symmetry_and_range() {
        let d1 = diagram(&[(0.0, 1.0), (0.2, 0.4)]);
        let d2 = diagram(&[(0.5, 2.0)]);

        let a = persistence_fisher_distance(&d1, &d2, 1.0).unwrap();
        let b = persistence_fisher_distance(&d2, &d1, 1.0).unwrap();

        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        assert!(a > 0.0 && a <= FRAC_PI_2);
    }

    #[test]
    fn test_far_apart_diagrams_approach_upper_bound() {
        let d1 = diagram(&[(0.0, 100.0)]);
        let d2 = diagram(&[(500.0, 600.0)]);

        let dist = persistence_fisher_distance(&d1, &d2, 0.1).unwrap();
        assert!(dist > 1.0 && dist <= FRAC_PI_2);
    }

    #[test]
    fn test_empty_diagrams() {
        let empty = PersistenceDiagram::empty();
        assert_eq!(persistence_fisher_distance(&empty, &empty, 1.0).unwrap(), 0.0);

        let d = diagram(&[(0.0, 1.0)]);
        let dist = persistence_fisher_distance(&d, &empty, 1.0).unwrap();
        assert!(dist > 0.0 && dist <= FRAC_PI_2);
    }

    #[test]
    fn test_zero_sum_guard() {
        let p = Array1::zeros(3);
        let q = Array1::from(vec![1.0, 1.0, 2.0]);
        assert_abs_diff_eq!(fisher_rao(p, q), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_bandwidth() {
        let d = diagram(&[(0.0, 1.0)]);
        assert!(matches!(
            persistence_fisher_distance(&d, &d, 0.0),
            Err(MetricError::InvalidParameter { name: "bandwidth", .. })
        ));
    }

    #[test]
    fn test_kernel_approx_identity_and_symmetry() {
        let rff = RandomFourierFeatures::for_bandwidth(256, 1.0, Some(3)).unwrap();
        let config = FisherConfig::default().with_kernel_approx(Arc::new(rff));

        let d1 = diagram(&[(0.0, 1.0), (0.3, 1.7)]);
        let d2 = diagram(&[(0.2, 0.8)]);

        let same = persistence_fisher_distance_with(&d1, &d1, &config).unwrap();
        assert_abs_diff_eq!(same, 0.0, epsilon = 1e-6);

        let a = persistence_fisher_distance_with(&d1, &d2, &config).unwrap();
        let b = persistence_fisher_distance_with(&d2, &d1, &config).unwrap();
        assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        assert!((0.0..=FRAC_PI_2).contains(&a));
    }
}
