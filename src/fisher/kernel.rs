//! Explicit Feature Maps for Kernel Approximation
//!
//! A feature map φ: ℝ² → ℝᶠ approximates a kernel through
//! k(x, y) ≈ ⟨φ(x), φ(y)⟩. The persistence Fisher evaluator only
//! depends on the `FeatureMap` trait, so any finite-dimensional map
//! fitted elsewhere can be plugged in.

use std::f64::consts::PI;
use std::fmt;

use ndarray::{Array1, Array2, ArrayView2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};

use crate::error::{MetricError, Result};

/// Finite-dimensional feature map over planar points
pub trait FeatureMap: Send + Sync + fmt::Debug {
    /// Feature dimension F
    fn dimension(&self) -> usize;

    /// Map an `n x 2` point array to its `n x F` feature matrix
    fn transform(&self, points: ArrayView2<'_, f64>) -> Array2<f64>;
}

/// Random Fourier features for the Gaussian kernel exp(-γ‖x - y‖²)
///
/// φ(x) = √(2/F) · cos(xW + b), with W ~ N(0, 2γ) and b ~ U(0, 2π)
/// (Rahimi & Recht, 2007).
#[derive(Debug, Clone)]
pub struct RandomFourierFeatures {
    /// Frequencies (2 x F)
    weights: Array2<f64>,
    /// Phase offsets (F)
    offsets: Array1<f64>,
    gamma: f64,
}

impl RandomFourierFeatures {
    /// Sample `n_components` features for kernel width `gamma`
    ///
    /// A fixed `seed` makes the map reproducible.
    pub fn new(n_components: usize, gamma: f64, seed: Option<u64>) -> Result<Self> {
        if n_components == 0 {
            return Err(MetricError::InvalidParameter {
                name: "n_components",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(gamma.is_finite() && gamma > 0.0) {
            return Err(MetricError::InvalidParameter {
                name: "gamma",
                reason: format!("must be positive and finite, got {}", gamma),
            });
        }

        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        let normal =
            Normal::new(0.0, (2.0 * gamma).sqrt()).map_err(|e| MetricError::InvalidParameter {
                name: "gamma",
                reason: e.to_string(),
            })?;
        let uniform = Uniform::new(0.0, 2.0 * PI);

        let weights = Array2::from_shape_fn((2, n_components), |_| normal.sample(&mut rng));
        let offsets = Array1::from_shape_fn(n_components, |_| uniform.sample(&mut rng));

        Ok(Self { weights, offsets, gamma })
    }

    /// Features matching the Gaussian kernel of standard deviation `bandwidth`,
    /// i.e. γ = 1 / (2·bandwidth²)
    pub fn for_bandwidth(n_components: usize, bandwidth: f64, seed: Option<u64>) -> Result<Self> {
        if !(bandwidth.is_finite() && bandwidth > 0.0) {
            return Err(MetricError::InvalidParameter {
                name: "bandwidth",
                reason: format!("must be positive and finite, got {}", bandwidth),
            });
        }
        Self::new(n_components, 1.0 / (2.0 * bandwidth * bandwidth), seed)
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl FeatureMap for RandomFourierFeatures {
    fn dimension(&self) -> usize {
        self.offsets.len()
    }

    fn transform(&self, points: ArrayView2<'_, f64>) -> Array2<f64> {
        let scale = (2.0 / self.dimension() as f64).sqrt();
        let mut features = points.dot(&self.weights);
        features += &self.offsets;
        features.mapv_inplace(|v| scale * v.cos());
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_shape_and_reproducibility() {
        let a = RandomFourierFeatures::new(64, 0.5, Some(7)).unwrap();
        let b = RandomFourierFeatures::new(64, 0.5, Some(7)).unwrap();
        let points = array![[0.0, 1.0], [0.5, 0.5], [2.0, 3.0]];

        let fa = a.transform(points.view());
        assert_eq!(fa.dim(), (3, 64));
        assert_eq!(fa, b.transform(points.view()));
    }

    #[test]
    fn test_approximates_gaussian_kernel() {
        let rff = RandomFourierFeatures::for_bandwidth(4000, 1.0, Some(42)).unwrap();
        let points = array![[0.0, 1.0], [0.5, 0.5]];
        let features = rff.transform(points.view());

        let approx = features.row(0).dot(&features.row(1));
        let exact = (-0.5_f64 * 0.5).exp(); // ‖x - y‖² = 0.5, γ = 0.5

        assert!((approx - exact).abs() < 0.1, "approx {} vs exact {}", approx, exact);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(RandomFourierFeatures::new(0, 1.0, None).is_err());
        assert!(RandomFourierFeatures::new(8, -1.0, None).is_err());
        assert!(RandomFourierFeatures::for_bandwidth(8, 0.0, None).is_err());
    }
}
