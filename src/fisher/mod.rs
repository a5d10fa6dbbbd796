//! Fisher Module: Persistence Fisher Distance
//!
//! Diagrams are turned into probability vectors by Gaussian smoothing and
//! compared with the Fisher-Rao metric on the probability simplex. The
//! kernel sums cost O(|Z|·|U|); an explicit `FeatureMap` brings this down
//! to O(|Z|·F) at the price of approximation error.
//!
//! ## Reference
//!
//! Le & Yamada (2018). "Persistence Fisher Kernel: A Riemannian Manifold
//! Kernel for Persistence Diagrams". NeurIPS.

mod distance;
mod kernel;

pub use distance::{persistence_fisher_distance, persistence_fisher_distance_with, FisherConfig};
pub use kernel::{FeatureMap, RandomFourierFeatures};
