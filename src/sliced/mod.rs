//! Sliced Module: Sliced Wasserstein Distance
//!
//! The sliced Wasserstein distance between two diagrams D₁, D₂ projects
//! both onto a family of lines through the origin and compares the
//! projected measures with the 1-D Wasserstein distance:
//!
//!   SW(D₁, D₂) = (1/M) Σₖ W₁(π_θₖ(D₁ ∪ Δ(D₂)), π_θₖ(D₂ ∪ Δ(D₁)))
//!
//! where Δ(D) are the diagonal images of D. Adding the other diagram's
//! diagonal images balances the masses, and in one dimension the optimal
//! transport plan simply matches sorted values, so each W₁ is a sort
//! followed by an L¹ difference.
//!
//! ## Reuse of Projections
//!
//! Projecting a diagram costs O(n·M). When computing a full distance
//! matrix, `project_diagrams` projects each diagram once and
//! `sliced_wasserstein_distance_on_projections` works on the cached
//! projections, avoiding O(|X|·|Y|) re-projections.
//!
//! ## Reference
//!
//! Carrière, Cuturi, Oudot (2017). "Sliced Wasserstein Kernel for
//! Persistence Diagrams". ICML.

mod projection;
mod wasserstein;

pub use projection::{project_diagram, project_diagrams, DirectionSet, ProjectedDiagram};
pub use wasserstein::{
    sliced_wasserstein_distance,
    sliced_wasserstein_distance_on_projections,
    sliced_wasserstein_distance_with,
};
