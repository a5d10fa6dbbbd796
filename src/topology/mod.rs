//! Topology Module: Persistence Diagrams
//!
//! Diagrams are produced upstream (Ripser, GUDHI, ...) and handed to this
//! crate as finite (birth, death) point sets. This module owns their
//! validated representation and the diagonal geometry every distance
//! relies on.

mod persistence;

pub use persistence::{PersistenceDiagram, PersistenceInterval};
