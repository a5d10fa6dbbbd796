//! Pairwise Module: Distance Matrices Between Diagram Collections
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     DistanceDispatcher                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  SlicedWasserstein  → project once, compare projections      │
//! │  PersistenceFisher  → kernel densities per pair              │
//! │  Bottleneck         → ExactBackends::bottleneck              │
//! │  Wasserstein        → ExactBackends::{hera, pot}             │
//! │  Custom             → caller closure per pair                │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod backend;
mod dispatcher;
mod metric;

pub use backend::{BackendAvailability, ExactBackends, ExactDistanceBackend};
pub use dispatcher::{pairwise_persistence_diagram_distances, DistanceDispatcher};
pub use metric::{CustomMetric, Metric, MetricKind, WassersteinBackend, WassersteinParams};
