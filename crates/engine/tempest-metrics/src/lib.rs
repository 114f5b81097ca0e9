//! # Tempest Metrics
//!
//! Circular statistics over a token field and the gate that decides whether
//! a layer is finished.
//!
//! ```text
//! Field ──► AnchorSet ──► Metrics ──► Gate ──► advance? / failures
//!                                  └─► Rubric (grade)
//! ```

pub mod anchors;
pub mod gate;
pub mod metrics;
pub mod rubric;

pub use anchors::{Anchor, AnchorSet, AnchorSource, VIRTUAL_ANCHORS};
pub use gate::{can_advance_layer, Gate, GateReport};
pub use metrics::{Metrics, MIN_CLUSTER_MEMBERS};
pub use rubric::Rubric;
