//! # Field Metrics
//!
//! Three numbers in [0, 1] describe how well a field is clustered:
//!
//! | Metric     | Meaning                                              |
//! |------------|------------------------------------------------------|
//! | coherence  | mean `max(0, cos)` between each sector and its anchor |
//! | separation | `1 - mean max(0, cos)` over all anchor pairs          |
//! | coverage   | share of anchors with at least 3 assigned members     |
//!
//! Metrics are derived, never stored. Recompute after every change.

use serde::{Deserialize, Serialize};
use tempest_core::{falloff, Field};

use crate::anchors::AnchorSet;

/// Members an anchor needs before it counts toward coverage.
pub const MIN_CLUSTER_MEMBERS: usize = 3;

/// Clustering quality of a field.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub coherence: f64,
    pub separation: f64,
    pub coverage: f64,
}

impl Metrics {
    /// Score `field`.
    ///
    /// An empty field has nothing to be close to anything, so it scores all
    /// zeros instead of failing.
    pub fn compute(field: &Field) -> Self {
        if field.is_empty() {
            return Self::default();
        }
        let anchors = AnchorSet::from_field(field);
        Self::compute_with(field, &anchors)
    }

    /// Score `field` against an explicit anchor set.
    pub fn compute_with(field: &Field, anchors: &AnchorSet) -> Self {
        if field.is_empty() || anchors.is_empty() {
            return Self::default();
        }

        let angles = anchors.angles();
        let mut counts = vec![0usize; angles.len()];
        let mut closeness = 0.0;
        for sector in field {
            let (k, _) = anchors.nearest(sector.angle());
            counts[k] += 1;
            closeness += falloff(sector.angle(), angles[k]);
        }
        let coherence = closeness / field.len() as f64;

        let separation = if angles.len() < 2 {
            1.0
        } else {
            let mut overlap = 0.0;
            let mut pairs = 0usize;
            for i in 0..angles.len() {
                for j in (i + 1)..angles.len() {
                    overlap += falloff(angles[i], angles[j]);
                    pairs += 1;
                }
            }
            1.0 - overlap / pairs as f64
        };

        let covered = counts.iter().filter(|&&c| c >= MIN_CLUSTER_MEMBERS).count();
        let coverage = covered as f64 / angles.len() as f64;

        Self {
            coherence: coherence.clamp(0.0, 1.0),
            separation: separation.clamp(0.0, 1.0),
            coverage: coverage.clamp(0.0, 1.0),
        }
    }
}

impl std::fmt::Display for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "coherence {:.3} · separation {:.3} · coverage {:.2}",
            self.coherence, self.separation, self.coverage
        )
    }
}
