//! # Anchor Sets
//!
//! Cluster centres used by the metrics and by auto-beam. When the field has
//! no anchor sectors, four virtual anchors at 0, π/2, π and 3π/2 stand in,
//! so every statistic stays defined.
//!
//! Nearest-anchor lookups scan anchors in order and only replace the current
//! best on a strictly smaller distance: ties resolve to the lowest anchor.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use tempest_core::{diff, normalize, Field};

/// Number of virtual anchors synthesized for an anchorless field.
pub const VIRTUAL_ANCHORS: usize = 4;

/// Where an anchor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorSource {
    /// Sector index in the field
    Sector(usize),
    /// Synthesized slot k of [`VIRTUAL_ANCHORS`]
    Virtual(usize),
}

/// One cluster centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub angle: f64,
    pub source: AnchorSource,
}

/// Ordered set of cluster centres for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorSet {
    anchors: Vec<Anchor>,
}

impl AnchorSet {
    /// Anchors of `field`, in field order, or the virtual fallback.
    pub fn from_field(field: &Field) -> Self {
        let anchors: Vec<Anchor> = field
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_anchor)
            .map(|(i, s)| Anchor {
                angle: s.angle(),
                source: AnchorSource::Sector(i),
            })
            .collect();

        if anchors.is_empty() {
            Self::virtual_set()
        } else {
            Self { anchors }
        }
    }

    /// The four evenly spaced fallback anchors.
    pub fn virtual_set() -> Self {
        let anchors = (0..VIRTUAL_ANCHORS)
            .map(|k| Anchor {
                angle: normalize(k as f64 * (TAU / VIRTUAL_ANCHORS as f64)),
                source: AnchorSource::Virtual(k),
            })
            .collect();
        Self { anchors }
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Always false: a set holds real anchors or the virtual fallback.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn is_virtual(&self) -> bool {
        self.anchors
            .first()
            .map(|a| matches!(a.source, AnchorSource::Virtual(_)))
            .unwrap_or(false)
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn angles(&self) -> Vec<f64> {
        self.anchors.iter().map(|a| a.angle).collect()
    }

    /// Position (within this set) of the anchor nearest to `angle`, with its
    /// absolute angular distance.
    pub fn nearest(&self, angle: f64) -> (usize, f64) {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (k, anchor) in self.anchors.iter().enumerate() {
            let d = diff(angle, anchor.angle).abs();
            if d < best_dist {
                best = k;
                best_dist = d;
            }
        }
        (best, best_dist)
    }

    /// Nearest anchor position for every sector of `field`.
    pub fn assign(&self, field: &Field) -> Vec<usize> {
        field.iter().map(|s| self.nearest(s.angle()).0).collect()
    }

    /// Members assigned to each anchor.
    pub fn member_counts(&self, field: &Field) -> Vec<usize> {
        let mut counts = vec![0; self.anchors.len()];
        for k in self.assign(field) {
            counts[k] += 1;
        }
        counts
    }
}
