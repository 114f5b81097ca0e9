//! # Layer Rubric
//!
//! Numeric grade for a finished layer. Each metric is scored against its
//! gate threshold (so meeting the threshold scores 1.0), coverage counts as
//! is, and leftover energy rewards thrift.
//!
//! ```text
//! overall = 0.4·coherence + 0.3·separation + 0.2·coverage + 0.1·energy
//! ```

use serde::{Deserialize, Serialize};

use crate::gate::Gate;
use crate::metrics::Metrics;

const W_COHERENCE: f64 = 0.4;
const W_SEPARATION: f64 = 0.3;
const W_COVERAGE: f64 = 0.2;
const W_ENERGY: f64 = 0.1;

/// Per-dimension scores and the weighted total, all in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rubric {
    pub coherence: f64,
    pub separation: f64,
    pub coverage: f64,
    pub energy_use: f64,
    pub overall: f64,
}

impl Rubric {
    /// Grade metrics and remaining energy (out of `energy_start`).
    pub fn grade(metrics: Metrics, energy: u32, energy_start: u32, gate: &Gate) -> Self {
        let coherence = ratio(metrics.coherence, gate.coherence);
        let separation = ratio(metrics.separation, gate.separation);
        let coverage = metrics.coverage.clamp(0.0, 1.0);
        let energy_use = if energy_start == 0 {
            0.0
        } else {
            (energy as f64 / energy_start as f64).clamp(0.0, 1.0)
        };

        let overall = coherence * W_COHERENCE
            + separation * W_SEPARATION
            + coverage * W_COVERAGE
            + energy_use * W_ENERGY;

        Self {
            coherence,
            separation,
            coverage,
            energy_use,
            overall: overall.clamp(0.0, 1.0),
        }
    }
}

/// `value / threshold` capped at 1. A zero threshold is always met.
fn ratio(value: f64, threshold: f64) -> f64 {
    if threshold <= 0.0 {
        return 1.0;
    }
    (value / threshold).clamp(0.0, 1.0)
}
