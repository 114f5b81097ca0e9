//! Layer gating - may the player move on?

use serde::{Deserialize, Serialize};
use tempest_config::GateConfig;
use tempest_core::{Field, GateFailure, GateMetric};

use crate::metrics::Metrics;

/// Thresholds a field must meet to unlock the next layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub coherence: f64,
    pub separation: f64,
}

impl Default for Gate {
    fn default() -> Self {
        Self::from(&GateConfig::default())
    }
}

impl From<&GateConfig> for Gate {
    fn from(cfg: &GateConfig) -> Self {
        Self {
            coherence: cfg.coherence,
            separation: cfg.separation,
        }
    }
}

/// Outcome of evaluating a gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateReport {
    pub metrics: Metrics,
    pub failures: Vec<GateFailure>,
}

impl GateReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Gate {
    /// Check already computed metrics. Comparisons are plain `>=`.
    pub fn check(&self, metrics: Metrics) -> GateReport {
        let mut failures = Vec::new();
        if metrics.coherence.is_nan() || metrics.coherence < self.coherence {
            failures.push(GateFailure {
                metric: GateMetric::Coherence,
                value: metrics.coherence,
                threshold: self.coherence,
            });
        }
        if metrics.separation.is_nan() || metrics.separation < self.separation {
            failures.push(GateFailure {
                metric: GateMetric::Separation,
                value: metrics.separation,
                threshold: self.separation,
            });
        }
        GateReport { metrics, failures }
    }

    pub fn evaluate(&self, field: &Field) -> GateReport {
        self.check(Metrics::compute(field))
    }

    pub fn can_advance(&self, field: &Field) -> bool {
        self.evaluate(field).passed()
    }
}

/// Gate with the default thresholds (coherence ≥ 0.55, separation ≥ 0.35).
pub fn can_advance_layer(field: &Field) -> bool {
    Gate::default().can_advance(field)
}
