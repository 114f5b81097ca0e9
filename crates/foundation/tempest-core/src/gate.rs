//! Threshold failures reported when a layer advance is refused.

use serde::{Deserialize, Serialize};

/// Metric that takes part in layer gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMetric {
    Coherence,
    Separation,
}

impl std::fmt::Display for GateMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Coherence => write!(f, "coherence"),
            Self::Separation => write!(f, "separation"),
        }
    }
}

/// One unmet gating threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateFailure {
    pub metric: GateMetric,
    pub value: f64,
    pub threshold: f64,
}

impl std::fmt::Display for GateFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:.3} < {:.2}",
            self.metric, self.value, self.threshold
        )
    }
}

/// Render a list of failures as `a; b`.
pub fn describe_failures(failures: &[GateFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
