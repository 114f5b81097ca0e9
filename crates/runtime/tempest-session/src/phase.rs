//! Round Phase State Machine
//!
//! Each round walks the same three states. A transform may only be applied
//! once per round; the round may only end after it was applied.
//!
//! ```text
//! SelectingAction ──choose──► ActionConfigured ──apply──► Applied
//!        ▲                        │    ▲                    │
//!        │                        └────┘ (re-choose)        │
//!        └──────────────────── next round ──────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tempest_transform::Transform;

/// Where the current round stands.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum RoundPhase {
    /// No transform chosen yet
    #[default]
    SelectingAction,

    /// A transform is chosen and configured, waiting for Apply
    ActionConfigured { transform: Transform },

    /// The round's transform has been applied
    Applied { transform: Transform },
}

impl RoundPhase {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Choosing (or re-choosing) a transform is allowed until Apply.
    pub fn can_choose(&self) -> bool {
        !self.is_applied()
    }

    /// The transform waiting to be applied, if any.
    pub fn configured(&self) -> Option<Transform> {
        match self {
            Self::ActionConfigured { transform } => Some(*transform),
            _ => None,
        }
    }

    /// Short name used in transition errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectingAction => "SelectingAction",
            Self::ActionConfigured { .. } => "ActionConfigured",
            Self::Applied { .. } => "Applied",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &str {
        match self {
            Self::SelectingAction => "Pick one action for this round",
            Self::ActionConfigured { .. } => "Adjust the action, then apply it",
            Self::Applied { .. } => "Action applied - finish the round",
        }
    }
}

impl std::fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelectingAction => write!(f, "SelectingAction"),
            Self::ActionConfigured { transform } => write!(f, "ActionConfigured({})", transform),
            Self::Applied { transform } => write!(f, "Applied({})", transform),
        }
    }
}

/// Result of finishing a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RoundAdvance {
    /// Moved on to round `round` (zero-based)
    Next { round: u8 },
    /// The final round is done; the only way on is a layer advance
    LayerComplete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_flags() {
        let t = Transform::Rotate { degrees: 5.0 };
        assert!(RoundPhase::SelectingAction.can_choose());
        assert!(RoundPhase::ActionConfigured { transform: t }.can_choose());
        assert!(!RoundPhase::Applied { transform: t }.can_choose());
        assert!(RoundPhase::Applied { transform: t }.is_applied());
        assert_eq!(
            RoundPhase::ActionConfigured { transform: t }.configured(),
            Some(t)
        );
        assert_eq!(RoundPhase::SelectingAction.configured(), None);
    }

    #[test]
    fn test_serde_tagging() {
        let phase = RoundPhase::Applied {
            transform: Transform::Beam {
                mode: tempest_transform::BeamMode::Auto,
            },
        };
        let json = serde_json::to_string(&phase).unwrap();
        assert_eq!(
            json,
            r#"{"phase":"applied","transform":{"type":"beam","mode":"auto"}}"#
        );
        let back: RoundPhase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, phase);
    }

    #[test]
    fn test_display() {
        let t = Transform::Rotate { degrees: 5.0 };
        assert_eq!(RoundPhase::Applied { transform: t }.to_string(), "Applied(rotate(5°))");
        assert_eq!(RoundPhase::default().to_string(), "SelectingAction");
    }
}
