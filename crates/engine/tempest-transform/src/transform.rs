//! The closed set of round actions.

use serde::{Deserialize, Serialize};
use tempest_core::TransformKind;

/// Beam targeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeamMode {
    /// Pull every sector toward its nearest anchor
    #[default]
    Auto,
    /// Pull every sector toward the first selected sector
    Selected,
}

/// A configured transform: kind plus parameters.
///
/// Anchor and target indices are not stored here; they come from the
/// selection at apply time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transform {
    /// Relax toward even spacing. `strength` in [0, 1].
    Stabilize { strength: f64 },
    Beam {
        #[serde(default)]
        mode: BeamMode,
    },
    /// Pull toward the anchor. `pull` in [0, 1].
    Magnetize { pull: f64 },
    /// Rotate the whole field. `degrees` in [-45, 45].
    Rotate { degrees: f64 },
    /// Push neighbours away from the anchor. `amount` in [0, 1].
    Spread { amount: f64 },
}

/// Largest rotation a single round may apply, in degrees.
pub const MAX_ROTATION_DEGREES: f64 = 45.0;

impl Transform {
    pub fn kind(&self) -> TransformKind {
        match self {
            Self::Stabilize { .. } => TransformKind::Stabilize,
            Self::Beam { .. } => TransformKind::Beam,
            Self::Magnetize { .. } => TransformKind::Magnetize,
            Self::Rotate { .. } => TransformKind::Rotate,
            Self::Spread { .. } => TransformKind::Spread,
        }
    }

    /// Selected sectors needed before this transform can run.
    pub fn required_selection(&self) -> usize {
        match self {
            Self::Magnetize { .. } | Self::Spread { .. } => 1,
            Self::Beam {
                mode: BeamMode::Selected,
            } => 1,
            _ => 0,
        }
    }

    /// Copy with every parameter clamped into its legal range.
    /// NaN parameters become zero.
    pub fn clamped(&self) -> Self {
        match *self {
            Self::Stabilize { strength } => Self::Stabilize {
                strength: unit(strength),
            },
            Self::Beam { mode } => Self::Beam { mode },
            Self::Magnetize { pull } => Self::Magnetize { pull: unit(pull) },
            Self::Rotate { degrees } => Self::Rotate {
                degrees: if degrees.is_nan() {
                    0.0
                } else {
                    degrees.clamp(-MAX_ROTATION_DEGREES, MAX_ROTATION_DEGREES)
                },
            },
            Self::Spread { amount } => Self::Spread {
                amount: unit(amount),
            },
        }
    }
}

fn unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

impl std::fmt::Display for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stabilize { strength } => write!(f, "stabilize({:.2})", strength),
            Self::Beam { mode: BeamMode::Auto } => write!(f, "beam(auto)"),
            Self::Beam {
                mode: BeamMode::Selected,
            } => write!(f, "beam(selected)"),
            Self::Magnetize { pull } => write!(f, "magnetize({:.2})", pull),
            Self::Rotate { degrees } => write!(f, "rotate({}°)", degrees),
            Self::Spread { amount } => write!(f, "spread({:.2})", amount),
        }
    }
}
