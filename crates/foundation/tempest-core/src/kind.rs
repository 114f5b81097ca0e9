//! Transform kinds - the five actions a player can take in a round.

use serde::{Deserialize, Serialize};

/// Discriminant of a transform, without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    Stabilize,
    Beam,
    Magnetize,
    Rotate,
    Spread,
}

impl TransformKind {
    pub const ALL: [TransformKind; 5] = [
        Self::Stabilize,
        Self::Beam,
        Self::Magnetize,
        Self::Rotate,
        Self::Spread,
    ];

    /// Stabilize, beam and magnetize are capped per layer.
    pub fn is_use_limited(&self) -> bool {
        matches!(self, Self::Stabilize | Self::Beam | Self::Magnetize)
    }

    /// Magnetize and spread act around a chosen anchor sector.
    pub fn requires_anchor(&self) -> bool {
        matches!(self, Self::Magnetize | Self::Spread)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Stabilize => "stabilize",
            Self::Beam => "beam",
            Self::Magnetize => "magnetize",
            Self::Rotate => "rotate",
            Self::Spread => "spread",
        }
    }
}

impl std::fmt::Display for TransformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
