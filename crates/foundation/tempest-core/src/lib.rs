//! # Tempest Core
//!
//! Data model for the angular token field: tokens ("sectors") placed at
//! angles on two concentric rings, the player's selection, and the circular
//! arithmetic every other crate builds on.
//!
//! ```text
//!        outer ring ─┐
//!                    ▼
//!          ·  ·  ·  ·  ·
//!       ·   ·  ·  ·  ·   ·   ◄── inner ring (0.88 × outer)
//!      ·  ·     (+)     ·  ·
//!       ·   ·  ·  ·  ·   ·
//!          ·  ·  ·  ·  ·
//! ```
//!
//! Every stored angle is normalized to (-π, π]. Sectors are addressed by
//! their index in the field.

pub mod angle;
pub mod field;
pub mod gate;
pub mod kind;
pub mod sector;
pub mod selection;

pub use angle::{diff, falloff, normalize, similarity};
pub use field::Field;
pub use gate::{GateFailure, GateMetric};
pub use kind::TransformKind;
pub use sector::{Ring, Sector};
pub use selection::{Selection, MAX_SELECTED};

/// Result type for tempest engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Recoverable conditions raised by the engine.
///
/// None of these are fatal: the operation is refused, state is left as it
/// was, and the caller decides how to surface it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("{transform} has no uses left this layer (limit {limit})")]
    CapacityExceeded { transform: TransformKind, limit: u8 },

    #[error("{transform} needs {required} selected token(s)")]
    MissingSelection {
        transform: TransformKind,
        required: usize,
    },

    #[error("Sector index {index} out of range (field has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Layer advance refused: {}", gate::describe_failures(.failures))]
    InvalidAdvance { failures: Vec<GateFailure> },

    #[error("Layer {layer} is the last layer")]
    FinalLayer { layer: usize },

    #[error("Invalid round transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Layer {layer} has not been reached yet")]
    LayerNotVisited { layer: usize },

    #[error("Field is empty")]
    EmptyField,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_advance_message_names_thresholds() {
        let err = Error::InvalidAdvance {
            failures: vec![
                GateFailure {
                    metric: GateMetric::Coherence,
                    value: 0.5,
                    threshold: 0.55,
                },
                GateFailure {
                    metric: GateMetric::Separation,
                    value: 0.1,
                    threshold: 0.35,
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("coherence 0.500 < 0.55"), "got {}", msg);
        assert!(msg.contains("separation 0.100 < 0.35"), "got {}", msg);
    }

    #[test]
    fn test_capacity_message() {
        let err = Error::CapacityExceeded {
            transform: TransformKind::Beam,
            limit: 3,
        };
        assert_eq!(err.to_string(), "beam has no uses left this layer (limit 3)");
    }
}
