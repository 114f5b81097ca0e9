//! Sectors - one token's placement on the ring layout.

use serde::{Deserialize, Deserializer, Serialize};

use crate::angle::normalize;

/// Which of the two concentric rings a sector sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ring {
    Outer,
    Inner,
}

impl Ring {
    /// Ring used for the `index`-th seeded token: even indices outside,
    /// odd indices inside.
    pub fn alternating(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Outer
        } else {
            Self::Inner
        }
    }
}

impl std::fmt::Display for Ring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outer => write!(f, "outer"),
            Self::Inner => write!(f, "inner"),
        }
    }
}

/// A token placed on the field.
///
/// The angle is private so that it can only ever hold a normalized value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    #[serde(deserialize_with = "deserialize_angle")]
    angle: f64,
    pub ring: Ring,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub is_anchor: bool,
}

impl Sector {
    /// Create an unlabeled, non-anchor sector.
    pub fn new(angle: f64, ring: Ring) -> Self {
        Self {
            angle: normalize(angle),
            ring,
            label: None,
            color: None,
            is_anchor: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn anchored(mut self) -> Self {
        self.is_anchor = true;
        self
    }

    /// Normalized angle in (-π, π].
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Move the sector. The value is wrapped before it is stored.
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = normalize(angle);
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

fn deserialize_angle<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(normalize)
}
