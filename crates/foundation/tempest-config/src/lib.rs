//! # Tempest Configuration
//!
//! Every tunable constant of the engine in one serde-friendly tree. The
//! defaults give the standard ten-layer game; a YAML or JSON file can
//! override any subset of fields.
//!
//! ```yaml
//! gate:
//!   coherence: 0.55
//!   separation: 0.35
//! energy:
//!   start: 100
//!   magnetize: 3
//! limits:
//!   uses_per_layer: 3
//! ```
//!
//! Lookup order for [`EngineConfig::load`]:
//! 1. explicit path
//! 2. `$TEMPEST_CONFIG`
//! 3. `<config_dir>/tempest/config.yaml` (ignored if missing)
//! 4. built-in defaults

mod loader;

pub use loader::{default_config_path, CONFIG_ENV};

use serde::{Deserialize, Serialize};
use tempest_core::TransformKind;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Layer advancement thresholds. Both must be met (`>=`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub coherence: f64,
    pub separation: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            coherence: 0.55,
            separation: 0.35,
        }
    }
}

/// Energy budget and per-action costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    /// Energy a layer starts with
    pub start: u32,
    pub stabilize: u32,
    pub beam: u32,
    pub magnetize: u32,
    pub rotate: u32,
    pub spread: u32,
    /// Cost of the cosmetic retry jitter
    pub retry: u32,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            start: 100,
            stabilize: 2,
            beam: 1,
            magnetize: 3,
            rotate: 1,
            spread: 3,
            retry: 3,
        }
    }
}

impl EnergyConfig {
    /// Energy charged for applying `kind`.
    pub fn cost(&self, kind: TransformKind) -> u32 {
        match kind {
            TransformKind::Stabilize => self.stabilize,
            TransformKind::Beam => self.beam,
            TransformKind::Magnetize => self.magnetize,
            TransformKind::Rotate => self.rotate,
            TransformKind::Spread => self.spread,
        }
    }
}

/// Structural limits of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Uses per layer for each use-limited transform
    pub uses_per_layer: u8,
    pub rounds_per_layer: u8,
    pub layers: usize,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            uses_per_layer: 3,
            rounds_per_layer: 10,
            layers: 10,
        }
    }
}

impl LimitConfig {
    /// Zero-based index of the final round.
    pub fn last_round(&self) -> u8 {
        self.rounds_per_layer.saturating_sub(1)
    }
}

/// Initial field layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Number of sectors in a freshly seeded field
    pub field_size: usize,
    /// Sector indices flagged as anchors at seed time
    pub anchors: Vec<usize>,
    /// Peak-to-peak jitter (radians) applied around the even spacing
    pub jitter: f64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            field_size: 36,
            anchors: vec![3, 11, 18, 27],
            jitter: 0.08,
        }
    }
}

/// Drawing-surface geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Margin between the outer ring and the surface edge
    pub padding: f64,
    /// Inner radius as a fraction of the outer radius
    pub inner_ratio: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            padding: 24.0,
            inner_ratio: 0.88,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub gate: GateConfig,
    pub energy: EnergyConfig,
    pub limits: LimitConfig,
    pub seed: SeedConfig,
    pub projection: ProjectionConfig,
}

impl EngineConfig {
    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        let unit = |v: f64| (0.0..=1.0).contains(&v);
        if !unit(self.gate.coherence) || !unit(self.gate.separation) {
            return Err(Error::Invalid(format!(
                "gate thresholds must lie in [0, 1] (coherence {}, separation {})",
                self.gate.coherence, self.gate.separation
            )));
        }
        if self.limits.rounds_per_layer == 0 {
            return Err(Error::Invalid("rounds_per_layer must be at least 1".into()));
        }
        if self.limits.layers == 0 {
            return Err(Error::Invalid("layers must be at least 1".into()));
        }
        if self.seed.field_size == 0 {
            return Err(Error::Invalid("field_size must be at least 1".into()));
        }
        if !(self.projection.inner_ratio > 0.0 && self.projection.inner_ratio < 1.0) {
            return Err(Error::Invalid(format!(
                "inner_ratio must lie in (0, 1), got {}",
                self.projection.inner_ratio
            )));
        }
        if !self.projection.padding.is_finite() || self.projection.padding < 0.0 {
            return Err(Error::Invalid(format!(
                "padding must be finite and non-negative, got {}",
                self.projection.padding
            )));
        }
        if !self.seed.jitter.is_finite() || self.seed.jitter < 0.0 {
            return Err(Error::Invalid(format!(
                "seed jitter must be non-negative, got {}",
                self.seed.jitter
            )));
        }
        Ok(())
    }
}
