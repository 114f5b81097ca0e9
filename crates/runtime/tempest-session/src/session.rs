//! # Game Session
//!
//! A stack of layers, each holding its own field snapshot. The player plays
//! the *current* layer; any earlier layer can be *viewed* and edited without
//! touching round or layer progression.
//!
//! ```text
//! layer:    1    2    3    4  ...  10
//!           ●────●────●────○
//!                     ▲    └ not reached yet
//!        current ─────┘
//!        viewed  ≤ current   (viewed < current = edit mode)
//! ```
//!
//! | Operation     | Acts on       | Round / layer counters |
//! |---------------|---------------|------------------------|
//! | select        | viewed layer  | untouched              |
//! | choose/apply  | viewed layer  | phase only when current|
//! | next_round    | current layer | round + 1              |
//! | advance_layer | current layer | layer + 1, round 0     |
//! | retry         | viewed layer  | untouched              |

use serde::{Deserialize, Serialize};
use tempest_config::EngineConfig;
use tempest_core::{Error, Result};
use tempest_metrics::{Gate, GateReport, Metrics, Rubric};
use tempest_pack::ContentPack;
use tempest_transform::{carry_into_new_layer, Transform};

use crate::layer::LayerState;
use crate::phase::RoundAdvance;
use crate::seed::seed_field;

/// Snapshot of how the viewed layer is doing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub layer: usize,
    pub round: u8,
    pub energy: u32,
    pub metrics: Metrics,
    pub gate: GateReport,
    pub rubric: Rubric,
}

/// What the player walks away with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashOut {
    pub layer: usize,
    pub energy: u32,
    pub rubric: Rubric,
}

/// One player's game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SessionRepr")]
pub struct Session {
    config: EngineConfig,
    gate: Gate,
    /// Reached layers; index `n - 1` holds layer `n`.
    layers: Vec<LayerState>,
    total: usize,
    /// 1-based
    current: usize,
    /// 1-based, never above `current`
    viewed: usize,
    /// Transform chosen while editing an earlier layer
    edit_action: Option<Transform>,
}

/// Unchecked wire form of [`Session`].
#[derive(Deserialize)]
struct SessionRepr {
    config: EngineConfig,
    gate: Gate,
    layers: Vec<LayerState>,
    total: usize,
    current: usize,
    viewed: usize,
    #[serde(default)]
    edit_action: Option<Transform>,
}

impl TryFrom<SessionRepr> for Session {
    type Error = String;

    /// Layer pointers must satisfy `1 <= viewed <= current == layers.len() <= total`.
    fn try_from(repr: SessionRepr) -> std::result::Result<Self, Self::Error> {
        let reached = repr.layers.len();
        if reached == 0 {
            return Err("session has no layers".into());
        }
        if repr.current != reached {
            return Err(format!(
                "current layer {} does not match {} reached layers",
                repr.current, reached
            ));
        }
        if repr.viewed == 0 || repr.viewed > repr.current {
            return Err(format!(
                "viewed layer {} outside 1..={}",
                repr.viewed, repr.current
            ));
        }
        if repr.total < reached {
            return Err(format!(
                "{} reached layers exceed the {} layer limit",
                reached, repr.total
            ));
        }
        let edit_action = if repr.viewed < repr.current {
            repr.edit_action
        } else {
            None
        };
        Ok(Self {
            config: repr.config,
            gate: repr.gate,
            layers: repr.layers,
            total: repr.total,
            current: repr.current,
            viewed: repr.viewed,
            edit_action,
        })
    }
}

impl Session {
    /// Start a game on layer 1 with `field`.
    pub fn new(field: tempest_core::Field, config: EngineConfig) -> Self {
        let total = config.limits.layers.max(1);
        let layers = vec![LayerState::new(field, config.energy.start)];
        tracing::info!(layers = total, "Session started");
        Self {
            gate: Gate::from(&config.gate),
            config,
            layers,
            total,
            current: 1,
            viewed: 1,
            edit_action: None,
        }
    }

    /// Seed layer 1 from a content pack.
    pub fn from_pack(pack: &ContentPack, config: EngineConfig) -> Self {
        let field = seed_field(pack, &config.seed);
        tracing::debug!(theme = %pack.theme, sectors = field.len(), "Seeded field from pack");
        Self::new(field, config)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn current_layer(&self) -> usize {
        self.current
    }

    pub fn viewed_layer(&self) -> usize {
        self.viewed
    }

    pub fn total_layers(&self) -> usize {
        self.total
    }

    /// Viewing an earlier layer than the one being played.
    pub fn is_editing(&self) -> bool {
        self.viewed < self.current
    }

    /// State of a 1-based layer, if it has been reached.
    pub fn layer(&self, n: usize) -> Option<&LayerState> {
        n.checked_sub(1).and_then(|i| self.layers.get(i))
    }

    // `current` and `viewed` always point at reached layers.

    pub fn current(&self) -> &LayerState {
        &self.layers[self.current - 1]
    }

    pub fn viewed(&self) -> &LayerState {
        &self.layers[self.viewed - 1]
    }

    fn current_mut(&mut self) -> &mut LayerState {
        &mut self.layers[self.current - 1]
    }

    fn viewed_mut(&mut self) -> &mut LayerState {
        &mut self.layers[self.viewed - 1]
    }

    /// Toggle a sector in the viewed layer's selection.
    pub fn select(&mut self, index: usize) -> Result<bool> {
        let selected = self.viewed_mut().toggle_selection(index)?;
        tracing::debug!(layer = self.viewed, index, selected, "Selection toggled");
        Ok(selected)
    }

    pub fn clear_selection(&mut self) {
        self.viewed_mut().clear_selection();
    }

    /// Raw cosine between the two selected sectors of the viewed layer.
    pub fn selected_similarity(&self) -> Option<f64> {
        let layer = self.viewed();
        let (a, b) = layer.selection().pair()?;
        layer.field().similarity(a, b).ok()
    }

    /// Choose and configure this round's transform.
    pub fn choose(&mut self, transform: Transform) -> Result<()> {
        if self.is_editing() {
            self.edit_action = Some(transform);
            return Ok(());
        }
        self.current_mut().choose(transform)
    }

    /// Apply the chosen transform to the viewed layer.
    ///
    /// On the current layer this completes the round's action. While
    /// editing an earlier layer only that layer's field, energy and use
    /// counters change.
    pub fn apply(&mut self) -> Result<Transform> {
        let viewed = self.viewed;
        let editing = self.is_editing();
        let config = &self.config;
        let layer = &mut self.layers[viewed - 1];

        let result = if editing {
            let transform = self.edit_action.ok_or_else(|| Error::InvalidTransition {
                from: "SelectingAction".into(),
                to: "Applied".into(),
            })?;
            let applied = layer.run(&transform, config);
            if applied.is_ok() {
                self.edit_action = None;
            }
            applied
        } else {
            layer.apply_configured(config)
        };

        match &result {
            Ok(transform) => {
                let layer = self.viewed();
                tracing::info!(
                    layer = viewed,
                    round = layer.round(),
                    transform = %transform,
                    energy = layer.energy(),
                    editing,
                    "Transform applied"
                );
            }
            Err(e) => tracing::warn!(layer = viewed, "Transform refused: {}", e),
        }
        result
    }

    /// Choose and apply in one step.
    pub fn apply_transform(&mut self, transform: Transform) -> Result<Transform> {
        self.choose(transform)?;
        self.apply()
    }

    /// Finish the current layer's round.
    pub fn next_round(&mut self) -> Result<RoundAdvance> {
        let current = self.current;
        let last_round = self.config.limits.last_round();
        let advance = self.current_mut().next_round(last_round)?;
        match advance {
            RoundAdvance::Next { round } => {
                tracing::debug!(layer = current, round, "Next round");
            }
            RoundAdvance::LayerComplete => {
                tracing::info!(
                    layer = current,
                    can_advance = self.can_advance(),
                    "Final round finished"
                );
            }
        }
        Ok(advance)
    }

    /// Gate evaluation of the current layer's field.
    pub fn gate_report(&self) -> GateReport {
        self.gate.evaluate(self.current().field())
    }

    pub fn can_advance(&self) -> bool {
        self.gate_report().passed()
    }

    /// Move to the next layer when the current field passes the gate.
    ///
    /// Layers are only ever reached in order, so the next layer is always
    /// fresh: it gets a lightly perturbed copy of the current field, full
    /// energy, zero uses, round 0 and an empty selection.
    pub fn advance_layer(&mut self) -> Result<usize> {
        if self.current >= self.total {
            return Err(Error::FinalLayer {
                layer: self.current,
            });
        }

        let report = self.gate_report();
        if !report.passed() {
            tracing::warn!(layer = self.current, metrics = %report.metrics, "Layer advance refused");
            return Err(Error::InvalidAdvance {
                failures: report.failures,
            });
        }

        let seeded = carry_into_new_layer(self.current().field());
        self.layers
            .push(LayerState::new(seeded, self.config.energy.start));
        self.current += 1;
        self.viewed = self.current;
        self.edit_action = None;

        tracing::info!(layer = self.current, metrics = %report.metrics, "Advanced to layer");
        Ok(self.current)
    }

    /// Switch the viewed layer. Only reached layers can be viewed.
    pub fn view_layer(&mut self, layer: usize) -> Result<()> {
        if layer == 0 || layer > self.current {
            return Err(Error::LayerNotVisited { layer });
        }
        if layer != self.viewed {
            self.edit_action = None;
        }
        self.viewed = layer;
        tracing::debug!(layer, editing = self.is_editing(), "Viewing layer");
        Ok(())
    }

    /// Cosmetic jitter of the viewed layer.
    pub fn retry(&mut self) {
        let cost = self.config.energy.retry;
        self.viewed_mut().retry(cost);
        tracing::debug!(layer = self.viewed, cost, "Retry");
    }

    /// Metrics of the viewed layer's field.
    pub fn metrics(&self) -> Metrics {
        Metrics::compute(self.viewed().field())
    }

    pub fn score(&self) -> Score {
        let layer = self.viewed();
        let gate = self.gate.evaluate(layer.field());
        let rubric = Rubric::grade(
            gate.metrics,
            layer.energy(),
            self.config.energy.start,
            &self.gate,
        );
        Score {
            layer: self.viewed,
            round: layer.round(),
            energy: layer.energy(),
            metrics: gate.metrics,
            gate,
            rubric,
        }
    }

    /// End the game on the current layer.
    pub fn cash_out(&self) -> CashOut {
        let layer = self.current();
        let metrics = Metrics::compute(layer.field());
        let rubric = Rubric::grade(metrics, layer.energy(), self.config.energy.start, &self.gate);
        tracing::info!(layer = self.current, energy = layer.energy(), overall = rubric.overall, "Cashed out");
        CashOut {
            layer: self.current,
            energy: layer.energy(),
            rubric,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::even_field;
    use tempest_core::{GateMetric, TransformKind};
    use tempest_pack::dev_pack;

    fn session(anchors: &[usize]) -> Session {
        Session::new(even_field(36, anchors), EngineConfig::default())
    }

    /// Play rotate rounds until the current layer reaches its final round.
    fn finish_layer(s: &mut Session) {
        loop {
            s.apply_transform(Transform::Rotate { degrees: 0.0 }).unwrap();
            if s.next_round().unwrap() == RoundAdvance::LayerComplete {
                break;
            }
        }
    }

    #[test]
    fn test_new_session() {
        let s = Session::from_pack(&dev_pack(), EngineConfig::default());
        assert_eq!(s.current_layer(), 1);
        assert_eq!(s.viewed_layer(), 1);
        assert_eq!(s.total_layers(), 10);
        assert_eq!(s.current().energy(), 100);
        assert_eq!(s.current().field().len(), 36);
        assert!(s.layer(2).is_none());
        assert!(s.layer(0).is_none());
    }

    #[test]
    fn test_magnetize_unlocks_gate() {
        let mut s = session(&[0, 9]);
        let err = s.advance_layer().unwrap_err();
        match err {
            Error::InvalidAdvance { failures } => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].metric, GateMetric::Coherence);
                assert!((failures[0].value - 0.542866465115678).abs() < 1e-9);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(s.current_layer(), 1);

        s.select(0).unwrap();
        s.apply_transform(Transform::Magnetize { pull: 1.0 }).unwrap();
        assert!(s.can_advance());
        assert!((s.metrics().coherence - 0.5681112245141339).abs() < 1e-9);

        assert_eq!(s.advance_layer().unwrap(), 2);
        assert_eq!(s.viewed_layer(), 2);
        let next = s.current();
        assert_eq!(next.energy(), 100);
        assert_eq!(next.round(), 0);
        assert!(next.selection().is_empty());
        assert_eq!(next.field().len(), 36);
        // fresh layer: anchors re-drawn on every ninth sector
        assert_eq!(next.field().anchor_indices(), vec![0, 9, 18, 27]);
    }

    #[test]
    fn test_advance_always_carries_into_fresh_layer() {
        let mut s = session(&[3, 11, 18, 27]);
        let first = s.current().field().clone();
        s.advance_layer().unwrap();
        assert_eq!(s.current().field(), &carry_into_new_layer(&first));

        // editing layer 1 afterwards does not feed the next advance
        s.view_layer(1).unwrap();
        s.apply_transform(Transform::Rotate { degrees: 20.0 }).unwrap();
        let second = s.current().field().clone();
        s.advance_layer().unwrap();
        assert_eq!(s.current_layer(), 3);
        assert_eq!(s.current().field(), &carry_into_new_layer(&second));
        assert_eq!(s.layer(2).unwrap().field(), &second);
    }

    #[test]
    fn test_deserialize_round_trip() {
        let mut s = session(&[3, 11, 18, 27]);
        s.advance_layer().unwrap();
        s.view_layer(1).unwrap();
        let json = serde_json::to_value(&s).unwrap();
        let back: Session = serde_json::from_value(json).unwrap();
        assert_eq!(back.current_layer(), 2);
        assert_eq!(back.viewed_layer(), 1);
        assert_eq!(back.current(), s.current());
        assert_eq!(back.score(), s.score());
    }

    #[test]
    fn test_deserialize_rejects_bad_layer_pointers() {
        let s = session(&[0]);
        let good = serde_json::to_value(&s).unwrap();

        for (current, viewed) in [(0, 0), (1, 0), (1, 2), (2, 1), (2, 2)] {
            let mut bad = good.clone();
            bad["current"] = current.into();
            bad["viewed"] = viewed.into();
            assert!(
                serde_json::from_value::<Session>(bad).is_err(),
                "current {} viewed {} accepted",
                current,
                viewed
            );
        }

        let mut no_layers = good.clone();
        no_layers["layers"] = serde_json::json!([]);
        assert!(serde_json::from_value::<Session>(no_layers).is_err());

        let mut over_limit = good;
        over_limit["total"] = 0.into();
        assert!(serde_json::from_value::<Session>(over_limit).is_err());
    }

    #[test]
    fn test_capacity_through_session() {
        let mut s = session(&[3, 11, 18, 27]);
        for _ in 0..3 {
            s.apply_transform(Transform::Stabilize { strength: 0.5 }).unwrap();
            s.next_round().unwrap();
        }
        let before = s.current().field().clone();
        let err = s
            .apply_transform(Transform::Stabilize { strength: 0.5 })
            .unwrap_err();
        assert!(matches!(
            err,
            Error::CapacityExceeded {
                transform: TransformKind::Stabilize,
                ..
            }
        ));
        assert_eq!(s.current().field(), &before);
        assert!(!s.current().applied());
        // another action is still possible this round
        s.apply_transform(Transform::Rotate { degrees: 5.0 }).unwrap();
    }

    #[test]
    fn test_one_action_per_round() {
        let mut s = session(&[3]);
        s.apply_transform(Transform::Rotate { degrees: 5.0 }).unwrap();
        assert!(matches!(
            s.apply_transform(Transform::Rotate { degrees: 5.0 }),
            Err(Error::InvalidTransition { .. })
        ));
        assert_eq!(s.current().energy(), 99);
    }

    #[test]
    fn test_final_round_offers_advance() {
        let mut s = session(&[3, 11, 18, 27]);
        finish_layer(&mut s);
        assert_eq!(s.current().round(), 9);
        assert_eq!(s.next_round().unwrap(), RoundAdvance::LayerComplete);
        assert_eq!(s.current().round(), 9);
        assert_eq!(s.advance_layer().unwrap(), 2);
    }

    #[test]
    fn test_final_layer_refused() {
        let mut cfg = EngineConfig::default();
        cfg.limits.layers = 2;
        let mut s = Session::new(even_field(36, &[3, 11, 18, 27]), cfg);
        s.advance_layer().unwrap();
        assert_eq!(s.advance_layer(), Err(Error::FinalLayer { layer: 2 }));
    }

    #[test]
    fn test_edit_mode_touches_only_viewed_layer() {
        let mut s = session(&[3, 11, 18, 27]);
        s.advance_layer().unwrap();
        s.apply_transform(Transform::Rotate { degrees: 2.0 }).unwrap();
        let current_before = s.current().clone();

        assert_eq!(s.view_layer(3), Err(Error::LayerNotVisited { layer: 3 }));
        assert_eq!(s.view_layer(0), Err(Error::LayerNotVisited { layer: 0 }));
        s.view_layer(1).unwrap();
        assert!(s.is_editing());

        let old = s.viewed().field().clone();
        s.apply_transform(Transform::Stabilize { strength: 0.5 }).unwrap();
        s.apply_transform(Transform::Rotate { degrees: 10.0 }).unwrap();

        let edited = s.layer(1).unwrap();
        assert_ne!(edited.field(), &old);
        assert_eq!(edited.energy(), 100 - 2 - 1);
        assert_eq!(edited.uses().stabilize, 1);
        assert_eq!(edited.round(), 0);

        assert_eq!(s.current(), &current_before);
        assert_eq!(s.current_layer(), 2);
    }

    #[test]
    fn test_retry_keeps_counters() {
        let mut s = session(&[3, 11, 18, 27]);
        s.select(4).unwrap();
        s.retry();
        assert_eq!(s.current().energy(), 97);
        assert!(s.current().selection().is_empty());
        assert_eq!(s.current().round(), 0);
        assert!(!s.current().applied());
    }

    #[test]
    fn test_energy_never_negative() {
        let mut s = session(&[3, 11, 18, 27]);
        for _ in 0..50 {
            s.retry();
        }
        assert_eq!(s.current().energy(), 0);
        s.apply_transform(Transform::Rotate { degrees: 1.0 }).unwrap();
        assert_eq!(s.current().energy(), 0);
    }

    #[test]
    fn test_score_and_cash_out() {
        let s = session(&[3, 11, 18, 27]);
        let score = s.score();
        assert_eq!(score.layer, 1);
        assert_eq!(score.energy, 100);
        assert!(score.gate.passed());
        assert!((score.metrics.coherence - 0.8872223237674561).abs() < 1e-9);
        assert!(score.rubric.overall > 0.99);

        let out = s.cash_out();
        assert_eq!(out.layer, 1);
        assert_eq!(out.energy, 100);
    }

    #[test]
    fn test_selected_similarity() {
        let mut s = session(&[3]);
        assert_eq!(s.selected_similarity(), None);
        s.select(0).unwrap();
        s.select(18).unwrap();
        assert!((s.selected_similarity().unwrap() + 1.0).abs() < 1e-9);
    }
}
