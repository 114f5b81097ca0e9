//! Per-layer bookkeeping: field snapshot, energy, use caps and round phase.

use serde::{Deserialize, Serialize};
use tempest_config::EngineConfig;
use tempest_core::{Error, Field, Result, Selection, TransformKind};
use tempest_transform::{retry_jitter, Transform};

use crate::phase::{RoundAdvance, RoundPhase};

/// Uses spent on each capped transform this layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCounters {
    pub stabilize: u8,
    pub beam: u8,
    pub magnetize: u8,
}

impl UseCounters {
    /// Uses spent on `kind`, or `None` when the kind is uncapped.
    pub fn used(&self, kind: TransformKind) -> Option<u8> {
        match kind {
            TransformKind::Stabilize => Some(self.stabilize),
            TransformKind::Beam => Some(self.beam),
            TransformKind::Magnetize => Some(self.magnetize),
            TransformKind::Rotate | TransformKind::Spread => None,
        }
    }

    /// Uses left out of `cap`, or `None` when the kind is uncapped.
    pub fn remaining(&self, kind: TransformKind, cap: u8) -> Option<u8> {
        self.used(kind).map(|used| cap.saturating_sub(used))
    }

    fn record(&mut self, kind: TransformKind) {
        let slot = match kind {
            TransformKind::Stabilize => &mut self.stabilize,
            TransformKind::Beam => &mut self.beam,
            TransformKind::Magnetize => &mut self.magnetize,
            TransformKind::Rotate | TransformKind::Spread => return,
        };
        *slot = slot.saturating_add(1);
    }
}

/// One layer's snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerState {
    field: Field,
    energy: u32,
    uses: UseCounters,
    /// Zero-based round index
    round: u8,
    phase: RoundPhase,
    selection: Selection,
}

impl LayerState {
    pub fn new(field: Field, energy: u32) -> Self {
        Self {
            field,
            energy,
            uses: UseCounters::default(),
            round: 0,
            phase: RoundPhase::SelectingAction,
            selection: Selection::new(),
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn uses(&self) -> UseCounters {
        self.uses
    }

    pub fn round(&self) -> u8 {
        self.round
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// True once this round's transform has been applied.
    pub fn applied(&self) -> bool {
        self.phase.is_applied()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Toggle a sector in the selection. Returns whether it is now selected.
    pub fn toggle_selection(&mut self, index: usize) -> Result<bool> {
        self.field.check_index(index)?;
        Ok(self.selection.toggle(index))
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Refuse `kind` when its per-layer cap is spent.
    pub fn check_capacity(&self, kind: TransformKind, cap: u8) -> Result<()> {
        match self.uses.remaining(kind, cap) {
            Some(0) => Err(Error::CapacityExceeded {
                transform: kind,
                limit: cap,
            }),
            _ => Ok(()),
        }
    }

    /// Move to `ActionConfigured`. Allowed until the round's transform is applied.
    pub(crate) fn choose(&mut self, transform: Transform) -> Result<()> {
        if !self.phase.can_choose() {
            return Err(Error::InvalidTransition {
                from: self.phase.name().into(),
                to: "ActionConfigured".into(),
            });
        }
        self.phase = RoundPhase::ActionConfigured { transform };
        Ok(())
    }

    /// Apply the configured transform and mark the round `Applied`.
    pub(crate) fn apply_configured(&mut self, config: &EngineConfig) -> Result<Transform> {
        let transform = self.phase.configured().ok_or_else(|| Error::InvalidTransition {
            from: self.phase.name().into(),
            to: "Applied".into(),
        })?;
        let applied = self.run(&transform, config)?;
        self.phase = RoundPhase::Applied { transform: applied };
        Ok(applied)
    }

    /// Capacity check, transform, energy and use bookkeeping, without
    /// touching the round phase. On error nothing changes.
    pub(crate) fn run(&mut self, transform: &Transform, config: &EngineConfig) -> Result<Transform> {
        let transform = transform.clamped();
        let kind = transform.kind();
        self.check_capacity(kind, config.limits.uses_per_layer)?;

        let next = tempest_transform::apply(&self.field, &transform, &self.selection)?;
        self.field = next;
        self.spend(config.energy.cost(kind));
        self.uses.record(kind);
        Ok(transform)
    }

    /// Finish the round. Only legal after Apply.
    pub(crate) fn next_round(&mut self, last_round: u8) -> Result<RoundAdvance> {
        if !self.phase.is_applied() {
            return Err(Error::InvalidTransition {
                from: self.phase.name().into(),
                to: "SelectingAction".into(),
            });
        }
        if self.round >= last_round {
            return Ok(RoundAdvance::LayerComplete);
        }
        self.round += 1;
        self.phase = RoundPhase::SelectingAction;
        Ok(RoundAdvance::Next { round: self.round })
    }

    /// Cosmetic jitter. Costs energy, clears the selection, leaves rounds
    /// and use counters alone.
    pub(crate) fn retry(&mut self, cost: u32) {
        self.field = retry_jitter(&self.field);
        self.spend(cost);
        self.selection.clear();
    }

    fn spend(&mut self, cost: u32) {
        self.energy = self.energy.saturating_sub(cost);
    }
}
