//! Small deterministic nudges that are not round actions.

use tempest_core::Field;

/// Magnitude of the retry jitter, in radians.
pub const RETRY_JITTER: f64 = 0.01;

/// Step used when carrying a field into a fresh layer, in radians.
pub const CARRY_STEP: f64 = 0.02;

/// Anchor stride when carrying a field into a fresh layer.
pub const CARRY_ANCHOR_STRIDE: usize = 9;

/// Cosmetic retry: even sectors move `+RETRY_JITTER`, odd sectors
/// `-RETRY_JITTER`. Anchors are kept.
pub fn retry_jitter(field: &Field) -> Field {
    field.map_angles(|i, s| {
        let dir = if i % 2 == 0 { 1.0 } else { -1.0 };
        s.angle() + RETRY_JITTER * dir
    })
}

/// Seed for a layer that has never been visited: shift sectors by
/// `CARRY_STEP · ((i mod 3) - 1)` and re-draw anchors on every ninth sector.
pub fn carry_into_new_layer(field: &Field) -> Field {
    let mut next = field.map_angles(|i, s| {
        let step = (i % 3) as f64 - 1.0;
        s.angle() + CARRY_STEP * step
    });
    next.reanchor(|i| i % CARRY_ANCHOR_STRIDE == 0);
    next
}
