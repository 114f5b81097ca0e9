//! # Field Operators
//!
//! Five pure functions from field to field. None of them mutate their
//! input; all of them wrap every new angle back into (-π, π].
//!
//! | Operator  | Moves                              | Gain                                   |
//! |-----------|------------------------------------|----------------------------------------|
//! | stabilize | toward slot `i/N · 2π`             | `0.08 + 0.25·strength`                 |
//! | beam      | toward target / nearest anchor     | `0.08·w` (selected), `0.06·w` (auto)   |
//! | magnetize | toward the anchor                  | `(0.12 + 0.3·pull)·w`                  |
//! | rotate    | everything by the same angle       | none                                   |
//! | spread    | away from the anchor               | `(0.2 + 0.35·amount)·w^1.5`            |
//!
//! `w = max(0, cos(Δ))` is the proximity falloff, so sectors more than a
//! quarter turn away do not move.

use tempest_core::angle::{degrees, even_slot, sign};
use tempest_core::{diff, falloff, Field, Result};
use tempest_metrics::AnchorSet;

const STABILIZE_BASE: f64 = 0.08;
const STABILIZE_SCALE: f64 = 0.25;
const BEAM_SELECTED_GAIN: f64 = 0.08;
const BEAM_AUTO_GAIN: f64 = 0.06;
const MAGNETIZE_BASE: f64 = 0.12;
const MAGNETIZE_SCALE: f64 = 0.3;
const SPREAD_BASE: f64 = 0.2;
const SPREAD_SCALE: f64 = 0.35;
const SPREAD_SHARPNESS: f64 = 1.5;

/// Partial relaxation toward even spacing. Not a snap: each sector covers
/// `0.08 + 0.25·strength` of the shortest path to its slot.
pub fn stabilize(field: &Field, strength: f64) -> Field {
    let n = field.len();
    let rate = STABILIZE_BASE + STABILIZE_SCALE * strength;
    field.map_angles(|i, s| {
        let target = even_slot(i, n);
        s.angle() + diff(target, s.angle()) * rate
    })
}

/// Pull every sector toward sector `target`, strongest for near neighbours.
pub fn beam_selected(field: &Field, target: usize) -> Result<Field> {
    let t = field.sector(target)?.angle();
    Ok(field.map_angles(|_, s| {
        let a = s.angle();
        a + diff(t, a) * BEAM_SELECTED_GAIN * falloff(t, a)
    }))
}

/// Pull every sector toward its nearest anchor (virtual anchors when the
/// field has none).
pub fn beam_auto(field: &Field) -> Field {
    let anchors = AnchorSet::from_field(field);
    let angles = anchors.angles();
    field.map_angles(|_, s| {
        let a = s.angle();
        let (k, _) = anchors.nearest(a);
        let anchor = angles[k];
        a + diff(anchor, a) * BEAM_AUTO_GAIN * falloff(anchor, a)
    })
}

/// Pull every other sector toward sector `anchor`.
pub fn magnetize(field: &Field, anchor: usize, pull: f64) -> Result<Field> {
    let t = field.sector(anchor)?.angle();
    let gain = MAGNETIZE_BASE + MAGNETIZE_SCALE * pull;
    Ok(field.map_angles(|i, s| {
        let a = s.angle();
        if i == anchor {
            return a;
        }
        a + diff(t, a) * gain * falloff(t, a)
    }))
}

/// Rotate the whole field by `deg` degrees. No falloff.
pub fn rotate(field: &Field, deg: f64) -> Field {
    let delta = degrees(deg);
    field.map_angles(|_, s| s.angle() + delta)
}

/// Push every other sector away from sector `anchor`.
///
/// Direction is the sign of the raw signed difference, so a sector sitting
/// exactly on the anchor stays put. The falloff is raised to 1.5 so only
/// near neighbours feel it.
pub fn spread(field: &Field, anchor: usize, amount: f64) -> Result<Field> {
    let t = field.sector(anchor)?.angle();
    let push = SPREAD_BASE + SPREAD_SCALE * amount;
    Ok(field.map_angles(|i, s| {
        let a = s.angle();
        if i == anchor {
            return a;
        }
        a + sign(diff(a, t)) * push * falloff(a, t).powf(SPREAD_SHARPNESS)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use tempest_core::{Error, Ring, Sector};
    use tempest_metrics::Metrics;

    fn even_field(n: usize, anchors: &[usize]) -> Field {
        Field::new(
            (0..n)
                .map(|i| {
                    let s = Sector::new(even_slot(i, n), Ring::alternating(i));
                    if anchors.contains(&i) {
                        s.anchored()
                    } else {
                        s
                    }
                })
                .collect(),
        )
    }

    fn field_of(angles: &[f64]) -> Field {
        Field::new(
            angles
                .iter()
                .enumerate()
                .map(|(i, &a)| Sector::new(a, Ring::alternating(i)))
                .collect(),
        )
    }

    fn assert_normalized(field: &Field) {
        for s in field {
            assert!(s.angle() > -PI && s.angle() <= PI, "angle {} not normalized", s.angle());
        }
    }

    #[test]
    fn test_stabilize_moves_partially_toward_slot() {
        // 4 sectors, slot 1 is π/2; sector 1 starts at 0
        let field = field_of(&[0.0, 0.0, PI, -PI / 2.0]);
        let out = stabilize(&field, 0.0);
        assert!((out.get(1).unwrap().angle() - 0.08 * PI / 2.0).abs() < 1e-12);
        // sectors already on their slots stay
        assert!(out.get(0).unwrap().angle().abs() < 1e-12);
        assert!((out.get(2).unwrap().angle() - PI).abs() < 1e-12);

        let strong = stabilize(&field, 1.0);
        assert!((strong.get(1).unwrap().angle() - 0.33 * PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_stabilize_takes_short_path_across_seam() {
        // slot 3 of 4 is 3π/2 = -π/2; sector sits at -π/2 + 0.1
        let field = field_of(&[0.0, PI / 2.0, PI, -PI / 2.0 + 0.1]);
        let out = stabilize(&field, 0.0);
        let moved = out.get(3).unwrap().angle();
        assert!((moved - (-PI / 2.0 + 0.1 - 0.008)).abs() < 1e-12, "moved to {}", moved);
    }

    #[test]
    fn test_beam_selected_falloff() {
        let field = field_of(&[0.0, 0.5, PI / 2.0, PI]);
        let out = beam_selected(&field, 0).unwrap();
        // target stays, near sector moves, orthogonal and opposite do not
        assert_eq!(out.get(0).unwrap().angle(), 0.0);
        let expected = 0.5 - 0.5 * 0.08 * 0.5f64.cos();
        assert!((out.get(1).unwrap().angle() - expected).abs() < 1e-12);
        assert!((out.get(2).unwrap().angle() - PI / 2.0).abs() < 1e-12);
        assert_eq!(out.get(3).unwrap().angle(), PI);
    }

    #[test]
    fn test_beam_selected_bad_target() {
        let field = field_of(&[0.0]);
        assert!(matches!(
            beam_selected(&field, 4),
            Err(Error::IndexOutOfRange { index: 4, len: 1 })
        ));
    }

    #[test]
    fn test_beam_auto_uses_virtual_anchors() {
        let field = field_of(&[0.2, PI / 2.0 + 0.2]);
        let out = beam_auto(&field);
        let w = 0.2f64.cos();
        assert!((out.get(0).unwrap().angle() - (0.2 - 0.2 * 0.06 * w)).abs() < 1e-12);
        assert!(
            (out.get(1).unwrap().angle() - (PI / 2.0 + 0.2 - 0.2 * 0.06 * w)).abs() < 1e-12
        );
    }

    #[test]
    fn test_beam_auto_uses_real_anchors() {
        let mut field = field_of(&[1.0, 1.3, -2.0]);
        field.set_anchor(0, true).unwrap();
        let out = beam_auto(&field);
        assert_eq!(out.get(0).unwrap().angle(), 1.0);
        assert!(out.get(1).unwrap().angle() < 1.3);
        // -2.0 is 3 rad from the only anchor: cos < 0, no pull
        assert_eq!(out.get(2).unwrap().angle(), -2.0);
    }

    #[test]
    fn test_magnetize_anchor_fixed_others_pulled() {
        let field = field_of(&[0.0, 0.4, -0.4, 2.5]);
        let out = magnetize(&field, 0, 1.0).unwrap();
        assert_eq!(out.get(0).unwrap().angle(), 0.0);
        let gain = 0.42 * 0.4f64.cos();
        assert!((out.get(1).unwrap().angle() - (0.4 - 0.4 * gain)).abs() < 1e-12);
        assert!((out.get(2).unwrap().angle() - (-0.4 + 0.4 * gain)).abs() < 1e-12);
        assert_eq!(out.get(3).unwrap().angle(), 2.5, "beyond a quarter turn nothing moves");
    }

    #[test]
    fn test_rotate_roundtrip() {
        let field = field_of(&[0.0, 1.0, -1.0, PI, -PI + 0.01, 3.0]);
        for d in [-45.0, -17.5, 0.0, 5.0, 30.0, 45.0] {
            let back = rotate(&rotate(&field, d), -d);
            assert_normalized(&back);
            for (a, b) in field.iter().zip(back.iter()) {
                assert!(
                    diff(a.angle(), b.angle()).abs() < 1e-9,
                    "rotate {} lost {} -> {}",
                    d,
                    a.angle(),
                    b.angle()
                );
            }
        }
    }

    #[test]
    fn test_rotate_wraps() {
        let out = rotate(&field_of(&[PI - 0.1]), 45.0);
        let expected = PI - 0.1 + PI / 4.0 - 2.0 * PI;
        assert!((out.get(0).unwrap().angle() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_spread_pushes_by_sign() {
        let field = field_of(&[0.0, 0.3, -0.3, 0.0, 2.0]);
        let out = spread(&field, 0, 0.0).unwrap();
        let push = 0.2 * 0.3f64.cos().powf(1.5);
        assert_eq!(out.get(0).unwrap().angle(), 0.0);
        assert!((out.get(1).unwrap().angle() - (0.3 + push)).abs() < 1e-12);
        assert!((out.get(2).unwrap().angle() - (-0.3 - push)).abs() < 1e-12);
        // coincident with the anchor: sign(0) = 0
        assert_eq!(out.get(3).unwrap().angle(), 0.0);
        // far side untouched
        assert_eq!(out.get(4).unwrap().angle(), 2.0);
    }

    #[test]
    fn test_spread_missing_anchor() {
        assert!(spread(&field_of(&[0.0, 1.0]), 2, 0.5).is_err());
    }

    #[test]
    fn test_reference_scenario_increases_coherence() {
        let field = even_field(36, &[3, 11, 18, 27]);
        let before = Metrics::compute(&field).coherence;
        let out = magnetize(&stabilize(&field, 0.5), 3, 0.5).unwrap();
        let after = Metrics::compute(&out).coherence;
        assert!(after > before, "coherence {} -> {}", before, after);
        assert!((after - 0.8950011509643025).abs() < 1e-9, "after {}", after);
    }

    #[test]
    fn test_repeated_stabilize_magnetize_converges() {
        let mut field = even_field(36, &[3, 11, 18, 27]);
        for _ in 0..10 {
            field = stabilize(&field, 0.5);
            for anchor in [3, 11, 18, 27] {
                field = magnetize(&field, anchor, 1.0).unwrap();
            }
        }
        let m = Metrics::compute(&field);
        assert!(m.coherence >= 0.55, "coherence {}", m.coherence);
        assert!(m.separation >= 0.35, "separation {}", m.separation);
        assert_normalized(&field);
    }

    #[test]
    fn test_operators_on_empty_field() {
        let empty = Field::default();
        assert!(stabilize(&empty, 1.0).is_empty());
        assert!(beam_auto(&empty).is_empty());
        assert!(rotate(&empty, 10.0).is_empty());
        assert!(magnetize(&empty, 0, 1.0).is_err());
    }
}
