//! # Circular Arithmetic
//!
//! Every angle in the engine lives on the unit circle. Comparisons are only
//! meaningful after wrapping into the half-open interval (-π, π].
//!
//! ```text
//!            π/2
//!             │
//!     π ──────┼────── 0
//!             │
//!           -π/2
//! ```
//!
//! `diff(a, b)` is the shortest signed path from `b` to `a`. Positive means
//! counter-clockwise.

use std::f64::consts::{PI, TAU};

/// Wrap any real angle into (-π, π].
///
/// Values already in range are returned untouched, which makes the function
/// exactly idempotent. Non-finite input collapses to 0.
pub fn normalize(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    if angle > -PI && angle <= PI {
        return angle;
    }

    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Shortest signed angular difference `a - b`, in (-π, π].
pub fn diff(a: f64, b: f64) -> f64 {
    normalize(a - b)
}

/// Raw cosine similarity between two angles, in [-1, 1].
///
/// This is the value shown to the player as "cos θ".
pub fn similarity(a: f64, b: f64) -> f64 {
    diff(a, b).abs().cos()
}

/// Cosine similarity clamped at zero. Used as a proximity weight in
/// transform math so that tokens on the far side of the circle stay put.
pub fn falloff(a: f64, b: f64) -> f64 {
    similarity(a, b).max(0.0)
}

/// Sign of `x` with `sign(0) == 0`.
///
/// `f64::signum` maps zero to one, which would push coincident tokens.
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Convert degrees to radians.
pub fn degrees(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Angle of the `index`-th slot when `count` slots are spaced evenly,
/// starting at zero.
pub fn even_slot(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    index as f64 / count as f64 * TAU
}
