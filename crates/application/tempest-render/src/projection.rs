//! # Ring Projection
//!
//! Maps sector angles onto a 2D drawing surface and back.
//!
//! ```text
//!            y
//!            ▲ (screen y grows downward, so sin is subtracted)
//!     ┌──────┼──────┐
//!     │   ╭──┴──╮   │  outer = min(W, H)/2 - padding
//!     │  │ ╭───╮ │  │  inner = inner_ratio · outer
//!     │  │ │ + │ │──┼──► angle 0
//!     │  │ ╰───╯ │  │
//!     │   ╰─────╯   │
//!     └─────────────┘
//! ```
//!
//! Hit-testing inverts the mapping: the click's distance from the centre
//! picks a ring (ties go to the outer ring), its polar angle picks the
//! closest sector on that ring (ties go to the lowest index).

use glam::DVec2;
use serde::{Deserialize, Serialize};
use tempest_config::ProjectionConfig;
use tempest_core::{diff, Field, Ring, Sector};

/// Drawing surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Resolved ring geometry for one surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    center: DVec2,
    outer: f64,
    inner: f64,
}

impl Projection {
    /// Geometry for `surface`, or `None` when the rings would have no size.
    pub fn new(surface: Surface, cfg: &ProjectionConfig) -> Option<Self> {
        if !(surface.width.is_finite() && surface.height.is_finite()) {
            return None;
        }
        let outer = surface.width.min(surface.height) * 0.5 - cfg.padding;
        let inner = outer * cfg.inner_ratio;
        if !(outer > 0.0 && inner > 0.0) {
            return None;
        }
        Some(Self {
            center: surface.center(),
            outer,
            inner,
        })
    }

    pub fn center(&self) -> DVec2 {
        self.center
    }

    pub fn radius(&self, ring: Ring) -> f64 {
        match ring {
            Ring::Outer => self.outer,
            Ring::Inner => self.inner,
        }
    }

    /// Screen position of an angle on a ring.
    pub fn point_at(&self, angle: f64, ring: Ring) -> DVec2 {
        let r = self.radius(ring);
        DVec2::new(self.center.x + r * angle.cos(), self.center.y - r * angle.sin())
    }

    pub fn point(&self, sector: &Sector) -> DVec2 {
        self.point_at(sector.angle(), sector.ring)
    }

    /// Ring and polar angle of a screen point. The centre itself maps to
    /// the inner ring at angle 0.
    pub fn locate(&self, point: DVec2) -> (Ring, f64) {
        let rel = point - self.center;
        let r = rel.length();
        let ring = if (r - self.inner).abs() < (r - self.outer).abs() {
            Ring::Inner
        } else {
            Ring::Outer
        };
        let angle = if r == 0.0 { 0.0 } else { (-rel.y).atan2(rel.x) };
        (ring, angle)
    }

    /// Index of the sector under `point`, if any.
    pub fn hit_test(&self, field: &Field, point: DVec2) -> Option<usize> {
        if !point.is_finite() {
            return None;
        }
        let (ring, angle) = self.locate(point);

        let mut best: Option<(usize, f64)> = None;
        for (i, sector) in field.iter().enumerate() {
            if sector.ring != ring {
                continue;
            }
            let d = diff(sector.angle(), angle).abs();
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((i, d)),
            }
        }
        best.map(|(i, _)| i)
    }
}

/// One-shot hit test against a surface.
pub fn hit_test(
    field: &Field,
    point: DVec2,
    surface: Surface,
    cfg: &ProjectionConfig,
) -> Option<usize> {
    if field.is_empty() {
        return None;
    }
    Projection::new(surface, cfg)?.hit_test(field, point)
}
