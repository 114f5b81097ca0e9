//! SVG preview of a field.

use std::fmt::Write;

use tempest_config::ProjectionConfig;
use tempest_core::{Field, Ring, Selection};

use crate::projection::{Projection, Surface};
use crate::{Error, Result};

const BACKGROUND: &str = "#0a0a0a";
const RING_STROKE: &str = "#2a2a2a";
const SPOKE_STROKE: &str = "#555555";
const DEFAULT_FILL: &str = "#8ab4f8";
const SECTOR_RADIUS: f64 = 4.0;
const SELECTED_RADIUS: f64 = 7.0;

/// Render `field` with both rings, anchor spokes, labels and, when two
/// sectors are selected, the cosine arc between them.
pub fn render_svg(
    field: &Field,
    selection: &Selection,
    surface: Surface,
    cfg: &ProjectionConfig,
) -> Result<String> {
    let projection = Projection::new(surface, cfg).ok_or(Error::DegenerateSurface {
        width: surface.width,
        height: surface.height,
    })?;
    let c = projection.center();

    let mut body = String::new();
    for ring in [Ring::Outer, Ring::Inner] {
        let _ = writeln!(
            body,
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="none" stroke="{}"/>"#,
            c.x,
            c.y,
            projection.radius(ring),
            RING_STROKE
        );
    }

    for i in field.anchor_indices() {
        if let Some(sector) = field.get(i) {
            let p = projection.point(sector);
            let _ = writeln!(
                body,
                r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-dasharray="4 4"/>"#,
                c.x, c.y, p.x, p.y, SPOKE_STROKE
            );
        }
    }

    if let Some((a, b)) = selection.pair() {
        if let (Some(sa), Some(sb), Ok(cos)) = (field.get(a), field.get(b), field.similarity(a, b)) {
            let pa = projection.point(sa);
            let pb = projection.point(sb);
            let mid = (pa + pb) * 0.5;
            let stroke = if cos >= 0.0 { "#4caf50" } else { "#e57373" };
            let _ = writeln!(
                body,
                r#"  <path d="M {:.2} {:.2} Q {:.2} {:.2} {:.2} {:.2}" fill="none" stroke="{}" stroke-width="2"/>"#,
                pa.x, pa.y, c.x, c.y, pb.x, pb.y, stroke
            );
            let _ = writeln!(
                body,
                r#"  <text x="{:.2}" y="{:.2}" fill="{}" font-size="11" text-anchor="middle">cos {:.3}</text>"#,
                mid.x, mid.y, stroke, cos
            );
        }
    }

    for (i, sector) in field.iter().enumerate() {
        let p = projection.point(sector);
        let r = if selection.contains(i) {
            SELECTED_RADIUS
        } else {
            SECTOR_RADIUS
        };
        let fill = sector.color.as_deref().map(escape).unwrap_or_else(|| DEFAULT_FILL.into());
        let stroke = if sector.is_anchor { "#ffffff" } else { "none" };
        let _ = writeln!(
            body,
            r#"  <circle data-index="{}" cx="{:.2}" cy="{:.2}" r="{}" fill="{}" stroke="{}"/>"#,
            i, p.x, p.y, r, fill, stroke
        );
        if let Some(label) = sector.label() {
            let _ = writeln!(
                body,
                r##"  <text x="{:.2}" y="{:.2}" fill="#cccccc" font-size="9">{}</text>"##,
                p.x + r + 2.0,
                p.y + 3.0,
                escape(label)
            );
        }
    }

    tracing::debug!(sectors = field.len(), "Rendered SVG preview");

    Ok(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">
  <rect width="100%" height="100%" fill="{bg}"/>
{body}</svg>
"#,
        w = surface.width,
        h = surface.height,
        bg = BACKGROUND,
        body = body,
    ))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
