//! # Tempest Render
//!
//! Screen geometry for the two-ring field: projecting sectors to points,
//! hit-testing clicks back to sector indices, and an SVG preview.

pub mod projection;
pub mod svg;

pub use projection::{hit_test, Projection, Surface};
pub use svg::render_svg;

/// Result type for render operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from render operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Surface {width}x{height} is too small to draw the rings")]
    DegenerateSurface { width: f64, height: f64 },
}
