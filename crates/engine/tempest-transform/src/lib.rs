//! # Tempest Transforms
//!
//! The five round actions as a closed enum and one pure reducer:
//!
//! ```text
//! (Field, Transform, Selection) ──apply──► Field'
//! ```
//!
//! Bookkeeping (energy, use caps, round phase) belongs to the session; this
//! crate only moves angles.

pub mod ops;
pub mod perturb;
pub mod reducer;
pub mod transform;

pub use perturb::{carry_into_new_layer, retry_jitter};
pub use reducer::apply;
pub use transform::{BeamMode, Transform, MAX_ROTATION_DEGREES};
