//! # Tempest Session
//!
//! Rounds and layers around the pure transform reducer.
//!
//! ```text
//! ContentPack ──seed──► Field ──► Session
//!                                   ├─ LayerState × n  (field, energy, uses, round, phase)
//!                                   ├─ Gate            (advance?)
//!                                   └─ Score / CashOut
//! ```
//!
//! Per-layer rules:
//!
//! | Rule                | Value                         |
//! |---------------------|-------------------------------|
//! | Starting energy     | 100                           |
//! | Rounds per layer    | 10 (0..=9)                    |
//! | Capped transforms   | stabilize, beam, magnetize ×3 |
//! | Layers              | 10                            |
//!
//! All of these come from [`tempest_config::EngineConfig`].

pub mod layer;
pub mod phase;
pub mod seed;
pub mod session;
pub mod store;

pub use layer::{LayerState, UseCounters};
pub use phase::{RoundAdvance, RoundPhase};
pub use seed::{even_field, seed_field};
pub use session::{CashOut, Score, Session};
pub use store::{SessionStore, SharedSession, StoredSession};
