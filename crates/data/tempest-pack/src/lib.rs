//! # Tempest Content Packs
//!
//! A content pack ("bag of tokens") supplies everything thematic about a
//! game: the token ids placed on the rings, the colour of each cluster, and
//! the prompt shown on each layer. The engine reads a pack once, at seeding,
//! and never writes to it.

pub mod bag;
pub mod dev;
pub mod label;

pub use bag::{Boss, ContentPack, LayerPrompt, Relation, Token, UiHints};
pub use dev::dev_pack;
pub use label::pretty_label;

/// Result type for content pack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading a content pack
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid content pack JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Content pack has no tokens")]
    NoTokens,
}
