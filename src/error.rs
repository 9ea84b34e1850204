//! Error taxonomy for the genealogy engine.

use crate::components::FowlId;
use thiserror::Error;

/// Failures surfaced to the screen layer. Render-side allocation pressure is
/// deliberately absent: it is absorbed locally by dropping render quality
/// (see `render::draw`) instead of propagating.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GenealogyError {
    #[error("fowl {0:?} not found in registry")]
    RootNotFound(FowlId),

    #[error("record fetch failed: {0}")]
    Fetch(String),

    #[error("snapshot rejected: {0}")]
    Snapshot(String),
}

pub type Result<T> = std::result::Result<T, GenealogyError>;
