/// Image preview module
///
/// This module handles:
/// - Allocating and revoking preview handles for staged files (registry.rs)
/// - Decoding staged files into small RGBA thumbnails (thumbnail.rs)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub mod registry;
pub mod thumbnail;

pub use registry::PreviewRegistry;
pub use thumbnail::Thumbnail;

/// Identifier of a revocable preview handle
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PreviewId(pub(crate) u64);

impl fmt::Display for PreviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preview:{}", self.0)
    }
}

/// Errors raised while producing a preview thumbnail
#[derive(Debug, Clone, Error)]
pub enum PreviewError {
    #[error("image file does not exist: {0}")]
    Missing(PathBuf),
    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("thumbnail task failed: {0}")]
    Task(String),
}
