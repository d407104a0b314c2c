//! Texture collection
//!
//! Copies the image files a scene references into a flat textures directory
//! next to the exported geometry.

mod collector;

pub use collector::{CopiedTexture, TextureCollector, TextureReport, DEFAULT_TEXTURES_DIR};

use std::path::PathBuf;
use thiserror::Error;

/// Texture collection errors
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to create textures directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type TextureResult<T> = Result<T, TextureError>;

impl From<TextureError> for raybridge_core::Error {
    fn from(err: TextureError) -> Self {
        match err {
            TextureError::Io(e) => raybridge_core::Error::Io(e),
            TextureError::CreateDir { path, source } => raybridge_core::Error::CreateDir { path, source },
            TextureError::Copy { from, to, source } => raybridge_core::Error::Copy { from, to, source },
        }
    }
}
