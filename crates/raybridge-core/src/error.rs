//! Unified error handling for RayBridge
//!
//! Export failures fall into two classes. [`Error`] is fatal: the export
//! aborts and the error propagates to the caller. [`Skip`] is a notice: the
//! offending item is left out (or emitted in reduced form) and the export
//! carries on, with the notice recorded in the export report.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for all RayBridge operations
#[derive(Error, Debug)]
pub enum Error {
    // ==================== I/O Errors ====================

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Could not create an output directory
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not copy a file into the output tree
    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ==================== Scene Errors ====================

    /// Scene data could not be decoded
    #[error("Invalid scene data: {message}")]
    InvalidScene {
        message: String,
    },

    // ==================== Export Errors ====================

    /// Unsupported input or output format
    #[error("Unsupported format: {format}")]
    UnsupportedFormat {
        format: String,
    },

    /// Serialization of the export payload failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
    },

    /// Export failed
    #[error("Export failed: {message}")]
    ExportFailed {
        message: String,
    },

    // ==================== Configuration Errors ====================

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        message: String,
    },

    // ==================== General Errors ====================

    /// Custom error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

/// Result type using the unified Error
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Error::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid scene error
    pub fn invalid_scene(message: impl Into<String>) -> Self {
        Error::InvalidScene {
            message: message.into(),
        }
    }

    /// Create an export failure
    pub fn export_failed(message: impl Into<String>) -> Self {
        Error::ExportFailed {
            message: message.into(),
        }
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::FileNotFound(_) => true,
            Error::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            Error::WithContext { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

/// A non-fatal condition met during export.
///
/// Skips never abort an export. They are collected so callers and tests can
/// see exactly what was left out and why.
#[derive(Debug, Clone, PartialEq)]
pub enum Skip {
    /// Single-camera export found no active camera; the `camera` key is omitted
    NoActiveCamera,

    /// Image has no file path attached (packed or generated)
    TextureWithoutPath {
        image: String,
    },

    /// Image path does not exist on disk
    TextureMissing {
        image: String,
        path: PathBuf,
    },

    /// Another image with the same file name was already copied
    DuplicateTextureName {
        image: String,
        file_name: String,
    },

    /// Image already lives at its target path and was left untouched
    TextureAlreadyInPlace {
        image: String,
        path: PathBuf,
    },

    /// Camera whose aspect ratio is zero, infinite or NaN
    DegenerateCamera {
        object: String,
        aspect: f64,
    },

    /// Light kind the extractor has no dedicated fields for
    UnsupportedLight {
        object: String,
        kind: String,
    },
}

impl std::fmt::Display for Skip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Skip::NoActiveCamera => write!(f, "scene has no active camera"),
            Skip::TextureWithoutPath { image } => write!(f, "image '{}' has no file path", image),
            Skip::TextureMissing { image, path } => {
                write!(f, "image '{}' not found at {}", image, path.display())
            }
            Skip::DuplicateTextureName { image, file_name } => {
                write!(f, "image '{}' skipped, '{}' already copied", image, file_name)
            }
            Skip::TextureAlreadyInPlace { image, path } => {
                write!(f, "image '{}' already in place at {}", image, path.display())
            }
            Skip::DegenerateCamera { object, aspect } => {
                write!(f, "camera '{}' has unusable aspect ratio {}", object, aspect)
            }
            Skip::UnsupportedLight { object, kind } => {
                write!(f, "light '{}' has unsupported kind {}", object, kind)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_with_context() {
        let err = Error::FileNotFound(PathBuf::from("/scene.json"));
        let contextualized = err.with_context("while loading scene");

        assert!(contextualized.to_string().contains("while loading scene"));
        assert!(contextualized.is_not_found());
    }

    #[test]
    fn test_not_found_classification() {
        let copy = Error::Copy {
            from: PathBuf::from("a.png"),
            to: PathBuf::from("textures/a.png"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!copy.is_not_found());
        assert!(Error::Io(std::io::Error::from(std::io::ErrorKind::NotFound)).is_not_found());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::invalid_scene("objects must be a list"));
        let with_context = result.context("parsing scene dump");

        let message = with_context.unwrap_err().to_string();
        assert!(message.contains("parsing scene dump"));
        assert!(message.contains("objects"));
    }

    #[test]
    fn test_skip_display() {
        let skip = Skip::DuplicateTextureName {
            image: "Wood.001".into(),
            file_name: "wood.png".into(),
        };
        assert_eq!(skip.to_string(), "image 'Wood.001' skipped, 'wood.png' already copied");
    }
}
