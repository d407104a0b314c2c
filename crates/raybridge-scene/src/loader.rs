//! Scene dump loading
//!
//! A dump is a [`Scene`] serialized as JSON or YAML. The format is picked
//! from the file extension.

use crate::model::Scene;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Scene loading errors
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene dump not found: {0}")]
    NotFound(PathBuf),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported scene format: {0}")]
    UnsupportedFormat(String),
}

pub type SceneResult<T> = Result<T, SceneError>;

impl From<SceneError> for raybridge_core::Error {
    fn from(err: SceneError) -> Self {
        match err {
            SceneError::Io(e) => raybridge_core::Error::Io(e),
            SceneError::NotFound(path) => raybridge_core::Error::FileNotFound(path),
            SceneError::UnsupportedFormat(format) => raybridge_core::Error::UnsupportedFormat { format },
            other => raybridge_core::Error::invalid_scene(other.to_string()),
        }
    }
}

/// Serialization format of a scene dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneFormat {
    Json,
    Yaml,
}

impl SceneFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> SceneResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "json" => Ok(SceneFormat::Json),
            "yaml" | "yml" => Ok(SceneFormat::Yaml),
            _ => Err(SceneError::UnsupportedFormat(if ext.is_empty() {
                path.display().to_string()
            } else {
                ext
            })),
        }
    }
}

/// Load a scene dump from disk.
///
/// When the dump does not name a base directory, the dump's own directory
/// is used so `//`-relative image paths still resolve.
pub fn load_scene(path: impl AsRef<Path>) -> SceneResult<Scene> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SceneError::NotFound(path.to_path_buf()));
    }

    let format = SceneFormat::from_path(path)?;
    info!(path = %path.display(), ?format, "Loading scene dump");

    let reader = BufReader::new(File::open(path)?);
    let mut scene: Scene = match format {
        SceneFormat::Json => serde_json::from_reader(reader)?,
        SceneFormat::Yaml => serde_yaml::from_reader(reader)?,
    };

    if scene.base_dir.as_os_str().is_empty() {
        if let Some(parent) = path.parent() {
            scene.base_dir = parent.to_path_buf();
        }
    }

    debug!(
        objects = scene.objects.len(),
        images = scene.images.len(),
        base_dir = %scene.base_dir.display(),
        "Scene dump loaded"
    );

    Ok(scene)
}

/// Parse a scene dump held in memory
pub fn parse_scene(text: &str, format: SceneFormat) -> SceneResult<Scene> {
    let scene = match format {
        SceneFormat::Json => serde_json::from_str(text)?,
        SceneFormat::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(scene)
}
