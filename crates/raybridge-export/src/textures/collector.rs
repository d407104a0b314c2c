//! Image copy with file-name deduplication

use crate::textures::{TextureError, TextureResult};
use raybridge_core::Skip;
use raybridge_scene::SceneSource;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Directory name used next to the geometry file
pub const DEFAULT_TEXTURES_DIR: &str = "textures";

/// One image copied into the textures directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedTexture {
    pub image: String,
    pub source: PathBuf,
    pub target: PathBuf,
}

/// Outcome of a collection pass
#[derive(Debug, Clone, Default)]
pub struct TextureReport {
    pub copied: Vec<CopiedTexture>,
    pub skipped: Vec<Skip>,
}

/// Copies referenced images into one directory.
///
/// Images are deduplicated by file name only: when two sources share a file
/// name, the first one in scene order is copied and the rest are skipped.
pub struct TextureCollector {
    target_dir: PathBuf,
}

impl TextureCollector {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
        }
    }

    /// Collector writing into `textures/` beside `geometry_path`
    pub fn beside(geometry_path: &Path, dir_name: &str) -> Self {
        let parent = geometry_path.parent().unwrap_or_else(|| Path::new(""));
        Self::new(parent.join(dir_name))
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Copy every resolvable image of `scene`.
    ///
    /// The target directory is created even when nothing gets copied. Missing
    /// sources are skipped; any copy failure aborts the pass.
    pub fn collect(&self, scene: &dyn SceneSource) -> TextureResult<TextureReport> {
        fs::create_dir_all(&self.target_dir).map_err(|source| TextureError::CreateDir {
            path: self.target_dir.clone(),
            source,
        })?;

        let mut report = TextureReport::default();
        let mut seen_names: HashSet<String> = HashSet::new();

        for image in scene.images() {
            let Some(source) = scene.resolve_path(&image.filepath) else {
                debug!(image = %image.name, "Image has no file path");
                report.skipped.push(Skip::TextureWithoutPath {
                    image: image.name.clone(),
                });
                continue;
            };

            if !source.is_file() {
                warn!(image = %image.name, path = %source.display(), "Texture source not found");
                report.skipped.push(Skip::TextureMissing {
                    image: image.name.clone(),
                    path: source,
                });
                continue;
            }

            let Some(file_name) = source.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                report.skipped.push(Skip::TextureMissing {
                    image: image.name.clone(),
                    path: source,
                });
                continue;
            };

            if !seen_names.insert(file_name.clone()) {
                debug!(image = %image.name, file = %file_name, "Texture name already copied");
                report.skipped.push(Skip::DuplicateTextureName {
                    image: image.name.clone(),
                    file_name,
                });
                continue;
            }

            let target = self.target_dir.join(&file_name);
            if same_file(&source, &target) {
                debug!(image = %image.name, path = %target.display(), "Texture already in place");
                report.skipped.push(Skip::TextureAlreadyInPlace {
                    image: image.name.clone(),
                    path: target.clone(),
                });
                report.copied.push(CopiedTexture {
                    image: image.name.clone(),
                    source,
                    target,
                });
                continue;
            }

            fs::copy(&source, &target).map_err(|e| TextureError::Copy {
                from: source.clone(),
                to: target.clone(),
                source: e,
            })?;

            info!("Texture copied: {} to {}", source.display(), target.display());
            report.copied.push(CopiedTexture {
                image: image.name.clone(),
                source,
                target,
            });
        }

        Ok(report)
    }
}

/// Both paths name one existing file; copying would truncate it
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
