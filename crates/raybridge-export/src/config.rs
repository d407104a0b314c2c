//! Export configuration
//!
//! Loaded from an optional YAML file. Every field has a default, so an empty
//! file (or no file at all) reproduces the stock behaviour.

use crate::gltf::GeometryLayout;
use crate::json::SIDECAR_SUFFIX;
use crate::profile::{ExportProfile, PositionSource};
use crate::textures::DEFAULT_TEXTURES_DIR;
use raybridge_core::{AngleUnit, AxisConvention, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};
use tracing::debug;

/// Per-profile overrides; unset fields keep the preset's value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOverrides {
    pub convention: Option<AxisConvention>,
    pub angle_unit: Option<AngleUnit>,
    pub camera_position: Option<PositionSource>,
    pub light_position: Option<PositionSource>,
}

impl ProfileOverrides {
    pub fn apply(&self, mut profile: ExportProfile) -> ExportProfile {
        if let Some(convention) = self.convention {
            profile = profile.with_convention(convention);
        }
        if let Some(angle_unit) = self.angle_unit {
            profile = profile.with_angle_unit(angle_unit);
        }
        if let Some(source) = self.camera_position {
            profile = profile.with_camera_position(source);
        }
        if let Some(source) = self.light_position {
            profile = profile.with_light_position(source);
        }
        profile
    }
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory name for copied textures, relative to the geometry file
    pub textures_dir: String,
    /// Suffix replacing the geometry extension for the sidecar file
    pub sidecar_suffix: String,
    /// Spaces per JSON indentation level
    pub indent: usize,
    pub layout: GeometryLayout,
    /// Run the geometry exporter before writing the sidecar
    pub export_geometry: bool,
    pub interactive: ProfileOverrides,
    pub script: ProfileOverrides,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            textures_dir: DEFAULT_TEXTURES_DIR.to_string(),
            sidecar_suffix: SIDECAR_SUFFIX.to_string(),
            indent: 4,
            layout: GeometryLayout::Separate,
            export_geometry: true,
            interactive: ProfileOverrides::default(),
            script: ProfileOverrides::default(),
        }
    }
}

impl ExportConfig {
    /// Load settings from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&text)?;
        debug!(path = %path.display(), ?config, "Loaded export config");
        Ok(config)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(text).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let mut components = Path::new(&self.textures_dir).components();
        let single_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if self.textures_dir.trim().is_empty() || !single_name {
            return Err(Error::InvalidConfig {
                message: format!("textures_dir must be a single directory name, got '{}'", self.textures_dir),
            });
        }
        if self.sidecar_suffix.is_empty() {
            return Err(Error::InvalidConfig {
                message: "sidecar_suffix must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Profile for the geometry + textures + sidecar export
    pub fn interactive_profile(&self) -> ExportProfile {
        self.interactive.apply(ExportProfile::interactive())
    }

    /// Profile for the sidecar-only export
    pub fn script_profile(&self) -> ExportProfile {
        self.script.apply(ExportProfile::script())
    }
}
