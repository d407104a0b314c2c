//! Export pipelines
//!
//! [`SceneExporter::export_interactive`] writes geometry, copies textures and
//! writes the sidecar next to the geometry file.
//! [`SceneExporter::export_script`] writes only the sidecar, describing the
//! active camera, to a caller-chosen path.
//!
//! Both run the same extraction step; only the profile differs.

use crate::camera::{extract_camera, CameraDescriptor};
use crate::config::ExportConfig;
use crate::gltf::GeometryExporter;
use crate::json::{sidecar_path, JsonExportOptions, JsonExporter, SceneDescription};
use crate::light::extract_light;
use crate::profile::{ExportProfile, SidecarSchema};
use crate::textures::TextureCollector;
use raybridge_core::{Result, ResultExt, Skip};
use raybridge_scene::SceneSource;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What an export produced
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub sidecar: PathBuf,
    pub geometry: Vec<PathBuf>,
    pub textures_dir: Option<PathBuf>,
    pub textures: Vec<PathBuf>,
    pub cameras: usize,
    pub lights: usize,
    /// Non-fatal conditions, in the order they were met
    pub skipped: Vec<Skip>,
}

/// Extracted descriptors plus the notices raised while extracting
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub description: SceneDescription,
    pub skipped: Vec<Skip>,
}

impl Extraction {
    /// Keep `camera` unless its aspect ratio cannot be written as a number
    fn push_camera(&mut self, camera: CameraDescriptor) {
        if camera.aspect.is_finite() && camera.aspect > 0.0 {
            self.description.cameras.push(camera);
        } else {
            warn!(camera = %camera.name, aspect = camera.aspect, "Degenerate aspect ratio, omitting camera");
            self.skipped.push(Skip::DegenerateCamera {
                object: camera.name,
                aspect: camera.aspect,
            });
        }
    }
}

/// Walk `scene` and extract cameras and lights under `profile`.
///
/// The interactive schema takes every camera object; the script schema takes
/// only the active camera.
pub fn describe_scene(scene: &dyn SceneSource, profile: &ExportProfile) -> Extraction {
    let mut extraction = Extraction::default();
    let render = scene.render();

    for (object, light) in scene.lights() {
        let extracted = extract_light(object, light, profile);
        extraction.description.lights.push(extracted.descriptor);
        extraction.skipped.extend(extracted.skip);
    }

    match profile.schema {
        SidecarSchema::Interactive => {
            for (object, camera) in scene.cameras() {
                extraction.push_camera(extract_camera(object, camera, render, profile));
            }
        }
        SidecarSchema::Script => {
            match scene.active_camera().and_then(|o| o.as_camera().map(|c| (o, c))) {
                Some((object, camera)) => {
                    extraction.push_camera(extract_camera(object, camera, render, profile));
                }
                None => {
                    warn!(scene = %scene.name(), "No active camera, omitting camera");
                    extraction.skipped.push(Skip::NoActiveCamera);
                }
            }
        }
    }

    extraction
}

/// Runs exports with one configuration
pub struct SceneExporter {
    config: ExportConfig,
}

impl SceneExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    fn json(&self) -> JsonExporter {
        JsonExporter::with_options(JsonExportOptions {
            indent: self.config.indent,
        })
    }

    /// Geometry, textures and sidecar for `geometry_path`.
    ///
    /// Stages run in order and the first fatal error aborts the export;
    /// files written by earlier stages are left in place.
    pub fn export_interactive(
        &self,
        scene: &dyn SceneSource,
        geometry_path: &Path,
        geometry: Option<&mut dyn GeometryExporter>,
    ) -> Result<ExportReport> {
        let profile = self.config.interactive_profile();
        let mut report = ExportReport::default();

        info!(scene = %scene.name(), path = %geometry_path.display(), "Starting interactive export");

        if let Some(parent) = geometry_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| raybridge_core::Error::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        if let Some(exporter) = geometry.filter(|_| self.config.export_geometry) {
            report.geometry = exporter
                .export(scene, geometry_path, self.config.layout)
                .context("geometry export")?;
        }

        let collector = TextureCollector::beside(geometry_path, &self.config.textures_dir);
        let textures = collector.collect(scene).map_err(raybridge_core::Error::from)?;
        report.textures_dir = Some(collector.target_dir().to_path_buf());
        report.textures = textures.copied.into_iter().map(|t| t.target).collect();
        report.skipped.extend(textures.skipped);

        let extraction = describe_scene(scene, &profile);
        let sidecar = sidecar_path(geometry_path, &self.config.sidecar_suffix);
        self.write_sidecar(&extraction, &profile, &sidecar, &mut report)?;

        info!(
            sidecar = %report.sidecar.display(),
            textures = report.textures.len(),
            cameras = report.cameras,
            lights = report.lights,
            skipped = report.skipped.len(),
            "Interactive export complete"
        );
        Ok(report)
    }

    /// Sidecar only, active camera and lights, written to `output_path`
    pub fn export_script(&self, scene: &dyn SceneSource, output_path: &Path) -> Result<ExportReport> {
        let profile = self.config.script_profile();
        let mut report = ExportReport::default();

        info!(scene = %scene.name(), path = %output_path.display(), "Starting script export");

        let extraction = describe_scene(scene, &profile);
        self.write_sidecar(&extraction, &profile, output_path, &mut report)?;

        info!(
            sidecar = %report.sidecar.display(),
            cameras = report.cameras,
            lights = report.lights,
            "Script export complete"
        );
        Ok(report)
    }

    fn write_sidecar(
        &self,
        extraction: &Extraction,
        profile: &ExportProfile,
        path: &Path,
        report: &mut ExportReport,
    ) -> Result<()> {
        self.json()
            .export(&extraction.description, profile.schema, path)
            .map_err(raybridge_core::Error::from)
            .with_context(|| format!("writing {}", path.display()))?;

        report.sidecar = path.to_path_buf();
        report.cameras = extraction.description.cameras.len();
        report.lights = extraction.description.lights.len();
        report.skipped.extend(extraction.skipped.iter().cloned());
        Ok(())
    }
}

impl Default for SceneExporter {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}
