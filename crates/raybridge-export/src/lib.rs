//! RayBridge export library
//!
//! Turns a host scene snapshot into files an external ray tracer can load:
//! - glTF 2.0 geometry (separate files or GLB)
//! - a copied `textures/` directory
//! - a JSON sidecar describing cameras and lights
//!
//! Two pipelines are provided on [`SceneExporter`]. They share the camera and
//! light extractors and differ only in the [`ExportProfile`] they run with.

pub mod camera;
pub mod config;
pub mod gltf;
pub mod json;
pub mod light;
pub mod pipeline;
pub mod profile;
pub mod textures;

pub use camera::{extract_camera, sensor_aspect, CameraDescriptor};
pub use config::{ExportConfig, ProfileOverrides};
pub use gltf::{GeometryExporter, GeometryLayout, GltfExportOptions, GltfExporter};
pub use json::{sidecar_path, JsonExportOptions, JsonExporter, SceneDescription, SIDECAR_SUFFIX};
pub use light::{extract_light, ExtractedLight, LightDescriptor, LightShape};
pub use pipeline::{describe_scene, ExportReport, Extraction, SceneExporter};
pub use profile::{ExportProfile, SidecarSchema};
pub use textures::{CopiedTexture, TextureCollector, TextureReport, DEFAULT_TEXTURES_DIR};
