//! Sidecar JSON export
//!
//! Serializes extracted cameras and lights into the layout selected by the
//! profile's [`SidecarSchema`] and writes it as indented UTF-8 JSON.

use crate::camera::CameraDescriptor;
use crate::light::{LightDescriptor, LightShape};
use crate::profile::SidecarSchema;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Suffix replacing the geometry file extension
pub const SIDECAR_SUFFIX: &str = "_scene_data.json";

/// JSON export errors
#[derive(Error, Debug)]
pub enum JsonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type JsonResult<T> = Result<T, JsonError>;

impl From<JsonError> for raybridge_core::Error {
    fn from(err: JsonError) -> Self {
        match err {
            JsonError::Io(e) => raybridge_core::Error::Io(e),
            JsonError::Serialization(e) => raybridge_core::Error::Serialization {
                message: e.to_string(),
            },
        }
    }
}

/// JSON export options
#[derive(Debug, Clone)]
pub struct JsonExportOptions {
    /// Spaces per indentation level; 0 writes compact JSON
    pub indent: usize,
}

impl Default for JsonExportOptions {
    fn default() -> Self {
        Self { indent: 4 }
    }
}

/// Everything the sidecar describes
#[derive(Debug, Clone, Default)]
pub struct SceneDescription {
    pub cameras: Vec<CameraDescriptor>,
    pub lights: Vec<LightDescriptor>,
}

/// Sidecar path for a geometry file: `scene.gltf` -> `scene_scene_data.json`
pub fn sidecar_path(geometry_path: &Path, suffix: &str) -> PathBuf {
    let stem = geometry_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    geometry_path.with_file_name(format!("{}{}", stem, suffix))
}

/// Sidecar JSON writer
pub struct JsonExporter {
    options: JsonExportOptions,
}

impl JsonExporter {
    /// Create new exporter with default options
    pub fn new() -> Self {
        Self {
            options: JsonExportOptions::default(),
        }
    }

    /// Create exporter with custom options
    pub fn with_options(options: JsonExportOptions) -> Self {
        Self { options }
    }

    /// Build the sidecar document for `schema`
    pub fn to_value(&self, description: &SceneDescription, schema: SidecarSchema) -> Value {
        match schema {
            SidecarSchema::Interactive => json!({
                "lights": description.lights.iter().map(interactive_light).collect::<Vec<_>>(),
                "cameras": description.cameras.iter().map(|c| camera_value(c, "aspect")).collect::<Vec<_>>(),
            }),
            SidecarSchema::Script => {
                let mut root = Map::new();
                if let Some(camera) = description.cameras.first() {
                    root.insert("camera".into(), camera_value(camera, "aspect_ratio"));
                }
                root.insert(
                    "lights".into(),
                    Value::Array(description.lights.iter().map(script_light).collect()),
                );
                Value::Object(root)
            }
        }
    }

    /// Write the sidecar for `schema` to `output_path`
    pub fn export(
        &self,
        description: &SceneDescription,
        schema: SidecarSchema,
        output_path: impl AsRef<Path>,
    ) -> JsonResult<()> {
        let value = self.to_value(description, schema);
        self.write_json(&value, output_path)
    }

    /// Write JSON to file
    fn write_json(&self, value: &Value, output_path: impl AsRef<Path>) -> JsonResult<()> {
        let file = File::create(output_path)?;
        let mut writer = BufWriter::new(file);

        if self.options.indent == 0 {
            serde_json::to_writer(&mut writer, value)?;
        } else {
            let indent = vec![b' '; self.options.indent];
            let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
            let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
            value.serialize(&mut serializer)?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn camera_value(camera: &CameraDescriptor, aspect_key: &str) -> Value {
    let mut map = Map::new();
    map.insert("lookfrom".into(), json!(camera.lookfrom.to_array()));
    map.insert("lookat".into(), json!(camera.lookat.to_array()));
    map.insert("vup".into(), json!(camera.vup.to_array()));
    map.insert("vfov".into(), json!(camera.vfov));
    map.insert(aspect_key.into(), json!(camera.aspect));
    map.insert("aperture".into(), json!(camera.aperture));
    map.insert("focus_dist".into(), json!(camera.focus_dist));
    map.insert("blade_count".into(), json!(camera.blade_count));
    Value::Object(map)
}

fn interactive_light(light: &LightDescriptor) -> Value {
    let mut map = Map::new();
    map.insert("type".into(), json!(light.type_name));
    map.insert("color".into(), json!(light.color));
    map.insert("energy".into(), json!(light.power));
    if let Some(direction) = light.direction() {
        map.insert("direction".into(), json!(direction.to_array()));
    }
    insert_shape_fields(&mut map, &light.shape);
    map.insert("location".into(), json!(light.position.to_array()));
    Value::Object(map)
}

fn script_light(light: &LightDescriptor) -> Value {
    let mut map = Map::new();
    map.insert("type".into(), json!(light.type_name));
    map.insert("position".into(), json!(light.position.to_array()));
    map.insert("color".into(), json!(light.color));
    map.insert("power".into(), json!(light.power));
    if let Some(direction) = light.direction() {
        map.insert("direction".into(), json!(direction.to_array()));
    }
    insert_shape_fields(&mut map, &light.shape);
    Value::Object(map)
}

fn insert_shape_fields(map: &mut Map<String, Value>, shape: &LightShape) {
    match shape {
        LightShape::Area { size, .. } => {
            map.insert("size".into(), json!(size));
        }
        LightShape::Spot { spot_size, spot_blend, .. } => {
            map.insert("spot_size".into(), json!(spot_size));
            map.insert("spot_blend".into(), json!(spot_blend));
        }
        LightShape::Point | LightShape::Directional { .. } | LightShape::Unsupported => {}
    }
}
