//! Scene snapshot structures
//!
//! These mirror what a host application exposes for export: objects with a
//! location and world matrix, camera lens and depth-of-field settings, light
//! parameters, mesh buffers and referenced image files. Field defaults follow
//! the host's defaults for a freshly created object.

use raybridge_core::{DVec3, Rgb, WorldTransform};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete scene snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub name: String,

    /// Directory host-relative (`//`) paths resolve against
    #[serde(default)]
    pub base_dir: PathBuf,

    #[serde(default)]
    pub objects: Vec<SceneObject>,

    /// Name of the scene's active camera object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_camera: Option<String>,

    #[serde(default)]
    pub render: RenderSettings,

    #[serde(default)]
    pub images: Vec<ImageRef>,
}

/// Object in the scene graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,

    /// Local location, parent transforms not applied
    #[serde(default)]
    pub location: DVec3,

    /// Column-major world matrix
    #[serde(default)]
    pub matrix_world: WorldTransform,

    #[serde(default)]
    pub data: ObjectData,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, data: ObjectData) -> Self {
        Self {
            name: name.into(),
            location: DVec3::ZERO,
            matrix_world: WorldTransform::IDENTITY,
            data,
        }
    }

    /// Place the object at `location` with `matrix_world` as its world transform
    pub fn with_transform(mut self, location: DVec3, matrix_world: WorldTransform) -> Self {
        self.location = location;
        self.matrix_world = matrix_world;
        self
    }

    pub fn as_camera(&self) -> Option<&CameraData> {
        match &self.data {
            ObjectData::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    pub fn as_light(&self) -> Option<&LightData> {
        match &self.data {
            ObjectData::Light(light) => Some(light),
            _ => None,
        }
    }

    pub fn as_mesh(&self) -> Option<&MeshData> {
        match &self.data {
            ObjectData::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }
}

/// Object payload, tagged by the host object type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectData {
    Camera(CameraData),
    Light(LightData),
    Mesh(MeshData),
    /// Empties, curves, armatures and anything else without exportable data
    #[default]
    #[serde(other)]
    Other,
}

/// How the sensor size maps onto the render frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensorFit {
    #[default]
    Auto,
    Horizontal,
    Vertical,
}

/// Camera depth-of-field block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DofSettings {
    pub use_dof: bool,
    pub aperture_fstop: f64,
    pub focus_distance: f64,
    pub aperture_blades: u32,
}

impl Default for DofSettings {
    fn default() -> Self {
        Self {
            use_dof: false,
            aperture_fstop: 2.8,
            focus_distance: 10.0,
            aperture_blades: 0,
        }
    }
}

/// Legacy viewport depth-of-field block; only older hosts expose it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuDof {
    pub use_dof: bool,
    pub blades: u32,
}

/// Camera lens parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraData {
    /// Field of view along the fitted sensor axis, radians
    pub angle: f64,
    /// Vertical field of view, radians
    pub angle_y: f64,
    /// Sensor width, millimetres
    pub sensor_width: f64,
    /// Sensor height, millimetres
    pub sensor_height: f64,
    pub sensor_fit: SensorFit,
    pub dof: DofSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    gpu_dof: Option<GpuDof>,
}

impl CameraData {
    /// Legacy GPU depth-of-field settings, if the host provides them
    pub fn gpu_dof(&self) -> Option<&GpuDof> {
        self.gpu_dof.as_ref()
    }

    pub fn with_gpu_dof(mut self, gpu_dof: GpuDof) -> Self {
        self.gpu_dof = Some(gpu_dof);
        self
    }
}

impl Default for CameraData {
    fn default() -> Self {
        // 50mm lens on a 36x24mm sensor
        Self {
            angle: 2.0 * (18.0f64 / 50.0).atan(),
            angle_y: 2.0 * (12.0f64 / 50.0).atan(),
            sensor_width: 36.0,
            sensor_height: 24.0,
            sensor_fit: SensorFit::Auto,
            dof: DofSettings::default(),
            gpu_dof: None,
        }
    }
}

/// Host light type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LightKind {
    Point,
    Sun,
    Spot,
    Area,
    /// Any type name this exporter does not know
    Other(String),
}

impl LightKind {
    pub fn as_str(&self) -> &str {
        match self {
            LightKind::Point => "POINT",
            LightKind::Sun => "SUN",
            LightKind::Spot => "SPOT",
            LightKind::Area => "AREA",
            LightKind::Other(name) => name,
        }
    }
}

impl From<String> for LightKind {
    fn from(value: String) -> Self {
        match value.to_uppercase().as_str() {
            "POINT" => LightKind::Point,
            "SUN" => LightKind::Sun,
            "SPOT" => LightKind::Spot,
            "AREA" => LightKind::Area,
            _ => LightKind::Other(value),
        }
    }
}

impl From<LightKind> for String {
    fn from(value: LightKind) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for LightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Area light emitter shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AreaShape {
    #[default]
    Square,
    Rectangle,
    Disk,
    Ellipse,
}

/// Light parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightData {
    pub kind: LightKind,
    #[serde(default)]
    pub color: Rgb,
    /// Power in watts (irradiance for sun lights)
    #[serde(default = "default_energy")]
    pub energy: f64,
    /// Area light size (X size for rectangles)
    #[serde(default = "default_size")]
    pub size: f64,
    /// Area light Y size, rectangles only
    #[serde(default = "default_size")]
    pub size_y: f64,
    #[serde(default)]
    pub shape: AreaShape,
    /// Spot cone angle, radians
    #[serde(default = "default_spot_size")]
    pub spot_size: f64,
    /// Spot edge softness, 0..1
    #[serde(default = "default_spot_blend")]
    pub spot_blend: f64,
}

fn default_energy() -> f64 {
    10.0
}

fn default_size() -> f64 {
    1.0
}

fn default_spot_size() -> f64 {
    std::f64::consts::FRAC_PI_4
}

fn default_spot_blend() -> f64 {
    0.15
}

impl LightData {
    pub fn new(kind: LightKind) -> Self {
        Self {
            kind,
            color: Rgb::WHITE,
            energy: default_energy(),
            size: default_size(),
            size_y: default_size(),
            shape: AreaShape::Square,
            spot_size: default_spot_size(),
            spot_blend: default_spot_blend(),
        }
    }
}

/// Triangle mesh buffers in object space
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    #[serde(default)]
    pub normals: Vec<[f32; 3]>,
    #[serde(default)]
    pub uvs: Vec<[f32; 2]>,
    /// Triangle list, three indices per face
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Render output settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub resolution_x: u32,
    pub resolution_y: u32,
}

impl RenderSettings {
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.resolution_x) / f64::from(self.resolution_y)
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            resolution_x: 1920,
            resolution_y: 1080,
        }
    }
}

/// Image datablock referenced by the scene's materials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub name: String,
    /// Host path as stored, possibly `//`-relative; empty for packed or generated images
    #[serde(default)]
    pub filepath: String,
}

impl ImageRef {
    pub fn new(name: impl Into<String>, filepath: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filepath: filepath.into(),
        }
    }
}
