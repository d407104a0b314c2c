//! RayBridge scene model
//!
//! Host scene snapshot types, the read-only [`SceneSource`] interface the
//! exporters consume, and loading of JSON/YAML scene dumps.

pub mod loader;
pub mod model;
pub mod source;

pub use loader::{load_scene, parse_scene, SceneError, SceneFormat, SceneResult};
pub use model::{
    AreaShape, CameraData, DofSettings, GpuDof, ImageRef, LightData, LightKind, MeshData,
    ObjectData, RenderSettings, Scene, SceneObject, SensorFit,
};
pub use source::{resolve_host_path, SceneSource};
