//! Read-only host scene interface
//!
//! Exporters only ever see a scene through [`SceneSource`]. A host binding
//! implements it over its live scene graph; [`Scene`] implements it over a
//! loaded snapshot.

use crate::model::{CameraData, ImageRef, LightData, MeshData, RenderSettings, Scene, SceneObject};
use std::path::{Path, PathBuf};

/// Prefix the host uses for paths relative to the scene file
pub const HOST_RELATIVE_PREFIX: &str = "//";

/// Read-only view of a host scene
pub trait SceneSource {
    /// Scene name, used in log output
    fn name(&self) -> &str;

    /// Every object in the scene, in host order
    fn objects(&self) -> &[SceneObject];

    /// The object the host renders from, if any
    fn active_camera(&self) -> Option<&SceneObject>;

    fn render(&self) -> &RenderSettings;

    /// Image datablocks referenced by the scene
    fn images(&self) -> &[ImageRef];

    /// Directory host-relative paths resolve against
    fn base_dir(&self) -> &Path;

    /// Turn a stored host path into a file-system path.
    ///
    /// Returns `None` for empty paths.
    fn resolve_path(&self, host_path: &str) -> Option<PathBuf> {
        resolve_host_path(host_path, self.base_dir())
    }

    /// Camera objects with their lens data
    fn cameras(&self) -> Box<dyn Iterator<Item = (&SceneObject, &CameraData)> + '_> {
        Box::new(self.objects().iter().filter_map(|o| o.as_camera().map(|c| (o, c))))
    }

    /// Light objects with their light data
    fn lights(&self) -> Box<dyn Iterator<Item = (&SceneObject, &LightData)> + '_> {
        Box::new(self.objects().iter().filter_map(|o| o.as_light().map(|l| (o, l))))
    }

    /// Mesh objects with their buffers
    fn meshes(&self) -> Box<dyn Iterator<Item = (&SceneObject, &MeshData)> + '_> {
        Box::new(self.objects().iter().filter_map(|o| o.as_mesh().map(|m| (o, m))))
    }
}

impl SceneSource for Scene {
    fn name(&self) -> &str {
        &self.name
    }

    fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    fn active_camera(&self) -> Option<&SceneObject> {
        let name = self.active_camera.as_deref()?;
        self.objects
            .iter()
            .find(|o| o.name == name && o.as_camera().is_some())
    }

    fn render(&self) -> &RenderSettings {
        &self.render
    }

    fn images(&self) -> &[ImageRef] {
        &self.images
    }

    fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

/// Resolve a host path against `base_dir`.
///
/// `//`-prefixed and plain relative paths are joined onto `base_dir`;
/// absolute paths are returned as-is. Backslash separators are normalized.
pub fn resolve_host_path(host_path: &str, base_dir: &Path) -> Option<PathBuf> {
    let trimmed = host_path.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(relative) = trimmed.strip_prefix(HOST_RELATIVE_PREFIX) {
        return Some(base_dir.join(relative.replace('\\', "/")));
    }

    let normalized = trimmed.replace('\\', "/");
    let path = Path::new(&normalized);
    if path.is_absolute() {
        Some(path.to_path_buf())
    } else {
        Some(base_dir.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LightKind, ObjectData};

    fn sample_scene() -> Scene {
        Scene {
            name: "Shot".into(),
            base_dir: PathBuf::from("/projects/shot"),
            objects: vec![
                SceneObject::new("Cube", ObjectData::Mesh(MeshData::default())),
                SceneObject::new("Cam.A", ObjectData::Camera(CameraData::default())),
                SceneObject::new("Key", ObjectData::Light(LightData::new(LightKind::Area))),
                SceneObject::new("Cam.B", ObjectData::Camera(CameraData::default())),
            ],
            active_camera: Some("Cam.B".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_typed_iterators() {
        let scene = sample_scene();
        let cameras: Vec<_> = scene.cameras().map(|(o, _)| o.name.as_str()).collect();
        assert_eq!(cameras, vec!["Cam.A", "Cam.B"]);
        assert_eq!(scene.lights().count(), 1);
        assert_eq!(scene.meshes().count(), 1);
    }

    #[test]
    fn test_active_camera_lookup() {
        let mut scene = sample_scene();
        assert_eq!(scene.active_camera().map(|o| o.name.as_str()), Some("Cam.B"));

        scene.active_camera = Some("Cube".into());
        assert!(scene.active_camera().is_none());

        scene.active_camera = None;
        assert!(scene.active_camera().is_none());
    }

    #[test]
    fn test_resolve_host_relative() {
        let base = Path::new("/projects/shot");
        assert_eq!(
            resolve_host_path("//textures\\wood.png", base),
            Some(PathBuf::from("/projects/shot/textures/wood.png"))
        );
        assert_eq!(
            resolve_host_path("maps/rock.jpg", base),
            Some(PathBuf::from("/projects/shot/maps/rock.jpg"))
        );
        assert_eq!(
            resolve_host_path("/abs/metal.png", base),
            Some(PathBuf::from("/abs/metal.png"))
        );
        assert_eq!(resolve_host_path("  ", base), None);
    }
}
