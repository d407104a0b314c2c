//! glTF exporter implementation

use super::*;
use raybridge_core::{DMat4, DVec4};
use raybridge_scene::{MeshData, SceneObject};
use std::collections::BTreeMap;
use std::io::Write;
use tracing::{debug, info, warn};

/// glTF export options
#[derive(Debug, Clone)]
pub struct GltfExportOptions {
    /// Convert from the host's Z-up axes to glTF's Y-up axes
    pub y_up: bool,
    /// Include normals in export
    pub export_normals: bool,
    /// Include UVs in export
    pub export_uvs: bool,
    /// Pretty-print JSON
    pub pretty_json: bool,
}

impl Default for GltfExportOptions {
    fn default() -> Self {
        Self {
            y_up: true,
            export_normals: true,
            export_uvs: true,
            pretty_json: true,
        }
    }
}

/// glTF export errors
#[derive(Debug, thiserror::Error)]
pub enum GltfExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid mesh data in '{mesh}': {message}")]
    InvalidMeshData { mesh: String, message: String },
}

pub type GltfResult<T> = Result<T, GltfExportError>;

impl From<GltfExportError> for raybridge_core::Error {
    fn from(err: GltfExportError) -> Self {
        match err {
            GltfExportError::Io(e) => raybridge_core::Error::Io(e),
            GltfExportError::Serialization(e) => raybridge_core::Error::Serialization {
                message: e.to_string(),
            },
            other => raybridge_core::Error::export_failed(other.to_string()),
        }
    }
}

/// Host Z-up to glTF Y-up: `(x, y, z)` -> `(x, z, -y)`
const Z_UP_TO_Y_UP: DMat4 = DMat4::from_cols(
    DVec4::new(1.0, 0.0, 0.0, 0.0),
    DVec4::new(0.0, 0.0, -1.0, 0.0),
    DVec4::new(0.0, 1.0, 0.0, 0.0),
    DVec4::new(0.0, 0.0, 0.0, 1.0),
);

/// glTF exporter
pub struct GltfExporter {
    options: GltfExportOptions,
    binary_data: Vec<u8>,
    accessors: Vec<Accessor>,
    buffer_views: Vec<BufferView>,
}

impl GltfExporter {
    /// Create a new glTF exporter
    pub fn new(options: GltfExportOptions) -> Self {
        Self {
            options,
            binary_data: Vec::new(),
            accessors: Vec::new(),
            buffer_views: Vec::new(),
        }
    }

    /// Build the glTF document for every mesh object in `scene`
    pub fn build(&mut self, scene: &dyn SceneSource, buffer_uri: Option<String>) -> GltfResult<Gltf> {
        // Reset state
        self.binary_data.clear();
        self.accessors.clear();
        self.buffer_views.clear();

        let mut nodes = Vec::new();
        let mut meshes = Vec::new();

        for (object, mesh) in scene.meshes() {
            if mesh.positions.is_empty() {
                warn!(mesh = %object.name, "Skipping mesh without vertices");
                continue;
            }
            validate_mesh(&object.name, mesh)?;

            let primitive = self.add_primitive(mesh);
            let mesh_index = meshes.len();
            meshes.push(Mesh {
                name: Some(object.name.clone()),
                primitives: vec![primitive],
            });
            nodes.push(self.node_for(object, mesh_index));

            debug!(
                mesh = %object.name,
                vertices = mesh.vertex_count(),
                triangles = mesh.triangle_count(),
                "Added mesh"
            );
        }

        let buffers = if self.binary_data.is_empty() {
            Vec::new()
        } else {
            vec![Buffer {
                uri: buffer_uri,
                byte_length: self.binary_data.len(),
            }]
        };

        let materials = if meshes.is_empty() {
            Vec::new()
        } else {
            vec![Material {
                name: Some("DefaultMaterial".to_string()),
                pbr_metallic_roughness: Some(PbrMetallicRoughness {
                    base_color_factor: Some([1.0, 1.0, 1.0, 1.0]),
                    metallic_factor: Some(0.0),
                    roughness_factor: Some(0.5),
                }),
            }]
        };

        let scene_name = scene.name();
        Ok(Gltf {
            asset: Asset {
                version: "2.0".to_string(),
                generator: Some("RayBridge glTF Exporter".to_string()),
            },
            scene: Some(0),
            scenes: vec![Scene {
                name: (!scene_name.is_empty()).then(|| scene_name.to_string()),
                nodes: (0..nodes.len()).collect(),
            }],
            nodes,
            meshes,
            materials,
            accessors: self.accessors.clone(),
            buffer_views: self.buffer_views.clone(),
            buffers,
        })
    }

    fn add_primitive(&mut self, mesh: &MeshData) -> Primitive {
        let mut attributes = BTreeMap::new();

        // Positions (required)
        let position_accessor = self.add_positions(&mesh.positions);
        attributes.insert("POSITION".to_string(), position_accessor);

        // Normals
        if self.options.export_normals && mesh.normals.len() == mesh.positions.len() {
            let normal_accessor = self.add_vec3(&mesh.normals);
            attributes.insert("NORMAL".to_string(), normal_accessor);
        }

        // UVs
        if self.options.export_uvs && mesh.uvs.len() == mesh.positions.len() {
            let uv_accessor = self.add_uvs(&mesh.uvs);
            attributes.insert("TEXCOORD_0".to_string(), uv_accessor);
        }

        let indices = (!mesh.indices.is_empty()).then(|| self.add_indices(&mesh.indices));

        Primitive {
            attributes,
            indices,
            material: Some(0),
            mode: Some(MODE_TRIANGLES),
        }
    }

    fn node_for(&self, object: &SceneObject, mesh_index: usize) -> Node {
        let matrix = if self.options.y_up {
            Z_UP_TO_Y_UP * object.matrix_world.0 * Z_UP_TO_Y_UP.transpose()
        } else {
            object.matrix_world.0
        };
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();

        Node {
            name: Some(object.name.clone()),
            mesh: Some(mesh_index),
            translation: Some(translation.to_array()),
            rotation: Some(rotation.to_array()),
            scale: Some(scale.to_array()),
        }
    }

    fn axis(&self, v: [f32; 3]) -> [f32; 3] {
        if self.options.y_up {
            [v[0], v[2], -v[1]]
        } else {
            v
        }
    }

    /// Add position data
    fn add_positions(&mut self, positions: &[[f32; 3]]) -> usize {
        let offset = self.binary_data.len();
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];

        for &p in positions {
            let p = self.axis(p);
            for i in 0..3 {
                self.binary_data.extend_from_slice(&p[i].to_le_bytes());
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }

        self.add_accessor(offset, positions.len(), "VEC3", COMPONENT_TYPE_FLOAT, Some(min.to_vec()), Some(max.to_vec()), Some(TARGET_ARRAY_BUFFER))
    }

    /// Add normal data
    fn add_vec3(&mut self, values: &[[f32; 3]]) -> usize {
        let offset = self.binary_data.len();

        for &v in values {
            for component in self.axis(v) {
                self.binary_data.extend_from_slice(&component.to_le_bytes());
            }
        }

        self.add_accessor(offset, values.len(), "VEC3", COMPONENT_TYPE_FLOAT, None, None, Some(TARGET_ARRAY_BUFFER))
    }

    /// Add UV data
    fn add_uvs(&mut self, uvs: &[[f32; 2]]) -> usize {
        let offset = self.binary_data.len();

        for uv in uvs {
            // glTF puts the texture origin top-left
            self.binary_data.extend_from_slice(&uv[0].to_le_bytes());
            self.binary_data.extend_from_slice(&(1.0 - uv[1]).to_le_bytes());
        }

        self.add_accessor(offset, uvs.len(), "VEC2", COMPONENT_TYPE_FLOAT, None, None, Some(TARGET_ARRAY_BUFFER))
    }

    /// Add index data
    fn add_indices(&mut self, indices: &[u32]) -> usize {
        let offset = self.binary_data.len();

        for index in indices {
            self.binary_data.extend_from_slice(&index.to_le_bytes());
        }

        self.add_accessor(offset, indices.len(), "SCALAR", COMPONENT_TYPE_UNSIGNED_INT, None, None, Some(TARGET_ELEMENT_ARRAY_BUFFER))
    }

    /// Add accessor and buffer view
    #[allow(clippy::too_many_arguments)]
    fn add_accessor(&mut self, offset: usize, count: usize, accessor_type: &str, component_type: u32, min: Option<Vec<f32>>, max: Option<Vec<f32>>, target: Option<u32>) -> usize {
        let byte_length = self.binary_data.len() - offset;

        let buffer_view_index = self.buffer_views.len();
        self.buffer_views.push(BufferView {
            buffer: 0,
            byte_offset: Some(offset),
            byte_length,
            target,
        });

        let accessor_index = self.accessors.len();
        self.accessors.push(Accessor {
            buffer_view: Some(buffer_view_index),
            byte_offset: None,
            component_type,
            count,
            accessor_type: accessor_type.to_string(),
            max,
            min,
        });

        accessor_index
    }

    /// Write separate JSON + BIN files
    fn write_separate_files(&self, gltf: &Gltf, output_path: &Path) -> GltfResult<Vec<PathBuf>> {
        let mut written = Vec::new();

        // Write JSON
        let json_path = output_path.with_extension("gltf");
        let json = if self.options.pretty_json {
            serde_json::to_string_pretty(gltf)?
        } else {
            serde_json::to_string(gltf)?
        };
        std::fs::write(&json_path, json)?;
        written.push(json_path);

        // Write BIN
        if !self.binary_data.is_empty() {
            let bin_path = output_path.with_extension("bin");
            std::fs::write(&bin_path, &self.binary_data)?;
            written.push(bin_path);
        }

        Ok(written)
    }

    /// Write GLB (binary glTF)
    fn write_glb(&self, gltf: &Gltf, output_path: &Path) -> GltfResult<PathBuf> {
        let glb_path = output_path.with_extension("glb");
        let mut file = std::io::BufWriter::new(std::fs::File::create(&glb_path)?);

        let json = serde_json::to_string(gltf)?;
        let json_len = json.len();
        let json_padding = (4 - (json_len % 4)) % 4;
        let bin_len = self.binary_data.len();
        let bin_padding = (4 - (bin_len % 4)) % 4;

        let mut total_len = 12 + 8 + json_len + json_padding;
        if bin_len > 0 {
            total_len += 8 + bin_len + bin_padding;
        }

        // GLB header
        file.write_all(b"glTF")?; // Magic
        file.write_all(&2u32.to_le_bytes())?; // Version
        file.write_all(&(total_len as u32).to_le_bytes())?;

        // JSON chunk
        file.write_all(&((json_len + json_padding) as u32).to_le_bytes())?;
        file.write_all(&0x4E4F_534Au32.to_le_bytes())?; // "JSON"
        file.write_all(json.as_bytes())?;
        file.write_all(&vec![0x20u8; json_padding])?; // Space padding

        // BIN chunk
        if bin_len > 0 {
            file.write_all(&((bin_len + bin_padding) as u32).to_le_bytes())?;
            file.write_all(&0x004E_4942u32.to_le_bytes())?; // "BIN\0"
            file.write_all(&self.binary_data)?;
            file.write_all(&vec![0x00u8; bin_padding])?; // Zero padding
        }

        file.flush()?;
        Ok(glb_path)
    }

    /// Build and write `scene` in the requested layout
    pub fn write(&mut self, scene: &dyn SceneSource, path: &Path, layout: GeometryLayout) -> GltfResult<Vec<PathBuf>> {
        let written = match layout {
            GeometryLayout::Separate => {
                let bin_uri = path
                    .with_extension("bin")
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned());
                let gltf = self.build(scene, bin_uri)?;
                self.write_separate_files(&gltf, path)?
            }
            GeometryLayout::Binary => {
                let gltf = self.build(scene, None)?;
                vec![self.write_glb(&gltf, path)?]
            }
        };

        info!(
            path = %path.display(),
            ?layout,
            meshes = scene.meshes().count(),
            bytes = self.binary_data.len(),
            "Geometry exported"
        );
        Ok(written)
    }
}

impl Default for GltfExporter {
    fn default() -> Self {
        Self::new(GltfExportOptions::default())
    }
}

impl GeometryExporter for GltfExporter {
    fn export(
        &mut self,
        scene: &dyn SceneSource,
        path: &Path,
        layout: GeometryLayout,
    ) -> raybridge_core::Result<Vec<PathBuf>> {
        Ok(self.write(scene, path, layout)?)
    }
}

fn validate_mesh(name: &str, mesh: &MeshData) -> GltfResult<()> {
    if mesh.indices.len() % 3 != 0 {
        return Err(GltfExportError::InvalidMeshData {
            mesh: name.to_string(),
            message: format!("{} indices is not a whole number of triangles", mesh.indices.len()),
        });
    }

    let vertex_count = mesh.positions.len();
    if let Some(&bad) = mesh.indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(GltfExportError::InvalidMeshData {
            mesh: name.to_string(),
            message: format!("index {} out of range for {} vertices", bad, vertex_count),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use raybridge_core::{DQuat, DVec3, WorldTransform};
    use raybridge_scene::{ObjectData, Scene as HostScene};
    use tempfile::TempDir;

    fn triangle_scene() -> HostScene {
        let mesh = MeshData {
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 2.0]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            uvs: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
            indices: vec![0, 1, 2],
        };
        let object = SceneObject::new("Tri", ObjectData::Mesh(mesh)).with_transform(
            DVec3::new(0.0, 5.0, 0.0),
            WorldTransform::from_rotation_translation(DQuat::IDENTITY, DVec3::new(0.0, 5.0, 0.0)),
        );
        HostScene {
            name: "Scene".into(),
            objects: vec![object],
            ..Default::default()
        }
    }

    #[test]
    fn test_build_triangle() {
        let mut exporter = GltfExporter::default();
        let gltf = exporter.build(&triangle_scene(), Some("scene.bin".into())).unwrap();

        assert_eq!(gltf.meshes.len(), 1);
        assert_eq!(gltf.accessors.len(), 4);
        assert_eq!(gltf.buffers[0].byte_length, 3 * 12 + 3 * 12 + 3 * 8 + 3 * 4);

        // Y-up: host +Y translation becomes glTF -Z
        let translation = gltf.nodes[0].translation.unwrap();
        assert!((translation[2] + 5.0).abs() < 1e-9);
        assert_eq!(gltf.accessors[0].max, Some(vec![1.0, 2.0, 0.0]));
        assert_eq!(gltf.accessors[0].min, Some(vec![0.0, 0.0, -1.0]));
    }

    #[test]
    fn test_invalid_indices_rejected() {
        let mut scene = triangle_scene();
        if let ObjectData::Mesh(mesh) = &mut scene.objects[0].data {
            mesh.indices = vec![0, 1, 7];
        }

        let err = GltfExporter::default().build(&scene, None).unwrap_err();
        assert!(matches!(err, GltfExportError::InvalidMeshData { .. }));
    }

    #[test]
    fn test_write_separate_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scene.gltf");

        let written = GltfExporter::default()
            .export(&triangle_scene(), &path, GeometryLayout::Separate)
            .unwrap();

        assert_eq!(written, vec![path.clone(), dir.path().join("scene.bin")]);
        let doc: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["buffers"][0]["uri"], "scene.bin");
        assert_eq!(doc["asset"]["version"], "2.0");
    }

    #[test]
    fn test_write_glb_header() {
        let dir = TempDir::new().unwrap();
        let written = GltfExporter::default()
            .export(&triangle_scene(), &dir.path().join("scene.gltf"), GeometryLayout::Binary)
            .unwrap();

        let bytes = std::fs::read(&written[0]).unwrap();
        assert_eq!(&bytes[0..4], b"glTF");
        let total = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as usize;
        assert_eq!(total, bytes.len());
        assert_eq!(total % 4, 0);
    }

    #[test]
    fn test_empty_scene_writes_document_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.gltf");

        let written = GltfExporter::default()
            .export(&HostScene::default(), &path, GeometryLayout::Separate)
            .unwrap();

        assert_eq!(written, vec![path]);
        assert!(!dir.path().join("empty.bin").exists());
    }
}
