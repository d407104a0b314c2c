//! End-to-end export tests
//!
//! These run both pipelines against in-memory scenes and check the files
//! they leave behind:
//! - sidecar layout for each schema
//! - texture directory contents and deduplication
//! - geometry files next to the sidecar

use proptest::prelude::*;
use raybridge_core::{DQuat, DVec3, Rgb, Skip, WorldTransform};
use raybridge_export::{
    ExportConfig, GeometryLayout, GltfExporter, SceneExporter,
};
use raybridge_scene::{
    AreaShape, CameraData, ImageRef, LightData, LightKind, MeshData, ObjectData, Scene, SceneObject,
};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn red_point_light() -> SceneObject {
    let mut light = LightData::new(LightKind::Point);
    light.color = Rgb::new(1.0, 0.0, 0.0);
    light.energy = 1000.0;
    SceneObject::new("Lamp", ObjectData::Light(light))
}

fn triangle() -> SceneObject {
    let mesh = MeshData {
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        normals: vec![],
        uvs: vec![],
        indices: vec![0, 1, 2],
    };
    SceneObject::new("Tri", ObjectData::Mesh(mesh))
}

#[test]
fn test_script_single_light_without_camera() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("scene_data.json");
    let scene = Scene {
        objects: vec![red_point_light()],
        ..Default::default()
    };

    let report = SceneExporter::default().export_script(&scene, &out).unwrap();
    let value = read_json(&out);

    assert!(value.get("camera").is_none());
    let lights = value["lights"].as_array().unwrap();
    assert_eq!(lights.len(), 1);
    assert_eq!(lights[0]["type"], "POINT");
    assert_eq!(lights[0]["color"], json!([1.0, 0.0, 0.0]));
    assert_eq!(lights[0]["power"].as_f64(), Some(1000.0));
    assert_eq!(lights[0]["position"], json!([0.0, 0.0, 0.0]));

    assert_eq!(report.cameras, 0);
    assert_eq!(report.lights, 1);
    assert_eq!(report.skipped, vec![Skip::NoActiveCamera]);
}

#[test]
fn test_interactive_empty_scene() {
    let dir = TempDir::new().unwrap();
    let geometry = dir.path().join("scene.gltf");

    let report = SceneExporter::default()
        .export_interactive(&Scene::default(), &geometry, None)
        .unwrap();

    assert_eq!(report.sidecar, dir.path().join("scene_scene_data.json"));
    assert_eq!(read_json(&report.sidecar), json!({ "lights": [], "cameras": [] }));

    let textures = dir.path().join("textures");
    assert!(textures.is_dir());
    assert_eq!(fs::read_dir(&textures).unwrap().count(), 0);
    assert!(report.geometry.is_empty());
}

#[test]
fn test_interactive_dedupes_textures_by_file_name() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    fs::create_dir_all(&a).unwrap();
    fs::create_dir_all(&b).unwrap();
    fs::write(a.join("wood.png"), b"first").unwrap();
    fs::write(b.join("wood.png"), b"second").unwrap();

    let scene = Scene {
        base_dir: dir.path().to_path_buf(),
        images: vec![
            ImageRef::new("WoodA", "//a/wood.png"),
            ImageRef::new("WoodB", "//b/wood.png"),
            ImageRef::new("Generated", ""),
        ],
        ..Default::default()
    };

    let out = dir.path().join("out");
    let report = SceneExporter::default()
        .export_interactive(&scene, &out.join("scene.gltf"), None)
        .unwrap();

    assert_eq!(report.textures, vec![out.join("textures").join("wood.png")]);
    assert_eq!(fs::read(out.join("textures/wood.png")).unwrap(), b"first");
    assert_eq!(report.skipped.len(), 2);
    assert!(report
        .skipped
        .iter()
        .any(|s| matches!(s, Skip::DuplicateTextureName { image, .. } if image == "WoodB")));
}

#[test]
fn test_interactive_writes_geometry_and_lights() {
    let dir = TempDir::new().unwrap();
    let geometry = dir.path().join("scene.gltf");

    let sun = SceneObject::new("Sun", ObjectData::Light(LightData::new(LightKind::Sun)))
        .with_transform(
            DVec3::new(0.0, 0.0, 10.0),
            WorldTransform::from_rotation_translation(DQuat::IDENTITY, DVec3::new(0.0, 0.0, 10.0)),
        );
    let scene = Scene {
        objects: vec![triangle(), sun],
        ..Default::default()
    };

    let mut gltf = GltfExporter::default();
    let report = SceneExporter::default()
        .export_interactive(&scene, &geometry, Some(&mut gltf))
        .unwrap();

    assert_eq!(report.geometry, vec![dir.path().join("scene.gltf"), dir.path().join("scene.bin")]);
    assert!(geometry.is_file());

    let value = read_json(&report.sidecar);
    let sun = &value["lights"][0];
    assert_eq!(sun["type"], "SUN");
    assert_eq!(sun["direction"], json!([0.0, 0.0, -1.0]));
    assert_eq!(sun["location"], json!([0.0, 0.0, 10.0]));
}

#[test]
fn test_geometry_disabled_by_config() {
    let dir = TempDir::new().unwrap();
    let geometry = dir.path().join("scene.glb");
    let config = ExportConfig {
        export_geometry: false,
        layout: GeometryLayout::Binary,
        ..Default::default()
    };

    let scene = Scene {
        objects: vec![triangle()],
        ..Default::default()
    };
    let mut gltf = GltfExporter::default();
    let report = SceneExporter::new(config)
        .export_interactive(&scene, &geometry, Some(&mut gltf))
        .unwrap();

    assert!(report.geometry.is_empty());
    assert!(!geometry.exists());
    assert!(report.sidecar.is_file());
}

#[test]
fn test_script_identity_camera() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("camera.json");
    let camera = CameraData::default();
    let expected_vfov = camera.angle.to_degrees();

    let scene = Scene {
        objects: vec![SceneObject::new("Camera", ObjectData::Camera(camera))],
        active_camera: Some("Camera".into()),
        ..Default::default()
    };

    SceneExporter::default().export_script(&scene, &out).unwrap();
    let value = read_json(&out);
    let camera = &value["camera"];

    assert_eq!(camera["lookfrom"], json!([0.0, 0.0, 0.0]));
    assert_eq!(camera["lookat"], json!([0.0, -1.0, 0.0]));
    assert_eq!(camera["vup"], json!([0.0, 1.0, 0.0]));
    assert!((camera["vfov"].as_f64().unwrap() - expected_vfov).abs() < 1e-9);
    assert!((camera["aspect_ratio"].as_f64().unwrap() - 1920.0 / 1080.0).abs() < 1e-9);
    assert_eq!(camera["aperture"].as_f64(), Some(0.0));
    assert_eq!(camera["focus_dist"].as_f64(), Some(10.0));
}

#[test]
fn test_failed_texture_copy_aborts_before_sidecar() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("wood.png"), b"wood").unwrap();
    fs::create_dir_all(dir.path().join("out/textures/wood.png")).unwrap();

    let scene = Scene {
        base_dir: dir.path().to_path_buf(),
        images: vec![ImageRef::new("Wood", "//wood.png")],
        objects: vec![red_point_light()],
        ..Default::default()
    };

    let geometry = dir.path().join("out/scene.gltf");
    let err = SceneExporter::default()
        .export_interactive(&scene, &geometry, None)
        .unwrap_err();

    assert!(matches!(err, raybridge_core::Error::Copy { .. }));
    assert!(!dir.path().join("out/scene_scene_data.json").exists());
}

#[test]
fn test_reexport_keeps_textures_already_in_place() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("textures")).unwrap();
    fs::write(dir.path().join("textures/wood.png"), b"PNGDATA").unwrap();

    let scene = Scene {
        base_dir: dir.path().to_path_buf(),
        images: vec![ImageRef::new("Wood", "//textures/wood.png")],
        ..Default::default()
    };

    let report = SceneExporter::default()
        .export_interactive(&scene, &dir.path().join("scene.gltf"), None)
        .unwrap();

    assert_eq!(fs::read(dir.path().join("textures/wood.png")).unwrap(), b"PNGDATA");
    assert_eq!(report.textures, vec![dir.path().join("textures/wood.png")]);
    assert!(matches!(report.skipped[..], [Skip::TextureAlreadyInPlace { .. }]));
}

fn area_light(name: &str, shape: AreaShape) -> SceneObject {
    let mut light = LightData::new(LightKind::Area);
    light.shape = shape;
    light.size = 2.0;
    light.size_y = 3.0;
    SceneObject::new(name, ObjectData::Light(light))
}

#[test]
fn test_area_lights_in_both_schemas() {
    let dir = TempDir::new().unwrap();
    let scene = Scene {
        objects: vec![
            area_light("Panel", AreaShape::Rectangle),
            area_light("Disk", AreaShape::Disk),
        ],
        ..Default::default()
    };

    let report = SceneExporter::default()
        .export_interactive(&scene, &dir.path().join("scene.gltf"), None)
        .unwrap();
    let interactive = read_json(&report.sidecar);
    let lights = &interactive["lights"];
    assert_eq!(lights[0]["type"], "AREA");
    assert_eq!(lights[0]["size"], json!([2.0, 3.0]));
    assert_eq!(lights[0]["direction"], json!([0.0, 0.0, -1.0]));
    assert_eq!(lights[1]["size"], json!([2.0]));
    assert_eq!(lights[1]["direction"], json!([0.0, 0.0, -1.0]));

    let out = dir.path().join("script.json");
    SceneExporter::default().export_script(&scene, &out).unwrap();
    let script = read_json(&out);
    let lights = &script["lights"];
    assert_eq!(lights[0]["type"], "AREA");
    assert_eq!(lights[0]["size"], json!([2.0, 3.0]));
    assert_eq!(lights[0]["direction"], json!([0.0, -1.0, 0.0]));
    assert_eq!(lights[1]["size"], json!([2.0]));
    assert_eq!(lights[1]["direction"], json!([0.0, -1.0, 0.0]));
}

proptest! {
    #[test]
    fn prop_light_count_matches_scene(count in 0usize..8) {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("lights.json");
        let scene = Scene {
            objects: (0..count).map(|_| red_point_light()).collect(),
            ..Default::default()
        };

        let report = SceneExporter::default().export_script(&scene, &out).unwrap();
        let value = read_json(&out);

        prop_assert_eq!(report.lights, count);
        prop_assert_eq!(value["lights"].as_array().unwrap().len(), count);
    }
}
