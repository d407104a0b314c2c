//! Thin-lens camera extraction

use crate::profile::{AspectSource, DofSource, ExportProfile, FovSource, PositionSource, UpVector};
use raybridge_core::{convert, DVec3, UP};
use raybridge_scene::{CameraData, RenderSettings, SceneObject, SensorFit};
use tracing::debug;

/// Aperture written when depth of field comes from the legacy GPU block
pub const LEGACY_APERTURE: f64 = 0.0;

/// Focus distance written when depth of field comes from the legacy GPU block
pub const LEGACY_FOCUS_DISTANCE: f64 = 10.0;

/// Camera as the renderer consumes it
#[derive(Debug, Clone, PartialEq)]
pub struct CameraDescriptor {
    pub name: String,
    pub lookfrom: DVec3,
    pub lookat: DVec3,
    pub vup: DVec3,
    /// Vertical field of view in the profile's angle unit
    pub vfov: f64,
    pub aspect: f64,
    pub aperture: f64,
    pub focus_dist: f64,
    pub blade_count: u32,
}

/// Derive a camera description from a host camera object
pub fn extract_camera(
    object: &SceneObject,
    camera: &CameraData,
    render: &RenderSettings,
    profile: &ExportProfile,
) -> CameraDescriptor {
    let transform = &object.matrix_world;
    let position = match profile.camera_position {
        PositionSource::World => transform.translation(),
        PositionSource::Local => object.location,
    };
    let target = position + transform.forward();

    let vup = match profile.up_vector {
        UpVector::FromRotation => convert(transform.up(), profile.convention),
        UpVector::Fixed => UP,
    };

    let fov = match profile.fov {
        FovSource::Vertical => camera.angle_y,
        FovSource::Fitted => camera.angle,
    };

    let aspect = match profile.aspect {
        AspectSource::Sensor => sensor_aspect(camera),
        AspectSource::Render => render.aspect_ratio(),
    };

    let (aperture, focus_dist, blade_count) = depth_of_field(camera, profile.dof);

    let descriptor = CameraDescriptor {
        name: object.name.clone(),
        lookfrom: convert(position, profile.convention),
        lookat: convert(target, profile.convention),
        vup,
        vfov: profile.angle_unit.from_radians(fov),
        aspect,
        aperture,
        focus_dist,
        blade_count,
    };

    debug!(camera = %object.name, vfov = descriptor.vfov, aspect, "Extracted camera");
    descriptor
}

/// Sensor aspect ratio; AUTO and HORIZONTAL fit measure width over height
pub fn sensor_aspect(camera: &CameraData) -> f64 {
    match camera.sensor_fit {
        SensorFit::Auto | SensorFit::Horizontal => camera.sensor_width / camera.sensor_height,
        SensorFit::Vertical => camera.sensor_height / camera.sensor_width,
    }
}

fn depth_of_field(camera: &CameraData, source: DofSource) -> (f64, f64, u32) {
    match source {
        DofSource::Settings if camera.dof.use_dof => (
            camera.dof.aperture_fstop,
            camera.dof.focus_distance,
            camera.dof.aperture_blades,
        ),
        DofSource::Settings => (0.0, 0.0, 0),
        DofSource::LegacyGpu => {
            let blades = camera
                .gpu_dof()
                .filter(|gpu| gpu.use_dof)
                .map_or(0, |gpu| gpu.blades);
            (LEGACY_APERTURE, LEGACY_FOCUS_DISTANCE, blades)
        }
    }
}
