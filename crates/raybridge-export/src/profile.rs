//! Export profiles
//!
//! The sidecar has two established consumers with different expectations.
//! Both run through the same extractors; an [`ExportProfile`] carries every
//! point where their output contracts differ.
//!
//! | setting          | interactive            | script                   |
//! |------------------|------------------------|--------------------------|
//! | axes             | host Z-up              | Y-up (`x, z, y`)         |
//! | vfov             | `angle_y`, radians     | `angle`, degrees         |
//! | camera position  | world translation      | local location           |
//! | vup              | rotated `(0, 1, 0)`    | fixed `(0, 1, 0)`        |
//! | aspect           | sensor fit             | render resolution        |
//! | depth of field   | camera DOF block       | legacy GPU DOF blades    |
//! | sun type name    | `SUN`                  | `DIRECTIONAL`            |
//! | spot direction   | yes                    | no                       |
//! | sidecar layout   | `lights` + `cameras[]` | `camera?` + `lights`     |

use raybridge_core::{AngleUnit, AxisConvention};
use serde::{Deserialize, Serialize};

/// Where an object's exported position comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionSource {
    /// Translation column of the world matrix
    World,
    /// Local location, parent transforms not applied
    Local,
}

/// How the camera up vector is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpVector {
    /// World rotation applied to `(0, 1, 0)`, then converted
    FromRotation,
    /// Always `(0, 1, 0)` in output space, camera roll ignored
    Fixed,
}

/// Which host field of view becomes `vfov`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FovSource {
    /// `angle_y`
    Vertical,
    /// `angle`, measured along the sensor-fit axis
    Fitted,
}

/// How the camera aspect ratio is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectSource {
    /// Sensor width/height, inverted for vertical fit
    Sensor,
    /// Render resolution x/y
    Render,
}

/// Where depth-of-field parameters are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DofSource {
    /// Camera DOF settings when enabled, zeros otherwise
    Settings,
    /// Fixed aperture and focus; blade count from the legacy GPU DOF block
    LegacyGpu,
}

/// Type names written for lights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightNaming {
    /// Host names as-is (`SUN`)
    Host,
    /// Renderer names (`DIRECTIONAL` for sun lights)
    Renderer,
}

/// Top-level layout and key names of the sidecar file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidecarSchema {
    /// `{ "lights": [...], "cameras": [...] }`, every camera in the scene
    Interactive,
    /// `{ "camera": {...}, "lights": [...] }`, active camera only
    Script,
}

/// Complete set of per-consumer export choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportProfile {
    pub convention: AxisConvention,
    pub angle_unit: AngleUnit,
    pub camera_position: PositionSource,
    pub light_position: PositionSource,
    pub up_vector: UpVector,
    pub fov: FovSource,
    pub aspect: AspectSource,
    pub dof: DofSource,
    pub light_naming: LightNaming,
    pub spot_direction: bool,
    pub schema: SidecarSchema,
}

impl ExportProfile {
    /// Geometry + textures + sidecar export
    pub const fn interactive() -> Self {
        Self {
            convention: AxisConvention::ZUp,
            angle_unit: AngleUnit::Radians,
            camera_position: PositionSource::World,
            light_position: PositionSource::Local,
            up_vector: UpVector::FromRotation,
            fov: FovSource::Vertical,
            aspect: AspectSource::Sensor,
            dof: DofSource::Settings,
            light_naming: LightNaming::Host,
            spot_direction: true,
            schema: SidecarSchema::Interactive,
        }
    }

    /// Sidecar-only export of the active camera and lights
    pub const fn script() -> Self {
        Self {
            convention: AxisConvention::YUp,
            angle_unit: AngleUnit::Degrees,
            camera_position: PositionSource::Local,
            light_position: PositionSource::Local,
            up_vector: UpVector::Fixed,
            fov: FovSource::Fitted,
            aspect: AspectSource::Render,
            dof: DofSource::LegacyGpu,
            light_naming: LightNaming::Renderer,
            spot_direction: false,
            schema: SidecarSchema::Script,
        }
    }

    pub fn with_convention(mut self, convention: AxisConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn with_angle_unit(mut self, angle_unit: AngleUnit) -> Self {
        self.angle_unit = angle_unit;
        self
    }

    pub fn with_camera_position(mut self, source: PositionSource) -> Self {
        self.camera_position = source;
        self
    }

    /// Lights default to their local location; `World` applies parent transforms
    pub fn with_light_position(mut self, source: PositionSource) -> Self {
        self.light_position = source;
        self
    }
}

impl Default for ExportProfile {
    fn default() -> Self {
        Self::interactive()
    }
}
