//! Common types used across RayBridge
//!
//! Vector math is `glam`'s double-precision family. Host values are read as
//! `f64` so exported numbers keep the precision the host reported.

use serde::{Deserialize, Serialize};

pub use glam::{DMat4, DQuat, DVec3, DVec4};

/// Canonical camera/light forward axis in host object space
pub const FORWARD: DVec3 = DVec3::new(0.0, 0.0, -1.0);

/// Canonical up axis in host object space
pub const UP: DVec3 = DVec3::new(0.0, 1.0, 0.0);

/// Which world axis is "vertical" in the exported vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisConvention {
    /// Host convention, vectors pass through unchanged
    #[default]
    ZUp,
    /// Renderer convention, Y and Z components swapped
    YUp,
}

/// Unit used for exported angles such as the vertical field of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

impl AngleUnit {
    /// Express an angle given in radians in this unit
    pub fn from_radians(self, radians: f64) -> f64 {
        match self {
            AngleUnit::Radians => radians,
            AngleUnit::Degrees => radians.to_degrees(),
        }
    }
}

/// Linear RGB color as reported by the host (no alpha)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub [f64; 3]);

impl Rgb {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0]);

    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self([r, g, b])
    }

    pub fn to_array(self) -> [f64; 3] {
        self.0
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

/// World transform of a host object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldTransform(pub DMat4);

impl WorldTransform {
    pub const IDENTITY: Self = Self(DMat4::IDENTITY);

    pub fn from_rotation_translation(rotation: DQuat, translation: DVec3) -> Self {
        Self(DMat4::from_rotation_translation(rotation, translation))
    }

    /// World-space translation
    pub fn translation(&self) -> DVec3 {
        self.0.w_axis.truncate()
    }

    /// Rotation part with scale removed
    pub fn rotation(&self) -> DQuat {
        let (_, rotation, _) = self.0.to_scale_rotation_translation();
        rotation
    }

    /// Object -Z axis in world space
    pub fn forward(&self) -> DVec3 {
        self.rotation() * FORWARD
    }

    /// Object +Y axis in world space
    pub fn up(&self) -> DVec3 {
        self.rotation() * UP
    }
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
