//! Light extraction

use crate::profile::{ExportProfile, LightNaming, PositionSource};
use raybridge_core::{convert, DVec3, Skip};
use raybridge_scene::{AreaShape, LightData, LightKind, SceneObject};
use tracing::{debug, warn};

/// Variant-specific light fields
#[derive(Debug, Clone, PartialEq)]
pub enum LightShape {
    Point,
    Directional {
        direction: DVec3,
    },
    Area {
        direction: DVec3,
        /// `[size]`, or `[size, size_y]` for rectangles
        size: Vec<f64>,
    },
    Spot {
        spot_size: f64,
        spot_blend: f64,
        direction: Option<DVec3>,
    },
    /// Kind without dedicated fields; only the common fields are written
    Unsupported,
}

/// Light as the renderer consumes it
#[derive(Debug, Clone, PartialEq)]
pub struct LightDescriptor {
    pub name: String,
    /// Type name written to the sidecar
    pub type_name: String,
    pub color: [f64; 3],
    pub power: f64,
    pub position: DVec3,
    pub shape: LightShape,
}

impl LightDescriptor {
    pub fn direction(&self) -> Option<DVec3> {
        match &self.shape {
            LightShape::Directional { direction } | LightShape::Area { direction, .. } => Some(*direction),
            LightShape::Spot { direction, .. } => *direction,
            LightShape::Point | LightShape::Unsupported => None,
        }
    }
}

/// Result of extracting one light
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedLight {
    pub descriptor: LightDescriptor,
    /// Set when the light kind had no dedicated handling
    pub skip: Option<Skip>,
}

/// Derive a light description from a host light object.
///
/// Unknown light kinds never fail; they produce a descriptor with the common
/// fields only and a [`Skip::UnsupportedLight`] notice.
pub fn extract_light(object: &SceneObject, light: &LightData, profile: &ExportProfile) -> ExtractedLight {
    let position = match profile.light_position {
        PositionSource::World => object.matrix_world.translation(),
        PositionSource::Local => object.location,
    };
    let direction = || convert(object.matrix_world.forward(), profile.convention);

    let (shape, skip) = match &light.kind {
        LightKind::Point => (LightShape::Point, None),
        LightKind::Sun => (LightShape::Directional { direction: direction() }, None),
        LightKind::Area => (
            LightShape::Area {
                direction: direction(),
                size: area_size(light),
            },
            None,
        ),
        LightKind::Spot => (
            LightShape::Spot {
                spot_size: light.spot_size,
                spot_blend: light.spot_blend,
                direction: profile.spot_direction.then(direction),
            },
            None,
        ),
        LightKind::Other(kind) => {
            warn!(light = %object.name, kind = %kind, "Unsupported light kind, writing common fields only");
            (
                LightShape::Unsupported,
                Some(Skip::UnsupportedLight {
                    object: object.name.clone(),
                    kind: kind.clone(),
                }),
            )
        }
    };

    let descriptor = LightDescriptor {
        name: object.name.clone(),
        type_name: type_name(&light.kind, profile.light_naming).to_string(),
        color: light.color.to_array(),
        power: light.energy,
        position: convert(position, profile.convention),
        shape,
    };

    debug!(light = %object.name, kind = %descriptor.type_name, power = descriptor.power, "Extracted light");
    ExtractedLight { descriptor, skip }
}

/// Sidecar type name for a host light kind
pub fn type_name(kind: &LightKind, naming: LightNaming) -> &str {
    match (kind, naming) {
        (LightKind::Sun, LightNaming::Renderer) => "DIRECTIONAL",
        _ => kind.as_str(),
    }
}

fn area_size(light: &LightData) -> Vec<f64> {
    match light.shape {
        AreaShape::Rectangle => vec![light.size, light.size_y],
        AreaShape::Square | AreaShape::Disk | AreaShape::Ellipse => vec![light.size],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raybridge_core::{DQuat, Rgb, WorldTransform};
    use raybridge_scene::ObjectData;
    use std::f64::consts::FRAC_PI_2;

    fn approx(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    fn light_object(light: LightData, location: DVec3, rotation: DQuat) -> SceneObject {
        SceneObject::new("Light", ObjectData::Light(light))
            .with_transform(location, WorldTransform::from_rotation_translation(rotation, location))
    }

    fn extract(light: LightData, profile: &ExportProfile) -> ExtractedLight {
        let object = light_object(light.clone(), DVec3::new(1.0, 2.0, 3.0), DQuat::IDENTITY);
        extract_light(&object, &light, profile)
    }

    #[test]
    fn test_point_light_common_fields() {
        let mut light = LightData::new(LightKind::Point);
        light.color = Rgb::new(1.0, 0.0, 0.0);
        light.energy = 1000.0;

        let out = extract(light, &ExportProfile::script());
        let desc = out.descriptor;

        assert_eq!(desc.type_name, "POINT");
        assert_eq!(desc.color, [1.0, 0.0, 0.0]);
        assert_eq!(desc.power, 1000.0);
        assert_eq!(desc.position, DVec3::new(1.0, 3.0, 2.0));
        assert_eq!(desc.shape, LightShape::Point);
        assert!(out.skip.is_none());
    }

    #[test]
    fn test_sun_identity_direction() {
        let light = LightData::new(LightKind::Sun);

        let a = extract(light.clone(), &ExportProfile::interactive()).descriptor;
        assert_eq!(a.type_name, "SUN");
        assert!(approx(a.direction().unwrap(), DVec3::new(0.0, 0.0, -1.0)));

        let b = extract(light, &ExportProfile::script()).descriptor;
        assert_eq!(b.type_name, "DIRECTIONAL");
        assert!(approx(b.direction().unwrap(), DVec3::new(0.0, -1.0, 0.0)));
    }

    #[test]
    fn test_area_size_by_shape() {
        let mut light = LightData::new(LightKind::Area);
        light.size = 2.0;
        light.size_y = 0.5;

        light.shape = AreaShape::Rectangle;
        let rect = extract(light.clone(), &ExportProfile::script()).descriptor;
        assert!(matches!(rect.shape, LightShape::Area { ref size, .. } if size == &vec![2.0, 0.5]));

        for shape in [AreaShape::Square, AreaShape::Disk, AreaShape::Ellipse] {
            light.shape = shape;
            let desc = extract(light.clone(), &ExportProfile::script()).descriptor;
            assert!(matches!(desc.shape, LightShape::Area { ref size, .. } if size == &vec![2.0]));
        }
    }

    #[test]
    fn test_spot_direction_follows_profile() {
        let mut light = LightData::new(LightKind::Spot);
        light.spot_size = 0.5;
        light.spot_blend = 0.25;

        let a = extract(light.clone(), &ExportProfile::interactive()).descriptor;
        match a.shape {
            LightShape::Spot { spot_size, spot_blend, direction } => {
                assert_eq!((spot_size, spot_blend), (0.5, 0.25));
                assert!(direction.is_some());
            }
            other => panic!("expected spot, got {:?}", other),
        }

        let b = extract(light, &ExportProfile::script()).descriptor;
        assert!(b.direction().is_none());
    }

    #[test]
    fn test_rotated_sun_direction() {
        let light = LightData::new(LightKind::Sun);
        let object = light_object(light.clone(), DVec3::ZERO, DQuat::from_rotation_x(FRAC_PI_2));

        let desc = extract_light(&object, &light, &ExportProfile::interactive()).descriptor;
        assert!(approx(desc.direction().unwrap(), DVec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_unknown_kind_is_base_only() {
        let light = LightData::new(LightKind::Other("HEMI".into()));
        let out = extract(light, &ExportProfile::interactive());

        assert_eq!(out.descriptor.type_name, "HEMI");
        assert_eq!(out.descriptor.shape, LightShape::Unsupported);
        assert_eq!(
            out.skip,
            Some(Skip::UnsupportedLight {
                object: "Light".into(),
                kind: "HEMI".into(),
            })
        );
    }
}
