//! Coordinate conversion between the host and renderer axis conventions

use crate::types::{AxisConvention, DVec3};

/// Map a host (Z-up) vector into `convention`.
///
/// `YUp` is a plain swap of the Y and Z components, so applying it twice
/// returns the input.
pub fn convert(v: DVec3, convention: AxisConvention) -> DVec3 {
    match convention {
        AxisConvention::ZUp => v,
        AxisConvention::YUp => z_up_to_y_up(v),
    }
}

/// `(x, y, z)` -> `(x, z, y)`
pub fn z_up_to_y_up(v: DVec3) -> DVec3 {
    DVec3::new(v.x, v.z, v.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_y_up_swaps_components() {
        let v = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(convert(v, AxisConvention::YUp), DVec3::new(1.0, 3.0, 2.0));
    }

    #[test]
    fn test_z_up_passthrough() {
        let v = DVec3::new(-4.0, 0.5, 9.0);
        assert_eq!(convert(v, AxisConvention::ZUp), v);
    }

    proptest! {
        #[test]
        fn test_y_up_is_involution(x in -1.0e6f64..1.0e6, y in -1.0e6f64..1.0e6, z in -1.0e6f64..1.0e6) {
            let v = DVec3::new(x, y, z);
            let once = convert(v, AxisConvention::YUp);
            prop_assert_eq!(once.to_array(), [x, z, y]);
            prop_assert_eq!(convert(once, AxisConvention::YUp), v);
        }
    }
}
