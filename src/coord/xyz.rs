// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Handle the geocentric and array-local (x,y,z) coordinates of an antenna.
 */

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::lla::LatLngHeight;

/// The absolute geocentric (ECEF) position of an antenna. All units are in
/// metres. The antenna table is an ordered, immutable input; index 0 is the
/// designated delay reference antenna.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct XyzGeocentric {
    /// x-coordinate \[metres\]
    pub x: f64,
    /// y-coordinate \[metres\]
    pub y: f64,
    /// z-coordinate \[metres\]
    pub z: f64,
}

/// The position of an antenna relative to the reference antenna, in the
/// array-local frame: x points at the intersection of the local meridian and
/// the equator, y points east, z at the north celestial pole. This is the
/// absolute system except that zero longitude is the local meridian rather
/// than the prime meridian. All units are in metres.
///
/// This coordinate system is discussed at length in Interferometry and
/// Synthesis in Radio Astronomy, Third Edition, Section 4: Geometrical
/// Relationships, Polarimetry, and the Measurement Equation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct XyzLocal {
    /// x-coordinate \[metres\]
    pub x: f64,
    /// y-coordinate \[metres\]
    pub y: f64,
    /// z-coordinate \[metres\]
    pub z: f64,
}

impl XyzGeocentric {
    /// Convert geocentric antenna positions to the array-local frame:
    /// subtract the geocentric position of the reference antenna (index 0),
    /// then rotate about the polar axis so that zero longitude becomes the
    /// local meridian. The output ordering matches the input; index 0 is
    /// always the origin. The antenna geometry does not change within a run,
    /// so this is done once and the result reused every block.
    ///
    /// Only the longitude of the reference position enters the rotation; z
    /// stays along the Earth's spin axis, which is what the hour-angle
    /// rotation in [`UVW`](super::UVW) needs. An empty slice yields an empty
    /// `Vec`.
    pub fn to_local(positions: &[XyzGeocentric], reference_position: LatLngHeight) -> Vec<XyzLocal> {
        let reference = match positions.first() {
            Some(p) => *p,
            None => return Vec::new(),
        };
        let (s_long, c_long) = reference_position.longitude_rad.sin_cos();
        positions
            .iter()
            .map(|pos| pos.to_local_inner(reference, s_long, c_long))
            .collect()
    }

    /// Convert one geocentric position to the array-local frame. This
    /// function is less convenient than [`XyzGeocentric::to_local`], but
    /// doesn't re-calculate the `sin` and `cos` of the reference longitude
    /// for every antenna.
    pub fn to_local_inner(self, reference: XyzGeocentric, s_long: f64, c_long: f64) -> XyzLocal {
        let x = self.x - reference.x;
        let y = self.y - reference.y;
        let z = self.z - reference.z;
        XyzLocal {
            x: x * c_long + y * s_long,
            y: -x * s_long + y * c_long,
            z,
        }
    }
}

#[cfg(test)]
impl approx::AbsDiffEq for XyzLocal {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        f64::abs_diff_eq(&self.x, &other.x, epsilon)
            && f64::abs_diff_eq(&self.y, &other.y, epsilon)
            && f64::abs_diff_eq(&self.z, &other.z, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn to_local_reference_antenna_is_origin() {
        let positions = [
            XyzGeocentric {
                x: -2524041.5388905862,
                y: -4123587.965024342,
                z: 4147646.4222955606,
            },
            XyzGeocentric {
                x: -2524068.187873109,
                y: -4123558.735413135,
                z: 4147656.21282186,
            },
        ];
        let reference_position = LatLngHeight::from_degrees(-121.470733, 40.815987, 1020.86);
        let local = XyzGeocentric::to_local(&positions, reference_position);
        assert_eq!(local.len(), 2);
        assert_eq!(local[0].x, 0.0);
        assert_eq!(local[0].y, 0.0);
        assert_eq!(local[0].z, 0.0);
    }

    #[test]
    fn to_local_at_zero_longitude_is_pure_translation() {
        let positions = [
            XyzGeocentric {
                x: 1000.0,
                y: 2000.0,
                z: 3000.0,
            },
            XyzGeocentric {
                x: 1100.0,
                y: 2025.0,
                z: 2950.0,
            },
        ];
        let reference_position = LatLngHeight {
            longitude_rad: 0.0,
            latitude_rad: 0.5,
            height_metres: 0.0,
        };
        let local = XyzGeocentric::to_local(&positions, reference_position);
        assert_abs_diff_eq!(
            local[1],
            XyzLocal {
                x: 100.0,
                y: 25.0,
                z: -50.0
            },
            epsilon = 1e-12
        );
    }

    #[test]
    fn to_local_quarter_turn_swaps_axes() {
        // At longitude +90 deg, geocentric +y lies on the local meridian and
        // geocentric +x points west.
        let positions = [
            XyzGeocentric {
                x: 0.0,
                y: 0.0,
                z: 0.0,
            },
            XyzGeocentric {
                x: 100.0,
                y: 25.0,
                z: 7.0,
            },
        ];
        let reference_position = LatLngHeight {
            longitude_rad: FRAC_PI_2,
            latitude_rad: 0.7,
            height_metres: 0.0,
        };
        let local = XyzGeocentric::to_local(&positions, reference_position);
        assert_abs_diff_eq!(
            local[1],
            XyzLocal {
                x: 25.0,
                y: -100.0,
                z: 7.0
            },
            epsilon = 1e-12
        );
    }

    #[test]
    fn to_local_of_empty_table_is_empty() {
        let reference_position = LatLngHeight::from_degrees(0.0, 0.0, 0.0);
        assert!(XyzGeocentric::to_local(&[], reference_position).is_empty());
    }
}
