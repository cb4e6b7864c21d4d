// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Handle UVW coordinates.
 */

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::hadec::HADec;
use super::xyz::XyzLocal;

/// An antenna position rotated so that w points at a tracked direction. The
/// delay arithmetic consumes only w, the distance towards the direction.
/// Ephemeral; rebuilt per direction, per block. All units are in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(clippy::upper_case_acronyms)]
pub struct UVW {
    /// u coordinate \[metres\]
    pub u: f64,
    /// v coordinate \[metres\]
    pub v: f64,
    /// w coordinate \[metres\]
    pub w: f64,
}

impl UVW {
    /// Convert an [`XyzLocal`] to [`UVW`], given a tracked direction: a
    /// rotation about the polar axis by the hour angle, then a tilt by the
    /// declination.
    ///
    /// This is Equation 4.1 of: Interferometry and Synthesis in Radio
    /// Astronomy, Third Edition, Section 4: Geometrical Relationships,
    /// Polarimetry, and the Measurement Equation.
    pub fn from_local(xyz: XyzLocal, phase_centre: HADec) -> Self {
        let (s_ha, c_ha) = phase_centre.ha.sin_cos();
        let (s_dec, c_dec) = phase_centre.dec.sin_cos();
        Self::from_local_inner(xyz, s_ha, c_ha, s_dec, c_dec)
    }

    /// Convert an [`XyzLocal`] to [`UVW`], given a tracked direction. This
    /// function is less convenient than [`UVW::from_local`], but is better
    /// in tight loops as the `sin` and `cos` of the direction don't need to
    /// be uselessly re-calculated.
    pub fn from_local_inner(xyz: XyzLocal, s_ha: f64, c_ha: f64, s_dec: f64, c_dec: f64) -> Self {
        Self {
            u: s_ha * xyz.x + c_ha * xyz.y,
            v: -s_dec * c_ha * xyz.x + s_dec * s_ha * xyz.y + c_dec * xyz.z,
            w: c_dec * c_ha * xyz.x - c_dec * s_ha * xyz.y + s_dec * xyz.z,
        }
    }
}

/// Rotate every antenna towards a tracked direction.
pub fn xyzs_to_uvws(xyzs: &[XyzLocal], phase_centre: HADec) -> Vec<UVW> {
    let mut uvws = Vec::with_capacity(xyzs.len());
    xyzs_to_uvws_into(xyzs, phase_centre, &mut uvws);
    uvws
}

/// Rotate every antenna towards a tracked direction, writing into a
/// caller-owned buffer. This is the hottest path in the crate (it runs once
/// per block for the boresight and once per block for every beam); when the
/// buffer's capacity already covers the antenna count, no allocation
/// happens.
pub fn xyzs_to_uvws_into(xyzs: &[XyzLocal], phase_centre: HADec, uvws: &mut Vec<UVW>) {
    let (s_ha, c_ha) = phase_centre.ha.sin_cos();
    let (s_dec, c_dec) = phase_centre.dec.sin_cos();
    uvws.clear();
    uvws.extend(
        xyzs.iter()
            .map(|xyz| UVW::from_local_inner(*xyz, s_ha, c_ha, s_dec, c_dec)),
    );
}

impl std::ops::Sub<UVW> for UVW {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        UVW {
            u: self.u - rhs.u,
            v: self.v - rhs.v,
            w: self.w - rhs.w,
        }
    }
}

impl std::ops::Mul<f64> for UVW {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        UVW {
            u: self.u * rhs,
            v: self.v * rhs,
            w: self.w * rhs,
        }
    }
}

#[cfg(test)]
impl approx::AbsDiffEq for UVW {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        f64::abs_diff_eq(&self.u, &other.u, epsilon)
            && f64::abs_diff_eq(&self.v, &other.v, epsilon)
            && f64::abs_diff_eq(&self.w, &other.w, epsilon)
    }
}
