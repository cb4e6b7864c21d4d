// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Handle (right ascension, declination) coordinates.
 */

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A catalogued target on the celestial sphere: either the boresight or a
/// science beam. All units are in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RADec {
    /// Right ascension \[radians\]
    pub ra: f64,
    /// Declination \[radians\]
    pub dec: f64,
}

impl RADec {
    /// Make a new [`RADec`] from radian coordinates.
    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    /// Make a new [`RADec`] from degree coordinates.
    pub fn from_degrees(ra: f64, dec: f64) -> Self {
        Self {
            ra: ra.to_radians(),
            dec: dec.to_radians(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn from_degrees() {
        let radec = RADec::from_degrees(45.0, 90.0);
        assert_abs_diff_eq!(radec.ra, FRAC_PI_2 / 2.0);
        assert_abs_diff_eq!(radec.dec, FRAC_PI_2);
    }
}
