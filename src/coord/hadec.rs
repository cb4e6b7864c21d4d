// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Handle (hour angle, declination) coordinates.
 */

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A target expressed relative to the local meridian at a specific instant.
/// Earth's rotation changes the hour angle continuously, so these are only
/// valid for the epoch they were resolved at. All units are in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HADec {
    /// Hour angle \[radians\], in the interval [-pi, pi)
    pub ha: f64,
    /// Declination \[radians\]
    pub dec: f64,
}

impl HADec {
    /// Make a new [`HADec`] from radian coordinates.
    pub fn new(ha: f64, dec: f64) -> Self {
        Self { ha, dec }
    }
}
