// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Handle geodetic (longitude, latitude, height) coordinates.
 */

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A geodetic position, used as the array reference point. Immutable after
/// array configuration. The longitude and latitude must be finite radians;
/// nothing here validates them.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatLngHeight {
    /// Longitude \[radians\], positive east
    pub longitude_rad: f64,
    /// Geodetic latitude \[radians\]
    pub latitude_rad: f64,
    /// Height above the reference ellipsoid \[metres\]
    pub height_metres: f64,
}

impl LatLngHeight {
    /// Make a new [`LatLngHeight`] from degree longitude and latitude, which
    /// is how antenna tables usually record the array centre.
    pub fn from_degrees(longitude_deg: f64, latitude_deg: f64, height_metres: f64) -> Self {
        Self {
            longitude_rad: longitude_deg.to_radians(),
            latitude_rad: latitude_deg.to_radians(),
            height_metres,
        }
    }
}
