// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Coordinate types and the frame conversions between them.

Positions flow one way: absolute geocentric ([`XyzGeocentric`]) to
array-centred ([`XyzLocal`], once per run) to direction-tracking
([`UVW`], twice per block per direction). Sky directions are catalogued as
[`RADec`] and tracked as [`HADec`].
 */

mod hadec;
mod lla;
mod radec;
mod uvw;
mod xyz;

pub use hadec::HADec;
pub use lla::LatLngHeight;
pub use radec::RADec;
pub use uvw::{xyzs_to_uvws, xyzs_to_uvws_into, UVW};
pub use xyz::{XyzGeocentric, XyzLocal};
