// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Geometric delay computation for a phased radio-antenna array.

Given fixed geocentric antenna positions, an array reference position and a
set of target directions (a boresight and any number of science beams), this
crate produces, for every processing block, the wavefront delay of each
antenna relative to the reference antenna (index 0): a per-antenna boresight
delay vector and a beam x antenna matrix of beam-relative delays, in seconds.
These drive downstream per-antenna phase/delay compensation.

The astrometric heavy lifting (precession, nutation, aberration, Earth
rotation) is delegated to ERFA via `erfa-sys`; this crate owns the coordinate
frame pipeline, the delay arithmetic and the per-block orchestration.
 */

pub mod apparent;
pub mod constants;
pub mod context;
pub mod coord;
pub mod delays;
pub mod engine;
mod error;

// Re-exports.
pub use apparent::{resolve_apparent, ObserverState};
pub use constants::VEL_C;
pub use context::{Antenna, DelayContext};
pub use coord::{HADec, LatLngHeight, RADec, XyzGeocentric, XyzLocal, UVW};
pub use delays::{solve_block, DelaySolution};
pub use engine::{BlockBuffers, DelayEngine};
pub use error::DelayError;
