// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Resolve a catalogued (right ascension, declination) into the (hour angle,
declination) valid at a specific instant.

The astrometric physics (precession, nutation, annual and diurnal
aberration, Earth rotation) is ERFA's contract, consumed through `erfa-sys`;
this module's job is assembling the observer state from the reference
position and epoch, applying it, and range-reducing the result.

Two calling conventions are supported and numerically identical:
[`resolve_apparent`] for one-shot use (the boresight), and [`ObserverState`]
for precomputing the expensive per-epoch state once and applying it to many
directions (the beams of a block).
 */

use std::mem::MaybeUninit;

use erfa_sys::{eraASTROM, eraApco13, eraAtciqz, eraAtioq, eraGst06a, ERFA_DJM0};
use hifitime::Epoch;
use log::warn;
use thiserror::Error;

use crate::constants::{PI, TAU};
use crate::coord::{HADec, LatLngHeight, RADec};

#[derive(Error, Debug)]
pub enum ApparentError {
    #[error("ERFA rejected the epoch (JD {jd1} + {jd2}) as an unacceptable date")]
    UnacceptableDate { jd1: f64, jd2: f64 },
}

/// The astrometric state of the array at one epoch, reusable across all the
/// directions of a block. Keyed by (reference position, epoch): resolve a
/// new one when either changes.
#[derive(Clone, Copy, Debug)]
pub struct ObserverState {
    astrom: eraASTROM,
}

impl ObserverState {
    /// Compute the observer state for a reference position and epoch.
    ///
    /// DUT1 is taken as zero and polar motion is neglected, which costs up
    /// to ~1 second of Earth rotation in the hour angle; pressure is set to
    /// zero so ERFA applies no refraction.
    pub fn new(
        reference_position: LatLngHeight,
        epoch: Epoch,
    ) -> Result<ObserverState, ApparentError> {
        Self::from_jd(reference_position, ERFA_DJM0, epoch.to_mjd_utc_days())
    }

    /// Compute the observer state from a UTC Julian date split into two
    /// doubles (whole-day and fractional-day components), which preserves
    /// sub-microsecond timing across the double-precision range.
    pub fn from_jd(
        reference_position: LatLngHeight,
        jd1: f64,
        jd2: f64,
    ) -> Result<ObserverState, ApparentError> {
        let mut astrom = MaybeUninit::uninit();
        let mut eo = 0.0;
        let status = unsafe {
            eraApco13(
                jd1,
                jd2,
                0.0, // DUT1
                reference_position.longitude_rad,
                reference_position.latitude_rad,
                reference_position.height_metres,
                0.0, // polar motion x
                0.0, // polar motion y
                0.0, // pressure [hPa]; zero disables refraction
                0.0, // temperature [deg C]
                0.0, // relative humidity
                0.0, // observing wavelength [um]
                astrom.as_mut_ptr(),
                &mut eo,
            )
        };
        if status == -1 {
            return Err(ApparentError::UnacceptableDate { jd1, jd2 });
        }
        if status == 1 {
            warn!("ERFA flagged the epoch (JD {jd1} + {jd2}) as a dubious year");
        }
        Ok(ObserverState {
            astrom: unsafe { astrom.assume_init() },
        })
    }

    /// Resolve the apparent (hour angle, declination) of a catalogued
    /// direction at this state's epoch. The hour angle is range-reduced into
    /// [-pi, pi).
    pub fn apparent(&self, radec: RADec) -> HADec {
        // The ERFA signatures take a mutable astrom pointer but neither call
        // writes through it; work on a copy so `self` can be shared across
        // beam workers.
        let mut astrom = self.astrom;
        let mut ri = 0.0;
        let mut di = 0.0;
        unsafe { eraAtciqz(radec.ra, radec.dec, &mut astrom, &mut ri, &mut di) };
        let (mut aob, mut zob, mut hob, mut dob, mut rob) = (0.0, 0.0, 0.0, 0.0, 0.0);
        unsafe {
            eraAtioq(
                ri, di, &mut astrom, &mut aob, &mut zob, &mut hob, &mut dob, &mut rob,
            )
        };
        HADec::new(range_reduce(hob), dob)
    }
}

/// Resolve the apparent (hour angle, declination) of a catalogued direction
/// in one call. Equivalent to building an [`ObserverState`] and applying it;
/// prefer the two-phase form when a block has many beams sharing one epoch.
pub fn resolve_apparent(
    radec: RADec,
    reference_position: LatLngHeight,
    epoch: Epoch,
) -> Result<HADec, ApparentError> {
    Ok(ObserverState::new(reference_position, epoch)?.apparent(radec))
}

/// The local apparent sidereal time \[radians\] in [0, 2pi). Approximates
/// UT1 and TT with UTC, which is fine for diagnostics.
pub fn local_sidereal_time(longitude_rad: f64, epoch: Epoch) -> f64 {
    let mjd = epoch.to_mjd_utc_days();
    let gast = unsafe { eraGst06a(ERFA_DJM0, mjd, ERFA_DJM0, mjd) };
    (gast + longitude_rad).rem_euclid(TAU)
}

/// Reduce an angle \[radians\] into the canonical interval [-pi, pi).
pub fn range_reduce(angle: f64) -> f64 {
    (angle + PI).rem_euclid(TAU) - PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ata_reference() -> LatLngHeight {
        LatLngHeight::from_degrees(-121.470733, 40.815987, 1020.86)
    }

    #[test]
    fn range_reduce_canonical_interval() {
        assert_abs_diff_eq!(range_reduce(0.0), 0.0);
        assert_abs_diff_eq!(range_reduce(PI), -PI);
        assert_abs_diff_eq!(range_reduce(-PI), -PI);
        assert_abs_diff_eq!(range_reduce(3.0 * PI), -PI);
        assert_abs_diff_eq!(range_reduce(TAU + 0.25), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(range_reduce(-TAU - 0.25), -0.25, epsilon = 1e-12);
        for angle in [-100.0, -5.0, 2.0, 7.0, 1e4] {
            let reduced = range_reduce(angle);
            assert!((-PI..PI).contains(&reduced), "{angle} -> {reduced}");
        }
    }

    #[test]
    fn direct_and_two_phase_forms_agree() {
        let epoch = Epoch::from_unix_seconds(1649366473.0);
        let radec = RADec::new(0.64169, 1.079896295);
        let direct = resolve_apparent(radec, ata_reference(), epoch).unwrap();
        let state = ObserverState::new(ata_reference(), epoch).unwrap();
        let two_phase = state.apparent(radec);
        assert_eq!(direct, two_phase);
    }

    #[test]
    fn jd_and_epoch_constructors_agree() {
        let epoch = Epoch::from_unix_seconds(1649366473.0);
        let radec = RADec::new(2.0, -0.3);
        let from_epoch = ObserverState::new(ata_reference(), epoch)
            .unwrap()
            .apparent(radec);
        let from_jd = ObserverState::from_jd(ata_reference(), ERFA_DJM0, epoch.to_mjd_utc_days())
            .unwrap()
            .apparent(radec);
        assert_eq!(from_epoch, from_jd);
    }

    #[test]
    fn apparent_hour_angle_tracks_sidereal_time() {
        // The observed hour angle differs from LST - RA only by the
        // astrometric corrections, which at this declination amount to a few
        // milliradians two decades after J2000.
        let epoch = Epoch::from_unix_seconds(1649366473.0);
        let radec = RADec::new(0.64169, 1.079896295);
        let hadec = resolve_apparent(radec, ata_reference(), epoch).unwrap();
        let lst = local_sidereal_time(ata_reference().longitude_rad, epoch);
        let raw_ha = range_reduce(lst - radec.ra);
        assert_abs_diff_eq!(hadec.ha, raw_ha, epsilon = 1e-2);
        assert_abs_diff_eq!(hadec.dec, radec.dec, epsilon = 1e-2);
    }

    #[test]
    fn earth_rotation_advances_the_hour_angle() {
        // 600 seconds of UT is a little over 600 seconds of sidereal
        // rotation.
        let radec = RADec::new(0.64169, 0.2);
        let e1 = Epoch::from_unix_seconds(1649366473.0);
        let e2 = Epoch::from_unix_seconds(1649366473.0 + 600.0);
        let h1 = resolve_apparent(radec, ata_reference(), e1).unwrap();
        let h2 = resolve_apparent(radec, ata_reference(), e2).unwrap();
        let advance = range_reduce(h2.ha - h1.ha);
        let expected = 600.0 * TAU / 86164.0905;
        assert_abs_diff_eq!(advance, expected, epsilon = 1e-6);
    }
}
