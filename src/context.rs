// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Validated, immutable per-run data for the delay pipeline.
 */

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::coord::{LatLngHeight, RADec, XyzGeocentric, XyzLocal};
use crate::error::DelayError;

/// One antenna of the array: a geocentric position plus a human-readable
/// name for reporting.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Antenna {
    pub name: String,
    pub position: XyzGeocentric,
}

/// Everything a block needs other than its epoch: the antenna table, the
/// array reference position, the precomputed array-local antenna geometry,
/// the boresight and the beam set.
///
/// Construction fails fast on precondition violations (empty antenna table,
/// mismatched table lengths); a successfully built context always has at
/// least one antenna and `local_xyzs` in antenna order with index 0 at the
/// origin. Each block is a pure function of this data and an epoch, so a
/// context can be cloned (or shared behind an `Arc`) to run blocks
/// concurrently, each with its own working buffers.
#[derive(Clone, Debug)]
pub struct DelayContext {
    pub(crate) antennas: Vec<Antenna>,
    pub(crate) reference_position: LatLngHeight,
    pub(crate) local_xyzs: Vec<XyzLocal>,
    pub(crate) boresight: RADec,
    pub(crate) beams: Vec<RADec>,
}

impl DelayContext {
    /// Validate the run configuration and derive the array-local antenna
    /// geometry. Antenna index 0 is the delay reference. An empty beam set
    /// is valid; an empty antenna table is not.
    pub fn new(
        antennas: Vec<Antenna>,
        reference_position: LatLngHeight,
        boresight: RADec,
        beams: Vec<RADec>,
    ) -> Result<DelayContext, DelayError> {
        if antennas.is_empty() {
            return Err(DelayError::NoAntennas);
        }
        let positions: Vec<XyzGeocentric> = antennas.iter().map(|a| a.position).collect();
        let local_xyzs = XyzGeocentric::to_local(&positions, reference_position);
        Ok(DelayContext {
            antennas,
            reference_position,
            local_xyzs,
            boresight,
            beams,
        })
    }

    /// As [`DelayContext::new`], but from parallel name and position tables,
    /// which is how antenna tables usually arrive. Fails fast if the lengths
    /// disagree rather than silently truncating.
    pub fn from_parts(
        names: Vec<String>,
        positions: Vec<XyzGeocentric>,
        reference_position: LatLngHeight,
        boresight: RADec,
        beams: Vec<RADec>,
    ) -> Result<DelayContext, DelayError> {
        if names.len() != positions.len() {
            return Err(DelayError::MismatchedAntennaMeta {
                names: names.len(),
                positions: positions.len(),
            });
        }
        let antennas = names
            .into_iter()
            .zip(positions)
            .map(|(name, position)| Antenna { name, position })
            .collect();
        Self::new(antennas, reference_position, boresight, beams)
    }

    /// Replace the beam set for subsequent blocks.
    pub fn set_beams(&mut self, beams: Vec<RADec>) {
        self.beams = beams;
    }

    pub fn antennas(&self) -> &[Antenna] {
        &self.antennas
    }

    /// The array-local antenna geometry, in antenna order.
    pub fn local_xyzs(&self) -> &[XyzLocal] {
        &self.local_xyzs
    }

    pub fn reference_position(&self) -> LatLngHeight {
        self.reference_position
    }

    pub fn boresight(&self) -> RADec {
        self.boresight
    }

    pub fn beams(&self) -> &[RADec] {
        &self.beams
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_antenna_table_is_rejected() {
        let result = DelayContext::new(
            vec![],
            LatLngHeight::from_degrees(0.0, 0.0, 0.0),
            RADec::new(0.0, 0.0),
            vec![],
        );
        assert!(matches!(result, Err(DelayError::NoAntennas)));
    }

    #[test]
    fn mismatched_tables_are_rejected() {
        let result = DelayContext::from_parts(
            vec!["1C".to_string(), "1E".to_string()],
            vec![XyzGeocentric::default()],
            LatLngHeight::from_degrees(0.0, 0.0, 0.0),
            RADec::new(0.0, 0.0),
            vec![],
        );
        assert!(matches!(
            result,
            Err(DelayError::MismatchedAntennaMeta {
                names: 2,
                positions: 1
            })
        ));
    }

    #[test]
    fn local_geometry_is_precomputed_in_antenna_order() {
        let context = DelayContext::from_parts(
            vec!["ref".to_string(), "b".to_string()],
            vec![
                XyzGeocentric {
                    x: 10.0,
                    y: 20.0,
                    z: 30.0,
                },
                XyzGeocentric {
                    x: 13.0,
                    y: 20.0,
                    z: 34.0,
                },
            ],
            LatLngHeight {
                longitude_rad: 0.0,
                latitude_rad: 0.5,
                height_metres: 0.0,
            },
            RADec::new(0.0, 0.0),
            vec![],
        )
        .unwrap();
        assert_eq!(context.local_xyzs().len(), 2);
        assert_eq!(context.local_xyzs()[0].x, 0.0);
        assert_eq!(context.local_xyzs()[1].x, 3.0);
        assert_eq!(context.local_xyzs()[1].z, 4.0);
    }
}
