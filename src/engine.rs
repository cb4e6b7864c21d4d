// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
The block scheduler: owns the immutable run configuration and the reusable
per-block working buffers, and runs one pipeline execution per block tick.
 */

use hifitime::Epoch;
use log::{debug, info};

use crate::context::DelayContext;
use crate::coord::{RADec, UVW};
use crate::delays::{solve_block, DelaySolution};
use crate::error::DelayError;

/// Working storage for one in-flight block. Never share one of these
/// between concurrently executing blocks; give each its own.
///
/// The buffers are sized on first use and resized only when the antenna
/// count changes, not on every block. Growth goes through `try_reserve` so
/// that allocation failure surfaces as [`DelayError::Buffers`] instead of
/// aborting or computing into undersized storage.
#[derive(Debug, Default)]
pub struct BlockBuffers {
    pub(crate) uvws: Vec<UVW>,
}

impl BlockBuffers {
    pub fn new() -> BlockBuffers {
        BlockBuffers::default()
    }

    /// Make the buffers track `n_antennas` exactly.
    pub(crate) fn ensure(&mut self, n_antennas: usize) -> Result<(), DelayError> {
        if self.uvws.capacity() < n_antennas {
            debug!(
                "growing block buffers from {} to {n_antennas} antennas",
                self.uvws.capacity()
            );
            self.uvws.try_reserve_exact(n_antennas - self.uvws.len())?;
        } else if self.uvws.capacity() > n_antennas {
            debug!(
                "shrinking block buffers from {} to {n_antennas} antennas",
                self.uvws.capacity()
            );
            self.uvws.truncate(n_antennas);
            self.uvws.shrink_to(n_antennas);
        }
        Ok(())
    }
}

/// Drives the delay pipeline: one [`DelayContext`] plus one set of
/// [`BlockBuffers`], producing one [`DelaySolution`] per block tick.
///
/// The engine itself runs blocks sequentially. Callers wanting several
/// blocks in flight should instead share the context and call
/// [`solve_block`] with per-block buffers.
pub struct DelayEngine {
    context: DelayContext,
    buffers: BlockBuffers,
}

impl DelayEngine {
    pub fn new(context: DelayContext) -> DelayEngine {
        info!(
            "delay engine: {} antennas, {} beams, reference at lon {:.6} rad, lat {:.6} rad, height {:.1} m",
            context.antennas().len(),
            context.beams().len(),
            context.reference_position().longitude_rad,
            context.reference_position().latitude_rad,
            context.reference_position().height_metres,
        );
        DelayEngine {
            context,
            buffers: BlockBuffers::new(),
        }
    }

    pub fn context(&self) -> &DelayContext {
        &self.context
    }

    /// Replace the beam set for subsequent blocks.
    pub fn set_beams(&mut self, beams: Vec<RADec>) {
        self.context.set_beams(beams);
    }

    /// Run one block tick at the given epoch.
    pub fn solve(&mut self, epoch: Epoch) -> Result<DelaySolution, DelayError> {
        solve_block(&self.context, epoch, &mut self.buffers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffers_grow_once_and_track_the_antenna_count() {
        let mut buffers = BlockBuffers::new();
        buffers.ensure(20).unwrap();
        assert!(buffers.uvws.capacity() >= 20);

        // Same count: no observable change.
        let capacity = buffers.uvws.capacity();
        buffers.ensure(capacity).unwrap();
        assert_eq!(buffers.uvws.capacity(), capacity);

        // Fewer antennas: the buffers shrink to match.
        buffers.ensure(5).unwrap();
        assert!(buffers.uvws.capacity() >= 5 && buffers.uvws.capacity() < capacity);
    }
}
