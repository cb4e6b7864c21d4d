// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
The per-block delay pipeline.

Each block resolves the boresight, rotates every antenna towards it and
derives the per-antenna boresight delay, then does the same for every beam
and subtracts the boresight geometry. A block's output is all-or-nothing; a
block that fails is simply dropped and recomputing with the same inputs is
the only recovery path.
 */

use hifitime::Epoch;
use itertools::izip;
use log::{log_enabled, trace, Level};
use ndarray::Array2;
use rayon::prelude::*;

use crate::apparent::{local_sidereal_time, resolve_apparent, ObserverState};
use crate::constants::VEL_C;
use crate::context::DelayContext;
use crate::coord::{xyzs_to_uvws_into, HADec, UVW};
use crate::engine::BlockBuffers;
use crate::error::DelayError;

/// The output of one block: every delay is signed, in seconds, relative to
/// the reference antenna (index 0), whose own delay is exactly zero. No
/// state is retained across blocks.
#[derive(Clone, Debug)]
pub struct DelaySolution {
    /// The epoch this solution is valid for.
    pub epoch: Epoch,

    /// The apparent boresight direction at `epoch`.
    pub boresight: HADec,

    /// The local apparent sidereal time at `epoch` \[radians\].
    pub lst: f64,

    /// Per-antenna delay towards the boresight \[seconds\].
    pub boresight_delays: Vec<f64>,

    /// Beam-relative delays \[seconds\], beam-major (beam x antenna). Empty
    /// when the block has no beams.
    pub beam_delays: Array2<f64>,
}

/// Per-antenna delays from rotated antenna positions: the extra distance of
/// each antenna towards the direction over that of the reference antenna,
/// divided by the speed of light. The reference antenna's delay is exactly
/// zero by construction.
fn delays_from_uvws(uvws: &[UVW]) -> Vec<f64> {
    let w_ref = uvws[0].w;
    uvws.iter().map(|uvw| (uvw.w - w_ref) / VEL_C).collect()
}

/// Run one block of the delay pipeline. Pure: the result depends only on
/// the context and the epoch, so concurrent blocks may share a context as
/// long as each holds its own [`BlockBuffers`].
pub fn solve_block(
    context: &DelayContext,
    epoch: Epoch,
    buffers: &mut BlockBuffers,
) -> Result<DelaySolution, DelayError> {
    let n_antennas = context.antennas.len();
    buffers.ensure(n_antennas)?;

    // Boresight stage, using the one-shot resolver form.
    let boresight = resolve_apparent(context.boresight, context.reference_position, epoch)?;
    xyzs_to_uvws_into(&context.local_xyzs, boresight, &mut buffers.uvws);
    let boresight_delays = delays_from_uvws(&buffers.uvws);

    // Beam stage: one observer state for the whole block, then each beam is
    // completely isolated. Workers get private UVW scratch, so nothing
    // mutable is shared across beam iterations.
    let state = ObserverState::new(context.reference_position, epoch)?;
    let mut beam_delays = Array2::zeros((context.beams.len(), n_antennas));
    beam_delays
        .outer_iter_mut()
        .into_par_iter()
        .zip(context.beams.par_iter())
        .for_each_init(
            || Vec::with_capacity(n_antennas),
            |source_uvws, (mut row, beam)| {
                let hadec = state.apparent(*beam);
                xyzs_to_uvws_into(&context.local_xyzs, hadec, source_uvws);
                let w_ref = source_uvws[0].w;
                for (delay, uvw, boresight_delay) in
                    izip!(row.iter_mut(), source_uvws.iter(), &boresight_delays)
                {
                    *delay = boresight_delay - (uvw.w - w_ref) / VEL_C;
                }
            },
        );

    let lst = local_sidereal_time(context.reference_position.longitude_rad, epoch);
    if log_enabled!(Level::Trace) {
        trace!(
            "block at {epoch}: LST {lst:.6} rad, boresight HA {:.6} dec {:.6}",
            boresight.ha,
            boresight.dec
        );
        for (antenna, delay) in izip!(&context.antennas, &boresight_delays) {
            trace!("{}: boresight delay {delay:+.6e} s", antenna.name);
        }
    }

    Ok(DelaySolution {
        epoch,
        boresight,
        lst,
        boresight_delays,
        beam_delays,
    })
}
