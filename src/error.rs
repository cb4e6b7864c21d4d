// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all delay-engine-related errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DelayError {
    #[error("The antenna table is empty; the delay reference antenna is undefined")]
    NoAntennas,

    #[error("Got {names} antenna names for {positions} antenna positions")]
    MismatchedAntennaMeta { names: usize, positions: usize },

    #[error("Could not acquire per-block working buffers: {0}")]
    Buffers(#[from] std::collections::TryReserveError),

    #[error("{0}")]
    Apparent(#[from] crate::apparent::ApparentError),
}
