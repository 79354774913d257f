// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Run a sensitivity sweep and write out the results.

use std::path::PathBuf;

use log::info;
use thiserror::Error;

use crate::{
    calculator::AtlastCalculator,
    io::{write_table, TableWriteError},
    sweep::{SweepConfiguration, SweepError, SweepRecorder},
};

/// Parameters needed to do a sensitivity sweep.
pub(crate) struct SweepParams {
    pub(crate) config: SweepConfiguration,

    /// The calculator visited at each frequency.
    pub(crate) calculator: AtlastCalculator,

    /// Where the table is written.
    pub(crate) output: PathBuf,
}

impl SweepParams {
    pub(crate) fn run(&self) -> Result<(), SweepRunError> {
        let SweepParams {
            config,
            calculator,
            output,
        } = self;

        let recorder = SweepRecorder::new(config.clone(), calculator);
        let table = recorder.run()?;
        info!("Estimated the sensitivity at {} frequencies", table.len());

        write_table(&table, output)?;
        info!("Sensitivity table written to {}", output.display());
        Ok(())
    }
}

#[derive(Error, Debug)]
pub(crate) enum SweepRunError {
    #[error(transparent)]
    Sweep(#[from] SweepError),

    #[error(transparent)]
    TableWrite(#[from] TableWriteError),
}
