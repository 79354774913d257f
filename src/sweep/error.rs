// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with frequency sweeps.

use thiserror::Error;

use crate::calculator::CalculatorError;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("The elevation must be above 0 and at most 90 degrees, but got {0}")]
    BadElevation(f64),

    #[error("The spectral resolving power must be positive, but got {0}")]
    BadResolvingPower(f64),

    #[error("The frequency range {min_ghz} to {max_ghz} GHz is invalid; the lower bound must be positive and below the upper bound")]
    BadFreqRange { min_ghz: f64, max_ghz: f64 },

    #[error("A single sample was requested, but the frequency bounds differ ({min_ghz} and {max_ghz} GHz)")]
    SingleSampleRange { min_ghz: f64, max_ghz: f64 },

    #[error("The frequency range {min_ghz} to {max_ghz} GHz is too narrow to hold {num_samples} distinct frequencies")]
    FreqRangeTooNarrow {
        min_ghz: f64,
        max_ghz: f64,
        num_samples: usize,
    },

    #[error("The number of samples cannot be 0")]
    NoSamples,

    #[error("The integration time must be positive, but got {0} s")]
    BadIntegrationTime(f64),

    #[error("The table columns have different lengths ({0:?})")]
    MisalignedColumns([usize; 4]),

    #[error(transparent)]
    Calculator(#[from] CalculatorError),
}
