// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Sweep a single-dish (sub-)millimetre telescope sensitivity calculator over a
frequency range and record the results in FITS tables.
 */

pub mod calculator;
mod cli;
pub mod constants;
pub mod io;
mod params;
pub mod sweep;
pub(crate) mod unit_parsing;
pub mod weather;

// Re-exports.
pub use calculator::{AtlastCalculator, CalculatorError, Observation, SensitivityCalculator};
pub use cli::{Sensweep, SensweepError};
pub use sweep::{ResultTable, SamplePoint, SweepConfiguration, SweepError, SweepRecorder};
pub use weather::Octile;

use crossbeam_utils::atomic::AtomicCell;

/// Should progress bars be drawn? This is switched on by the CLI; library
/// users get no progress bars unless they ask for them.
pub static PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);
