// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with sensitivity calculations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    #[error("Frequency {freq_ghz} GHz is outside the range supported by the calculator ({min_ghz} to {max_ghz} GHz)")]
    FreqOutOfRange {
        freq_ghz: f64,
        min_ghz: f64,
        max_ghz: f64,
    },

    #[error("Bandwidth must be positive, but got {bandwidth_ghz} GHz")]
    BadBandwidth { bandwidth_ghz: f64 },

    #[error("Elevation must be above 0 and at most 90 degrees, but got {elevation_deg} degrees")]
    BadElevation { elevation_deg: f64 },

    #[error("Weather percentile must be between {min} and {max}, but got {percentile}")]
    BadWeather { percentile: f64, min: f64, max: f64 },

    #[error("Integration time must be positive, but got {seconds} s")]
    BadIntegrationTime { seconds: f64 },
}
