// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to abstract sensitivity calculations.
//!
//! [`SensitivityCalculator`] is a trait detailing how to get the RMS noise of
//! an observation. Everything a calculator needs is supplied in an
//! [`Observation`]; calculators hold no per-observation state, so the same
//! calculator can be asked about many observations in any order.
//!
//! [`AtlastCalculator`] is the built-in calculator, which evaluates the
//! radiometer equation for the AtLAST telescope.

mod atlast;
pub mod atmosphere;
mod beam;
mod error;

pub use atlast::AtlastCalculator;
pub use beam::{estimate_beam_geometry, BeamGeometry};
pub(crate) use beam::gaussian_beam_area;
pub use error::CalculatorError;

use std::ops::RangeInclusive;

use hifitime::Duration;

/// Everything needed to estimate the sensitivity of a single observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// The observing frequency \[Hz\].
    pub freq_hz: f64,

    /// The bandwidth of the spectral channel \[Hz\].
    pub bandwidth_hz: f64,

    /// The weather percentile \[percent\]. Lower is drier.
    pub weather_percentile: f64,

    /// The elevation of the source \[radians\].
    pub elevation_rad: f64,

    /// The on-source integration time.
    pub integration_time: Duration,
}

/// A trait abstracting sensitivity calculators.
pub trait SensitivityCalculator: Sync + Send {
    /// The radius of the telescope's primary mirror \[metres\].
    fn dish_radius_m(&self) -> f64;

    /// The frequencies that this calculator can be used at \[Hz\].
    fn freq_range_hz(&self) -> RangeInclusive<f64>;

    /// Calculate the RMS noise of an observation \[Jy\].
    fn calc_sensitivity(&self, obs: &Observation) -> Result<f64, CalculatorError>;
}
