// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision, and in SI units unless the name says
otherwise.
 */

pub use std::f64::consts::{FRAC_PI_2, PI};

/// Speed of light \[m/s\].
pub const VEL_C: f64 = 299_792_458.0;

/// Boltzmann constant \[J/K\].
pub const K_BOLTZMANN: f64 = 1.380_649e-23;

/// Planck constant \[J s\].
pub const H_PLANCK: f64 = 6.626_070_15e-34;

/// One jansky \[W m^-2 Hz^-1\].
pub const JANSKY: f64 = 1e-26;

/// Temperature of the cosmic microwave background \[K\].
pub const T_CMB: f64 = 2.726;

/// The lowest frequency the AtLAST receivers are expected to cover \[Hz\].
pub const ATLAST_FREQ_MIN_HZ: f64 = 35e9;

/// The highest frequency the AtLAST receivers are expected to cover \[Hz\].
pub const ATLAST_FREQ_MAX_HZ: f64 = 950e9;

/// Radius of the AtLAST primary mirror \[m\].
pub const ATLAST_DISH_RADIUS_M: f64 = 25.0;

/// The ratio between the beam FWHM and lambda / D for an illumination-tapered
/// aperture.
pub const BEAM_FWHM_FACTOR: f64 = 1.20;

/// The default spectral resolving power (nu / dnu).
pub const DEFAULT_RESOLVING_POWER: f64 = 1000.0;

/// The default number of frequencies in a sweep.
pub const DEFAULT_NUM_SAMPLES: usize = 1000;

/// The default elevation of an observation \[degrees\].
pub const DEFAULT_ELEVATION_DEG: f64 = 45.0;

/// The default integration time \[seconds\].
pub const DEFAULT_INTEGRATION_TIME_S: f64 = 3600.0;

/// The default directory that sweep tables are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "output";
