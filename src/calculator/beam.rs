// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Closed-form primary-beam geometry.

use std::f64::consts::{LN_2, PI};

use crate::constants::{BEAM_FWHM_FACTOR, VEL_C};

/// The size of a telescope beam at a single frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamGeometry {
    /// Full width at half maximum \[degrees\].
    pub fwhm_deg: f64,

    /// Solid angle of a Gaussian beam with this FWHM \[square degrees\].
    pub area_deg2: f64,
}

/// Get the beam FWHM and solid angle of a dish with radius `dish_radius_m` at
/// frequency `freq_hz`.
pub fn estimate_beam_geometry(freq_hz: f64, dish_radius_m: f64) -> BeamGeometry {
    let fwhm_deg = (BEAM_FWHM_FACTOR * VEL_C / (freq_hz * 2.0 * dish_radius_m))
        .atan()
        .to_degrees();
    BeamGeometry {
        fwhm_deg,
        area_deg2: gaussian_beam_area(fwhm_deg),
    }
}

/// The solid angle of a Gaussian beam. The units are the square of the FWHM's
/// units.
pub(crate) fn gaussian_beam_area(fwhm: f64) -> f64 {
    PI * fwhm * fwhm / 4.0 / LN_2
}
