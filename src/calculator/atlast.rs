// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The built-in sensitivity calculator for the Atacama Large Aperture
//! Submillimeter Telescope (AtLAST).

use std::ops::RangeInclusive;

use log::trace;

use super::{
    atmosphere::{pwv_from_percentile, zenith_opacity},
    CalculatorError, Observation, SensitivityCalculator,
};
use crate::constants::{
    ATLAST_DISH_RADIUS_M, ATLAST_FREQ_MAX_HZ, ATLAST_FREQ_MIN_HZ, FRAC_PI_2, H_PLANCK, JANSKY,
    K_BOLTZMANN, PI, T_CMB, VEL_C,
};

const MIN_WEATHER_PERCENTILE: f64 = 5.0;
const MAX_WEATHER_PERCENTILE: f64 = 95.0;

/// Allow for float errors when elevations of exactly 90 degrees are converted
/// to radians.
const ELEVATION_TOLERANCE_RAD: f64 = 1e-12;

/// Line-of-sight optical depths larger than this are clipped. The sky is
/// opaque long before this value, and clipping keeps the results finite.
const MAX_OPTICAL_DEPTH: f64 = 100.0;

/// Radiometer-equation sensitivity calculator for a single-dish telescope.
///
/// The default values describe AtLAST: a 50 m dish with a 20 micron surface
/// and dual-polarisation, single-sideband receivers.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlastCalculator {
    /// \[metres\]
    pub dish_radius_m: f64,

    /// RMS surface error of the primary \[metres\].
    pub surface_rms_m: f64,

    /// Ambient temperature of the telescope \[K\].
    pub t_amb: f64,

    /// Physical temperature of the atmosphere \[K\].
    pub t_atm: f64,

    /// Receiver noise temperature in units of the quantum limit (h nu / k).
    pub receiver_quantum_factor: f64,

    /// Sideband ratio; 0 for single-sideband receivers.
    pub sideband_ratio: f64,

    /// Number of polarisations.
    pub num_pol: u8,

    /// Forward efficiency.
    pub eta_eff: f64,

    /// Illumination efficiency.
    pub eta_ill: f64,

    /// Spillover efficiency.
    pub eta_spill: f64,

    /// Blockage efficiency.
    pub eta_block: f64,

    /// Polarisation efficiency.
    pub eta_pol: f64,

    /// Correlator quantisation efficiency.
    pub eta_q: f64,
}

impl Default for AtlastCalculator {
    fn default() -> Self {
        Self {
            dish_radius_m: ATLAST_DISH_RADIUS_M,
            surface_rms_m: 20e-6,
            t_amb: 270.0,
            t_atm: 260.0,
            receiver_quantum_factor: 5.0,
            sideband_ratio: 0.0,
            num_pol: 2,
            eta_eff: 0.95,
            eta_ill: 0.8,
            eta_spill: 0.95,
            eta_block: 0.94,
            eta_pol: 0.995,
            eta_q: 0.96,
        }
    }
}

impl AtlastCalculator {
    /// The default calculator, but with a different dish radius.
    pub fn with_dish_radius(dish_radius_m: f64) -> AtlastCalculator {
        AtlastCalculator {
            dish_radius_m,
            ..Default::default()
        }
    }

    /// Aperture efficiency, including the Ruze surface loss.
    fn aperture_efficiency(&self, freq_hz: f64) -> f64 {
        let wavelength_m = VEL_C / freq_hz;
        let ruze = (-(4.0 * PI * self.surface_rms_m / wavelength_m).powi(2)).exp();
        self.eta_ill * self.eta_spill * self.eta_block * self.eta_pol * ruze
    }

    /// System temperature \[K\], referred to outside the atmosphere.
    fn system_temperature(&self, freq_hz: f64, transmission: f64) -> f64 {
        let t_rx = self.receiver_quantum_factor * H_PLANCK * freq_hz / K_BOLTZMANN;
        let t_sky = self.t_atm * (1.0 - transmission) + T_CMB * transmission;
        (1.0 + self.sideband_ratio) / (self.eta_eff * transmission)
            * (t_rx + self.eta_eff * t_sky + (1.0 - self.eta_eff) * self.t_amb)
    }

    fn validate(&self, obs: &Observation) -> Result<(), CalculatorError> {
        let range = self.freq_range_hz();
        if !range.contains(&obs.freq_hz) {
            return Err(CalculatorError::FreqOutOfRange {
                freq_ghz: obs.freq_hz / 1e9,
                min_ghz: range.start() / 1e9,
                max_ghz: range.end() / 1e9,
            });
        }
        if !(obs.bandwidth_hz > 0.0) {
            return Err(CalculatorError::BadBandwidth {
                bandwidth_ghz: obs.bandwidth_hz / 1e9,
            });
        }
        if !(obs.elevation_rad > 0.0 && obs.elevation_rad <= FRAC_PI_2 + ELEVATION_TOLERANCE_RAD) {
            return Err(CalculatorError::BadElevation {
                elevation_deg: obs.elevation_rad.to_degrees(),
            });
        }
        if !(MIN_WEATHER_PERCENTILE..=MAX_WEATHER_PERCENTILE).contains(&obs.weather_percentile) {
            return Err(CalculatorError::BadWeather {
                percentile: obs.weather_percentile,
                min: MIN_WEATHER_PERCENTILE,
                max: MAX_WEATHER_PERCENTILE,
            });
        }
        let seconds = obs.integration_time.to_seconds();
        if !(seconds > 0.0) {
            return Err(CalculatorError::BadIntegrationTime { seconds });
        }

        Ok(())
    }
}

impl SensitivityCalculator for AtlastCalculator {
    fn dish_radius_m(&self) -> f64 {
        self.dish_radius_m
    }

    fn freq_range_hz(&self) -> RangeInclusive<f64> {
        ATLAST_FREQ_MIN_HZ..=ATLAST_FREQ_MAX_HZ
    }

    fn calc_sensitivity(&self, obs: &Observation) -> Result<f64, CalculatorError> {
        self.validate(obs)?;

        let airmass = 1.0 / obs.elevation_rad.sin();
        let pwv_mm = pwv_from_percentile(obs.weather_percentile);
        let tau = (zenith_opacity(obs.freq_hz, pwv_mm) * airmass).min(MAX_OPTICAL_DEPTH);
        let transmission = (-tau).exp();

        let t_sys = self.system_temperature(obs.freq_hz, transmission);
        let area_m2 = PI * self.dish_radius_m * self.dish_radius_m;
        let sefd = 2.0 * K_BOLTZMANN * t_sys / (self.aperture_efficiency(obs.freq_hz) * area_m2);
        let sigma = sefd
            / (self.eta_q
                * (f64::from(self.num_pol) * obs.bandwidth_hz * obs.integration_time.to_seconds())
                    .sqrt());
        trace!(
            "{:.3} GHz: PWV {pwv_mm:.2} mm, tau {tau:.4}, T_sys {t_sys:.2} K",
            obs.freq_hz / 1e9
        );

        Ok(sigma / JANSKY)
    }
}
