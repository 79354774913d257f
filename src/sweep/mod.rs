// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Sweep a sensitivity calculator over a range of frequencies.
//!
//! A [`SweepConfiguration`] describes the observation and the frequencies to
//! visit. A [`SweepRecorder`] asks a [`SensitivityCalculator`] about each
//! frequency in turn and packs the answers into a [`ResultTable`].

mod error;
mod table;
#[cfg(test)]
mod tests;

pub use error::SweepError;
pub use table::{ResultTable, SamplePoint};

use hifitime::Duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{debug, trace};
use vec1::Vec1;

use crate::{
    calculator::{estimate_beam_geometry, Observation, SensitivityCalculator},
    constants::{
        ATLAST_FREQ_MAX_HZ, ATLAST_FREQ_MIN_HZ, DEFAULT_ELEVATION_DEG,
        DEFAULT_INTEGRATION_TIME_S, DEFAULT_NUM_SAMPLES, DEFAULT_RESOLVING_POWER,
    },
    weather::Octile,
    PROGRESS_BARS,
};

/// Everything describing a sweep. This cannot be changed after it has been
/// made, and is always valid.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfiguration {
    octile: Octile,
    elevation_deg: f64,
    resolving_power: f64,
    freq_min_hz: f64,
    freq_max_hz: f64,
    num_samples: usize,
    integration_time: Duration,
}

impl SweepConfiguration {
    /// Make a new sweep configuration.
    ///
    /// `num_samples` frequencies are linearly spaced between `freq_min_hz` and
    /// `freq_max_hz` (inclusive). If only one sample is requested, the two
    /// bounds must be the same.
    pub fn new(
        octile: Octile,
        elevation_deg: f64,
        resolving_power: f64,
        freq_min_hz: f64,
        freq_max_hz: f64,
        num_samples: usize,
        integration_time: Duration,
    ) -> Result<SweepConfiguration, SweepError> {
        if !(elevation_deg > 0.0 && elevation_deg <= 90.0) {
            return Err(SweepError::BadElevation(elevation_deg));
        }
        if !(resolving_power.is_finite() && resolving_power > 0.0) {
            return Err(SweepError::BadResolvingPower(resolving_power));
        }
        if !(freq_min_hz.is_finite() && freq_min_hz > 0.0) || !freq_max_hz.is_finite() {
            return Err(SweepError::BadFreqRange {
                min_ghz: freq_min_hz / 1e9,
                max_ghz: freq_max_hz / 1e9,
            });
        }
        match num_samples {
            0 => return Err(SweepError::NoSamples),
            1 if freq_min_hz != freq_max_hz => {
                return Err(SweepError::SingleSampleRange {
                    min_ghz: freq_min_hz / 1e9,
                    max_ghz: freq_max_hz / 1e9,
                })
            }
            1 => (),
            _ if freq_min_hz >= freq_max_hz => {
                return Err(SweepError::BadFreqRange {
                    min_ghz: freq_min_hz / 1e9,
                    max_ghz: freq_max_hz / 1e9,
                })
            }
            _ => {
                // The range must hold `num_samples` distinct floats.
                let freqs = linspace(freq_min_hz, freq_max_hz, num_samples);
                if freqs.windows(2).any(|w| w[0] >= w[1]) {
                    return Err(SweepError::FreqRangeTooNarrow {
                        min_ghz: freq_min_hz / 1e9,
                        max_ghz: freq_max_hz / 1e9,
                        num_samples,
                    });
                }
            }
        }
        let seconds = integration_time.to_seconds();
        if !(seconds > 0.0) {
            return Err(SweepError::BadIntegrationTime(seconds));
        }

        Ok(SweepConfiguration {
            octile,
            elevation_deg,
            resolving_power,
            freq_min_hz,
            freq_max_hz,
            num_samples,
            integration_time,
        })
    }

    pub fn octile(&self) -> Octile {
        self.octile
    }

    /// \[degrees\]
    pub fn elevation_deg(&self) -> f64 {
        self.elevation_deg
    }

    /// R = nu / dnu
    pub fn resolving_power(&self) -> f64 {
        self.resolving_power
    }

    /// The first and last frequencies of the sweep \[Hz\].
    pub fn freq_range_hz(&self) -> (f64, f64) {
        (self.freq_min_hz, self.freq_max_hz)
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn integration_time(&self) -> Duration {
        self.integration_time
    }

    /// The frequencies visited by the sweep, in ascending order \[Hz\]. The
    /// first and last frequencies are exactly the configured bounds.
    pub fn frequencies_hz(&self) -> Vec1<f64> {
        linspace(self.freq_min_hz, self.freq_max_hz, self.num_samples)
    }

    /// The spectral channel width at a frequency \[Hz\].
    pub fn bandwidth_hz(&self, freq_hz: f64) -> f64 {
        freq_hz / self.resolving_power
    }
}

impl Default for SweepConfiguration {
    /// The whole AtLAST band in the best octile, at 45 degrees elevation.
    fn default() -> Self {
        SweepConfiguration {
            octile: Octile::default(),
            elevation_deg: DEFAULT_ELEVATION_DEG,
            resolving_power: DEFAULT_RESOLVING_POWER,
            freq_min_hz: ATLAST_FREQ_MIN_HZ,
            freq_max_hz: ATLAST_FREQ_MAX_HZ,
            num_samples: DEFAULT_NUM_SAMPLES,
            integration_time: Duration::from_seconds(DEFAULT_INTEGRATION_TIME_S),
        }
    }
}

/// `num` linearly-spaced values from `start` to `stop`. `num` must be at least
/// 1. The last value is always `stop`, regardless of float errors.
pub(crate) fn linspace(start: f64, stop: f64, num: usize) -> Vec1<f64> {
    let mut values = Vec1::new(start);
    if num > 1 {
        let step = (stop - start) / (num - 1) as f64;
        values.extend((1..num - 1).map(|i| start + step * i as f64));
        values.push(stop);
    }
    values
}

/// Visits each frequency of a sweep and records what a calculator says.
pub struct SweepRecorder<'a> {
    config: SweepConfiguration,
    calculator: &'a dyn SensitivityCalculator,
}

impl<'a> SweepRecorder<'a> {
    pub fn new(
        config: SweepConfiguration,
        calculator: &'a dyn SensitivityCalculator,
    ) -> SweepRecorder<'a> {
        SweepRecorder { config, calculator }
    }

    pub fn config(&self) -> &SweepConfiguration {
        &self.config
    }

    /// Run the sweep. Any calculator error stops the sweep and is returned
    /// as-is; no partial table is produced.
    pub fn run(&self) -> Result<ResultTable, SweepError> {
        let freqs_hz = self.config.frequencies_hz();
        let dish_radius_m = self.calculator.dish_radius_m();
        debug!(
            "Sweeping {} frequencies with a {dish_radius_m} m dish",
            freqs_hz.len()
        );

        let template =
            "{msg:17}: [{wide_bar:.blue}] {pos:4}/{len:4} frequencies ({elapsed_precise}<{eta_precise})";
        let style = ProgressStyle::default_bar()
            .template(template)
            .unwrap()
            .progress_chars("=> ");
        let progress = ProgressBar::with_draw_target(
            Some(freqs_hz.len() as _),
            if PROGRESS_BARS.load() {
                ProgressDrawTarget::stdout()
            } else {
                ProgressDrawTarget::hidden()
            },
        )
        .with_style(style)
        .with_position(0)
        .with_message("Sensitivities");

        let mut table = ResultTable::new(self.config.clone());
        for (i, &freq_hz) in freqs_hz.iter().enumerate() {
            let bandwidth_hz = self.config.bandwidth_hz(freq_hz);
            let beam = estimate_beam_geometry(freq_hz, dish_radius_m);
            let rms_noise_jy = self.calculator.calc_sensitivity(&Observation {
                freq_hz,
                bandwidth_hz,
                weather_percentile: self.config.octile.percentile(),
                elevation_rad: self.config.elevation_deg.to_radians(),
                integration_time: self.config.integration_time,
            })?;
            trace!(
                "{}/{}: {:.4} GHz, RMS {rms_noise_jy:e} Jy, FWHM {:.3e} deg",
                i + 1,
                freqs_hz.len(),
                freq_hz / 1e9,
                beam.fwhm_deg
            );

            table.push(SamplePoint {
                freq_hz,
                bandwidth_hz,
                rms_noise_jy,
                fwhm_deg: beam.fwhm_deg,
            });
            progress.inc(1);
        }
        progress.abandon_with_message("Finished");

        Ok(table)
    }
}
