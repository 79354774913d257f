// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{ops::RangeInclusive, sync::Mutex};

use approx::assert_abs_diff_eq;
use hifitime::Duration;

use super::*;
use crate::calculator::{AtlastCalculator, CalculatorError};

/// A calculator whose noise is simply inversely proportional to the bandwidth.
/// All observations asked of it are recorded.
#[derive(Default)]
struct RecordingCalculator {
    observations: Mutex<Vec<Observation>>,
}

impl SensitivityCalculator for RecordingCalculator {
    fn dish_radius_m(&self) -> f64 {
        25.0
    }

    fn freq_range_hz(&self) -> RangeInclusive<f64> {
        0.0..=f64::INFINITY
    }

    fn calc_sensitivity(&self, obs: &Observation) -> Result<f64, CalculatorError> {
        self.observations.lock().unwrap().push(*obs);
        Ok(1e6 / obs.bandwidth_hz)
    }
}

/// A calculator that fails above some frequency.
struct FussyCalculator {
    max_freq_hz: f64,
}

impl SensitivityCalculator for FussyCalculator {
    fn dish_radius_m(&self) -> f64 {
        25.0
    }

    fn freq_range_hz(&self) -> RangeInclusive<f64> {
        0.0..=self.max_freq_hz
    }

    fn calc_sensitivity(&self, obs: &Observation) -> Result<f64, CalculatorError> {
        if obs.freq_hz > self.max_freq_hz {
            return Err(CalculatorError::FreqOutOfRange {
                freq_ghz: obs.freq_hz / 1e9,
                min_ghz: 0.0,
                max_ghz: self.max_freq_hz / 1e9,
            });
        }
        Ok(1.0)
    }
}

fn config(num_samples: usize) -> SweepConfiguration {
    SweepConfiguration::new(
        Octile::new(1).unwrap(),
        45.0,
        1000.0,
        35e9,
        950e9,
        num_samples,
        Duration::from_seconds(3600.0),
    )
    .unwrap()
}

#[test]
fn test_linspace() {
    let v = linspace(35e9, 950e9, 10);
    assert_eq!(v.len(), 10);
    assert_eq!(*v.first(), 35e9);
    assert_eq!(*v.last(), 950e9);
    assert_abs_diff_eq!(v[1], 35e9 + 915e9 / 9.0, epsilon = 1e-3);

    let v = linspace(100e9, 100e9, 1);
    assert_eq!(v.len(), 1);
    assert_eq!(*v.first(), 100e9);

    let v = linspace(1.0, 2.0, 2);
    assert_eq!(v.as_slice(), &[1.0, 2.0]);
}

#[test]
fn test_sweep_example() {
    let calc = RecordingCalculator::default();
    let table = SweepRecorder::new(config(10), &calc).run().unwrap();

    assert_eq!(table.len(), 10);
    let first = table.get(0).unwrap();
    assert_eq!(first.freq_hz, 35e9);
    assert_abs_diff_eq!(first.bandwidth_hz / 1e9, 0.035, epsilon = 1e-15);
    let last = table.get(9).unwrap();
    assert_eq!(last.freq_hz, 950e9);
    assert_abs_diff_eq!(last.bandwidth_hz / 1e9, 0.95, epsilon = 1e-15);
    assert!(table.get(10).is_none());
}

#[test]
fn test_sweep_invariants() {
    let calc = RecordingCalculator::default();
    let table = SweepRecorder::new(config(1000), &calc).run().unwrap();

    assert_eq!(table.len(), 1000);
    assert_eq!(table.bandwidths_hz().len(), 1000);
    assert_eq!(table.rms_noise_jy().len(), 1000);
    assert_eq!(table.fwhm_deg().len(), 1000);

    let freqs = table.freqs_hz();
    assert_eq!(freqs[0], 35e9);
    assert_eq!(freqs[999], 950e9);
    assert!(freqs.windows(2).all(|w| w[0] < w[1]));

    for point in table.iter() {
        assert_eq!(point.bandwidth_hz, point.freq_hz / 1000.0);
        assert_eq!(point.rms_noise_jy, 1e6 / point.bandwidth_hz);
        assert!(point.beam_area_deg2() > 0.0);
    }
    assert!(table.fwhm_deg().windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_sweep_passes_everything_to_the_calculator() {
    let calc = RecordingCalculator::default();
    let config = SweepConfiguration::new(
        Octile::new(3).unwrap(),
        60.0,
        500.0,
        100e9,
        200e9,
        5,
        Duration::from_seconds(1800.0),
    )
    .unwrap();
    let table = SweepRecorder::new(config, &calc).run().unwrap();

    let observations = calc.observations.into_inner().unwrap();
    assert_eq!(observations.len(), 5);
    for (obs, &freq_hz) in observations.iter().zip(table.freqs_hz()) {
        assert_eq!(obs.freq_hz, freq_hz);
        assert_eq!(obs.bandwidth_hz, freq_hz / 500.0);
        assert_abs_diff_eq!(obs.weather_percentile, 37.5);
        assert_abs_diff_eq!(obs.elevation_rad, 60.0_f64.to_radians());
        assert_abs_diff_eq!(obs.integration_time.to_seconds(), 1800.0);
    }
    assert_abs_diff_eq!(
        observations.iter().map(|o| o.freq_hz).sum::<f64>(),
        (100e9 + 125e9 + 150e9 + 175e9 + 200e9),
        epsilon = 1e-3
    );
}

#[test]
fn test_sweep_is_deterministic() {
    let calc = AtlastCalculator::default();
    let table1 = SweepRecorder::new(config(200), &calc).run().unwrap();
    let table2 = SweepRecorder::new(config(200), &calc).run().unwrap();
    assert_eq!(table1, table2);
    for (a, b) in table1.rms_noise_jy().iter().zip(table2.rms_noise_jy()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn test_sweep_propagates_calculator_errors() {
    let calc = FussyCalculator { max_freq_hz: 500e9 };
    let result = SweepRecorder::new(config(10), &calc).run();
    match result {
        Err(SweepError::Calculator(CalculatorError::FreqOutOfRange { freq_ghz, .. })) => {
            assert!(freq_ghz > 500.0)
        }
        other => panic!("expected a calculator error, got {other:?}"),
    }
}

#[test]
fn test_single_sample_sweep() {
    let calc = RecordingCalculator::default();
    let config = SweepConfiguration::new(
        Octile::default(),
        45.0,
        1000.0,
        230e9,
        230e9,
        1,
        Duration::from_seconds(60.0),
    )
    .unwrap();
    let table = SweepRecorder::new(config, &calc).run().unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.freqs_hz(), &[230e9]);
}

#[test]
fn test_bad_configurations() {
    let octile = Octile::default();
    let t = Duration::from_seconds(3600.0);

    let result = SweepConfiguration::new(octile, 0.0, 1000.0, 35e9, 950e9, 10, t);
    assert!(matches!(result, Err(SweepError::BadElevation(_))));
    let result = SweepConfiguration::new(octile, 91.0, 1000.0, 35e9, 950e9, 10, t);
    assert!(matches!(result, Err(SweepError::BadElevation(_))));

    let result = SweepConfiguration::new(octile, 45.0, 0.0, 35e9, 950e9, 10, t);
    assert!(matches!(result, Err(SweepError::BadResolvingPower(_))));
    let result = SweepConfiguration::new(octile, 45.0, f64::NAN, 35e9, 950e9, 10, t);
    assert!(matches!(result, Err(SweepError::BadResolvingPower(_))));

    let result = SweepConfiguration::new(octile, 45.0, 1000.0, 950e9, 35e9, 10, t);
    assert!(matches!(result, Err(SweepError::BadFreqRange { .. })));
    let result = SweepConfiguration::new(octile, 45.0, 1000.0, -1.0, 35e9, 10, t);
    assert!(matches!(result, Err(SweepError::BadFreqRange { .. })));
    let result = SweepConfiguration::new(octile, 45.0, 1000.0, 35e9, 35e9, 10, t);
    assert!(matches!(result, Err(SweepError::BadFreqRange { .. })));

    let result = SweepConfiguration::new(octile, 45.0, 1000.0, 35e9, 950e9, 0, t);
    assert!(matches!(result, Err(SweepError::NoSamples)));
    let result = SweepConfiguration::new(octile, 45.0, 1000.0, 35e9, 950e9, 1, t);
    assert!(matches!(result, Err(SweepError::SingleSampleRange { .. })));

    let result = SweepConfiguration::new(
        octile,
        45.0,
        1000.0,
        35e9,
        950e9,
        10,
        Duration::from_seconds(0.0),
    );
    assert!(matches!(result, Err(SweepError::BadIntegrationTime(_))));
}

#[test]
fn test_range_narrower_than_samples_is_rejected() {
    let octile = Octile::default();
    let t = Duration::from_seconds(3600.0);
    let lo = 100e9_f64;
    // Only 5 representable floats between the bounds.
    let hi = f64::from_bits(lo.to_bits() + 4);

    let result = SweepConfiguration::new(octile, 45.0, 1000.0, lo, hi, 10, t);
    assert!(matches!(
        result,
        Err(SweepError::FreqRangeTooNarrow {
            num_samples: 10,
            ..
        })
    ));

    // As many samples as there are floats is fine.
    let config = SweepConfiguration::new(octile, 45.0, 1000.0, lo, hi, 5, t).unwrap();
    let freqs = config.frequencies_hz();
    assert!(freqs.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(*freqs.first(), lo);
    assert_eq!(*freqs.last(), hi);
}

#[test]
fn test_default_configuration() {
    let config = SweepConfiguration::default();
    assert_eq!(config.num_samples(), 1000);
    assert_eq!(config.freq_range_hz(), (35e9, 950e9));
    assert_abs_diff_eq!(config.resolving_power(), 1000.0);
    assert_abs_diff_eq!(config.elevation_deg(), 45.0);
    assert_eq!(config.octile().index(), 1);
    assert_abs_diff_eq!(config.integration_time().to_seconds(), 3600.0);
}

#[test]
fn test_misaligned_columns_are_rejected() {
    let result = ResultTable::from_columns(
        config(2),
        vec![35e9, 950e9],
        vec![35e6, 950e6],
        vec![1.0],
        vec![0.1, 0.01],
    );
    assert!(matches!(
        result,
        Err(SweepError::MisalignedColumns([2, 2, 1, 2]))
    ));
}
