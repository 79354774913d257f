// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! An analytic model of (sub-)millimetre atmospheric opacity above a high, dry
//! site.
//!
//! The zenith optical depth is the sum of a "dry" part (molecular oxygen and
//! collision-induced continuum) and a "wet" part that scales linearly with the
//! precipitable water vapour (PWV). Each absorption line is a Lorentzian
//! profile; the continua grow with the square of the frequency. This is not a
//! radiative-transfer code, but it reproduces the familiar atmospheric windows
//! and their dependence on the weather.

/// An absorption line.
struct Line {
    /// \[GHz\]
    centre_ghz: f64,

    /// The optical depth at the line centre. For water lines, this is per mm of
    /// PWV.
    peak_tau: f64,

    /// \[GHz\]
    half_width_ghz: f64,
}

impl Line {
    const fn new(centre_ghz: f64, peak_tau: f64, half_width_ghz: f64) -> Line {
        Line {
            centre_ghz,
            peak_tau,
            half_width_ghz,
        }
    }

    fn tau(&self, freq_ghz: f64) -> f64 {
        let w2 = self.half_width_ghz * self.half_width_ghz;
        let d = freq_ghz - self.centre_ghz;
        self.peak_tau * w2 / (d * d + w2)
    }
}

const DRY_LINES: [Line; 8] = [
    // The 60 GHz oxygen complex is treated as a single line.
    Line::new(60.0, 20.0, 1.5),
    Line::new(118.75, 5.0, 1.5),
    Line::new(368.5, 0.5, 1.5),
    Line::new(424.76, 3.0, 1.5),
    Line::new(487.25, 0.7, 1.5),
    Line::new(715.39, 0.5, 1.5),
    Line::new(773.84, 0.6, 1.5),
    Line::new(834.15, 0.8, 1.5),
];

const WET_LINES: [Line; 9] = [
    Line::new(22.235, 0.003, 3.0),
    Line::new(183.31, 40.0, 1.5),
    Line::new(325.15, 8.0, 1.5),
    Line::new(380.2, 40.0, 1.5),
    Line::new(448.0, 30.0, 1.5),
    Line::new(556.94, 300.0, 1.5),
    Line::new(752.03, 300.0, 1.5),
    Line::new(916.17, 6.0, 1.5),
    Line::new(987.93, 200.0, 1.5),
];

const DRY_CONTINUUM_TAU: f64 = 0.005;
const DRY_CONTINUUM_PER_GHZ2: f64 = 1.5e-7;
const WET_CONTINUUM_PER_MM_PER_GHZ2: f64 = 1.0e-6;

/// PWV \[mm\] at weather percentiles, for a site at ~5000 m altitude. Must be
/// sorted by percentile.
const PWV_PERCENTILES: [(f64, f64); 11] = [
    (0.0, 0.25),
    (5.0, 0.35),
    (12.5, 0.5),
    (25.0, 0.7),
    (37.5, 0.9),
    (50.0, 1.15),
    (62.5, 1.5),
    (75.0, 2.0),
    (87.5, 2.9),
    (95.0, 4.0),
    (100.0, 6.0),
];

/// Get the precipitable water vapour \[mm\] for a weather percentile by
/// linearly interpolating between tabulated values. Percentiles outside 0 to
/// 100 are clamped.
pub fn pwv_from_percentile(percentile: f64) -> f64 {
    let p = percentile.clamp(0.0, 100.0);
    PWV_PERCENTILES
        .windows(2)
        .find(|w| p <= w[1].0)
        .map(|w| {
            let (p0, pwv0) = w[0];
            let (p1, pwv1) = w[1];
            pwv0 + (pwv1 - pwv0) * (p - p0) / (p1 - p0)
        })
        .unwrap_or(PWV_PERCENTILES[PWV_PERCENTILES.len() - 1].1)
}

/// The optical depth towards zenith at `freq_hz` with `pwv_mm` of precipitable
/// water vapour.
pub fn zenith_opacity(freq_hz: f64, pwv_mm: f64) -> f64 {
    let freq_ghz = freq_hz / 1e9;
    let f2 = freq_ghz * freq_ghz;

    let dry = DRY_CONTINUUM_TAU
        + DRY_CONTINUUM_PER_GHZ2 * f2
        + DRY_LINES.iter().map(|l| l.tau(freq_ghz)).sum::<f64>();
    let wet = WET_CONTINUUM_PER_MM_PER_GHZ2 * f2
        + WET_LINES.iter().map(|l| l.tau(freq_ghz)).sum::<f64>();

    dry + pwv_mm * wet
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_pwv_interpolation() {
        assert_abs_diff_eq!(pwv_from_percentile(12.5), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(pwv_from_percentile(50.0), 1.15, epsilon = 1e-12);
        assert_abs_diff_eq!(pwv_from_percentile(18.75), 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(pwv_from_percentile(-10.0), 0.25);
        assert_abs_diff_eq!(pwv_from_percentile(150.0), 6.0);
    }

    #[test]
    fn test_pwv_increases_with_percentile() {
        let pwvs: Vec<f64> = (0..=100).map(|p| pwv_from_percentile(p as f64)).collect();
        assert!(pwvs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_windows_are_more_transparent_than_lines() {
        let pwv = 1.0;
        // The 345 GHz window vs. the 325 and 380 GHz water lines.
        assert!(zenith_opacity(345e9, pwv) < zenith_opacity(325.15e9, pwv));
        assert!(zenith_opacity(345e9, pwv) < zenith_opacity(380.2e9, pwv));
        // The 557 GHz line is opaque.
        assert!(zenith_opacity(556.94e9, pwv) > 100.0);
        // The 60 GHz oxygen complex is opaque regardless of water.
        assert!(zenith_opacity(60e9, 0.0) > 10.0);
        assert!(zenith_opacity(35e9, 0.0) < 0.1);
    }

    #[test]
    fn test_more_water_more_opacity() {
        for freq_hz in [90e9, 230e9, 345e9, 650e9, 850e9] {
            assert!(zenith_opacity(freq_hz, 0.5) < zenith_opacity(freq_hz, 2.0));
        }
    }
}
