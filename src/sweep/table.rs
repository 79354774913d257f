// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::{SweepConfiguration, SweepError};
use crate::calculator::gaussian_beam_area;

/// The results of a sweep at a single frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    /// \[Hz\]
    pub freq_hz: f64,

    /// \[Hz\]
    pub bandwidth_hz: f64,

    /// \[Jy\]
    pub rms_noise_jy: f64,

    /// Beam full width at half maximum \[degrees\].
    pub fwhm_deg: f64,
}

impl SamplePoint {
    /// The solid angle of the (Gaussian) beam \[square degrees\]. This isn't
    /// written out with tables, but it's handy for converting the noise into
    /// surface-brightness units.
    pub fn beam_area_deg2(&self) -> f64 {
        gaussian_beam_area(self.fwhm_deg)
    }
}

/// The results of a sweep, alongside the configuration that produced them.
///
/// The results are stored as columns, which always have the same length.
/// Tables can only be grown inside this crate; once handed out, they are
/// effectively immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    config: SweepConfiguration,
    freqs_hz: Vec<f64>,
    bandwidths_hz: Vec<f64>,
    rms_noise_jy: Vec<f64>,
    fwhm_deg: Vec<f64>,
}

impl ResultTable {
    pub(crate) fn new(config: SweepConfiguration) -> ResultTable {
        let n = config.num_samples();
        ResultTable {
            config,
            freqs_hz: Vec::with_capacity(n),
            bandwidths_hz: Vec::with_capacity(n),
            rms_noise_jy: Vec::with_capacity(n),
            fwhm_deg: Vec::with_capacity(n),
        }
    }

    /// Assemble a table from its columns, e.g. after reading a file.
    pub(crate) fn from_columns(
        config: SweepConfiguration,
        freqs_hz: Vec<f64>,
        bandwidths_hz: Vec<f64>,
        rms_noise_jy: Vec<f64>,
        fwhm_deg: Vec<f64>,
    ) -> Result<ResultTable, SweepError> {
        let lengths = [
            freqs_hz.len(),
            bandwidths_hz.len(),
            rms_noise_jy.len(),
            fwhm_deg.len(),
        ];
        if lengths.iter().any(|&l| l != lengths[0]) {
            return Err(SweepError::MisalignedColumns(lengths));
        }

        Ok(ResultTable {
            config,
            freqs_hz,
            bandwidths_hz,
            rms_noise_jy,
            fwhm_deg,
        })
    }

    pub(crate) fn push(&mut self, point: SamplePoint) {
        let SamplePoint {
            freq_hz,
            bandwidth_hz,
            rms_noise_jy,
            fwhm_deg,
        } = point;
        self.freqs_hz.push(freq_hz);
        self.bandwidths_hz.push(bandwidth_hz);
        self.rms_noise_jy.push(rms_noise_jy);
        self.fwhm_deg.push(fwhm_deg);
    }

    pub fn config(&self) -> &SweepConfiguration {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.freqs_hz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freqs_hz.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<SamplePoint> {
        Some(SamplePoint {
            freq_hz: *self.freqs_hz.get(index)?,
            bandwidth_hz: self.bandwidths_hz[index],
            rms_noise_jy: self.rms_noise_jy[index],
            fwhm_deg: self.fwhm_deg[index],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = SamplePoint> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }

    /// \[Hz\]
    pub fn freqs_hz(&self) -> &[f64] {
        &self.freqs_hz
    }

    /// \[Hz\]
    pub fn bandwidths_hz(&self) -> &[f64] {
        &self.bandwidths_hz
    }

    /// \[Jy\]
    pub fn rms_noise_jy(&self) -> &[f64] {
        &self.rms_noise_jy
    }

    /// \[degrees\]
    pub fn fwhm_deg(&self) -> &[f64] {
        &self.fwhm_deg
    }
}
