// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Weather conditions.
//!
//! Site weather is binned into octiles of the precipitable water vapour
//! distribution. Only the seven octile boundaries can be requested; each maps
//! onto a fixed percentile (12.5% steps).

use std::fmt::Display;

use thiserror::Error;

/// The width of a single octile \[percent\].
const OCTILE_WIDTH_PERCENT: f64 = 12.5;

/// A weather octile. The inner index is always between 1 and 7 (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Octile(u8);

impl Octile {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 7;

    pub fn new(index: u8) -> Result<Octile, WeatherError> {
        if (Self::MIN..=Self::MAX).contains(&index) {
            Ok(Octile(index))
        } else {
            Err(WeatherError::OctileOutOfRange(index))
        }
    }

    /// The octile index (1 to 7).
    pub fn index(self) -> u8 {
        self.0
    }

    /// The weather percentile associated with this octile \[percent\].
    pub fn percentile(self) -> f64 {
        OCTILE_WIDTH_PERCENT * f64::from(self.0)
    }

    /// All available octiles, best weather first.
    pub fn all() -> impl Iterator<Item = Octile> {
        (Self::MIN..=Self::MAX).map(Octile)
    }
}

impl Default for Octile {
    fn default() -> Self {
        Octile(Self::MIN)
    }
}

impl TryFrom<u8> for Octile {
    type Error = WeatherError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Octile::new(index)
    }
}

impl Display for Octile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "octile {} ({}th percentile)", self.0, self.percentile())
    }
}

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Weather octile {0} is invalid; octiles must be between {min} and {max}", min = Octile::MIN, max = Octile::MAX)]
    OctileOutOfRange(u8),
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_octile_percentiles() {
        let percentiles: Vec<f64> = Octile::all().map(|o| o.percentile()).collect();
        assert_eq!(percentiles.len(), 7);
        for (i, p) in percentiles.into_iter().enumerate() {
            assert_abs_diff_eq!(p, 12.5 * (i + 1) as f64);
        }
        assert_abs_diff_eq!(Octile::default().percentile(), 12.5);
    }

    #[test]
    fn test_octile_bounds() {
        assert!(Octile::new(0).is_err());
        assert!(Octile::new(8).is_err());
        assert_eq!(Octile::try_from(4).unwrap().index(), 4);
        assert_abs_diff_eq!(Octile::new(7).unwrap().percentile(), 87.5);
    }
}
