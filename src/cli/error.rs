// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all sensweep-related errors. This should be the *only* error
//! enum that is publicly visible.

use thiserror::Error;

use super::{sweep::SweepArgsError, table_verify::TableVerifyError};
use crate::{
    calculator::CalculatorError,
    io::{FitsError, TableWriteError},
    params::SweepRunError,
    sweep::SweepError,
    weather::{Octile, WeatherError},
};

const ARG_FILE_HINT: &str =
    "Argument files are TOML or JSON; their sections are named after the `sweep` help headings (e.g. [observation]).";

/// The *only* publicly visible error from sensweep. Where a hint can help the
/// user, it's included in the message.
#[derive(Error, Debug)]
pub enum SensweepError {
    /// An error related to the sweep configuration.
    #[error("{0}")]
    Sweep(String),

    /// An error from the sensitivity calculator.
    #[error("{0}\n\nThe built-in calculator describes a 50 m dish observing between 35 and 950 GHz.")]
    Calculator(String),

    /// An error related to weather.
    #[error("{0}\n\nOctile 1 is the best weather, octile {max} the worst.", max = Octile::MAX)]
    Weather(String),

    /// An error related to parsing quantities with units.
    #[error("{0}\n\nFrequencies may have the units Hz, kHz, MHz or GHz (default GHz); times may have the units s, min or h (default s).")]
    Units(String),

    /// An error related to reading or writing sensitivity tables.
    #[error("{0}")]
    Table(String),

    /// An error related to argument files.
    #[error("{0}\n\n{ARG_FILE_HINT}")]
    ArgFile(String),

    /// A cfitsio error. Because these are usually quite spartan, some
    /// suggestions are provided here.
    #[error("cfitsio error: {0}\n\nIf you don't know what this means, try turning up verbosity (-v or -vv) and maybe disabling progress bars.")]
    Cfitsio(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

// Binary sub-command errors.

impl From<SweepArgsError> for SensweepError {
    fn from(e: SweepArgsError) -> Self {
        let s = e.to_string();
        match e {
            SweepArgsError::ParseFreq { .. } | SweepArgsError::ParseIntegrationTime(_) => {
                Self::Units(s)
            }
            SweepArgsError::BadDishRadius(_) | SweepArgsError::OutsideCalculatorRange { .. } => {
                Self::Calculator(s)
            }
            SweepArgsError::Weather(e) => Self::from(e),
            SweepArgsError::Sweep(e) => Self::from(e),
        }
    }
}

impl From<SweepRunError> for SensweepError {
    fn from(e: SweepRunError) -> Self {
        match e {
            SweepRunError::Sweep(e) => Self::from(e),
            SweepRunError::TableWrite(e) => Self::from(e),
        }
    }
}

impl From<TableVerifyError> for SensweepError {
    fn from(e: TableVerifyError) -> Self {
        let s = e.to_string();
        match e {
            TableVerifyError::NoFiles | TableVerifyError::Failures { .. } => Self::Table(s),
        }
    }
}

// Library code errors.

impl From<WeatherError> for SensweepError {
    fn from(e: WeatherError) -> Self {
        Self::Weather(e.to_string())
    }
}

impl From<CalculatorError> for SensweepError {
    fn from(e: CalculatorError) -> Self {
        Self::Calculator(e.to_string())
    }
}

impl From<SweepError> for SensweepError {
    fn from(e: SweepError) -> Self {
        match e {
            SweepError::Calculator(e) => Self::from(e),
            SweepError::BadElevation(_)
            | SweepError::BadResolvingPower(_)
            | SweepError::BadFreqRange { .. }
            | SweepError::SingleSampleRange { .. }
            | SweepError::FreqRangeTooNarrow { .. }
            | SweepError::NoSamples
            | SweepError::BadIntegrationTime(_)
            | SweepError::MisalignedColumns(_) => Self::Sweep(e.to_string()),
        }
    }
}

impl From<TableWriteError> for SensweepError {
    fn from(e: TableWriteError) -> Self {
        let s = e.to_string();
        match e {
            TableWriteError::Fits(e) => Self::from(e),
            TableWriteError::Fitsio(e) => Self::from(e),
            TableWriteError::Empty | TableWriteError::Nul(_) => Self::Table(s),
            TableWriteError::IO(e) => Self::from(e),
        }
    }
}

impl From<FitsError> for SensweepError {
    fn from(e: FitsError) -> Self {
        Self::Cfitsio(e.to_string())
    }
}

impl From<fitsio::errors::Error> for SensweepError {
    fn from(e: fitsio::errors::Error) -> Self {
        Self::Cfitsio(e.to_string())
    }
}

impl From<std::io::Error> for SensweepError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
