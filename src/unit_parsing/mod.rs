// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to parse strings into plain numbers or some quantity with a unit.

mod error;

pub(crate) use error::*;

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, EnumIter, EnumString, IntoStaticStr)]
pub(crate) enum TimeFormat {
    /// Seconds
    S,

    /// Minutes
    Min,

    /// Hours
    H,

    NoUnit,
}

impl TimeFormat {
    /// How many seconds are in one of this unit? Unitless numbers are taken to
    /// be seconds.
    pub(crate) fn to_seconds_factor(self) -> f64 {
        match self {
            TimeFormat::S | TimeFormat::NoUnit => 1.0,
            TimeFormat::Min => 60.0,
            TimeFormat::H => 3600.0,
        }
    }
}

/// Parse a string that may have a unit of time attached to it.
pub(crate) fn parse_time(s: &str) -> Result<(f64, TimeFormat), UnitParseError> {
    // Try to parse a naked number.
    let maybe_number: Option<f64> = s.trim().parse().ok();
    if let Some(number) = maybe_number {
        return Ok((number, TimeFormat::NoUnit));
    };

    // That didn't work; let's search over our supported formats.
    for time_format in TimeFormat::iter().filter(|&tf| tf != TimeFormat::NoUnit) {
        let time_format_str: &'static str = time_format.into();
        let suffix = s
            .trim()
            .trim_start_matches(|c| char::is_numeric(c) || c == '.')
            .trim();
        if suffix.to_uppercase() == time_format_str.to_uppercase() {
            let prefix = s.trim().trim_end_matches(char::is_alphabetic).trim();
            let number: f64 = match prefix.parse() {
                Ok(n) => n,
                Err(_) => {
                    return Err(UnitParseError::GotTimeUnitButCantParse {
                        input: s.to_string(),
                        unit: time_format_str,
                    })
                }
            };
            return Ok((number, time_format));
        }
    }

    // If we made it this far, we don't know how to parse the string.
    Err(UnitParseError::Unknown {
        input: s.to_string(),
        unit_type: "time",
    })
}

#[derive(Debug, Clone, Copy, PartialEq, EnumIter, EnumString, IntoStaticStr)]
#[allow(non_camel_case_types)]
pub(crate) enum FreqFormat {
    /// Hertz
    Hz,

    /// kiloHertz
    kHz,

    /// MegaHertz
    MHz,

    /// GigaHertz
    GHz,

    NoUnit,
}

impl FreqFormat {
    /// How many Hz are in one of this unit? Unitless numbers are taken to be
    /// GHz.
    pub(crate) fn to_hz_factor(self) -> f64 {
        match self {
            FreqFormat::Hz => 1.0,
            FreqFormat::kHz => 1e3,
            FreqFormat::MHz => 1e6,
            FreqFormat::GHz | FreqFormat::NoUnit => 1e9,
        }
    }
}

/// Parse a string that may have a unit of frequency attached to it.
pub(crate) fn parse_freq(s: &str) -> Result<(f64, FreqFormat), UnitParseError> {
    // Try to parse a naked number.
    let maybe_number: Option<f64> = s.trim().parse().ok();
    if let Some(number) = maybe_number {
        return Ok((number, FreqFormat::NoUnit));
    };

    // That didn't work; let's search over our supported formats.
    for freq_format in FreqFormat::iter().filter(|&ff| ff != FreqFormat::NoUnit) {
        let freq_format_str: &'static str = freq_format.into();
        let suffix = s
            .trim()
            .trim_start_matches(|c| char::is_numeric(c) || c == '.')
            .trim();
        if suffix.to_uppercase() == freq_format_str.to_uppercase() {
            let prefix = s.trim().trim_end_matches(char::is_alphabetic).trim();
            let number: f64 = match prefix.parse() {
                Ok(n) => n,
                Err(_) => {
                    return Err(UnitParseError::GotFreqUnitButCantParse {
                        input: s.to_string(),
                        unit: freq_format_str,
                    })
                }
            };
            return Ok((number, freq_format));
        }
    }

    // If we made it this far, we don't know how to parse the string.
    Err(UnitParseError::Unknown {
        input: s.to_string(),
        unit_type: "frequency",
    })
}

/// Parse a frequency string straight into Hz.
pub(crate) fn parse_freq_hz(s: &str) -> Result<f64, UnitParseError> {
    let (number, format) = parse_freq(s)?;
    Ok(number * format.to_hz_factor())
}

/// Parse a time string straight into seconds.
pub(crate) fn parse_time_seconds(s: &str) -> Result<f64, UnitParseError> {
    let (number, format) = parse_time(s)?;
    Ok(number * format.to_seconds_factor())
}
