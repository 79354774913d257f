// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Sweep the sensitivity calculator over a frequency range and write the
//! results to a FITS table.


use std::path::PathBuf;

use clap::Parser;
use hifitime::Duration;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::common::{display_warnings, InfoPrinter, Warn, ARG_FILE_HELP};
use crate::{
    calculator::{AtlastCalculator, SensitivityCalculator},
    constants::{
        ATLAST_DISH_RADIUS_M, ATLAST_FREQ_MAX_HZ, ATLAST_FREQ_MIN_HZ, DEFAULT_ELEVATION_DEG,
        DEFAULT_INTEGRATION_TIME_S, DEFAULT_NUM_SAMPLES, DEFAULT_OUTPUT_DIR,
        DEFAULT_RESOLVING_POWER,
    },
    io::default_output_filename,
    params::SweepParams,
    sweep::{SweepConfiguration, SweepError},
    unit_parsing::{parse_freq_hz, parse_time_seconds, UnitParseError},
    weather::{Octile, WeatherError},
    SensweepError,
};

lazy_static::lazy_static! {
    static ref OCTILE_HELP: String =
        format!("The weather octile, from {} (best) to {} (worst). Each octile is a 12.5% step of the site's precipitable-water-vapour distribution. Default: {}", Octile::MIN, Octile::MAX, Octile::MIN);

    static ref ELEVATION_HELP: String =
        format!("The elevation of the source [degrees]. Default: {DEFAULT_ELEVATION_DEG}");

    static ref INTEGRATION_TIME_HELP: String =
        format!("The on-source integration time. Units of s, min or h may be given; without a unit, seconds are assumed. Default: {DEFAULT_INTEGRATION_TIME_S}s");

    static ref DISH_RADIUS_HELP: String =
        format!("The radius of the primary mirror [metres]. Default: {ATLAST_DISH_RADIUS_M}");

    static ref FREQ_MIN_HELP: String =
        format!("The first frequency of the sweep. Units of Hz, kHz, MHz or GHz may be given; without a unit, GHz are assumed. Default: {}GHz", ATLAST_FREQ_MIN_HZ / 1e9);

    static ref FREQ_MAX_HELP: String =
        format!("The last frequency of the sweep. Units of Hz, kHz, MHz or GHz may be given; without a unit, GHz are assumed. Default: {}GHz", ATLAST_FREQ_MAX_HZ / 1e9);

    static ref NUM_SAMPLES_HELP: String =
        format!("The number of linearly-spaced frequencies to visit, including both ends of the range. Default: {DEFAULT_NUM_SAMPLES}");

    static ref RESOLVING_POWER_HELP: String =
        format!("The spectral resolving power R; each channel is frequency/R wide. Default: {DEFAULT_RESOLVING_POWER}");

    static ref OUTPUT_DIR_HELP: String =
        format!("The directory to write the table into. It is created if it doesn't exist. Default: {DEFAULT_OUTPUT_DIR}");
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ObservationArgs {
    #[clap(short, long, help = OCTILE_HELP.as_str(), help_heading = "OBSERVATION")]
    pub(super) octile: Option<u8>,

    #[clap(short, long, help = ELEVATION_HELP.as_str(), help_heading = "OBSERVATION")]
    pub(super) elevation: Option<f64>,

    #[clap(short = 't', long, help = INTEGRATION_TIME_HELP.as_str(), help_heading = "OBSERVATION")]
    pub(super) integration_time: Option<String>,

    #[clap(long, help = DISH_RADIUS_HELP.as_str(), help_heading = "OBSERVATION")]
    pub(super) dish_radius: Option<f64>,
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct BandArgs {
    #[clap(long, help = FREQ_MIN_HELP.as_str(), help_heading = "BAND")]
    pub(super) freq_min: Option<String>,

    #[clap(long, help = FREQ_MAX_HELP.as_str(), help_heading = "BAND")]
    pub(super) freq_max: Option<String>,

    #[clap(short, long, help = NUM_SAMPLES_HELP.as_str(), help_heading = "BAND")]
    pub(super) num_samples: Option<usize>,

    #[clap(short = 'R', long, help = RESOLVING_POWER_HELP.as_str(), help_heading = "BAND")]
    pub(super) resolving_power: Option<f64>,
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct OutputArgs {
    #[clap(long, help = OUTPUT_DIR_HELP.as_str(), help_heading = "OUTPUT")]
    pub(super) output_dir: Option<PathBuf>,

    /// The name of the output table. If this is relative, it is placed inside
    /// the output directory. Default: a name describing the sweep, e.g.
    /// AtLAST_sensitivity_table_R-1000_octile-12.5_el-45.0.fits
    #[clap(long, help_heading = "OUTPUT")]
    pub(super) output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct SweepArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    #[serde(skip)]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "observation")]
    #[serde(default)]
    pub(super) observation_args: ObservationArgs,

    #[clap(flatten)]
    #[serde(rename = "band")]
    #[serde(default)]
    pub(super) band_args: BandArgs,

    #[clap(flatten)]
    #[serde(rename = "output")]
    #[serde(default)]
    pub(super) output_args: OutputArgs,
}

impl SweepArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<SweepArgs, SensweepError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let SweepArgs {
                args_file: _,
                observation_args,
                band_args,
                output_args,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(SweepArgs {
                args_file: None,
                observation_args: cli_args.observation_args.merge(observation_args),
                band_args: cli_args.band_args.merge(band_args),
                output_args: cli_args.output_args.merge(output_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<SweepParams, SweepArgsError> {
        debug!("{:#?}", self);

        // Expose all the struct fields to ensure they're all used.
        let SweepArgs {
            args_file: _,
            observation_args:
                ObservationArgs {
                    octile,
                    elevation,
                    integration_time,
                    dish_radius,
                },
            band_args:
                BandArgs {
                    freq_min,
                    freq_max,
                    num_samples,
                    resolving_power,
                },
            output_args: OutputArgs { output_dir, output },
        } = self;

        let octile = Octile::new(octile.unwrap_or(Octile::MIN))?;
        let elevation_deg = elevation.unwrap_or(DEFAULT_ELEVATION_DEG);
        let integration_time = match integration_time {
            Some(s) => parse_time_seconds(&s).map_err(SweepArgsError::ParseIntegrationTime)?,
            None => DEFAULT_INTEGRATION_TIME_S,
        };
        let calculator = match dish_radius {
            None => AtlastCalculator::default(),
            Some(r) if r.is_finite() && r > 0.0 => AtlastCalculator::with_dish_radius(r),
            Some(r) => return Err(SweepArgsError::BadDishRadius(r)),
        };

        let parse_freq = |arg: &'static str, s: Option<String>, default: f64| match s {
            Some(s) => parse_freq_hz(&s).map_err(|err| SweepArgsError::ParseFreq { arg, err }),
            None => Ok(default),
        };
        let freq_min_hz = parse_freq("--freq-min", freq_min, ATLAST_FREQ_MIN_HZ)?;
        let freq_max_hz = parse_freq("--freq-max", freq_max, ATLAST_FREQ_MAX_HZ)?;
        let num_samples = num_samples.unwrap_or(DEFAULT_NUM_SAMPLES);
        let resolving_power = resolving_power.unwrap_or(DEFAULT_RESOLVING_POWER);

        let config = SweepConfiguration::new(
            octile,
            elevation_deg,
            resolving_power,
            freq_min_hz,
            freq_max_hz,
            num_samples,
            Duration::from_seconds(integration_time),
        )?;

        // Catch frequencies the calculator can't handle before doing any work.
        let calc_range = calculator.freq_range_hz();
        if !calc_range.contains(&freq_min_hz) || !calc_range.contains(&freq_max_hz) {
            return Err(SweepArgsError::OutsideCalculatorRange {
                min_ghz: freq_min_hz / 1e9,
                max_ghz: freq_max_hz / 1e9,
                calc_min_ghz: calc_range.start() / 1e9,
                calc_max_ghz: calc_range.end() / 1e9,
            });
        }

        let output_dir = output_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let output = match output {
            Some(o) => output_dir.join(o),
            None => output_dir.join(default_output_filename(&config)),
        };
        match output.extension().and_then(|e| e.to_str()) {
            Some(e) if e.eq_ignore_ascii_case("fits") => (),
            _ => format!(
                "The output file '{}' doesn't have a .fits extension, but a FITS file will be written anyway",
                output.display()
            )
            .warn(),
        }
        if output.exists() {
            format!("'{}' already exists and will be overwritten", output.display()).warn();
        }

        let mut obs_printer = InfoPrinter::new("Observation".into());
        obs_printer.push_line(format!("Weather: {octile}").into());
        obs_printer.push_line(format!("Elevation: {elevation_deg}°").into());
        obs_printer.push_line(format!("Integration time: {}", config.integration_time()).into());
        obs_printer.push_line(
            format!(
                "Dish radius: {} m (diameter {} m)",
                calculator.dish_radius_m,
                2.0 * calculator.dish_radius_m
            )
            .into(),
        );
        obs_printer.display();

        let mut band_printer = InfoPrinter::new("Band".into());
        band_printer.push_block(vec![
            format!("First frequency: {:.3} GHz", freq_min_hz / 1e9).into(),
            format!("Last frequency:  {:.3} GHz", freq_max_hz / 1e9).into(),
            format!("Number of samples: {num_samples}").into(),
        ]);
        band_printer.push_block(vec![
            format!("Resolving power: {resolving_power}").into(),
            format!(
                "Channel widths: {:.3} to {:.3} MHz",
                config.bandwidth_hz(freq_min_hz) / 1e6,
                config.bandwidth_hz(freq_max_hz) / 1e6
            )
            .into(),
        ]);
        band_printer.display();

        let mut output_printer = InfoPrinter::new("Output".into());
        output_printer.push_line(format!("{}", output.display()).into());
        output_printer.display();

        display_warnings();

        Ok(SweepParams {
            config,
            calculator,
            output,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), SensweepError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub(super) enum SweepArgsError {
    #[error("Couldn't parse {arg}: {err}")]
    ParseFreq {
        arg: &'static str,
        err: UnitParseError,
    },

    #[error("Couldn't parse the integration time: {0}")]
    ParseIntegrationTime(UnitParseError),

    #[error("The dish radius must be positive, but got {0} m")]
    BadDishRadius(f64),

    #[error("The sweep ({min_ghz} to {max_ghz} GHz) goes outside the frequencies the calculator supports ({calc_min_ghz} to {calc_max_ghz} GHz)")]
    OutsideCalculatorRange {
        min_ghz: f64,
        max_ghz: f64,
        calc_min_ghz: f64,
        calc_max_ghz: f64,
    },

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error(transparent)]
    Sweep(#[from] SweepError),
}

impl ObservationArgs {
    fn merge(self, other: Self) -> Self {
        Self {
            octile: self.octile.or(other.octile),
            elevation: self.elevation.or(other.elevation),
            integration_time: self.integration_time.or(other.integration_time),
            dish_radius: self.dish_radius.or(other.dish_radius),
        }
    }
}

impl BandArgs {
    fn merge(self, other: Self) -> Self {
        Self {
            freq_min: self.freq_min.or(other.freq_min),
            freq_max: self.freq_max.or(other.freq_max),
            num_samples: self.num_samples.or(other.num_samples),
            resolving_power: self.resolving_power.or(other.resolving_power),
        }
    }
}

impl OutputArgs {
    fn merge(self, other: Self) -> Self {
        Self {
            output_dir: self.output_dir.or(other.output_dir),
            output: self.output.or(other.output),
        }
    }
}
