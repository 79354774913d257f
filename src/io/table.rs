// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading and writing sensitivity tables.
//!
//! A sensitivity table is a FITS file. The primary HDU is empty except for
//! provenance keys (`SOFTWARE` and `CMDLINE`). The second HDU is a binary
//! table called `SENSITIVITY` with four double-precision columns:
//!
//! | column      | unit |
//! |-------------|------|
//! | `nu`        | GHz  |
//! | `bandwidth` | GHz  |
//! | `RMS_noise` | Jy   |
//! | `FWHM_beam` | deg  |
//!
//! The sweep configuration is described by the header keys `OCTILE` (the
//! weather percentile), `ELEV` (degrees), `R` (spectral resolving power) and
//! `TINT` (integration time in seconds).

use std::{
    ffi::CString,
    path::{Path, PathBuf},
};

use fitsio::{
    errors::check_status as fits_check_status,
    tables::{ColumnDataType, ColumnDescription},
    FitsFile,
};
use hifitime::Duration;
use log::debug;
use thiserror::Error;

use super::fits::*;
use crate::{
    constants::DEFAULT_INTEGRATION_TIME_S,
    sweep::{ResultTable, SweepConfiguration, SweepError},
    weather::{Octile, WeatherError},
};

/// The name of the HDU containing the results.
pub const TABLE_HDU_NAME: &str = "SENSITIVITY";

/// Column names, their units and the factor that converts from SI units.
const COLUMNS: [(&str, &str, f64); 4] = [
    ("nu", "GHz", 1e9),
    ("bandwidth", "GHz", 1e9),
    ("RMS_noise", "Jy", 1.0),
    ("FWHM_beam", "deg", 1.0),
];

/// Get the default file name for a table made with the supplied
/// configuration, e.g.
/// `AtLAST_sensitivity_table_R-1000_octile-12.5_el-45.0.fits`.
pub fn default_output_filename(config: &SweepConfiguration) -> PathBuf {
    let r = config.resolving_power();
    let r = if r.fract() == 0.0 {
        format!("{:04}", r as u64)
    } else {
        format!("{r:?}")
    };
    PathBuf::from(format!(
        "AtLAST_sensitivity_table_R-{r}_octile-{:?}_el-{:?}.fits",
        config.octile().percentile(),
        config.elevation_deg()
    ))
}

/// Write a [`ResultTable`] to a FITS file. Any existing file at the path is
/// replaced, and missing parent directories are created.
pub fn write_table(table: &ResultTable, file: &Path) -> Result<(), TableWriteError> {
    if table.is_empty() {
        return Err(TableWriteError::Empty);
    }
    if file.exists() {
        std::fs::remove_file(file)?;
    }
    if let Some(parent) = file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut fptr = fits_create(file)?;
    let hdu = fits_open_hdu(&mut fptr, 0usize)?;

    // Signal that we're using long strings.
    let mut status = 0;
    unsafe {
        // ffplsw = fits_write_key_longwarn
        fitsio_sys::ffplsw(
            fptr.as_raw(), /* I - FITS file pointer  */
            &mut status,   /* IO - error status       */
        );
    }
    fits_check_status(status)?;

    hdu.write_key(
        &mut fptr,
        "SOFTWARE",
        format!(
            "Created by {} v{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ),
    )?;
    write_cmdline(&mut fptr)?;

    let cols = COLUMNS
        .iter()
        .map(|(name, _, _)| {
            ColumnDescription::new(*name)
                .with_type(ColumnDataType::Double)
                .create()
        })
        .collect::<Result<Vec<_>, _>>()?;
    let hdu = fptr.create_table(TABLE_HDU_NAME, &cols)?;

    let data = [
        table.freqs_hz(),
        table.bandwidths_hz(),
        table.rms_noise_jy(),
        table.fwhm_deg(),
    ];
    for (i_col, ((name, unit, factor), values)) in COLUMNS.iter().zip(data).enumerate() {
        let scaled: Vec<f64> = values.iter().map(|v| v / factor).collect();
        hdu.write_col(&mut fptr, *name, &scaled)?;
        hdu.write_key(&mut fptr, &format!("TUNIT{}", i_col + 1), *unit)?;
    }

    let config = table.config();
    write_double_key(
        &mut fptr,
        "OCTILE",
        config.octile().percentile(),
        "weather percentile",
    )?;
    write_double_key(&mut fptr, "ELEV", config.elevation_deg(), "degree")?;
    let r = config.resolving_power();
    if r.fract() == 0.0 && r <= i64::MAX as f64 {
        write_int_key(&mut fptr, "R", r as i64, "spectral resolution")?;
    } else {
        write_double_key(&mut fptr, "R", r, "spectral resolution")?;
    }
    write_double_key(
        &mut fptr,
        "TINT",
        config.integration_time().to_seconds(),
        "integration time [s]",
    )?;

    debug!("Wrote {} rows to {}", table.len(), file.display());
    Ok(())
}

/// Read a [`ResultTable`] from a FITS file written by [`write_table`].
///
/// The table HDU is found by name, falling back to the first extension. Tables
/// that don't have a `TINT` key are assumed to have used the default
/// integration time.
pub fn read_table(file: &Path) -> Result<ResultTable, TableReadError> {
    let mut fptr = fits_open(file)?;
    // Tables without an EXTNAME are expected in the first extension.
    let hdu = match fptr.hdu(TABLE_HDU_NAME) {
        Ok(hdu) => hdu,
        Err(_) => fits_open_hdu(&mut fptr, 1usize)?,
    };

    let percentile: f64 = fits_get_required_key(&mut fptr, &hdu, "OCTILE")?;
    let elevation_deg: f64 = fits_get_required_key(&mut fptr, &hdu, "ELEV")?;
    let resolving_power: f64 = fits_get_required_key(&mut fptr, &hdu, "R")?;
    let integration_time_s: f64 = fits_get_optional_key(&mut fptr, &hdu, "TINT")?
        .unwrap_or(DEFAULT_INTEGRATION_TIME_S);

    let octile_index = (percentile / Octile::default().percentile()).round();
    if !(0.0..=f64::from(u8::MAX)).contains(&octile_index) {
        return Err(TableReadError::BadPercentile(percentile));
    }
    let octile = Octile::new(octile_index as u8)?;
    if (octile.percentile() - percentile).abs() > 1e-6 {
        return Err(TableReadError::BadPercentile(percentile));
    }

    let mut read_col = |(name, _, factor): (&str, &str, f64)| {
        fits_get_col::<f64>(&mut fptr, &hdu, name)
            .map(|values| values.into_iter().map(|v| v * factor).collect::<Vec<_>>())
    };
    let freqs_hz = read_col(COLUMNS[0])?;
    let bandwidths_hz = read_col(COLUMNS[1])?;
    let rms_noise_jy = read_col(COLUMNS[2])?;
    let fwhm_deg = read_col(COLUMNS[3])?;

    let (freq_min_hz, freq_max_hz) = match (freqs_hz.first(), freqs_hz.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => {
            return Err(TableReadError::Empty {
                file: file.display().to_string(),
            })
        }
    };
    let config = SweepConfiguration::new(
        octile,
        elevation_deg,
        resolving_power,
        freq_min_hz,
        freq_max_hz,
        freqs_hz.len(),
        Duration::from_seconds(integration_time_s),
    )?;

    let table = ResultTable::from_columns(config, freqs_hz, bandwidths_hz, rms_noise_jy, fwhm_deg)?;
    debug!("Read {} rows from {}", table.len(), file.display());
    Ok(table)
}

/// Read the command-line call stored in a table, if there is one.
pub fn read_table_cmdline(file: &Path) -> Result<Option<String>, TableReadError> {
    let mut fptr = fits_open(file)?;
    let hdu = fits_open_hdu(&mut fptr, 0usize)?;
    Ok(fits_get_optional_key_long_string(&mut fptr, &hdu, "CMDLINE")?)
}

/// Write out the current command-line call ("CMDLINE").
fn write_cmdline(fptr: &mut FitsFile) -> Result<(), TableWriteError> {
    // It's possible that the command-line call has invalid UTF-8. If so, don't
    // bother trying to write the CMDLINE key.
    let value = match std::env::args_os()
        .map(|a| a.into_string())
        .collect::<Result<Vec<String>, _>>()
        .ok()
        .and_then(|v| CString::new(v.join(" ")).ok())
    {
        Some(v) => v,
        None => return Ok(()),
    };
    let key_name = CString::new("CMDLINE")?;
    let comment = CString::new("Command-line call")?;
    let mut status = 0;
    unsafe {
        // ffpkls = fits_write_key_longstr
        fitsio_sys::ffpkls(
            fptr.as_raw(),     /* I - FITS file pointer        */
            key_name.as_ptr(), /* I - name of keyword to write */
            value.as_ptr(),    /* I - keyword value            */
            comment.as_ptr(),  /* I - keyword comment          */
            &mut status,       /* IO - error status            */
        );
    }
    fits_check_status(status)?;
    Ok(())
}

fn write_double_key(
    fptr: &mut FitsFile,
    key: &str,
    value: f64,
    comment: &str,
) -> Result<(), TableWriteError> {
    let key_name = CString::new(key)?;
    let comment = CString::new(comment)?;
    let mut status = 0;
    unsafe {
        // ffpkyd = fits_write_key_dbl
        fitsio_sys::ffpkyd(
            fptr.as_raw(),     /* I - FITS file pointer        */
            key_name.as_ptr(), /* I - name of keyword to write */
            value,             /* I - keyword value            */
            -15,               /* I - number of decimals; negative means G format */
            comment.as_ptr(),  /* I - keyword comment          */
            &mut status,       /* IO - error status            */
        );
    }
    fits_check_status(status)?;
    Ok(())
}

fn write_int_key(
    fptr: &mut FitsFile,
    key: &str,
    value: i64,
    comment: &str,
) -> Result<(), TableWriteError> {
    let key_name = CString::new(key)?;
    let comment = CString::new(comment)?;
    let mut status = 0;
    unsafe {
        // ffpkyj = fits_write_key_lng
        fitsio_sys::ffpkyj(
            fptr.as_raw(),     /* I - FITS file pointer        */
            key_name.as_ptr(), /* I - name of keyword to write */
            value,             /* I - keyword value            */
            comment.as_ptr(),  /* I - keyword comment          */
            &mut status,       /* IO - error status            */
        );
    }
    fits_check_status(status)?;
    Ok(())
}

#[derive(Error, Debug)]
pub enum TableWriteError {
    #[error("Refusing to write a table without any rows")]
    Empty,

    #[error(transparent)]
    Fits(#[from] FitsError),

    #[error(transparent)]
    Fitsio(#[from] fitsio::errors::Error),

    #[error("A FITS key, value or comment contained a NUL byte: {0}")]
    Nul(#[from] std::ffi::NulError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum TableReadError {
    #[error("The table in {file} has no rows")]
    Empty { file: String },

    #[error("The table's OCTILE key ({0}) is not the percentile of a weather octile")]
    BadPercentile(f64),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error("The table's header describes an invalid sweep: {0}")]
    Sweep(#[from] SweepError),

    #[error(transparent)]
    Fits(#[from] FitsError),
}
