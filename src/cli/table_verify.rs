// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to verify sensitivity tables.

use std::path::{Path, PathBuf};

use clap::Parser;
use itertools::{Itertools, MinMaxResult};
use log::info;
use thiserror::Error;

use super::common::InfoPrinter;
use crate::{
    io::{read_table, read_table_cmdline},
    sweep::ResultTable,
};

/// Verify that sensitivity tables can be read by sensweep, and print a summary
/// of each one.
#[derive(Parser, Debug)]
pub(super) struct TableVerifyArgs {
    /// Path to the table(s) to be verified.
    #[clap(name = "TABLES", parse(from_os_str))]
    tables: Vec<PathBuf>,
}

impl TableVerifyArgs {
    pub(super) fn run(&self) -> Result<(), TableVerifyError> {
        verify(&self.tables)
    }
}

/// Read and print stats out for each input table. If a table couldn't be read,
/// print the error, and continue trying to read the other tables.
fn verify<P: AsRef<Path>>(tables: &[P]) -> Result<(), TableVerifyError> {
    if tables.is_empty() {
        return Err(TableVerifyError::NoFiles);
    }

    let mut num_failed = 0;
    for table in tables {
        let table = table.as_ref();
        match read_table(table).and_then(|t| Ok((t, read_table_cmdline(table)?))) {
            Ok((t, cmdline)) => summarise(table, &t, cmdline),
            Err(e) => {
                info!("{}:", table.display());
                info!("    {e}");
                info!("");
                num_failed += 1;
            }
        }
    }

    if num_failed > 0 {
        return Err(TableVerifyError::Failures {
            num_failed,
            num_total: tables.len(),
        });
    }
    Ok(())
}

fn summarise(file: &Path, table: &ResultTable, cmdline: Option<String>) {
    let config = table.config();
    let (freq_min_hz, freq_max_hz) = config.freq_range_hz();
    let mut printer = InfoPrinter::new(format!("{}", file.display()).into());
    printer.push_block(vec![
        format!("{}", config.octile()).into(),
        format!("Elevation: {}°", config.elevation_deg()).into(),
        format!("Resolving power: {}", config.resolving_power()).into(),
        format!("Integration time: {}", config.integration_time()).into(),
    ]);
    printer.push_block(vec![
        format!("{} samples", table.len()).into(),
        format!("{:.3} to {:.3} GHz", freq_min_hz / 1e9, freq_max_hz / 1e9).into(),
    ]);

    let noise = table
        .rms_noise_jy()
        .iter()
        .filter(|n| n.is_finite())
        .minmax_by(|a, b| a.total_cmp(b));
    let noise_line = match noise {
        MinMaxResult::NoElements => "RMS noise: no finite values".to_string(),
        MinMaxResult::OneElement(n) => format!("RMS noise: {:.3} mJy", n * 1e3),
        MinMaxResult::MinMax(best, worst) => {
            format!("RMS noise: {:.3} to {:.3} mJy", best * 1e3, worst * 1e3)
        }
    };
    printer.push_line(noise_line.into());

    if let Some(cmdline) = cmdline {
        printer.push_line(format!("Made with: {cmdline}").into());
    }
    printer.display();
}

#[derive(Error, Debug)]
pub(super) enum TableVerifyError {
    #[error("No tables were supplied")]
    NoFiles,

    #[error("{num_failed} of {num_total} tables couldn't be read")]
    Failures { num_failed: usize, num_total: usize },
}
