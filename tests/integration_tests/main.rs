// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod no_stderr;
mod sweep;
mod table_verify;

use std::{path::Path, process::Output, str::from_utf8};

use assert_cmd::{output::OutputError, Command};

fn sensweep() -> Command {
    Command::cargo_bin("sensweep").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Run a small sweep, writing the table into `dir`. The path to the table is
/// returned.
fn small_sweep(dir: &Path, name: &str) -> std::path::PathBuf {
    let output = dir.join(name);
    #[rustfmt::skip]
    let cmd = sensweep()
        .args([
            "sweep",
            "--no-progress-bars",
            "--num-samples", "20",
            "--output", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "sweep failed: {}", cmd.err().unwrap());
    output
}
