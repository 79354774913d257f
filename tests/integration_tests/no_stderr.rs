// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure there is no stderr output for successful commands.

use tempfile::TempDir;

use crate::{get_cmd_output, sensweep, small_sweep};

#[test]
fn test_sweep_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("out.fits");

    #[rustfmt::skip]
    let cmd = sensweep()
        .args([
            "sweep",
            "--no-progress-bars",
            "--num-samples", "10",
            "--output", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "sweep failed: {}", cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}

#[test]
fn test_table_verify_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let table = small_sweep(tmp_dir.path(), "table.fits");

    let cmd = sensweep()
        .args(["table-verify", &format!("{}", table.display())])
        .ok();
    assert!(cmd.is_ok(), "table-verify failed: {}", cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}
