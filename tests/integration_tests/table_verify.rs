// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use tempfile::TempDir;

use crate::{get_cmd_output, sensweep, small_sweep};

#[test]
fn test_table_verify_summarises_tables() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let table = small_sweep(tmp_dir.path(), "verify_me.fits");

    let cmd = sensweep()
        .args(["table-verify", &format!("{}", table.display())])
        .ok();
    assert!(cmd.is_ok(), "table-verify failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("20 samples"), "{stdout}");
    assert!(stdout.contains("35.000 to 950.000 GHz"), "{stdout}");
}

#[test]
fn test_table_verify_fails_on_missing_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let good = small_sweep(tmp_dir.path(), "good.fits");
    let missing = tmp_dir.path().join("missing.fits");

    let cmd = sensweep()
        .args([
            "table-verify",
            &format!("{}", good.display()),
            &format!("{}", missing.display()),
        ])
        .ok();
    assert!(cmd.is_err());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stdout.contains("20 samples"), "{stdout}");
    assert!(stderr.contains("1 of 2 tables"), "{stderr}");
}
