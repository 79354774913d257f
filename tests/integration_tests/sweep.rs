// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;

use approx::assert_relative_eq;
use indoc::writedoc;
use tempfile::TempDir;

use sensweep::io::read_table;

use crate::{get_cmd_output, sensweep, small_sweep};

#[test]
fn test_sweep_writes_a_readable_table() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = small_sweep(tmp_dir.path(), "small.fits");
    assert!(output.exists());

    let table = read_table(&output).unwrap();
    assert_eq!(table.len(), 20);
    assert_relative_eq!(table.freqs_hz()[0], 35e9, max_relative = 1e-12);
    assert_relative_eq!(table.freqs_hz()[19], 950e9, max_relative = 1e-12);
    assert_relative_eq!(table.bandwidths_hz()[0], 35e6, max_relative = 1e-12);
    assert!(table.rms_noise_jy().iter().all(|n| n.is_finite() && *n > 0.0));
    assert!(table.fwhm_deg().windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn test_sweep_default_filename_in_output_dir() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output_dir = tmp_dir.path().join("tables");

    #[rustfmt::skip]
    let cmd = sensweep()
        .args([
            "sweep",
            "--no-progress-bars",
            "--octile", "3",
            "--elevation", "60",
            "--num-samples", "5",
            "--output-dir", &format!("{}", output_dir.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "sweep failed: {}", cmd.err().unwrap());

    let expected = output_dir.join("AtLAST_sensitivity_table_R-1000_octile-37.5_el-60.0.fits");
    assert!(expected.exists(), "{} doesn't exist", expected.display());
}

#[test]
fn test_sweep_dry_run_writes_nothing() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("dry.fits");

    #[rustfmt::skip]
    let cmd = sensweep()
        .args([
            "sweep",
            "--dry-run",
            "--output", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "sweep failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Dry run"), "{stdout}");
    assert!(!output.exists());
}

#[test]
fn test_sweep_with_arg_file_and_save_toml() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("from_file.fits");
    let arg_file = tmp_dir.path().join("args.toml");
    let saved = tmp_dir.path().join("saved.toml");
    let mut f = std::fs::File::create(&arg_file).unwrap();
    writedoc!(
        f,
        r#"
            [observation]
            octile = 6
            integration_time = "10min"

            [band]
            freq_min = "200GHz"
            freq_max = "300GHz"
            num_samples = 11

            [output]
            output = "{}"
        "#,
        output.display()
    )
    .unwrap();
    drop(f);

    #[rustfmt::skip]
    let cmd = sensweep()
        .args([
            "sweep",
            &format!("{}", arg_file.display()),
            "--no-progress-bars",
            "--num-samples", "6",
            "--save-toml", &format!("{}", saved.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "sweep failed: {}", cmd.err().unwrap());

    let table = read_table(&output).unwrap();
    // The CLI overrides the file.
    assert_eq!(table.len(), 6);
    assert_eq!(table.config().octile().index(), 6);
    assert_relative_eq!(table.config().integration_time().to_seconds(), 600.0);
    assert_relative_eq!(table.freqs_hz()[0], 200e9, max_relative = 1e-12);
    assert_relative_eq!(table.freqs_hz()[5], 300e9, max_relative = 1e-12);

    let saved = std::fs::read_to_string(saved).unwrap();
    assert!(saved.contains("num_samples = 6"), "{saved}");
    assert!(saved.contains("octile = 6"), "{saved}");
}

#[test]
fn test_sweep_bad_octile_fails() {
    #[rustfmt::skip]
    let cmd = sensweep()
        .args([
            "sweep",
            "--dry-run",
            "--octile", "9",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("octile"), "{stderr}");
}

#[test]
fn test_sweep_outside_calculator_range_fails() {
    #[rustfmt::skip]
    let cmd = sensweep()
        .args([
            "sweep",
            "--dry-run",
            "--freq-max", "1200GHz",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("950"), "{stderr}");
}
