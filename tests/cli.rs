//! Command-line interface integration tests for the `cwdt` binary.
//!
//! This module contains tests that verify the behavior of the command-line
//! interface, including argument validation, success scenarios, and error handling.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

#[test]
fn exit_success() {
    let mut cmd = Command::cargo_bin("cwdt").unwrap();
    cmd.arg("-n");
    cmd.arg("16");
    cmd.arg("--seed");
    cmd.arg("3");
    cmd.assert().success();
}

#[test]
fn cwdt_cli_args() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("cwdt")?;

    cmd.arg("-n");
    cmd.arg("16");
    cmd.arg("--seed");
    cmd.arg("3");
    cmd.env("RUST_LOG", "info");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("triangles"));

    Ok(())
}

#[test]
fn cwdt_cli_no_args() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("cwdt")?;

    cmd.assert().failure().stderr(predicate::str::contains(
        "error: the following required arguments were not provided:",
    ));

    Ok(())
}

#[test]
fn cwdt_cli_too_few_points() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("cwdt")?;

    cmd.arg("-n");
    cmd.arg("2");

    cmd.assert().failure().stderr(predicate::str::contains(
        "error: invalid value '2' for '--points <POINTS>'",
    ));

    Ok(())
}

#[test]
fn cwdt_cli_invalid_algorithm() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("cwdt")?;

    cmd.arg("-n");
    cmd.arg("8");
    cmd.arg("--algorithm");
    cmd.arg("fastest");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'fastest'"));

    Ok(())
}

#[test]
fn cwdt_cli_invalid_bound() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("cwdt")?;

    cmd.arg("-n");
    cmd.arg("8");
    cmd.arg("--bound");
    cmd.arg("0");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Bound must be positive"));

    Ok(())
}

#[test]
fn cwdt_cli_cross_validate() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("cwdt")?;

    cmd.args(["-n", "24", "--seed", "9", "--cross-validate"]);
    cmd.env("RUST_LOG", "info");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Cross-validation passed"));

    Ok(())
}

#[test]
fn cwdt_cli_cross_validate_needs_both() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("cwdt")?;

    cmd.args(["-n", "8", "--algorithm", "walker", "--cross-validate"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("requires --algorithm both"));

    Ok(())
}

#[test]
fn cwdt_cli_input_file() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::temp_dir().join(format!("cwdt-square-{}.txt", std::process::id()));
    let mut file = std::fs::File::create(&path)?;
    writeln!(file, "# square with an off-centre point")?;
    writeln!(file, "0 0")?;
    writeln!(file, "4 0")?;
    writeln!(file, "4,4")?;
    writeln!(file, "0 4")?;
    writeln!(file, "2 2.01")?;
    drop(file);

    let mut cmd = Command::cargo_bin("cwdt")?;
    cmd.arg("--input");
    cmd.arg(&path);
    cmd.args(["--algorithm", "walker", "--print"]);

    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec!["0 1 4", "0 3 4", "1 2 4", "2 3 4"]
    );

    std::fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn cwdt_cli_missing_input_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("cwdt")?;

    cmd.args(["--input", "/nonexistent/points.txt"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));

    Ok(())
}
