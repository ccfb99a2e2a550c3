//! Integration tests for top-level CLI behaviour

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::tuneframe;

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    tuneframe(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("probe"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn play_help_shows_host_flags() {
    let home = TempDir::new().unwrap();
    tuneframe(home.path())
        .args(["play", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--host-in"))
        .stdout(predicate::str::contains("--host-out"))
        .stdout(predicate::str::contains("--allowed-origin"))
        .stdout(predicate::str::contains("--dev"));
}

#[test]
fn version_includes_package_version() {
    let home = TempDir::new().unwrap();
    tuneframe(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "tuneframe {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn completions_for_bash() {
    let home = TempDir::new().unwrap();
    tuneframe(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tuneframe"));
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    tuneframe(home.path())
        .arg("rewind")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
