//! Integration tests for the config subcommands
//!
//! These rely on `XDG_CONFIG_HOME`, which only Linux honours.
#![cfg(target_os = "linux")]

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::tuneframe;

fn run_stdout(home: &TempDir, args: &[&str]) -> String {
    let output = tuneframe(home.path()).args(args).output().unwrap();
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

#[test]
fn config_path_is_under_config_home() {
    let home = TempDir::new().unwrap();
    let stdout = run_stdout(&home, &["config", "path"]);

    insta::with_settings!({filters => vec![(home.path().to_str().unwrap(), "[CONFIG_HOME]")]}, {
        insta::assert_snapshot!(stdout, @"[CONFIG_HOME]/tuneframe/config.toml");
    });
}

#[test]
fn config_show_prints_defaults_without_file() {
    let home = TempDir::new().unwrap();
    let stdout = run_stdout(&home, &["config", "show"]);

    assert!(stdout.contains("[player]"));
    assert!(stdout.contains("loop_hint = true"));
    assert!(stdout.contains("ready_delay_ms = 500"));
    assert!(stdout.contains("allowed_origin = \"*\""));
}

#[test]
fn config_show_reflects_file() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("tuneframe");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        "[host]\nallowed_origin = \"https://blog.example\"\n",
    )
    .unwrap();

    let stdout = run_stdout(&home, &["config", "show"]);
    assert!(stdout.contains("allowed_origin = \"https://blog.example\""));
    assert!(stdout.contains("frame_interval_ms = 16"));
}

#[test]
fn config_init_writes_defaults_once() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("tuneframe").join("config.toml");

    tuneframe(home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));
    assert!(path.exists());

    std::fs::write(&path, "[player]\nloop_hint = false\n").unwrap();
    tuneframe(home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "[player]\nloop_hint = false\n"
    );
}

#[test]
fn invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("tuneframe");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[player\n").unwrap();

    tuneframe(home.path())
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}
