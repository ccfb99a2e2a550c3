//! Integration tests for the probe command

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{tuneframe, wav_bytes};

#[test]
fn probe_prints_wav_duration() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("loop.wav");
    std::fs::write(&path, wav_bytes(8000, 2)).unwrap();

    tuneframe(dir.path())
        .args(["probe", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("00:02 (2.00s)"));
}

#[test]
fn probe_accepts_file_urls() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("long.wav");
    std::fs::write(&path, wav_bytes(8000, 65)).unwrap();
    let url = format!("file://{}", path.display());

    tuneframe(dir.path())
        .args(["probe", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("01:05"));
}

#[test]
fn probe_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.mp3");

    tuneframe(dir.path())
        .args(["probe", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to probe"));
}

#[test]
fn probe_non_audio_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.wav");
    std::fs::write(&path, "definitely not audio").unwrap();

    tuneframe(dir.path())
        .args(["probe", path.to_str().unwrap()])
        .assert()
        .failure();
}

#[test]
fn probe_unsupported_scheme_fails() {
    let dir = TempDir::new().unwrap();
    tuneframe(dir.path())
        .args(["probe", "ftp://example.com/track.mp3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ftp"));
}
