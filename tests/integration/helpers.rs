//! Shared helpers for integration tests

use std::path::Path;

use assert_cmd::Command;

/// `tuneframe` binary with colors off and an isolated config directory.
pub fn tuneframe(config_home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tuneframe"));
    cmd.env("NO_COLOR", "1")
        .env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("TUNEFRAME_LOG");
    cmd
}

/// A silent 16-bit mono PCM WAV file of `seconds` length.
pub fn wav_bytes(sample_rate: u32, seconds: u32) -> Vec<u8> {
    let data_len = sample_rate * seconds * 2;
    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(44 + data_len as usize, 0);
    bytes
}
