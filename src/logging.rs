//! Log setup
//!
//! The widget owns the terminal while it runs, so its logs go to a file (or
//! nowhere). Plain commands log to stderr. The filter comes from
//! `TUNEFRAME_LOG` using `tracing-subscriber` directive syntax.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "TUNEFRAME_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to a file
    File(PathBuf),
    Stderr,
    /// Install nothing; events are dropped
    Discard,
}

/// Filter directive from the environment value, `warn` when unset or blank.
pub fn filter_directive(env_value: Option<&str>) -> &str {
    match env_value.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => DEFAULT_DIRECTIVE,
    }
}

/// Install the global subscriber for `target`.
pub fn init(target: LogTarget) -> Result<()> {
    let env_value = std::env::var(LOG_ENV).ok();
    let filter = EnvFilter::try_new(filter_directive(env_value.as_deref()))
        .with_context(|| format!("Invalid {LOG_ENV} filter"))?;

    let installed = match target {
        LogTarget::Discard => return Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))
}
