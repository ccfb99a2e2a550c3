//! Probe command handler

use anyhow::{Context, Result};

use tuneframe::logging::{self, LogTarget};
use tuneframe::player::media::probe_source;
use tuneframe::player::render::format_time;
use tuneframe::tui::current_theme;

/// Resolve and probe `source`, printing its duration.
#[cfg(not(tarpaulin_include))]
pub fn handle(source: &str) -> Result<()> {
    logging::init(LogTarget::Stderr)?;
    let duration = probe_source(source).with_context(|| format!("Failed to probe {source}"))?;
    println!("{}", current_theme().primary_text(&describe(source, duration)));
    Ok(())
}

/// One-line summary: `mm:ss (seconds) source`.
pub fn describe(source: &str, duration: f64) -> String {
    format!("{} ({:.2}s) {}", format_time(duration), duration, source)
}
