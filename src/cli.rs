//! Command line definition

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[cfg(not(feature = "release"))]
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("TUNEFRAME_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TUNEFRAME_BUILD_DATE"),
    ")"
);

/// Embeddable loop-playing audio widget for the terminal.
#[derive(Debug, Parser)]
#[command(name = "tuneframe", version = VERSION, about)]
#[command(long_about = "Embeddable loop-playing audio widget for the terminal.\n\n\
Without a subcommand the widget plays the configured default source.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the widget
    Play(PlayArgs),

    /// Resolve a source and print its duration
    Probe {
        /// URL (http, https, file) or local path
        source: String,
    },

    /// Show or initialize configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Default, Args)]
pub struct PlayArgs {
    /// Audio source to load at mount (defaults to the configured source)
    pub source: Option<String>,

    /// Read host messages from this file or FIFO
    #[arg(long, value_name = "PATH")]
    pub host_in: Option<PathBuf>,

    /// Append the ready signal to this file or FIFO
    #[arg(long, value_name = "PATH")]
    pub host_out: Option<PathBuf>,

    /// Show embedding instructions below the widget
    #[arg(long)]
    pub dev: bool,

    /// Only accept host messages from this origin (`*` for any)
    #[arg(long, value_name = "ORIGIN")]
    pub allowed_origin: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Write a config file with default values if none exists
    Init,
}
