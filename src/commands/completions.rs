//! Shell completion generation

use std::io;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;

/// Print completions for `shell` to stdout.
#[cfg(not(tarpaulin_include))]
pub fn handle(shell: Shell) {
    clap_complete::generate(shell, &mut Cli::command(), "tuneframe", &mut io::stdout());
}
