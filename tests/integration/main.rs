//! Integration tests for the tuneframe binary and library

mod channel_test;
mod cli_test;
mod config_test;
mod helpers;
mod probe_test;
