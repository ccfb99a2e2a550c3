//! tuneframe - embeddable loop-playing audio widget for the terminal
//!
//! The widget plays one track on loop, shows elapsed/total time and a
//! seekable track, and takes its audio source from a host process over a
//! line-delimited JSON link after signalling readiness.

pub mod channel;
pub mod config;
pub mod logging;
pub mod player;
pub mod tui;

pub use config::Config;
