//! TUI (Text User Interface) support for tuneframe
//!
//! Theme and layout helpers shared by the widget renderer and the plain CLI
//! commands.

pub mod theme;
pub mod ui;

pub use theme::current_theme;
