//! Loop-playing audio widget
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `media/`: media clock adapter, transport, source loading
//! - `sync`: progress synchronizer (per-frame position publishing)
//! - `seek`: seek interaction state machine for the track control
//! - `state`: PlaybackState, SeekState and the derived display position
//! - `widget`: the above plus the host channel, wired together
//! - `input/`: keyboard, mouse and focus handling
//! - `render/`: layout and drawing
//!
//! # Usage
//!
//! ```no_run
//! use tuneframe::player::{run_widget, HostPaths, WidgetExit, WidgetOptions};
//!
//! let exit = run_widget(WidgetOptions::default(), &HostPaths::default()).unwrap();
//! if exit == WidgetExit::Signal {
//!     eprintln!("Stopped by signal");
//! }
//! ```

pub(crate) mod input;
pub mod media;
mod native;
pub mod render;
pub mod seek;
pub mod state;
pub mod sync;
pub mod widget;

pub use native::{run_widget, HostPaths, WidgetExit};
pub use state::{display_position, InputResult, LoadStatus, PlaybackState, SeekState};
pub use widget::{AudioWidget, WidgetOptions};
