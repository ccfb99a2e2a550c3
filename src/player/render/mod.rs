//! Rendering components for the audio widget.
//!
//! `progress` holds the pure track/time helpers; `view` lays the widget out
//! and draws it with ratatui.

mod progress;
mod view;

pub use progress::{build_track_cells, format_time, EMPTY, FILLED, INDICATOR};
pub use view::{render_widget, WidgetLayout, WidgetView, WIDGET_WIDTH};
