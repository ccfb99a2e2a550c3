//! Mouse input handling for the widget.
//!
//! Maps terminal mouse reports onto the seek controller's pointer events.
//! The track row is the track control: a press there starts a drag, moves
//! along the row follow it (clamping past either end), and moving off the
//! row counts as leaving the track. A release anywhere else is a
//! window-level release.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::player::media::MediaTransport;
use crate::player::render::WidgetLayout;
use crate::player::state::InputResult;
use crate::player::widget::AudioWidget;

/// Handle a mouse event.
pub fn handle_mouse_event<T: MediaTransport>(
    mouse: MouseEvent,
    widget: &mut AudioWidget<T>,
    layout: &WidgetLayout,
) -> InputResult {
    let x = layout.track_x(mouse.column);
    let bounds = layout.track_bounds();

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if layout.hit_track(mouse.column, mouse.row) {
                widget.press_track(x, bounds);
            } else if layout.hit_button(mouse.column, mouse.row) {
                widget.toggle_playback();
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if layout.on_track_row(mouse.row) {
                widget.drag_track(x, bounds);
            } else {
                widget.leave_track();
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if layout.on_track_row(mouse.row) {
                widget.release_on_track();
            } else {
                widget.release_in_window();
            }
        }
        _ => {}
    }

    InputResult::Continue
}
