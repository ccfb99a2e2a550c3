//! Keyboard input handling for the widget.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::player::media::MediaTransport;
use crate::player::render::WidgetLayout;
use crate::player::state::InputResult;
use crate::player::widget::AudioWidget;

/// Handle a keyboard event.
///
/// - `space`: play/pause
/// - `0`-`9`: jump to that tenth of the track
/// - `q`, `Esc`, `Ctrl-C`: quit
pub fn handle_key_event<T: MediaTransport>(
    key: KeyEvent,
    widget: &mut AudioWidget<T>,
    layout: &WidgetLayout,
) -> InputResult {
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => InputResult::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputResult::Quit,

        KeyCode::Char(' ') => {
            widget.toggle_playback();
            InputResult::Continue
        }

        KeyCode::Char(digit @ '0'..='9') => {
            let tenth = f64::from(digit.to_digit(10).unwrap_or(0)) / 10.0;
            let bounds = layout.track_bounds();
            widget.click_track(bounds.x_at(tenth), bounds);
            InputResult::Continue
        }

        _ => InputResult::Continue,
    }
}
