//! Input handling for the widget.
//!
//! This module handles keyboard, mouse and focus events, dispatching
//! them to the widget and returning control flow signals.

mod keyboard;
mod mouse;

pub use keyboard::handle_key_event;
pub use mouse::handle_mouse_event;

use crossterm::event::Event;

use crate::player::media::MediaTransport;
use crate::player::render::WidgetLayout;
use crate::player::state::InputResult;
use crate::player::widget::AudioWidget;

/// Handle any input event, dispatching to the appropriate handler.
///
/// `layout` must be the layout of the last drawn frame so that hit-testing
/// matches what is on screen.
pub fn handle_event<T: MediaTransport>(
    event: Event,
    widget: &mut AudioWidget<T>,
    layout: &WidgetLayout,
) -> InputResult {
    match event {
        Event::Key(key) => handle_key_event(key, widget, layout),
        Event::Mouse(mouse) => handle_mouse_event(mouse, widget, layout),
        // The button may be released outside the terminal
        Event::FocusLost => {
            widget.release_in_window();
            InputResult::Continue
        }
        // Layout is recomputed on every draw
        _ => InputResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::HostLink;
    use crate::player::media::{ClockTransport, Loader, ManualTime};
    use crate::player::widget::WidgetOptions;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::layout::Rect;
    use std::time::{Duration, Instant};

    type TestWidget = AudioWidget<ClockTransport<ManualTime>>;

    fn loaded_widget(duration: f64) -> TestWidget {
        let transport = ClockTransport::with_clock(ManualTime::new());
        let loader = Loader::with_probe(move |_| Ok(duration)).unwrap();
        let mut widget = AudioWidget::new(transport, loader, WidgetOptions::default());
        widget.mount(Instant::now(), HostLink::default());
        let outcome = widget.loader().next_timeout(Duration::from_secs(5)).unwrap();
        widget.apply_outcome(outcome);
        widget
    }

    fn layout() -> WidgetLayout {
        WidgetLayout::compute(Rect::new(0, 0, 80, 20), false)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    /// Column at `fraction` of the track.
    fn column_at(layout: &WidgetLayout, fraction: f64) -> u16 {
        layout.track.x + (f64::from(layout.track.width) * fraction) as u16
    }

    #[test]
    fn quit_keys() {
        let mut widget = loaded_widget(100.0);
        let layout = layout();

        assert_eq!(handle_event(key(KeyCode::Char('q')), &mut widget, &layout), InputResult::Quit);
        assert_eq!(handle_event(key(KeyCode::Esc), &mut widget, &layout), InputResult::Quit);
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handle_event(ctrl_c, &mut widget, &layout), InputResult::Quit);
        assert_eq!(handle_event(key(KeyCode::Char('c')), &mut widget, &layout), InputResult::Continue);
    }

    #[test]
    fn space_toggles_playback() {
        let mut widget = loaded_widget(100.0);
        let layout = layout();

        handle_event(key(KeyCode::Char(' ')), &mut widget, &layout);
        assert!(widget.media().is_playing());
        handle_event(key(KeyCode::Char(' ')), &mut widget, &layout);
        assert!(!widget.media().is_playing());
    }

    #[test]
    fn digit_jumps_to_tenth_of_track() {
        let mut widget = loaded_widget(200.0);
        let layout = layout();

        handle_event(key(KeyCode::Char('5')), &mut widget, &layout);
        assert_eq!(widget.media().current_position(), 100.0);
        assert!(!widget.seek().is_dragging());

        handle_event(key(KeyCode::Char('0')), &mut widget, &layout);
        assert_eq!(widget.media().current_position(), 0.0);
    }

    #[test]
    fn press_drag_release_on_track_commits_once() {
        let mut widget = loaded_widget(200.0);
        let layout = layout();
        let row = layout.track.y;
        let quarter = column_at(&layout, 0.25);
        let half = column_at(&layout, 0.5);

        handle_event(mouse(MouseEventKind::Down(MouseButton::Left), quarter, row), &mut widget, &layout);
        assert!(widget.seek().is_dragging());
        assert_eq!(widget.media().current_position(), 0.0);

        handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), half, row), &mut widget, &layout);
        assert_eq!(widget.view().display_percentage, 50.0);

        handle_event(mouse(MouseEventKind::Up(MouseButton::Left), half, row), &mut widget, &layout);
        assert!(!widget.seek().is_dragging());
        assert_eq!(widget.media().current_position(), 100.0);
    }

    #[test]
    fn drag_past_track_end_clamps() {
        let mut widget = loaded_widget(200.0);
        let layout = layout();
        let row = layout.track.y;

        handle_event(mouse(MouseEventKind::Down(MouseButton::Left), layout.track.x, row), &mut widget, &layout);
        handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 79, row), &mut widget, &layout);
        assert_eq!(widget.view().display_percentage, 100.0);

        handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 0, row), &mut widget, &layout);
        assert_eq!(widget.view().display_percentage, 0.0);
    }

    #[test]
    fn dragging_off_the_row_leaves_the_track() {
        let mut widget = loaded_widget(200.0);
        let layout = layout();
        let row = layout.track.y;

        handle_event(mouse(MouseEventKind::Down(MouseButton::Left), layout.track.x, row), &mut widget, &layout);
        handle_event(
            mouse(MouseEventKind::Drag(MouseButton::Left), column_at(&layout, 0.75), row),
            &mut widget,
            &layout,
        );
        handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 5, row + 3), &mut widget, &layout);

        assert!(!widget.seek().is_dragging());
        assert_eq!(widget.media().current_position(), 150.0);
    }

    #[test]
    fn focus_lost_releases_an_active_drag() {
        let mut widget = loaded_widget(200.0);
        let layout = layout();
        let row = layout.track.y;

        handle_event(mouse(MouseEventKind::Down(MouseButton::Left), column_at(&layout, 0.5), row), &mut widget, &layout);
        handle_event(Event::FocusLost, &mut widget, &layout);

        assert!(!widget.seek().is_dragging());
        assert_eq!(widget.media().current_position(), 100.0);
    }

    #[test]
    fn release_elsewhere_without_drag_is_ignored() {
        let mut widget = loaded_widget(200.0);
        let layout = layout();

        handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 0, 0), &mut widget, &layout);
        handle_event(Event::FocusLost, &mut widget, &layout);

        assert_eq!(widget.media().current_position(), 0.0);
    }

    #[test]
    fn clicking_the_button_label_toggles() {
        let mut widget = loaded_widget(200.0);
        let layout = layout();
        let center = layout.button.x + layout.button.width / 2;

        handle_event(
            mouse(MouseEventKind::Down(MouseButton::Left), layout.button.x, layout.button.y),
            &mut widget,
            &layout,
        );
        assert!(!widget.media().is_playing());

        handle_event(
            mouse(MouseEventKind::Down(MouseButton::Left), center, layout.button.y),
            &mut widget,
            &layout,
        );
        assert!(widget.media().is_playing());
    }

    #[test]
    fn clicking_the_last_track_cell_seeks_to_the_end() {
        let mut widget = loaded_widget(200.0);
        let layout = layout();
        let row = layout.track.y;
        let last = layout.track.x + layout.track.width - 1;

        handle_event(mouse(MouseEventKind::Down(MouseButton::Left), last, row), &mut widget, &layout);
        handle_event(mouse(MouseEventKind::Up(MouseButton::Left), last, row), &mut widget, &layout);

        assert_eq!(widget.media().current_position(), 200.0);
    }
}
