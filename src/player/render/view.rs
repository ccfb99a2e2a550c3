//! Widget layout and drawing.
//!
//! The layout is computed from the terminal area each frame; the same
//! layout is used to draw and to hit-test mouse input, so the track bounds
//! the seek controller sees always match what is on screen.

use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use super::progress::{build_track_cells, format_time, FILLED};
use crate::player::seek::TrackBounds;
use crate::player::state::{LoadStatus, PlaybackState};
use crate::tui::theme::Theme;
use crate::tui::ui::centered_box;

/// Preferred widget width, borders included.
pub const WIDGET_WIDTH: u16 = 60;
/// Button, spacer, track and time rows.
const BODY_ROWS: u16 = 4;
const INSTRUCTION_ROWS: u16 = 6;

const PLAY_LABEL: &str = "▶  Play";
const PAUSE_LABEL: &str = "⏸  Pause";
/// Columns of the widest button label.
const BUTTON_LABEL_WIDTH: u16 = 8;

/// Screen regions of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetLayout {
    pub frame: Rect,
    pub button: Rect,
    pub track: Rect,
    pub times: Rect,
    pub instructions: Option<Rect>,
}

impl WidgetLayout {
    pub fn compute(area: Rect, dev: bool) -> Self {
        let extra = if dev { INSTRUCTION_ROWS + 1 } else { 0 };
        let frame = centered_box(WIDGET_WIDTH, BODY_ROWS + extra + 2, area);
        let inner = Rect {
            x: frame.x.saturating_add(2),
            y: frame.y.saturating_add(1),
            width: frame.width.saturating_sub(4),
            height: frame.height.saturating_sub(2),
        };
        let row = |offset: u16| Rect {
            x: inner.x,
            y: inner.y + offset,
            width: inner.width,
            height: u16::from(offset < inner.height),
        };

        let instructions = (dev && inner.height > BODY_ROWS + 1).then(|| Rect {
            x: inner.x,
            y: inner.y + BODY_ROWS + 1,
            width: inner.width,
            height: inner.height - BODY_ROWS - 1,
        });

        Self {
            frame,
            button: row(0),
            track: row(2),
            times: row(3),
            instructions,
        }
    }

    /// On-screen bounds of the track for the seek controller.
    pub fn track_bounds(&self) -> TrackBounds {
        TrackBounds::new(f64::from(self.track.x), f64::from(self.track.width))
    }

    /// Seek coordinate for a terminal column. The last cell of the track
    /// stands for its end so a click there reaches 100%.
    pub fn track_x(&self, column: u16) -> f64 {
        let end = self.track.x.saturating_add(self.track.width);
        if self.track.width > 0 && column.saturating_add(1) == end {
            f64::from(end)
        } else {
            f64::from(column)
        }
    }

    /// Whether `row` is the track's row. Columns past either end still count
    /// so that overshooting a drag clamps instead of leaving the track.
    pub fn on_track_row(&self, row: u16) -> bool {
        self.track.height > 0 && row == self.track.y
    }

    /// Whether (`column`, `row`) is on the track itself.
    pub fn hit_track(&self, column: u16, row: u16) -> bool {
        self.on_track_row(row) && self.track_bounds().contains(f64::from(column))
    }

    /// Whether (`column`, `row`) is on the play/pause label.
    pub fn hit_button(&self, column: u16, row: u16) -> bool {
        if self.button.height == 0 || row != self.button.y {
            return false;
        }
        let width = BUTTON_LABEL_WIDTH.min(self.button.width);
        let start = self.button.x + (self.button.width - width) / 2;
        (start..start + width).contains(&column)
    }
}

/// Everything the widget shows for one frame.
#[derive(Debug, Clone, Copy)]
pub struct WidgetView<'a> {
    pub playback: &'a PlaybackState,
    /// Arbitrated track position in `[0, 100]`
    pub display_percentage: f64,
    /// Clock position shown as elapsed time
    pub elapsed: f64,
    /// Whether the host handshake completed
    pub ready: bool,
    /// Show the embedding instructions panel
    pub dev: bool,
}

/// Draw the widget.
pub fn render_widget(frame: &mut Frame, layout: &WidgetLayout, view: &WidgetView, theme: &Theme) {
    let theme = if view.ready { theme.clone() } else { theme.dimmed() };

    let block = Block::bordered()
        .title(" tuneframe ")
        .border_style(theme.muted_style());
    frame.render_widget(block, layout.frame);

    match &view.playback.load {
        LoadStatus::Loaded => render_loaded(frame, layout, view, &theme),
        LoadStatus::Failed(reason) => render_failed(frame, layout, reason, &theme),
        LoadStatus::Idle | LoadStatus::Loading => render_skeleton(frame, layout, &theme),
    }

    if let Some(area) = layout.instructions {
        frame.render_widget(Paragraph::new(instruction_lines(&theme)), area);
    }
}

fn render_loaded(frame: &mut Frame, layout: &WidgetLayout, view: &WidgetView, theme: &Theme) {
    let label = if view.playback.is_playing {
        PAUSE_LABEL
    } else {
        PLAY_LABEL
    };
    frame.render_widget(
        Paragraph::new(Span::styled(label, theme.control_style())).alignment(Alignment::Center),
        layout.button,
    );

    frame.render_widget(
        Paragraph::new(track_line(layout.track.width, view.display_percentage, theme)),
        layout.track,
    );

    let elapsed = format_time(view.elapsed);
    let total = format_time(view.playback.duration_or_zero());
    frame.render_widget(
        Paragraph::new(Line::from(spread(&elapsed, &total, layout.times.width)).style(theme.text_style())),
        layout.times,
    );
}

fn render_failed(frame: &mut Frame, layout: &WidgetLayout, reason: &str, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Span::styled("Could not load audio", theme.error_style()))
            .alignment(Alignment::Center),
        layout.button,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(reason.to_string(), theme.muted_style())),
        layout.times,
    );
}

fn render_skeleton(frame: &mut Frame, layout: &WidgetLayout, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Span::styled("◌", theme.muted_style())).alignment(Alignment::Center),
        layout.button,
    );
    let skeleton = "░".repeat(layout.track.width as usize);
    frame.render_widget(
        Paragraph::new(Span::styled(skeleton, theme.muted_style())),
        layout.track,
    );
}

/// Track cells as styled spans: filled, indicator, remaining.
fn track_line(width: u16, percentage: f64, theme: &Theme) -> Line<'static> {
    let (cells, _) = build_track_cells(width as usize, percentage);
    let indicator = cells.iter().position(|&c| c != FILLED).unwrap_or(cells.len());

    let filled: String = cells[..indicator].iter().collect();
    let mut spans = vec![Span::styled(filled, theme.filled_style())];
    if let Some(&glyph) = cells.get(indicator) {
        spans.push(Span::styled(glyph.to_string(), theme.indicator_style()));
        let rest: String = cells[indicator + 1..].iter().collect();
        spans.push(Span::styled(rest, theme.empty_style()));
    }
    Line::from(spans)
}

/// `left` and `right` pushed to opposite ends of `width` columns.
fn spread(left: &str, right: &str, width: u16) -> String {
    let gap = (width as usize).saturating_sub(left.len() + right.len()).max(1);
    format!("{left}{}{right}", " ".repeat(gap))
}

fn instruction_lines(theme: &Theme) -> Vec<Line<'static>> {
    let text = theme.muted_style();
    vec![
        Line::styled("Embedding:", theme.text_style()),
        Line::styled("1. tuneframe play --host-in <fifo> --host-out <file>", text),
        Line::styled("2. wait for {\"status\":\"ready\",\"type\":\"audioPlayer\"}", text),
        Line::styled("3. write {\"audioSrc\":\"https://.../track.mp3\"} to <fifo>", text),
        Line::styled("   optional envelope: {\"origin\":\"...\",\"data\":{...}}", text),
    ]
}
