//! Theme for the widget and CLI output
//!
//! Provides ratatui styles for the widget and ANSI-wrapped strings for the
//! plain CLI commands. ANSI output honours `NO_COLOR`.

use ratatui::style::{Color, Modifier, Style};

/// Colors used by the widget.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Time text and labels
    pub text: Color,
    /// Skeletons, hints and the not-yet-ready look
    pub muted: Color,
    /// Play/pause control and position indicator
    pub accent: Color,
    /// Elapsed part of the track
    pub track_filled: Color,
    /// Remaining part of the track
    pub track_empty: Color,
    /// Load failures
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            accent: Color::Green,
            track_filled: Color::Green,
            track_empty: Color::DarkGray,
            error: Color::Red,
        }
    }
}

impl Theme {
    /// Same layout, everything dimmed; used until the host handshake completes.
    pub fn dimmed(&self) -> Self {
        Self {
            text: self.muted,
            accent: self.muted,
            track_filled: self.muted,
            ..self.clone()
        }
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for the play/pause control.
    pub fn control_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn indicator_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn filled_style(&self) -> Style {
        Style::default().fg(self.track_filled)
    }

    pub fn empty_style(&self) -> Style {
        Style::default().fg(self.track_empty)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    // ANSI helpers for CLI output

    pub fn primary_text(&self, text: &str) -> String {
        paint(self.text, text)
    }

    pub fn accent_text(&self, text: &str) -> String {
        paint(self.accent, text)
    }
}

/// ANSI reset sequence
const ANSI_RESET: &str = "\x1b[0m";

fn paint(color: Color, text: &str) -> String {
    if std::env::var_os("NO_COLOR").is_some() {
        return text.to_string();
    }
    format!("{}{}{}", color_to_ansi(color), text, ANSI_RESET)
}

/// Convert a ratatui Color to an ANSI escape code.
fn color_to_ansi(color: Color) -> &'static str {
    match color {
        Color::Red => "\x1b[31m",
        Color::Green => "\x1b[32m",
        Color::Yellow => "\x1b[33m",
        Color::Cyan => "\x1b[36m",
        Color::Gray => "\x1b[37m",
        Color::DarkGray => "\x1b[90m",
        Color::White => "\x1b[97m",
        // Everything else prints uncolored
        _ => "",
    }
}

/// Theme used by the widget and commands.
pub fn current_theme() -> Theme {
    Theme::default()
}
