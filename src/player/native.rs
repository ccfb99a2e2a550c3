//! Terminal runtime for the widget.
//!
//! Owns the terminal (raw mode, alternate screen, mouse and focus
//! reporting) for the lifetime of the widget and runs the single event loop
//! that drives it.

use std::fs::OpenOptions;
use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use signal_hook::consts::{SIGINT, SIGTERM};
use tracing::{debug, info};

use crate::channel::{spawn_path_reader, HostLink};
use crate::player::input::handle_event;
use crate::player::media::{ClockTransport, Loader};
use crate::player::render::{render_widget, WidgetLayout};
use crate::player::state::InputResult;
use crate::player::widget::{AudioWidget, WidgetOptions};
use crate::tui::theme::current_theme;

/// Host link endpoints given on the command line.
#[derive(Debug, Clone, Default)]
pub struct HostPaths {
    /// Read inbound messages from this path (file or FIFO)
    pub input: Option<PathBuf>,
    /// Append the ready signal to this path
    pub output: Option<PathBuf>,
}

/// Why the widget stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetExit {
    /// User quit from the keyboard
    Quit,
    /// SIGINT or SIGTERM
    Signal,
}

/// Run the widget until the user quits or a termination signal arrives.
#[cfg(not(tarpaulin_include))]
pub fn run_widget(options: WidgetOptions, host: &HostPaths) -> Result<WidgetExit> {
    let terminate = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&terminate))
            .context("Failed to register signal handler")?;
    }

    let link = open_host_link(host)?;
    let loader = Loader::spawn().context("Failed to start the loader thread")?;
    let mut widget = AudioWidget::new(ClockTransport::new(), loader, options);

    let mut guard = TerminalGuard::enter()?;
    widget.mount(Instant::now(), link);
    info!("widget mounted");

    let result = event_loop(&mut guard.terminal, &mut widget, &terminate);
    widget.teardown();
    drop(guard);
    result
}

/// Open the host streams. The reader thread opens the input path itself so
/// that a FIFO without a writer does not block startup.
#[cfg(not(tarpaulin_include))]
fn open_host_link(host: &HostPaths) -> Result<HostLink> {
    let inbound = host
        .input
        .clone()
        .map(spawn_path_reader)
        .transpose()
        .context("Failed to start the host input reader")?;

    let outbound = match &host.output {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open host output {}", path.display()))?;
            Some(Box::new(file) as Box<dyn Write + Send>)
        }
        None => None,
    };

    Ok(HostLink::new(inbound, outbound))
}

#[cfg(not(tarpaulin_include))]
fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    widget: &mut AudioWidget,
    terminate: &AtomicBool,
) -> Result<WidgetExit> {
    let theme = current_theme();
    let mut layout = WidgetLayout::compute(Rect::default(), widget.is_dev());

    loop {
        if terminate.load(Ordering::Relaxed) {
            debug!("termination signal received");
            return Ok(WidgetExit::Signal);
        }

        widget.tick(Instant::now());

        terminal.draw(|frame| {
            layout = WidgetLayout::compute(frame.area(), widget.is_dev());
            render_widget(frame, &layout, &widget.view(), &theme);
        })?;

        if !event::poll(widget.next_wakeup(Instant::now()))? {
            continue;
        }
        // Drain everything queued so a drag never lags behind the pointer
        loop {
            if handle_event(event::read()?, widget, &layout) == InputResult::Quit {
                return Ok(WidgetExit::Quit);
            }
            if !event::poll(Duration::ZERO)? {
                break;
            }
        }
    }
}

/// Restores the terminal when dropped, including on error paths.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    #[cfg(not(tarpaulin_include))]
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange,
            Hide
        ) {
            let _ = disable_raw_mode();
            return Err(e).context("Failed to set up the terminal");
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen,
            Show
        );
        let _ = disable_raw_mode();
    }
}
