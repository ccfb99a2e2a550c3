//! The audio widget: media clock, progress synchronizer, seek controller and
//! host channel wired together.
//!
//! `AudioWidget` is independent of the terminal. The event loop feeds it
//! time (`tick`), pointer and key input (via `input`), and reads a
//! [`WidgetView`] back for drawing.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::channel::{ConfigChannel, HostLink, OriginPolicy, DEFAULT_READY_DELAY};
use crate::config::Config;
use crate::player::media::{ClockTransport, LoadOutcome, Loader, MediaClock, MediaTransport};
use crate::player::render::WidgetView;
use crate::player::seek::{SeekController, TrackBounds};
use crate::player::state::display_position;
use crate::player::sync::{IntervalScheduler, ProgressSynchronizer};

/// Longest the event loop sleeps when nothing is scheduled.
pub const IDLE_POLL: Duration = Duration::from_millis(50);

/// Widget settings, usually derived from [`Config`] and the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetOptions {
    /// Source loaded at mount
    pub source: String,
    pub loop_hint: bool,
    pub frame_interval: Duration,
    pub ready_delay: Duration,
    pub origin_policy: OriginPolicy,
    /// Show the embedding instructions panel
    pub dev: bool,
}

impl WidgetOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            source: config.player.default_source.clone(),
            loop_hint: config.player.loop_hint,
            frame_interval: config.frame_interval(),
            ready_delay: config.ready_delay(),
            origin_policy: config.origin_policy(),
            dev: false,
        }
    }
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            source: crate::config::DEFAULT_SOURCE.to_string(),
            loop_hint: true,
            frame_interval: Duration::from_millis(16),
            ready_delay: DEFAULT_READY_DELAY,
            origin_policy: OriginPolicy::Any,
            dev: false,
        }
    }
}

/// A mounted (or mountable) audio widget.
pub struct AudioWidget<T: MediaTransport = ClockTransport> {
    media: MediaClock<T>,
    sync: ProgressSynchronizer<IntervalScheduler>,
    seek: SeekController,
    channel: ConfigChannel,
    loader: Loader,
    initial_source: String,
    dev: bool,
}

impl<T: MediaTransport> AudioWidget<T> {
    pub fn new(transport: T, loader: Loader, options: WidgetOptions) -> Self {
        Self {
            media: MediaClock::new(transport, options.loop_hint),
            sync: ProgressSynchronizer::new(IntervalScheduler::new(options.frame_interval)),
            seek: SeekController::new(),
            channel: ConfigChannel::new(options.origin_policy, options.ready_delay),
            loader,
            initial_source: options.source,
            dev: options.dev,
        }
    }

    pub fn media(&self) -> &MediaClock<T> {
        &self.media
    }

    pub fn seek(&self) -> &SeekController {
        &self.seek
    }

    pub fn sync(&self) -> &ProgressSynchronizer<IntervalScheduler> {
        &self.sync
    }

    pub fn channel(&self) -> &ConfigChannel {
        &self.channel
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    /// Attach the host link, schedule readiness and load the initial source.
    pub fn mount(&mut self, now: Instant, link: HostLink) {
        self.channel.mount(now, link);
        let source = self.initial_source.clone();
        self.load_source(&source);
    }

    /// Replace the audio source. Any drag in progress is abandoned.
    pub fn load_source(&mut self, source: &str) {
        self.seek.cancel();
        let ticket = self.media.load(source);
        self.sync.set_playing(false);
        self.sync.publish(0.0);
        self.loader.request(ticket, source);
    }

    /// Apply a finished background load.
    pub fn apply_outcome(&mut self, outcome: LoadOutcome) {
        match outcome.result {
            Ok(duration) => self.media.on_metadata_ready(outcome.ticket, duration),
            Err(e) => self.media.on_load_failed(outcome.ticket, &e),
        };
        self.sync.publish(self.media.current_position());
    }

    /// Advance everything that happens without user input: load outcomes,
    /// host messages, the ready signal, the clock and the frame loop.
    pub fn tick(&mut self, now: Instant) {
        while let Some(outcome) = self.loader.try_next() {
            self.apply_outcome(outcome);
        }

        for update in self.channel.drain() {
            self.load_source(&update.source);
        }
        self.channel.poll_ready(now);

        self.media.poll();
        self.sync.set_playing(self.media.is_playing());
        if let Some(handle) = self.sync.scheduler_mut().take_due(now) {
            self.sync.on_frame(handle, &self.media);
        }
    }

    /// How long the event loop may wait for input before the next `tick`.
    pub fn next_wakeup(&self, now: Instant) -> Duration {
        [
            self.sync.scheduler().time_until_due(now),
            self.channel.time_until_ready(now),
        ]
        .into_iter()
        .flatten()
        .fold(IDLE_POLL, Duration::min)
    }

    /// Play/pause control. Inert until the source is loaded.
    pub fn toggle_playback(&mut self) {
        if !self.media.is_loaded() {
            return;
        }
        self.media.toggle();
        self.sync.set_playing(self.media.is_playing());
        self.sync.publish(self.media.current_position());
    }

    pub fn press_track(&mut self, x: f64, bounds: TrackBounds) {
        if self.media.is_loaded() {
            self.seek.pointer_down(x, bounds);
        }
    }

    pub fn drag_track(&mut self, x: f64, bounds: TrackBounds) {
        self.seek.pointer_move(x, bounds);
    }

    pub fn release_on_track(&mut self) {
        if self.seek.pointer_up(&mut self.media).is_some() {
            self.after_seek();
        }
    }

    pub fn leave_track(&mut self) {
        if self.seek.pointer_leave(&mut self.media).is_some() {
            self.after_seek();
        }
    }

    /// Window-level release. Only delivered while a drag holds the release
    /// listeners.
    pub fn release_in_window(&mut self) {
        if !self.seek.release_listeners().is_attached() {
            return;
        }
        if self.seek.window_release(&mut self.media).is_some() {
            self.after_seek();
        }
    }

    pub fn click_track(&mut self, x: f64, bounds: TrackBounds) {
        if !self.media.is_loaded() {
            return;
        }
        if self.seek.click(x, bounds, &mut self.media).is_some() {
            self.after_seek();
        }
    }

    /// What to draw this frame.
    pub fn view(&self) -> WidgetView<'_> {
        let playback = self.media.state();
        let published = self.sync.published();
        WidgetView {
            playback,
            display_percentage: display_position(self.seek.state(), playback, published),
            elapsed: published,
            ready: self.channel.is_ready(),
            dev: self.dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        self.dev
    }

    /// Unmount: drop the drag, cancel the frame, stop playback and remove
    /// the host listener.
    pub fn teardown(&mut self) {
        self.seek.cancel();
        self.sync.teardown();
        self.media.unload();
        self.channel.unmount();
        info!("widget torn down");
    }

    fn after_seek(&mut self) {
        let position = self.media.current_position();
        debug!(position, "seek applied");
        self.sync.publish(position);
    }
}
