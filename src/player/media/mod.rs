//! Media clock adapter.
//!
//! `MediaClock` wraps a [`MediaTransport`] and owns the [`PlaybackState`].
//! It is the only writer of that state: commands (`play`, `pause`,
//! `seek_to`, `restart`) and notifications (`on_metadata_ready`,
//! `on_load_failed`, end-of-track seen during `poll`) all go through it.
//!
//! - `error`: source loading errors
//! - `loader`: background fetch/probe worker
//! - `source`: source resolution and duration probing
//! - `transport`: the native clock primitive

mod error;
mod loader;
mod source;
mod transport;

pub use error::MediaError;
pub use loader::{worker_loop, LoadOutcome, LoadRequest, Loader};
pub use source::{probe_duration, probe_source, SourceLocation};
pub use transport::{ClockTransport, Ended, MediaTransport, SystemTime, TimeSource};

#[cfg(test)]
pub(crate) use transport::tests::ManualTime;

use tracing::{debug, info, warn};

use crate::player::seek::Seekable;
use crate::player::state::{LoadStatus, PlaybackState};

/// A backward jump smaller than this is jitter, not a native loop wrap.
const WRAP_TOLERANCE: f64 = 1e-3;

/// Identifies one `load` call; outcomes of older loads are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Playback clock bound to one source at a time.
#[derive(Debug)]
pub struct MediaClock<T: MediaTransport> {
    transport: T,
    state: PlaybackState,
    source: Option<String>,
    ticket: LoadTicket,
    loop_hint: bool,
    /// Set once a restart (explicit or native wrap) has happened and
    /// cleared when playback advances again.
    restarted: bool,
}

impl<T: MediaTransport> MediaClock<T> {
    /// Create an unbound clock. `loop_hint` is passed to the transport on
    /// every load.
    pub fn new(transport: T, loop_hint: bool) -> Self {
        Self {
            transport,
            state: PlaybackState::default(),
            source: None,
            ticket: LoadTicket(0),
            loop_hint,
            restarted: false,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The currently bound source.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Ticket of the most recent load.
    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_loaded()
    }

    /// Loaded with a track that has something to play.
    pub fn is_playable(&self) -> bool {
        self.is_loaded() && self.state.duration_or_zero() > 0.0
    }

    pub fn current_position(&self) -> f64 {
        self.state.position
    }

    /// Bind a new source, stopping whatever was playing.
    pub fn load(&mut self, source: impl Into<String>) -> LoadTicket {
        let source = source.into();
        self.stop_transport();
        self.ticket = LoadTicket(self.ticket.0 + 1);
        self.state = PlaybackState {
            load: LoadStatus::Loading,
            ..PlaybackState::default()
        };
        self.restarted = false;
        info!(source = %source, ticket = self.ticket.0, "loading source");
        self.source = Some(source);
        self.ticket
    }

    /// Metadata for a load arrived. Applied at most once, and only for the
    /// current ticket.
    pub fn on_metadata_ready(&mut self, ticket: LoadTicket, duration: f64) -> bool {
        if ticket != self.ticket || self.state.load != LoadStatus::Loading {
            debug!(ticket = ticket.0, "ignoring stale metadata");
            return false;
        }
        if !duration.is_finite() {
            warn!(duration, "source reported a non-finite duration");
            self.state.load = LoadStatus::Failed(MediaError::UnknownDuration.to_string());
            return true;
        }

        let duration = duration.max(0.0);
        self.transport.bind(duration);
        self.transport.set_looping(self.loop_hint);
        self.state.duration = Some(duration);
        self.state.position = 0.0;
        self.state.load = LoadStatus::Loaded;
        info!(duration, "source loaded");
        true
    }

    /// Loading the current source failed.
    pub fn on_load_failed(&mut self, ticket: LoadTicket, error: &MediaError) -> bool {
        if ticket != self.ticket || self.state.load != LoadStatus::Loading {
            debug!(ticket = ticket.0, "ignoring stale load failure");
            return false;
        }
        warn!(source = ?self.source, error = %error, "failed to load source");
        self.state.load = LoadStatus::Failed(error.to_string());
        true
    }

    /// Start playback. No-op when unloaded, empty or already playing.
    pub fn play(&mut self) -> bool {
        if !self.is_playable() || self.state.is_playing {
            return false;
        }
        self.transport.play();
        self.state.is_playing = true;
        debug!(position = self.state.position, "play");
        true
    }

    /// Pause playback. No-op when unloaded or already paused.
    pub fn pause(&mut self) -> bool {
        if !self.is_loaded() || !self.state.is_playing {
            return false;
        }
        self.transport.pause();
        // An end crossed since the last poll is settled by the pause.
        if let Some(ended) = self.transport.take_ended() {
            debug!(?ended, "end reached while pausing");
        }
        let raw = self.transport.position();
        self.state.position = self.clamped(raw);
        self.state.is_playing = false;
        debug!(position = self.state.position, "pause");
        true
    }

    pub fn toggle(&mut self) -> bool {
        if self.state.is_playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Jump the clock, clamped to `[0, duration]`. The new position is
    /// visible immediately.
    pub fn seek_to(&mut self, time: f64) {
        if !self.is_loaded() {
            return;
        }
        let time = if time.is_nan() { 0.0 } else { self.clamped(time) };
        self.transport.set_position(time);
        self.state.position = time;
        self.restarted = false;
        debug!(time, "seek");
    }

    /// Mirror the transport clock into the playback state and dispatch
    /// end-of-track. Call once per event-loop turn.
    pub fn poll(&mut self) {
        if !self.is_loaded() {
            return;
        }
        let raw = self.transport.position();
        let position = self.clamped(raw);
        let ended = self.transport.take_ended();
        if self.state.is_playing {
            let wrapped = ended == Some(Ended::Wrapped)
                || position + WRAP_TOLERANCE < self.state.position;
            if wrapped {
                debug!(from = self.state.position, "native loop wrapped");
                self.restarted = true;
            } else if position > self.state.position {
                self.restarted = false;
            }
        }
        self.state.position = position;

        if ended.is_some() && self.state.is_playing {
            self.on_ended();
        }
    }

    /// End of track reached.
    pub fn on_ended(&mut self) {
        self.restart();
    }

    /// Restart from 0 and keep playing.
    ///
    /// Idempotent: once a restart happened (explicit, or the transport's
    /// native loop wrapped), further restarts are no-ops until playback
    /// advances again.
    pub fn restart(&mut self) -> bool {
        if !self.is_playable() {
            return false;
        }
        if self.restarted {
            debug!("restart already applied");
            return false;
        }
        self.transport.set_position(0.0);
        self.transport.play();
        self.state.position = 0.0;
        self.state.is_playing = true;
        self.restarted = true;
        debug!("restarted from the top");
        true
    }

    /// Teardown: stop playback and forget the source.
    pub fn unload(&mut self) {
        self.stop_transport();
        self.ticket = LoadTicket(self.ticket.0 + 1);
        self.state = PlaybackState::default();
        self.source = None;
        self.restarted = false;
    }

    fn stop_transport(&mut self) {
        if self.state.is_playing {
            self.transport.pause();
        }
        self.transport.unbind();
    }

    fn clamped(&self, time: f64) -> f64 {
        time.clamp(0.0, self.state.duration_or_zero())
    }
}

impl<T: MediaTransport> Seekable for MediaClock<T> {
    fn duration(&self) -> f64 {
        self.state.duration_or_zero()
    }

    fn seek_to(&mut self, time: f64) {
        MediaClock::seek_to(self, time);
    }
}
