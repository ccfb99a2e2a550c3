//! Native playback transport.
//!
//! The transport is the primitive the media clock wraps: it keeps time for
//! the bound track and reports when the end is reached. `ClockTransport`
//! runs off a [`TimeSource`] so tests can drive it deterministically.

use std::time::{Duration, Instant};

/// Source of monotonic time for the transport.
pub trait TimeSource {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

impl TimeSource for SystemTime {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// How the bound track reached its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ended {
    /// The loop hint wrapped the clock back to the start; playback goes on.
    Wrapped,
    /// The clock stopped at the duration.
    Stopped,
}

/// Primitive operations of a time-based media resource.
pub trait MediaTransport {
    /// Bind a track of the given duration, paused at 0.
    fn bind(&mut self, duration: f64);
    /// Release the bound track, stopping playback.
    fn unbind(&mut self);
    fn play(&mut self);
    fn pause(&mut self);
    fn set_position(&mut self, seconds: f64);
    /// Current clock position in seconds.
    fn position(&mut self) -> f64;
    /// Native loop hint: wrap to the start instead of stopping at the end.
    fn set_looping(&mut self, looping: bool);
    /// One-shot end-of-track notification.
    fn take_ended(&mut self) -> Option<Ended>;
}

/// Transport that keeps time against a [`TimeSource`].
///
/// Playback at 1x: position = anchor position + time since the anchor.
/// Reaching the end either stops the clock at the duration or, with the loop
/// hint, wraps it. In both cases the ended notification is raised.
#[derive(Debug)]
pub struct ClockTransport<C: TimeSource = SystemTime> {
    clock: C,
    duration: Option<f64>,
    looping: bool,
    playing: bool,
    anchor_position: f64,
    anchor_time: Instant,
    ended: Option<Ended>,
}

impl ClockTransport<SystemTime> {
    pub fn new() -> Self {
        Self::with_clock(SystemTime)
    }
}

impl Default for ClockTransport<SystemTime> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: TimeSource> ClockTransport<C> {
    pub fn with_clock(clock: C) -> Self {
        let anchor_time = clock.now();
        Self {
            clock,
            duration: None,
            looping: false,
            playing: false,
            anchor_position: 0.0,
            anchor_time,
            ended: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    fn reanchor(&mut self, position: f64) {
        self.anchor_position = position;
        self.anchor_time = self.clock.now();
    }

    fn raw_position(&self) -> f64 {
        if !self.playing {
            return self.anchor_position;
        }
        let elapsed = self
            .clock
            .now()
            .saturating_duration_since(self.anchor_time)
            .as_secs_f64();
        self.anchor_position + elapsed
    }
}

impl<C: TimeSource> MediaTransport for ClockTransport<C> {
    fn bind(&mut self, duration: f64) {
        self.duration = Some(duration.max(0.0));
        self.playing = false;
        self.ended = None;
        self.reanchor(0.0);
    }

    fn unbind(&mut self) {
        self.duration = None;
        self.playing = false;
        self.ended = None;
        self.reanchor(0.0);
    }

    fn play(&mut self) {
        if self.playing || self.duration.is_none() {
            return;
        }
        let position = self.anchor_position;
        self.playing = true;
        self.reanchor(position);
    }

    fn pause(&mut self) {
        if !self.playing {
            return;
        }
        let position = self.position();
        self.playing = false;
        self.reanchor(position);
    }

    fn set_position(&mut self, seconds: f64) {
        let Some(duration) = self.duration else {
            return;
        };
        self.reanchor(seconds.clamp(0.0, duration));
    }

    fn position(&mut self) -> f64 {
        let Some(duration) = self.duration else {
            return 0.0;
        };
        let raw = self.raw_position();
        if !self.playing || raw < duration {
            return raw.min(duration);
        }

        if self.looping && duration > 0.0 {
            self.ended = Some(Ended::Wrapped);
            let wrapped = raw % duration;
            // Keep the wrap relative to the moment the end was crossed.
            let now = self.clock.now();
            self.anchor_position = 0.0;
            self.anchor_time = now
                .checked_sub(Duration::from_secs_f64(wrapped))
                .unwrap_or(now);
            wrapped
        } else {
            self.ended = Some(Ended::Stopped);
            self.playing = false;
            self.reanchor(duration);
            duration
        }
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn take_ended(&mut self) -> Option<Ended> {
        self.ended.take()
    }
}
