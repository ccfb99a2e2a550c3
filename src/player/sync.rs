//! Progress synchronizer.
//!
//! While the clock is playing, a frame is scheduled once per refresh
//! interval. Each frame reads the clock position and publishes it for the
//! renderer, then schedules the next frame if playback is still running.
//! At most one frame is outstanding at any time, and dropping the
//! synchronizer cancels the pending one.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::player::media::{MediaClock, MediaTransport};

/// Identifies one scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Per-frame callback scheduling.
pub trait FrameScheduler {
    /// Schedule one frame callback.
    fn request_frame(&mut self) -> FrameHandle;
    /// Cancel a scheduled frame. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler with a single deadline, polled by the event loop.
#[derive(Debug)]
pub struct IntervalScheduler {
    interval: Duration,
    next_id: u64,
    armed: Option<(FrameHandle, Instant)>,
}

impl IntervalScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_id: 0,
            armed: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left until the armed frame is due, if one is armed.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.armed
            .map(|(_, due)| due.saturating_duration_since(now))
    }

    /// Take the armed frame if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<FrameHandle> {
        match self.armed {
            Some((handle, due)) if due <= now => {
                self.armed = None;
                Some(handle)
            }
            _ => None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

impl FrameScheduler for IntervalScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.armed = Some((handle, Instant::now() + self.interval));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if matches!(self.armed, Some((armed, _)) if armed == handle) {
            self.armed = None;
        }
    }
}

/// Republishes the clock position while playing.
#[derive(Debug)]
pub struct ProgressSynchronizer<S: FrameScheduler> {
    scheduler: S,
    pending: Option<FrameHandle>,
    published: f64,
}

impl<S: FrameScheduler> ProgressSynchronizer<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            published: 0.0,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Last position handed to the renderer.
    pub fn published(&self) -> f64 {
        self.published
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// React to the clock's playing flag: start the frame loop when it
    /// turns on, cancel the pending frame when it turns off.
    pub fn set_playing(&mut self, playing: bool) {
        if playing {
            if self.pending.is_none() {
                self.pending = Some(self.scheduler.request_frame());
                trace!("frame loop started");
            }
        } else {
            self.cancel_pending();
        }
    }

    /// Publish a position outside the frame loop (load, seek, pause).
    pub fn publish(&mut self, position: f64) {
        self.published = position;
    }

    /// A scheduled frame fired. Returns the published position, or `None`
    /// if the handle was cancelled or superseded.
    pub fn on_frame<T: MediaTransport>(&mut self, handle: FrameHandle, clock: &MediaClock<T>) -> Option<f64> {
        if self.pending != Some(handle) {
            trace!(?handle, "ignoring stale frame");
            return None;
        }
        self.pending = None;
        self.published = clock.current_position();
        if clock.is_playing() {
            self.pending = Some(self.scheduler.request_frame());
        }
        Some(self.published)
    }

    /// Stop the frame loop for good.
    pub fn teardown(&mut self) {
        self.cancel_pending();
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
            trace!("frame loop stopped");
        }
    }
}

impl<S: FrameScheduler> Drop for ProgressSynchronizer<S> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
