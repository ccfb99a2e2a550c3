//! Seek interaction state machine.
//!
//! Interprets pointer input over the track control. A press starts a drag
//! that is committed with exactly one seek when the pointer is released,
//! leaves the track, or is released anywhere in the window. A discrete
//! click seeks directly without entering the drag state.
//!
//! Window-level release listeners are a scoped capability: a drag acquires
//! a [`ReleaseSubscription`] and stores it inside [`SeekState::Dragging`],
//! so every exit transition detaches the listeners by dropping it.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use crate::player::state::SeekState;

/// On-screen horizontal bounds of the track control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackBounds {
    /// Left edge (inclusive)
    pub left: f64,
    /// Width of the track
    pub width: f64,
}

impl TrackBounds {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Percentage of the track at pointer `x`, clamped to `[0, 100]`.
    pub fn percentage_at(&self, x: f64) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        (((x - self.left) / self.width) * 100.0).clamp(0.0, 100.0)
    }

    /// Pointer `x` at the given fraction of the track.
    pub fn x_at(&self, fraction: f64) -> f64 {
        self.left + self.width * fraction.clamp(0.0, 1.0)
    }

    /// Whether `x` lies on the track horizontally.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.left && x < self.left + self.width
    }
}

/// The thing a committed seek is sent to.
pub trait Seekable {
    /// Duration used to turn a percentage into a time (0 while unknown)
    fn duration(&self) -> f64;
    /// Jump the clock to `time` seconds
    fn seek_to(&mut self, time: f64);
}

/// Registry of window-level release listeners.
///
/// Cloning shares the registry. The event loop only forwards window-level
/// releases while at least one subscription is attached.
#[derive(Debug, Clone, Default)]
pub struct ReleaseListeners {
    attached: Rc<Cell<usize>>,
}

impl ReleaseListeners {
    /// Attach the listeners until the returned guard is dropped.
    pub fn acquire(&self) -> ReleaseSubscription {
        self.attached.set(self.attached.get() + 1);
        ReleaseSubscription {
            attached: Rc::clone(&self.attached),
        }
    }

    /// Number of currently attached subscriptions.
    pub fn attached(&self) -> usize {
        self.attached.get()
    }

    pub fn is_attached(&self) -> bool {
        self.attached() > 0
    }
}

/// Guard keeping the window-level release listeners attached.
#[derive(Debug)]
pub struct ReleaseSubscription {
    attached: Rc<Cell<usize>>,
}

impl Drop for ReleaseSubscription {
    fn drop(&mut self) {
        self.attached.set(self.attached.get().saturating_sub(1));
    }
}

/// Pointer-gesture interpreter for the track control.
#[derive(Debug, Default)]
pub struct SeekController {
    state: SeekState,
    listeners: ReleaseListeners,
}

impl SeekController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SeekState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// Shared handle on the window-level release listeners.
    pub fn release_listeners(&self) -> &ReleaseListeners {
        &self.listeners
    }

    /// Pointer pressed over the track: start dragging at `x`.
    pub fn pointer_down(&mut self, x: f64, bounds: TrackBounds) {
        let percentage = bounds.percentage_at(x);
        match &mut self.state {
            SeekState::Dragging {
                percentage: current,
                ..
            } => {
                // A second press without a release keeps the same gesture.
                *current = percentage;
            }
            SeekState::Idle => {
                debug!(percentage, "drag started");
                self.state = SeekState::Dragging {
                    percentage,
                    release: self.listeners.acquire(),
                };
            }
        }
    }

    /// Pointer moved while pressed: follow it, clamped to the track.
    pub fn pointer_move(&mut self, x: f64, bounds: TrackBounds) {
        if let SeekState::Dragging { percentage, .. } = &mut self.state {
            *percentage = bounds.percentage_at(x);
        }
    }

    /// Pointer released over the track.
    pub fn pointer_up(&mut self, target: &mut impl Seekable) -> Option<f64> {
        self.commit(target)
    }

    /// Pointer left the track while pressed.
    pub fn pointer_leave(&mut self, target: &mut impl Seekable) -> Option<f64> {
        self.commit(target)
    }

    /// Pointer released anywhere in the window.
    pub fn window_release(&mut self, target: &mut impl Seekable) -> Option<f64> {
        self.commit(target)
    }

    /// Discrete click at `x`: seek directly, never entering the drag state.
    ///
    /// Ignored while a drag is in progress; the drag's own release commits.
    pub fn click(&mut self, x: f64, bounds: TrackBounds, target: &mut impl Seekable) -> Option<f64> {
        if self.is_dragging() {
            return None;
        }
        let time = bounds.percentage_at(x) / 100.0 * target.duration();
        debug!(time, "click seek");
        target.seek_to(time);
        Some(time)
    }

    /// Abandon an in-progress drag without seeking (teardown).
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            debug!("drag cancelled");
        }
        self.state = SeekState::Idle;
    }

    fn commit(&mut self, target: &mut impl Seekable) -> Option<f64> {
        let SeekState::Dragging { percentage, .. } = std::mem::take(&mut self.state) else {
            return None;
        };
        let time = percentage / 100.0 * target.duration();
        debug!(percentage, time, "drag committed");
        target.seek_to(time);
        Some(time)
    }
}
