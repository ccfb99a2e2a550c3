//! Player state management
//!
//! Contains the `PlaybackState` owned by the media clock, the `SeekState`
//! owned by the seek controller, and the derived display position that the
//! track renderer consumes.

use crate::player::seek::ReleaseSubscription;

/// Result of processing an input event.
///
/// Returned by input handlers to signal control flow decisions to the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue normal playback/rendering
    Continue,
    /// Tear the widget down and exit
    Quit,
}

/// Where the current source is in its load lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    /// No source bound yet
    Idle,
    /// Source bound, waiting for metadata
    Loading,
    /// Metadata arrived, duration is known
    Loaded,
    /// Fetching or probing the source failed
    Failed(String),
}

/// Playback state of the bound source.
///
/// Written only by [`MediaClock`](crate::player::media::MediaClock).
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// True between a play command and a pause/end command
    pub is_playing: bool,
    /// Current playback position in seconds
    pub position: f64,
    /// Track duration in seconds, known once metadata is ready
    pub duration: Option<f64>,
    /// Load lifecycle of the bound source
    pub load: LoadStatus,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            position: 0.0,
            duration: None,
            load: LoadStatus::Idle,
        }
    }
}

impl PlaybackState {
    /// Whether metadata has arrived for the bound source.
    pub fn is_loaded(&self) -> bool {
        self.load == LoadStatus::Loaded
    }

    /// Failure reason of the last load, if it failed.
    pub fn failure(&self) -> Option<&str> {
        match &self.load {
            LoadStatus::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Duration in seconds, 0 while unknown.
    pub fn duration_or_zero(&self) -> f64 {
        self.duration.unwrap_or(0.0)
    }

    /// Percentage of the track elapsed at `position`.
    ///
    /// Returns 0 when the duration is 0 or unknown.
    pub fn percentage_at(&self, position: f64) -> f64 {
        match self.duration {
            Some(duration) if duration > 0.0 => (100.0 * position / duration).clamp(0.0, 100.0),
            _ => 0.0,
        }
    }
}

/// Scrub gesture state.
///
/// The drag percentage only exists while dragging, and the window-level
/// release subscription lives exactly as long as the drag.
#[derive(Debug, Default)]
pub enum SeekState {
    #[default]
    Idle,
    Dragging {
        /// Pointer position over the track, in `[0, 100]`
        percentage: f64,
        /// Keeps the window-level release listeners attached
        release: ReleaseSubscription,
    },
}

impl SeekState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Drag percentage, present only while dragging.
    pub fn drag_percentage(&self) -> Option<f64> {
        match self {
            Self::Dragging { percentage, .. } => Some(*percentage),
            Self::Idle => None,
        }
    }
}

/// The single position value shown on the track control.
///
/// While dragging, the drag percentage wins outright; otherwise the clock
/// position (as last published by the synchronizer) is converted to a
/// percentage. The two sources are never blended.
pub fn display_position(seek: &SeekState, playback: &PlaybackState, published: f64) -> f64 {
    match seek.drag_percentage() {
        Some(percentage) => percentage,
        None => playback.percentage_at(published),
    }
}
