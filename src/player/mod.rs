//! Playback engine for CVPlayer
//!
//! This module orchestrates streaming playback: the controller advances a
//! frame cursor on a fixed tick, requests chunk swaps from the double
//! buffer pool one chunk ahead of the cursor, and resynchronizes both
//! buffers after pauses and seeks. The session object owns every resource
//! with a lifetime (file handle, pool, loader thread) so teardown is a
//! join, not a prayer to process exit.

mod controller;
mod session;

pub use controller::PlaybackController;
pub use session::PlaybackSession;

/// Mutable playback state, owned by the controller
///
/// Only the control loop writes these fields; everything else sees them
/// through read-only accessors (panel display, tests).
#[derive(Debug, Clone, Copy)]
pub struct PlaybackState {
    /// Current frame index in `[0, total_frames)`
    pub cursor: u32,

    /// Playback halted; the cursor holds still
    pub paused: bool,

    /// Wrap to frame 0 after the final frame instead of pausing
    pub looping: bool,

    /// Frame step applied by rewind/fast-forward
    pub seek_rate: u32,

    /// Suppresses the boundary check for one tick after a
    /// resynchronization, so a freshly primed chunk is not re-requested
    pub just_reset: bool,
}

impl PlaybackState {
    pub(crate) fn new(looping: bool) -> Self {
        Self {
            cursor: 0,
            paused: true,
            looping,
            seek_rate: 1,
            just_reset: false,
        }
    }
}
