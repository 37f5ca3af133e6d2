//! Playback controller: the cursor state machine and read-ahead policy
//!
//! Each tick runs before the frame is drawn and the cursor advances after
//! it, so a seek target is always rendered once before playback moves on.
//! Crossing into a new chunk requests the *following* chunk from the pool,
//! one full chunk before it is needed.

use crate::format::VideoHeader;
use crate::loader::{DoubleBufferPool, PoolStats};
use crate::player::PlaybackState;
use crate::utils::error::Result;
use log::{debug, info};

pub struct PlaybackController {
    header: VideoHeader,
    pool: DoubleBufferPool,
    state: PlaybackState,
}

impl PlaybackController {
    pub fn new(header: VideoHeader, pool: DoubleBufferPool, looping: bool) -> Self {
        Self {
            header,
            pool,
            state: PlaybackState::new(looping),
        }
    }

    pub fn header(&self) -> &VideoHeader {
        &self.header
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn pool(&self) -> &DoubleBufferPool {
        &self.pool
    }

    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    fn fps(&self) -> u32 {
        self.header.frames_per_second as u32
    }

    fn total(&self) -> u32 {
        self.header.total_frames()
    }

    /// The chunk the cursor currently sits in
    pub fn current_chunk(&self) -> u32 {
        self.state.cursor / self.fps()
    }

    /// The cursor's frame offset within its chunk
    pub fn frame_in_chunk(&self) -> u32 {
        self.state.cursor % self.fps()
    }

    /// Realign both buffers to the cursor: load its chunk, then read ahead
    /// the following one (wrapping to chunk 0 past the end)
    ///
    /// After this returns the render buffer holds the cursor's chunk and
    /// the read-ahead load is in flight.
    pub fn resync(&mut self) -> Result<()> {
        let current = self.current_chunk();
        self.pool.swap_and_load(current)?;

        let ahead_start = (current + 1) * self.fps();
        let follow = if ahead_start < self.total() { current + 1 } else { 0 };
        self.pool.swap_and_load(follow)?;

        self.state.just_reset = true;
        debug!("resynchronized to chunk {} (read-ahead {})", current, follow);
        Ok(())
    }

    /// Toggle pause and realign the buffers to wherever the cursor is now
    pub fn start_stop(&mut self) -> Result<()> {
        self.state.paused = !self.state.paused;
        info!(
            "playback {}",
            if self.state.paused { "paused" } else { "started" }
        );
        self.resync()
    }

    pub fn toggle_loop(&mut self) {
        self.state.looping = !self.state.looping;
        info!("looping {}", if self.state.looping { "on" } else { "off" });
    }

    /// Grow the seek rate: 1 jumps to one chunk, then one chunk per press,
    /// capped at `total_frames - frames_per_second`
    pub fn rate_up(&mut self) {
        let ceiling = self.total().saturating_sub(self.fps()).max(1);
        let rate = &mut self.state.seek_rate;
        if *rate == 1 {
            *rate = (self.header.frames_per_second as u32).min(ceiling);
        } else if *rate < ceiling {
            *rate = (*rate + self.header.frames_per_second as u32).min(ceiling);
        }
    }

    /// Shrink the seek rate back down, mirroring `rate_up`, floor 1
    pub fn rate_down(&mut self) {
        let fps = self.fps();
        let rate = &mut self.state.seek_rate;
        if *rate <= fps {
            *rate = 1;
        } else {
            *rate -= fps;
        }
    }

    /// Step the cursor back by the seek rate, clamped to frame 0
    pub fn rewind(&mut self) -> Result<()> {
        let previous_chunk = self.current_chunk();
        self.state.cursor = self.state.cursor.saturating_sub(self.state.seek_rate);
        if self.current_chunk() != previous_chunk {
            self.resync()?;
        }
        Ok(())
    }

    /// Step the cursor forward by the seek rate, clamped to the final frame
    pub fn fast_forward(&mut self) -> Result<()> {
        let previous_chunk = self.current_chunk();
        self.state.cursor = self
            .state
            .cursor
            .saturating_add(self.state.seek_rate)
            .min(self.total() - 1);
        if self.current_chunk() != previous_chunk {
            self.resync()?;
        }
        Ok(())
    }

    /// One timer tick, run before drawing the current frame
    pub fn tick(&mut self) -> Result<()> {
        if self.state.paused {
            return Ok(());
        }

        if self.state.just_reset {
            // the resynchronization already primed both buffers
            self.state.just_reset = false;
        } else if self.state.cursor % self.fps() == 0 {
            let ahead = self.state.cursor + self.fps();
            let target = if ahead >= self.total() { 0 } else { ahead / self.fps() };
            self.pool.swap_and_load(target)?;
        }

        if !self.state.looping && self.state.cursor == self.total() - 1 {
            self.state.paused = true;
            info!("end of video");
        }

        Ok(())
    }

    /// Move to the next frame, run after the current one is drawn
    pub fn advance(&mut self) {
        if self.state.paused {
            return;
        }
        self.state.cursor += 1;
        if self.state.cursor >= self.total() {
            self.state.cursor = 0;
        }
    }
}
