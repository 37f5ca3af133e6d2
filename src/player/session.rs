//! Playback session: ownership and the tick/input loop
//!
//! A session owns everything with a lifetime: the controller (which owns
//! the buffer pool), the loader thread handle, and the panel state. The
//! video file handle lives inside the loader thread. Teardown sends the
//! loader its shutdown command and joins it; `Drop` does the same, so a
//! session abandoned on an error path still cleans up.

use crate::format::{Cell, VideoFile, CELL_BYTES};
use crate::loader::{ChunkLoader, DoubleBufferPool, PoolStats};
use crate::player::PlaybackController;
use crate::terminal::{ControlEvent, InputSource, Screen};
use crate::utils::config::Config;
use crate::utils::error::Result;
use crate::utils::format_duration;
use crossbeam_channel::unbounded;
use log::info;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

/// Which overlay the panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel {
    Info,
    Controls,
}

pub struct PlaybackSession {
    controller: PlaybackController,
    loader: ChunkLoader,
    path: PathBuf,
    show_panel: bool,
    panel: Panel,
    needs_clear: bool,
}

impl PlaybackSession {
    /// Open a video and prime the buffers; playback starts paused unless
    /// the configuration says otherwise
    pub fn open(path: &Path, config: &Config) -> Result<Self> {
        let video = VideoFile::open(path)?;
        let header = *video.header();

        let (request_tx, request_rx) = unbounded();
        let (result_tx, result_rx) = unbounded();
        let loader = ChunkLoader::spawn(video, request_rx, result_tx)?;
        let pool = DoubleBufferPool::new(header.chunk_bytes(), request_tx, result_rx);

        let mut controller = PlaybackController::new(header, pool, config.playback.looping);
        controller.resync()?;
        if config.playback.autoplay {
            controller.start_stop()?;
        }

        Ok(Self {
            controller,
            loader,
            path: path.to_path_buf(),
            show_panel: config.terminal.show_panel,
            panel: Panel::Info,
            needs_clear: true,
        })
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn stats(&self) -> PoolStats {
        self.controller.stats()
    }

    /// Run the tick/input loop until a quit event arrives
    ///
    /// One iteration per frame period: poll input (the poll timeout is the
    /// pacing sleep), apply the event, tick the controller, draw, present,
    /// advance. Any leftover slice of the period is slept off so a burst
    /// of input does not fast-forward playback.
    pub fn run<S: Screen, I: InputSource>(&mut self, screen: &mut S, input: &mut I) -> Result<()> {
        let period = self.controller.header().frame_period();

        loop {
            let frame_started = Instant::now();

            let event = input.poll(period)?;
            if !self.handle_event(event)? {
                info!("quit requested");
                return Ok(());
            }

            self.controller.tick()?;
            self.draw(screen)?;
            screen.present()?;
            self.controller.advance();

            if let Some(remaining) = period.checked_sub(frame_started.elapsed()) {
                thread::sleep(remaining);
            }
        }
    }

    /// Apply one control event; returns false when the session should end
    pub fn handle_event(&mut self, event: ControlEvent) -> Result<bool> {
        match event {
            ControlEvent::Quit => return Ok(false),
            ControlEvent::TogglePanel => {
                self.show_panel = !self.show_panel;
                self.needs_clear = true;
            }
            ControlEvent::SelectInfoPanel => {
                self.panel = Panel::Info;
                self.needs_clear = true;
            }
            ControlEvent::SelectControlPanel => {
                self.panel = Panel::Controls;
                self.needs_clear = true;
            }
            ControlEvent::StartStop => self.controller.start_stop()?,
            ControlEvent::ToggleLoop => self.controller.toggle_loop(),
            ControlEvent::SeekRateUp => self.controller.rate_up(),
            ControlEvent::SeekRateDown => self.controller.rate_down(),
            ControlEvent::Rewind => self.controller.rewind()?,
            ControlEvent::FastForward => self.controller.fast_forward()?,
            ControlEvent::None => {}
        }
        Ok(true)
    }

    /// Draw the current frame and, when enabled, the panel overlay
    fn draw<S: Screen>(&mut self, screen: &mut S) -> Result<()> {
        if self.needs_clear {
            screen.clear()?;
            self.needs_clear = false;
        }

        let header = *self.controller.header();
        let buffer = self.controller.pool().render_buffer();
        let frame = header.frame_in_chunk(buffer.data(), self.controller.frame_in_chunk());

        for row in 0..header.rows as u16 {
            for col in 0..header.columns as u16 {
                let index = CELL_BYTES * (header.columns as usize * row as usize + col as usize);
                let cell = Cell::from_bytes(&frame[index..index + CELL_BYTES]);
                screen.draw_cell(row, col, cell)?;
            }
        }

        if self.show_panel {
            self.draw_panel(screen)?;
        }

        Ok(())
    }

    fn draw_panel<S: Screen>(&self, screen: &mut S) -> Result<()> {
        let (columns, rows) = screen.size();
        if rows < 8 {
            return Ok(());
        }

        let header = self.controller.header();
        let state = self.controller.state();
        let total = header.total_frames();

        screen.draw_text(rows - 7, 0, &"-".repeat(columns as usize))?;

        match self.panel {
            Panel::Info => {
                let position = Duration::from_secs((state.cursor / header.frames_per_second as u32) as u64);
                let length = Duration::from_secs(header.seconds as u64);
                screen.draw_text(
                    rows - 6,
                    0,
                    &format!(
                        "{} x {} cells @ {} fps",
                        header.columns, header.rows, header.frames_per_second
                    ),
                )?;
                screen.draw_text(
                    rows - 5,
                    0,
                    &format!("time = {} / {}", format_duration(position), format_duration(length)),
                )?;
                screen.draw_text(
                    rows - 4,
                    0,
                    &format!("frame = {} / {}", state.cursor, total - 1),
                )?;
                screen.draw_text(rows - 3, 0, &format!("file = {}", self.path.display()))?;
            }
            Panel::Controls => {
                screen.draw_text(rows - 6, 0, "s = start/stop")?;
                screen.draw_text(rows - 5, 0, "l = toggle looping")?;
                screen.draw_text(rows - 4, 0, "r / f = rewind / fast forward")?;
                screen.draw_text(rows - 3, 0, "u / d = seek rate up / down")?;
            }
        }

        let middle = columns / 2;
        screen.draw_text(rows - 6, middle, &format!("started = {}", !state.paused))?;
        screen.draw_text(rows - 5, middle, &format!("looping = {}", state.looping))?;
        screen.draw_text(rows - 4, middle, &format!("seek rate = {}", state.seek_rate))?;

        let right = columns.saturating_sub(18);
        screen.draw_text(rows - 6, right, "q = quit")?;
        screen.draw_text(rows - 5, right, "i = info panel")?;
        screen.draw_text(rows - 4, right, "c = control panel")?;
        screen.draw_text(rows - 3, right, "p = toggle panel")?;

        Ok(())
    }

    /// Stop the loader and wait for it; safe to call more than once
    pub fn shutdown(&mut self) {
        self.controller.pool().shutdown();
        self.loader.join();
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}
