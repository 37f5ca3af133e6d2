//! Integration test utilities for CVPlayer
//!
//! Provides cell-video fixtures written to temp storage and stub
//! implementations of the engine's collaborator traits, so end-to-end
//! tests can run a full playback session without a terminal.

use anyhow::Result;
use cvplayer::format::{Cell, VideoHeader, GLYPH_MIN};
use cvplayer::terminal::{ControlEvent, InputSource, Screen};
use std::collections::VecDeque;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Test fixture holding generated video files
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub video: PathBuf,
    pub truncated_video: PathBuf,
    pub header: VideoHeader,
}

impl TestFixture {
    /// Generate a complete video and a truncated sibling
    ///
    /// The full video is 4x2 cells at 50 fps for 2 seconds; the truncated
    /// one declares the same header but carries half the frames.
    pub fn new() -> Result<Self> {
        let header = VideoHeader {
            columns: 4,
            rows: 2,
            frames_per_second: 50,
            seconds: 2,
        };

        let temp_dir = TempDir::new()?;
        let video = temp_dir.path().join("clip.cv");
        let truncated_video = temp_dir.path().join("truncated.cv");

        write_video(&video, header, header.total_frames())?;
        write_video(&truncated_video, header, header.total_frames() / 2)?;

        Ok(Self {
            temp_dir,
            video,
            truncated_video,
            header,
        })
    }
}

/// The cell written at (row, col) of a given frame
pub fn pattern_cell(frame: u32, row: u32, col: u32) -> Cell {
    Cell {
        color: (frame % 7) as u8 + 1,
        glyph: GLYPH_MIN + ((frame + row + col) % 94) as u8,
    }
}

/// Write a video whose data region holds `frames_present` frames
pub fn write_video(path: &Path, header: VideoHeader, frames_present: u32) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    header.write(&mut file)?;

    for frame in 0..frames_present {
        for row in 0..header.rows as u32 {
            for col in 0..header.columns as u32 {
                file.write_all(&pattern_cell(frame, row, col).to_bytes())?;
            }
        }
    }

    file.flush()?;
    Ok(())
}

/// Screen stub that records everything drawn into it
#[derive(Default)]
pub struct StubScreen {
    /// Cells drawn since the last clear, keyed by position
    pub cells: Vec<(u16, u16, Cell)>,

    /// Panel text drawn since the last clear
    pub texts: Vec<String>,

    /// Number of present() calls over the whole run
    pub presents: usize,

    /// Glyph at (0, 0) for every presented frame, in order
    pub first_cell_history: Vec<u8>,
}

impl StubScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Screen for StubScreen {
    fn clear(&mut self) -> cvplayer::Result<()> {
        self.cells.clear();
        self.texts.clear();
        Ok(())
    }

    fn draw_cell(&mut self, row: u16, col: u16, cell: Cell) -> cvplayer::Result<()> {
        self.cells.retain(|(r, c, _)| (*r, *c) != (row, col));
        self.cells.push((row, col, cell));
        Ok(())
    }

    fn draw_text(&mut self, _row: u16, _col: u16, text: &str) -> cvplayer::Result<()> {
        self.texts.push(text.to_string());
        Ok(())
    }

    fn present(&mut self) -> cvplayer::Result<()> {
        self.presents += 1;
        if let Some((_, _, cell)) = self.cells.iter().find(|(r, c, _)| (*r, *c) == (0, 0)) {
            self.first_cell_history.push(cell.glyph);
        }
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        (80, 24)
    }
}

/// Input stub that replays a script, then keeps answering `None`
///
/// Sessions only stop on `Quit`, so scripts normally end with one.
pub struct ScriptedInput {
    events: VecDeque<ControlEvent>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = ControlEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _timeout: Duration) -> cvplayer::Result<ControlEvent> {
        Ok(self.events.pop_front().unwrap_or(ControlEvent::None))
    }
}
