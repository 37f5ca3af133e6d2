//! Cell-video format support for CVPlayer
//!
//! A cell-video file is a 5-byte header followed by raw frame data. The
//! header stores the grid geometry and timing: columns (u8), rows (u8),
//! frames per second (u8) and duration in whole seconds (u16, little
//! endian). Each frame is a row-major grid of two-byte cells; one second's
//! worth of frames forms a chunk, the unit of read-ahead and buffering.

mod video_file;

pub use video_file::VideoFile;

use crate::utils::error::{PlayerError, Result};
use std::io::{Read, Write};
use std::time::Duration;

/// Size of the file header in bytes
pub const HEADER_SIZE: u64 = 5;

/// Size of one cell in bytes (color + glyph)
pub const CELL_BYTES: usize = 2;

/// Highest valid palette index; 0 means "terminal default"
pub const PALETTE_SIZE: u8 = 7;

/// Lowest printable glyph byte
pub const GLYPH_MIN: u8 = 32;

/// Highest printable glyph byte
pub const GLYPH_MAX: u8 = 125;

/// Fixed-size header at the start of every cell-video file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoHeader {
    /// Grid width in cells
    pub columns: u8,

    /// Grid height in cells
    pub rows: u8,

    /// Playback rate; also the number of frames per chunk
    pub frames_per_second: u8,

    /// Duration in whole seconds; also the number of chunks
    pub seconds: u16,
}

impl VideoHeader {
    /// Read a header from the start of a stream
    pub fn read<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut buf = [0u8; HEADER_SIZE as usize];
        reader.read_exact(&mut buf)?;
        Ok(Self {
            columns: buf[0],
            rows: buf[1],
            frames_per_second: buf[2],
            seconds: u16::from_le_bytes([buf[3], buf[4]]),
        })
    }

    /// Write the header in file order
    pub fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&[self.columns, self.rows, self.frames_per_second])?;
        writer.write_all(&self.seconds.to_le_bytes())
    }

    /// Check that every field describes a playable video
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(PlayerError::Format(format!(
                "header declares an empty {}x{} grid",
                self.columns, self.rows
            )));
        }
        if self.frames_per_second == 0 {
            return Err(PlayerError::Format("header declares zero fps".to_string()));
        }
        if self.seconds == 0 {
            return Err(PlayerError::Format("header declares zero duration".to_string()));
        }
        Ok(())
    }

    /// Total number of frames in the file
    pub fn total_frames(&self) -> u32 {
        self.frames_per_second as u32 * self.seconds as u32
    }

    /// Size of one frame in bytes
    pub fn frame_bytes(&self) -> usize {
        CELL_BYTES * self.columns as usize * self.rows as usize
    }

    /// Size of one chunk (one second of frames) in bytes
    pub fn chunk_bytes(&self) -> usize {
        self.frame_bytes() * self.frames_per_second as usize
    }

    /// Number of chunks in the file
    pub fn chunk_count(&self) -> u32 {
        self.seconds as u32
    }

    /// Size of the frame data region in bytes
    pub fn data_bytes(&self) -> u64 {
        self.frame_bytes() as u64 * self.total_frames() as u64
    }

    /// Byte offset of a chunk within the file
    pub fn byte_offset(&self, chunk: u32) -> u64 {
        HEADER_SIZE + chunk as u64 * self.chunk_bytes() as u64
    }

    /// Wall-clock duration of one frame
    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(1000 / self.frames_per_second as u64)
    }

    /// Borrow one frame out of a chunk-sized byte buffer
    pub fn frame_in_chunk<'a>(&self, chunk: &'a [u8], index: u32) -> &'a [u8] {
        let frame_bytes = self.frame_bytes();
        let start = frame_bytes * index as usize;
        &chunk[start..start + frame_bytes]
    }
}

/// One cell of a frame: a palette color and a printable glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub color: u8,
    pub glyph: u8,
}

impl Cell {
    /// The blank cell used to fill unread buffer space
    pub const SENTINEL: Cell = Cell {
        color: 0,
        glyph: b' ',
    };

    /// Decode a cell from its two-byte file representation, replacing
    /// out-of-range values with the sentinel equivalents so corrupt data
    /// never reaches the terminal
    pub fn from_bytes(pair: &[u8]) -> Self {
        let color = if pair[0] <= PALETTE_SIZE { pair[0] } else { 0 };
        let glyph = if (GLYPH_MIN..=GLYPH_MAX).contains(&pair[1]) {
            pair[1]
        } else {
            b' '
        };
        Self { color, glyph }
    }

    /// Encode a cell into its two-byte file representation
    pub fn to_bytes(self) -> [u8; CELL_BYTES] {
        [self.color, self.glyph]
    }
}

/// Overwrite a byte buffer with sentinel cells
pub fn fill_sentinel(buf: &mut [u8]) {
    for pair in buf.chunks_exact_mut(CELL_BYTES) {
        pair[0] = Cell::SENTINEL.color;
        pair[1] = Cell::SENTINEL.glyph;
    }
}
