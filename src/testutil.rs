//! Shared fixtures for unit tests: deterministic cell-video files written
//! to temp storage, plus the pattern generator tests assert against.

use crate::format::{Cell, VideoHeader, GLYPH_MIN};
use std::io::Write;
use tempfile::NamedTempFile;

/// The cell written at (row, col) of a given frame; every frame gets a
/// distinct glyph so tests can tell frames apart from a single cell.
pub fn expected_cell(frame: u32, row: u32, col: u32) -> Cell {
    Cell {
        color: (frame % 7) as u8 + 1,
        glyph: GLYPH_MIN + ((frame + row + col) % 94) as u8,
    }
}

/// Write a complete video with the `expected_cell` pattern.
pub fn write_video(columns: u8, rows: u8, fps: u8, seconds: u16) -> NamedTempFile {
    write_truncated_video(columns, rows, fps, seconds, fps as u32 * seconds as u32)
}

/// Write a video whose header declares `fps * seconds` frames but whose
/// data region only holds `frames_present` of them.
pub fn write_truncated_video(
    columns: u8,
    rows: u8,
    fps: u8,
    seconds: u16,
    frames_present: u32,
) -> NamedTempFile {
    let header = VideoHeader {
        columns,
        rows,
        frames_per_second: fps,
        seconds,
    };

    let mut file = NamedTempFile::new().expect("temp file");
    header.write(&mut file).expect("write header");

    for frame in 0..frames_present {
        for row in 0..rows as u32 {
            for col in 0..columns as u32 {
                let bytes = expected_cell(frame, row, col).to_bytes();
                file.write_all(&bytes).expect("write cell");
            }
        }
    }

    file.flush().expect("flush fixture");
    file
}

/// Write raw bytes as-is (for malformed-header tests).
pub fn write_bytes(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(bytes).expect("write bytes");
    file.flush().expect("flush fixture");
    file
}
