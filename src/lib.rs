//! CVPlayer - a terminal player for cell-video files
//!
//! A cell-video file is a fixed-size header followed by a contiguous run of
//! frames, each frame a row-major grid of two-byte cells (palette color +
//! printable ASCII glyph). This crate provides the streaming playback engine
//! (background chunk loader, double-buffered hand-off, playback state
//! machine) plus the crossterm front-end that draws frames into the
//! terminal.

pub mod format;
pub mod loader;
pub mod player;
pub mod terminal;
pub mod utils;

pub use utils::error::{PlayerError, Result};

#[cfg(test)]
pub(crate) mod testutil;
