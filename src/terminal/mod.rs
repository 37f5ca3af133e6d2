//! Terminal front-end for CVPlayer
//!
//! The playback engine consumes two narrow seams: a `Screen` it draws
//! cells and panel text into, and an `InputSource` it polls for control
//! events. The crossterm-backed implementations live here; tests drive
//! the engine with stubs instead.

mod input;
mod screen;

pub use input::CrosstermInput;
pub use screen::CrosstermScreen;

use crate::format::Cell;
use crate::utils::error::Result;
use std::time::Duration;

/// A discrete control event from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Leave the player
    Quit,

    /// Hide or show the panel overlay
    TogglePanel,

    /// Switch the panel to video information
    SelectInfoPanel,

    /// Switch the panel to the key reference
    SelectControlPanel,

    /// Toggle paused/playing
    StartStop,

    /// Toggle looping
    ToggleLoop,

    /// Increase the rewind/fast-forward rate
    SeekRateUp,

    /// Decrease the rewind/fast-forward rate
    SeekRateDown,

    /// Step backwards by the seek rate
    Rewind,

    /// Step forwards by the seek rate
    FastForward,

    /// Nothing happened within the poll timeout
    None,
}

/// Where frames and panel text get drawn
pub trait Screen {
    /// Erase everything (used when the panel layout changes)
    fn clear(&mut self) -> Result<()>;

    /// Draw one cell at a grid position
    fn draw_cell(&mut self, row: u16, col: u16, cell: Cell) -> Result<()>;

    /// Draw a run of text starting at a grid position
    fn draw_text(&mut self, row: u16, col: u16, text: &str) -> Result<()>;

    /// Flush everything drawn since the last present
    fn present(&mut self) -> Result<()>;

    /// Current size as (columns, rows)
    fn size(&self) -> (u16, u16);
}

/// Where control events come from
pub trait InputSource {
    /// Wait up to `timeout` for the next control event
    ///
    /// Returns `ControlEvent::None` on timeout; the timeout doubles as
    /// the playback tick period.
    fn poll(&mut self, timeout: Duration) -> Result<ControlEvent>;
}
