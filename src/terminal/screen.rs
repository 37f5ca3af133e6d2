//! Crossterm-backed screen
//!
//! Owns the terminal for the lifetime of the player: raw mode and the
//! alternate screen are entered on construction and released in `Drop`,
//! so every exit path (including panics unwinding through main) restores
//! the user's shell. Drawing is queued into a buffered writer and flushed
//! once per frame by `present`.

use crate::format::Cell;
use crate::terminal::Screen;
use crate::utils::error::{IntoPlayerError, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{BufWriter, Stdout, Write};

/// Map a palette index to a terminal color; 0 and anything out of range
/// fall back to the terminal default
fn palette(color: u8) -> Option<Color> {
    match color {
        1 => Some(Color::Blue),
        2 => Some(Color::Green),
        3 => Some(Color::Cyan),
        4 => Some(Color::Red),
        5 => Some(Color::Magenta),
        6 => Some(Color::Yellow),
        7 => Some(Color::White),
        _ => None,
    }
}

pub struct CrosstermScreen {
    out: BufWriter<Stdout>,
    size: (u16, u16),
    color: bool,
    current_color: Option<Color>,
}

impl CrosstermScreen {
    /// Take over the terminal; pass `color: false` for monochrome output
    pub fn new(color: bool) -> Result<Self> {
        terminal::enable_raw_mode().terminal_err("enabling raw mode")?;

        let mut out = BufWriter::new(std::io::stdout());
        queue!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))
            .terminal_err("entering alternate screen")?;
        out.flush().terminal_err("flushing terminal setup")?;

        let size = terminal::size().terminal_err("querying terminal size")?;

        Ok(Self {
            out,
            size,
            color,
            current_color: None,
        })
    }

    fn set_color(&mut self, color: Option<Color>) -> Result<()> {
        if self.current_color == color {
            return Ok(());
        }
        match color {
            Some(c) => queue!(self.out, SetForegroundColor(c)).terminal_err("setting color")?,
            None => queue!(self.out, ResetColor).terminal_err("resetting color")?,
        }
        self.current_color = color;
        Ok(())
    }
}

impl Screen for CrosstermScreen {
    fn clear(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All)).terminal_err("clearing screen")
    }

    fn draw_cell(&mut self, row: u16, col: u16, cell: Cell) -> Result<()> {
        let (columns, rows) = self.size;
        if row >= rows || col >= columns {
            return Ok(());
        }

        let color = if self.color { palette(cell.color) } else { None };
        self.set_color(color)?;
        queue!(self.out, MoveTo(col, row), Print(cell.glyph as char))
            .terminal_err("drawing cell")
    }

    fn draw_text(&mut self, row: u16, col: u16, text: &str) -> Result<()> {
        let (columns, rows) = self.size;
        if row >= rows || col >= columns {
            return Ok(());
        }

        self.set_color(None)?;
        queue!(self.out, MoveTo(col, row), Print(text)).terminal_err("drawing text")
    }

    fn present(&mut self) -> Result<()> {
        self.out.flush().terminal_err("presenting frame")
    }

    fn size(&self) -> (u16, u16) {
        self.size
    }
}

impl Drop for CrosstermScreen {
    fn drop(&mut self) {
        let _ = queue!(self.out, ResetColor, Show, LeaveAlternateScreen);
        let _ = self.out.flush();
        let _ = terminal::disable_raw_mode();
    }
}
