//! Crossterm-backed input source
//!
//! Polls the terminal event stream with the frame period as the timeout,
//! so input latency is bounded by one tick without busy-waiting.

use crate::terminal::{ControlEvent, InputSource};
use crate::utils::error::{IntoPlayerError, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Translate a key press into a control event
fn map_key(key: KeyEvent) -> ControlEvent {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return ControlEvent::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => ControlEvent::Quit,
        KeyCode::Char('p') => ControlEvent::TogglePanel,
        KeyCode::Char('i') => ControlEvent::SelectInfoPanel,
        KeyCode::Char('c') => ControlEvent::SelectControlPanel,
        KeyCode::Char('s') | KeyCode::Char(' ') => ControlEvent::StartStop,
        KeyCode::Char('l') => ControlEvent::ToggleLoop,
        KeyCode::Char('u') => ControlEvent::SeekRateUp,
        KeyCode::Char('d') => ControlEvent::SeekRateDown,
        KeyCode::Char('r') | KeyCode::Left => ControlEvent::Rewind,
        KeyCode::Char('f') | KeyCode::Right => ControlEvent::FastForward,
        _ => ControlEvent::None,
    }
}

#[derive(Debug, Default)]
pub struct CrosstermInput;

impl CrosstermInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for CrosstermInput {
    fn poll(&mut self, timeout: Duration) -> Result<ControlEvent> {
        if !event::poll(timeout).terminal_err("polling input")? {
            return Ok(ControlEvent::None);
        }

        match event::read().terminal_err("reading input")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key)),
            _ => Ok(ControlEvent::None),
        }
    }
}
