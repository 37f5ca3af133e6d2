//! Error types for CVPlayer
//!
//! This module defines custom error types used throughout the application.
//! We use thiserror for convenient error type definitions and anyhow for
//! application-level error handling in the binary.

use thiserror::Error;

/// Main error type for CVPlayer
#[derive(Error, Debug)]
pub enum PlayerError {
    /// Header is malformed or inconsistent with the file
    #[error("Format error: {0}")]
    Format(String),

    /// Header declares more frame data than the file contains
    #[error("Truncated file: expected {expected} bytes, found {actual}")]
    Truncated { expected: u64, actual: u64 },

    /// A chunk could not be read mid-session; playback continues on
    /// whatever the buffers last held
    #[error("Failed to read chunk {chunk}: {source}")]
    ChunkRead {
        chunk: u32,
        source: std::io::Error,
    },

    /// The loader thread is gone (channel disconnected)
    #[error("Loader error: {0}")]
    Loader(String),

    /// Terminal setup or drawing errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("File error: {0}")]
    FileIO(#[from] std::io::Error),
}

/// Convenience type alias for Results in CVPlayer
pub type Result<T> = std::result::Result<T, PlayerError>;

/// Extension trait for converting other errors to PlayerError
pub trait IntoPlayerError<T> {
    /// Convert this error into a Terminal error with the given context
    fn terminal_err(self, context: &str) -> Result<T>;
    /// Convert this error into a Config error with the given context
    fn config_err(self, context: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> IntoPlayerError<T> for std::result::Result<T, E> {
    fn terminal_err(self, context: &str) -> Result<T> {
        self.map_err(|e| PlayerError::Terminal(format!("{}: {}", context, e)))
    }

    fn config_err(self, context: &str) -> Result<T> {
        self.map_err(|e| PlayerError::Config(format!("{}: {}", context, e)))
    }
}
