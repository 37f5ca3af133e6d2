//! Background chunk loading for CVPlayer
//!
//! This module owns the producer side of playback: a dedicated worker
//! thread that reads whole chunks from the video file, and the
//! double-buffer pool that hands buffers back and forth between the worker
//! and the render side. Buffers are *moved* through channels rather than
//! shared, so no buffer is ever written by one thread while the other
//! reads it.

mod pool;
mod worker;

pub use pool::{ChunkBuffer, DoubleBufferPool, PoolStats};
pub use worker::ChunkLoader;

use crate::utils::error::Result;

/// Work sent to the loader thread
#[derive(Debug)]
pub enum LoaderCommand {
    /// Fill the carried buffer with the requested chunk
    Load(LoadRequest),

    /// Finish the current read, if any, then exit
    Shutdown,
}

/// A single chunk-load assignment; the buffer travels with the request
#[derive(Debug)]
pub struct LoadRequest {
    pub chunk: u32,
    pub buffer: ChunkBuffer,
}

/// The loader's answer: the buffer comes back regardless of the outcome
#[derive(Debug)]
pub struct LoadResult {
    pub chunk: u32,
    pub buffer: ChunkBuffer,
    pub outcome: Result<()>,
}
