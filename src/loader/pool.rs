//! Double-buffered chunk hand-off between the render side and the loader
//!
//! The pool always owns exactly one buffer (the render-designated one);
//! the second buffer is either idle in the pool or in flight with the
//! loader. `swap_and_load` reclaims the in-flight buffer before issuing a
//! new request, which bounds outstanding work to one chunk and guarantees
//! the render buffer is never mid-write.

use crate::format::fill_sentinel;
use crate::loader::{LoadRequest, LoadResult, LoaderCommand};
use crate::utils::error::{PlayerError, Result};
use crossbeam_channel::{Receiver, Sender};
use log::warn;

/// A chunk-sized byte buffer tagged with the chunk it last loaded
#[derive(Debug)]
pub struct ChunkBuffer {
    data: Vec<u8>,
    chunk: Option<u32>,
}

impl ChunkBuffer {
    pub(crate) fn new(chunk_bytes: usize) -> Self {
        let mut data = vec![0u8; chunk_bytes];
        fill_sentinel(&mut data);
        Self { data, chunk: None }
    }

    /// The chunk this buffer holds, or None before the first successful
    /// load (content is then sentinel cells)
    pub fn chunk(&self) -> Option<u32> {
        self.chunk
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub(crate) fn set_chunk(&mut self, chunk: Option<u32>) {
        self.chunk = chunk;
    }
}

/// Counters for tests and the info panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Swap/load requests issued
    pub swaps: u64,

    /// Loads that came back filled
    pub loads_completed: u64,

    /// Loads that came back failed (buffer left blank)
    pub loads_failed: u64,
}

/// Two chunk buffers alternating between render and load designation
#[derive(Debug)]
pub struct DoubleBufferPool {
    render: ChunkBuffer,
    idle: Option<ChunkBuffer>,
    request_tx: Sender<LoaderCommand>,
    result_rx: Receiver<LoadResult>,
    stats: PoolStats,
}

impl DoubleBufferPool {
    /// Create a pool wired to a loader through the given channel endpoints
    pub fn new(
        chunk_bytes: usize,
        request_tx: Sender<LoaderCommand>,
        result_rx: Receiver<LoadResult>,
    ) -> Self {
        Self {
            render: ChunkBuffer::new(chunk_bytes),
            idle: Some(ChunkBuffer::new(chunk_bytes)),
            request_tx,
            result_rx,
            stats: PoolStats::default(),
        }
    }

    /// Flip buffer designations and start loading `chunk` into the buffer
    /// that just left the render role
    ///
    /// Blocks only while a previous load is still in flight (the "switch
    /// permit"); the dispatched load itself is not waited on. On return
    /// the render-designated buffer holds whatever the previous load
    /// produced.
    pub fn swap_and_load(&mut self, chunk: u32) -> Result<()> {
        let incoming = match self.idle.take() {
            Some(buffer) => buffer,
            None => self.reclaim()?,
        };

        let outgoing = std::mem::replace(&mut self.render, incoming);
        self.request_tx
            .send(LoaderCommand::Load(LoadRequest {
                chunk,
                buffer: outgoing,
            }))
            .map_err(|_| PlayerError::Loader("loader thread is gone".to_string()))?;

        self.stats.swaps += 1;
        Ok(())
    }

    /// Wait for the in-flight load and take its buffer back
    fn reclaim(&mut self) -> Result<ChunkBuffer> {
        let result = self
            .result_rx
            .recv()
            .map_err(|_| PlayerError::Loader("loader thread is gone".to_string()))?;

        match result.outcome {
            Ok(()) => self.stats.loads_completed += 1,
            Err(e) => {
                self.stats.loads_failed += 1;
                warn!("chunk {} unavailable: {}", result.chunk, e);
            }
        }

        Ok(result.buffer)
    }

    /// The buffer currently designated for rendering; never mid-write
    pub fn render_buffer(&self) -> &ChunkBuffer {
        &self.render
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Ask the loader to exit once its current read, if any, finishes
    pub fn shutdown(&self) {
        let _ = self.request_tx.send(LoaderCommand::Shutdown);
    }
}
