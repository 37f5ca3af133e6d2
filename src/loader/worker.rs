//! The chunk loader worker thread
//!
//! The worker blocks on its command channel, fills the buffer carried by
//! each request, and sends the buffer back with the outcome. It never
//! touches playback state; chunk index and buffer are all it sees. A
//! `Shutdown` command (or a disconnected channel) ends the thread after
//! the read it is currently performing.

use crate::format::VideoFile;
use crate::loader::{LoadResult, LoaderCommand};
use crate::utils::error::Result;
use crossbeam_channel::{Receiver, Sender};
use log::trace;
use std::thread::{self, JoinHandle};

/// Handle to the background loader thread
#[derive(Debug)]
pub struct ChunkLoader {
    handle: Option<JoinHandle<()>>,
}

impl ChunkLoader {
    /// Spawn the worker; it takes exclusive ownership of the file handle
    pub fn spawn(
        mut source: VideoFile,
        commands: Receiver<LoaderCommand>,
        results: Sender<LoadResult>,
    ) -> Result<Self> {
        let handle = thread::Builder::new()
            .name("chunk-loader".to_string())
            .spawn(move || Self::run(&mut source, commands, results))?;

        Ok(Self {
            handle: Some(handle),
        })
    }

    fn run(source: &mut VideoFile, commands: Receiver<LoaderCommand>, results: Sender<LoadResult>) {
        while let Ok(command) = commands.recv() {
            match command {
                LoaderCommand::Load(request) => {
                    let mut buffer = request.buffer;
                    let chunk = request.chunk;

                    let outcome = source.read_chunk(chunk, buffer.data_mut());
                    buffer.set_chunk(outcome.is_ok().then_some(chunk));

                    if results.send(LoadResult { chunk, buffer, outcome }).is_err() {
                        break;
                    }
                }
                LoaderCommand::Shutdown => break,
            }
        }
        trace!("chunk loader exiting");
    }

    /// Wait for the worker to exit; must be called before session teardown
    pub fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ChunkLoader {
    fn drop(&mut self) {
        self.join();
    }
}
