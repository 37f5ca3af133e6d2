//! Read-only accessor over a cell-video file
//!
//! `VideoFile` validates the header against the file length at open time
//! and performs positioned whole-chunk reads afterwards. The handle is
//! owned by whichever thread does the reading (the chunk loader during a
//! session); the control loop never touches it.

use crate::format::{fill_sentinel, VideoHeader, HEADER_SIZE};
use crate::utils::error::{PlayerError, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// An open, validated cell-video file
#[derive(Debug)]
pub struct VideoFile {
    path: PathBuf,
    file: File,
    header: VideoHeader,
}

impl VideoFile {
    /// Open a cell-video file and validate its header
    ///
    /// Fails with `Format` when the header is malformed and with
    /// `Truncated` when the header promises more frame data than the file
    /// holds. Either failure is fatal: no playback session starts.
    pub fn open(path: &Path) -> Result<Self> {
        let mut file = File::open(path)?;
        let actual = file.metadata()?.len();

        if actual < HEADER_SIZE {
            return Err(PlayerError::Format(format!(
                "{} is too short to hold a header",
                path.display()
            )));
        }

        let header = VideoHeader::read(&mut file)?;
        header.validate()?;

        let expected = HEADER_SIZE + header.data_bytes();
        if actual < expected {
            return Err(PlayerError::Truncated { expected, actual });
        }

        info!(
            "opened {}: {}x{} cells, {} fps, {} frames",
            path.display(),
            header.columns,
            header.rows,
            header.frames_per_second,
            header.total_frames()
        );

        Ok(Self {
            path: path.to_path_buf(),
            file,
            header,
        })
    }

    /// The validated header
    pub fn header(&self) -> &VideoHeader {
        &self.header
    }

    /// The path this file was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read one chunk into a chunk-sized destination buffer
    ///
    /// The destination is pre-filled with sentinel cells, so a short read
    /// near end-of-file leaves blank cells in the unread tail rather than
    /// stale bytes. An out-of-range index is a `ChunkRead` error.
    pub fn read_chunk(&mut self, chunk: u32, dest: &mut [u8]) -> Result<()> {
        debug_assert_eq!(dest.len(), self.header.chunk_bytes());

        if chunk >= self.header.chunk_count() {
            return Err(PlayerError::ChunkRead {
                chunk,
                source: std::io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("chunk index out of range (0..{})", self.header.chunk_count()),
                ),
            });
        }

        fill_sentinel(dest);

        let offset = self.header.byte_offset(chunk);
        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(|source| PlayerError::ChunkRead { chunk, source })?;

        let mut filled = 0;
        while filled < dest.len() {
            match self.file.read(&mut dest[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(source) => return Err(PlayerError::ChunkRead { chunk, source }),
            }
        }

        debug!("read chunk {} ({} bytes)", chunk, filled);
        Ok(())
    }
}
