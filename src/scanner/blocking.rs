//! Blocking frame scanner over `std::io::Read`.
//!
//! # Example
//!
//! ```
//! use sse_scanner::FrameScanner;
//!
//! let stream = &b"id:1\ndata:hi\n\nid:2\ndata:bye\n\n"[..];
//! let mut scanner = FrameScanner::new(stream);
//!
//! assert_eq!(&scanner.read_frame().unwrap().unwrap()[..], b"id:1\ndata:hi");
//! assert_eq!(&scanner.read_frame().unwrap().unwrap()[..], b"id:2\ndata:bye");
//! assert!(scanner.read_frame().unwrap().is_none());
//! ```

use std::io::Read;

use bytes::Bytes;

use super::{ScanCore, Step};
use crate::config::ScannerConfig;
use crate::error::Result;

/// Splits a blocking byte source into frames.
///
/// Each [`FrameScanner::read_frame`] call blocks on the source until a frame
/// is complete or the stream ends. Not meant to be shared between readers.
pub struct FrameScanner<R> {
    reader: R,
    core: ScanCore,
}

impl<R: Read> FrameScanner<R> {
    /// Create a scanner with default settings.
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ScannerConfig::default())
    }

    /// Create a scanner with a custom frame size limit.
    ///
    /// Zero selects the default limit.
    pub fn with_max_buffer_size(reader: R, max_buffer_size: usize) -> Self {
        Self::with_config(reader, ScannerConfig::default().max_buffer_size(max_buffer_size))
    }

    /// Create a scanner from a config.
    pub fn with_config(reader: R, config: ScannerConfig) -> Self {
        Self {
            reader,
            core: ScanCore::new(&config),
        }
    }

    /// Read the next frame.
    ///
    /// Returns:
    /// - `Ok(Some(frame))` for each frame, in stream order, boundary bytes removed
    /// - `Ok(None)` once the stream has ended, was cancelled, or after an error
    /// - `Err(...)` if the source failed or a frame exceeded the buffer limit
    pub fn read_frame(&mut self) -> Result<Option<Bytes>> {
        loop {
            match self.core.next_step() {
                Step::Emit(result) => return result,
                Step::Read => {}
            }

            let result = self.reader.read(self.core.chunk_mut());
            if let Some(result) = self.core.on_read(result) {
                return result;
            }
        }
    }

    /// True once no more frames will be returned.
    pub fn is_finished(&self) -> bool {
        self.core.is_finished()
    }

    /// Bytes read but not yet returned as a frame.
    pub fn buffered(&self) -> &[u8] {
        self.core.buffer.buffered()
    }

    /// Get a reference to the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Get a mutable reference to the underlying source.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Return the underlying source, dropping any buffered bytes.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Iterator for FrameScanner<R> {
    type Item = Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_frame().transpose()
    }
}

impl<R: Read> std::iter::FusedIterator for FrameScanner<R> {}
