//! Frame buffer for accumulating partial reads.
//!
//! Uses `bytes::BytesMut` so emitted frames are split off the buffer without
//! copying. The buffer is source-agnostic: bytes go in with [`FrameBuffer::push`]
//! or [`FrameBuffer::extend`], frames come out with
//! [`FrameBuffer::try_extract_one`], and [`FrameBuffer::finish`] flushes the
//! remainder once the source is exhausted.
//!
//! # Example
//!
//! ```
//! use sse_scanner::protocol::FrameBuffer;
//!
//! let mut buffer = FrameBuffer::new();
//!
//! // Data arrives in chunks from the network
//! let frames = buffer.push(b"data: one\n\ndata: tw").unwrap();
//! assert_eq!(frames.len(), 1);
//! assert_eq!(&frames[0][..], b"data: one");
//!
//! let frames = buffer.push(b"o\n\n").unwrap();
//! assert_eq!(&frames[0][..], b"data: two");
//! ```

use bytes::{Buf, Bytes, BytesMut};

use super::boundary::{find_boundary_from, MAX_BOUNDARY_LEN};
use crate::config::{ScannerConfig, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_BUFFER_SIZE};
use crate::error::{Result, ScanError};

/// Buffer for accumulating incoming bytes and extracting complete frames.
pub struct FrameBuffer {
    /// Bytes read from the source and not yet emitted.
    buffer: BytesMut,
    /// Prefix of `buffer` already known to hold no boundary start.
    searched: usize,
    /// Longest frame accepted.
    max_buffer_size: usize,
}

impl FrameBuffer {
    /// Create a new frame buffer with default settings.
    ///
    /// Default capacity: 4KB, max frame: 64KB.
    pub fn new() -> Self {
        Self::with_capacity_and_max(DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_BUFFER_SIZE)
    }

    /// Create a new frame buffer with a custom frame size limit.
    pub fn with_max_buffer_size(max_buffer_size: usize) -> Self {
        Self::with_capacity_and_max(DEFAULT_INITIAL_CAPACITY, max_buffer_size)
    }

    /// Create a new frame buffer with custom capacity and frame size limit.
    pub fn with_capacity_and_max(capacity: usize, max_buffer_size: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
            searched: 0,
            max_buffer_size,
        }
    }

    /// Create a frame buffer from a scanner config.
    pub fn from_config(config: &ScannerConfig) -> Self {
        Self::with_capacity_and_max(config.initial_capacity, config.max_buffer_size)
    }

    /// Push data into the buffer and extract all complete frames.
    ///
    /// Partial data after the last boundary stays buffered for the next push.
    ///
    /// # Errors
    ///
    /// Returns `BufferCapacityExceeded` if a frame is longer than the limit.
    /// Frames completed before the oversized one are lost with the error; use
    /// [`FrameBuffer::try_extract_one`] to keep them.
    pub fn push(&mut self, data: &[u8]) -> Result<Vec<Bytes>> {
        self.buffer.extend_from_slice(data);

        let mut frames = Vec::new();
        while let Some(frame) = self.try_extract_one()? {
            frames.push(frame);
        }

        Ok(frames)
    }

    /// Try to extract a single frame from the buffer.
    ///
    /// Returns:
    /// - `Ok(Some(frame))` if a boundary was found; the boundary bytes are dropped
    /// - `Ok(None)` if more data is needed
    /// - `Err(...)` if the pending frame is provably longer than the limit
    pub fn try_extract_one(&mut self) -> Result<Option<Bytes>> {
        match find_boundary_from(&self.buffer, self.searched) {
            Some(boundary) => {
                if boundary.position > self.max_buffer_size {
                    return Err(self.capacity_exceeded());
                }

                let frame = self.buffer.split_to(boundary.position).freeze();
                self.buffer.advance(boundary.len);
                self.searched = 0;

                tracing::trace!(
                    frame_len = frame.len(),
                    boundary_len = boundary.len,
                    "Extracted frame"
                );
                Ok(Some(frame))
            }
            None => {
                // A boundary may still begin in the last MAX_BOUNDARY_LEN - 1 bytes.
                let pending = MAX_BOUNDARY_LEN - 1;
                self.searched = self.buffer.len().saturating_sub(pending);

                if self.buffer.len() > self.max_buffer_size.saturating_add(pending) {
                    return Err(self.capacity_exceeded());
                }
                Ok(None)
            }
        }
    }

    /// Flush the buffered remainder at end of stream.
    ///
    /// Call once [`FrameBuffer::try_extract_one`] has returned `Ok(None)`.
    /// Returns `Ok(None)` if nothing is buffered.
    pub fn finish(&mut self) -> Result<Option<Bytes>> {
        if self.buffer.is_empty() {
            return Ok(None);
        }
        if self.buffer.len() > self.max_buffer_size {
            return Err(self.capacity_exceeded());
        }

        self.searched = 0;
        let frame = self.buffer.split().freeze();
        tracing::trace!(frame_len = frame.len(), "Flushed final frame");
        Ok(Some(frame))
    }

    /// Append data to the buffer without extracting frames.
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Drop all buffered bytes, returning how many were dropped.
    pub fn discard(&mut self) -> usize {
        let dropped = self.buffer.len();
        self.clear();
        dropped
    }

    /// Get the number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Bytes read but not yet emitted as a frame.
    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    /// Configured frame size limit.
    pub fn max_buffer_size(&self) -> usize {
        self.max_buffer_size
    }

    /// Clear the buffer and reset state.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.searched = 0;
    }

    fn capacity_exceeded(&self) -> ScanError {
        tracing::warn!(
            buffered = self.buffer.len(),
            limit = self.max_buffer_size,
            "Frame exceeds buffer capacity"
        );
        ScanError::BufferCapacityExceeded {
            limit: self.max_buffer_size,
            buffered: self.buffer.len(),
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
