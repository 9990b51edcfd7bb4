//! Scanner configuration.
//!
//! The config derives serde traits so it can sit inside an application's own
//! config file. Missing fields fall back to the defaults below.
//!
//! ```
//! use sse_scanner::ScannerConfig;
//!
//! let config = ScannerConfig::default().max_buffer_size(1024);
//! assert_eq!(config.max_buffer_size, 1024);
//! ```

use serde::{Deserialize, Serialize};

/// Default limit on unterminated frame data (64 KiB).
pub const DEFAULT_MAX_BUFFER_SIZE: usize = 64 * 1024;

/// Default number of bytes requested from the source per read.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 4 * 1024;

/// Default initial allocation of the accumulation buffer.
pub const DEFAULT_INITIAL_CAPACITY: usize = 4 * 1024;

/// Configuration for a frame scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Longest frame accepted before failing with `BufferCapacityExceeded`.
    /// `usize::MAX` disables the limit.
    pub max_buffer_size: usize,
    /// Bytes requested from the source per read. Zero is treated as one.
    pub read_chunk_size: usize,
    /// Initial accumulation buffer capacity.
    pub initial_capacity: usize,
}

impl ScannerConfig {
    /// Config with no limit on frame size.
    pub fn unbounded() -> Self {
        Self {
            max_buffer_size: usize::MAX,
            ..Self::default()
        }
    }

    /// Set the frame size limit. Zero selects `DEFAULT_MAX_BUFFER_SIZE`.
    pub fn max_buffer_size(mut self, max_buffer_size: usize) -> Self {
        self.max_buffer_size = if max_buffer_size == 0 {
            DEFAULT_MAX_BUFFER_SIZE
        } else {
            max_buffer_size
        };
        self
    }

    /// Set the per-read chunk size.
    pub fn read_chunk_size(mut self, read_chunk_size: usize) -> Self {
        self.read_chunk_size = read_chunk_size;
        self
    }

    /// Set the initial buffer capacity.
    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    #[inline]
    pub(crate) fn chunk_size(&self) -> usize {
        self.read_chunk_size.max(1)
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_buffer_size: DEFAULT_MAX_BUFFER_SIZE,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}
