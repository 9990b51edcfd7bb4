//! Error types for sse-scanner.

use thiserror::Error;

/// Main error type for all scanning operations.
///
/// End-of-stream is not an error: `read_frame` reports it as `Ok(None)`.
/// Cancellation of the source is normalized to end-of-stream as well.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The underlying byte source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unterminated data grew past the configured limit.
    #[error("Frame exceeds buffer capacity: {buffered} bytes buffered, limit is {limit}")]
    BufferCapacityExceeded {
        /// Configured maximum frame size.
        limit: usize,
        /// Bytes held when the limit tripped.
        buffered: usize,
    },
}

impl ScanError {
    /// True for `BufferCapacityExceeded`.
    #[inline]
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, ScanError::BufferCapacityExceeded { .. })
    }
}

/// Result type alias using ScanError.
pub type Result<T> = std::result::Result<T, ScanError>;
