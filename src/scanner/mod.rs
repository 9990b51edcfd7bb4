//! Pull-based frame scanners over a byte source.
//!
//! - [`FrameScanner`]: blocking, over any `std::io::Read`
//! - [`AsyncFrameScanner`]: over any `tokio::io::AsyncRead`, optionally
//!   tied to a `CancellationToken`
//!
//! Both call the source only when the buffer holds no complete frame, and
//! both report end of stream as `Ok(None)`.
//!
//! # Cancellation
//!
//! A cancelled read ends the stream cleanly instead of failing. Any
//! unterminated data still buffered at that point is dropped, not flushed as
//! a final frame: only a real end of input flushes the remainder.

mod async_reader;
mod blocking;

pub use async_reader::AsyncFrameScanner;
pub use blocking::FrameScanner;

use std::io;

use bytes::Bytes;
use thiserror::Error;

use crate::config::ScannerConfig;
use crate::error::{Result, ScanError};
use crate::protocol::FrameBuffer;

/// Marker error a source returns to signal that its read was cancelled.
///
/// ```
/// use sse_scanner::scanner::{is_cancellation, Cancelled};
///
/// let err = Cancelled.into_io_error();
/// assert!(is_cancellation(&err));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("read cancelled")]
pub struct Cancelled;

impl Cancelled {
    /// Wrap the marker in an `io::Error` a `Read` impl can return.
    pub fn into_io_error(self) -> io::Error {
        io::Error::other(self)
    }
}

impl From<Cancelled> for io::Error {
    fn from(cancelled: Cancelled) -> Self {
        cancelled.into_io_error()
    }
}

/// Check whether an I/O error carries the [`Cancelled`] marker.
pub fn is_cancellation(err: &io::Error) -> bool {
    err.get_ref().is_some_and(|inner| inner.is::<Cancelled>())
}

/// Scanner lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Frames may still be produced.
    Scanning,
    /// Source exhausted or cancelled.
    Drained,
    /// Source or capacity error already reported.
    Failed,
}

/// Next move for a scanner driving its source.
enum Step {
    /// Hand this result to the caller.
    Emit(Result<Option<Bytes>>),
    /// The buffer needs more bytes.
    Read,
}

/// Buffer, read chunk and lifecycle shared by both scanners.
///
/// The scanners only differ in how they fill `chunk`.
struct ScanCore {
    buffer: FrameBuffer,
    chunk: Vec<u8>,
    state: State,
}

impl ScanCore {
    fn new(config: &ScannerConfig) -> Self {
        Self {
            buffer: FrameBuffer::from_config(config),
            chunk: vec![0u8; config.chunk_size()],
            state: State::Scanning,
        }
    }

    fn next_step(&mut self) -> Step {
        if self.state != State::Scanning {
            return Step::Emit(Ok(None));
        }

        match self.buffer.try_extract_one() {
            Ok(Some(frame)) => Step::Emit(Ok(Some(frame))),
            Ok(None) => Step::Read,
            Err(err) => Step::Emit(Err(self.fail(err))),
        }
    }

    /// Scratch space for the next source read.
    #[inline]
    fn chunk_mut(&mut self) -> &mut [u8] {
        &mut self.chunk
    }

    /// Apply the outcome of one source read.
    ///
    /// Returns `None` when the scanner should look at the buffer again.
    fn on_read(&mut self, result: io::Result<usize>) -> Option<Result<Option<Bytes>>> {
        match result {
            Ok(0) => Some(self.finish()),
            Ok(n) => {
                self.buffer.extend(&self.chunk[..n]);
                None
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => None,
            Err(err) if is_cancellation(&err) => Some(Ok(self.cancel())),
            Err(err) => Some(Err(self.fail(err.into()))),
        }
    }

    fn finish(&mut self) -> Result<Option<Bytes>> {
        match self.buffer.finish() {
            Ok(frame) => {
                self.state = State::Drained;
                tracing::debug!(final_frame = frame.is_some(), "Event stream ended");
                Ok(frame)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn cancel(&mut self) -> Option<Bytes> {
        let dropped = self.buffer.discard();
        self.state = State::Drained;
        tracing::debug!(dropped, "Event stream read cancelled");
        None
    }

    fn fail(&mut self, err: ScanError) -> ScanError {
        self.state = State::Failed;
        err
    }

    #[inline]
    fn is_finished(&self) -> bool {
        self.state != State::Scanning
    }
}
