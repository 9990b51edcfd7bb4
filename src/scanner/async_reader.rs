//! Frame scanner over `tokio::io::AsyncRead`.
//!
//! Same splitting rules as the blocking scanner. A `CancellationToken` can be
//! attached; once it fires, the pending read is abandoned and the stream ends
//! as if the source had closed, dropping any unterminated data.
//!
//! # Example
//!
//! ```ignore
//! use sse_scanner::AsyncFrameScanner;
//! use tokio_util::sync::CancellationToken;
//!
//! let token = CancellationToken::new();
//! let mut scanner = AsyncFrameScanner::new(response_body).with_cancellation(token.clone());
//!
//! while let Some(frame) = scanner.read_frame().await? {
//!     handle(frame);
//! }
//! ```

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;

use super::{ScanCore, Step};
use crate::config::ScannerConfig;
use crate::error::Result;

/// Splits an async byte source into frames.
pub struct AsyncFrameScanner<R> {
    reader: R,
    core: ScanCore,
    cancel: Option<CancellationToken>,
}

impl<R: AsyncRead + Unpin> AsyncFrameScanner<R> {
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
            cancel: None,
        }
    }

    /// End the stream when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Read the next frame.
    ///
    /// Returns:
    /// - `Ok(Some(frame))` for each frame, in stream order, boundary bytes removed
    /// - `Ok(None)` once the stream has ended, was cancelled, or after an error
    /// - `Err(...)` if the source failed or a frame exceeded the buffer limit
    ///
    /// Frames already complete in the buffer are returned even after the
    /// token fires; cancellation only interrupts reads from the source.
    pub async fn read_frame(&mut self) -> Result<Option<Bytes>> {
        loop {
            match self.core.next_step() {
                Step::Emit(result) => return result,
                Step::Read => {}
            }

            let read = match &self.cancel {
                Some(token) => tokio::select! {
                    biased;
                    _ = token.cancelled() => None,
                    result = self.reader.read(self.core.chunk_mut()) => Some(result),
                },
                None => Some(self.reader.read(self.core.chunk_mut()).await),
            };

            let outcome = match read {
                Some(result) => self.core.on_read(result),
                None => Some(Ok(self.core.cancel())),
            };
            if let Some(result) = outcome {
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

#[cfg(test)]
mod tests {
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use std::time::Duration;

    use tokio::io::{duplex, AsyncWriteExt, ReadBuf};

    use super::*;
    use crate::error::ScanError;
    use crate::scanner::Cancelled;

    /// Source that yields `data` and then fails with `err`.
    struct FailAfter {
        data: Option<Vec<u8>>,
        err: Option<io::Error>,
    }

    impl AsyncRead for FailAfter {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            if let Some(data) = self.data.take() {
                buf.put_slice(&data);
                return Poll::Ready(Ok(()));
            }
            match self.err.take() {
                Some(err) => Poll::Ready(Err(err)),
                None => Poll::Ready(Ok(())),
            }
        }
    }

    #[tokio::test]
    async fn test_frames_from_duplex() {
        let (mut client, server) = duplex(64);
        let mut scanner = AsyncFrameScanner::new(server);

        tokio::spawn(async move {
            client.write_all(b"data: one\r\n\r\ndata: ").await.unwrap();
            client.write_all(b"two\n\ndata: three").await.unwrap();
        });

        assert_eq!(&scanner.read_frame().await.unwrap().unwrap()[..], b"data: one");
        assert_eq!(&scanner.read_frame().await.unwrap().unwrap()[..], b"data: two");
        assert_eq!(&scanner.read_frame().await.unwrap().unwrap()[..], b"data: three");
        assert!(scanner.read_frame().await.unwrap().is_none());
        assert!(scanner.is_finished());
    }

    #[tokio::test]
    async fn test_cancellation_drops_partial_frame() {
        let (mut client, server) = duplex(64);
        let token = CancellationToken::new();
        let mut scanner = AsyncFrameScanner::new(server).with_cancellation(token.clone());

        client.write_all(b"data: done\n\ndata: partial").await.unwrap();
        assert_eq!(&scanner.read_frame().await.unwrap().unwrap()[..], b"data: done");

        let cancel = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });

        // The writer stays open, so only the token can end this read.
        assert!(scanner.read_frame().await.unwrap().is_none());
        assert!(scanner.buffered().is_empty());
        assert!(scanner.read_frame().await.unwrap().is_none());

        cancel.await.unwrap();
        drop(client);
    }

    #[tokio::test]
    async fn test_buffered_frames_survive_cancellation() {
        let token = CancellationToken::new();
        let mut scanner = AsyncFrameScanner::new(&b"data: a\n\ndata: b\n\ndata: c"[..])
            .with_cancellation(token.clone());

        // The first read pulls the whole source into the buffer.
        assert_eq!(&scanner.read_frame().await.unwrap().unwrap()[..], b"data: a");

        token.cancel();
        assert_eq!(&scanner.read_frame().await.unwrap().unwrap()[..], b"data: b");
        assert!(scanner.read_frame().await.unwrap().is_none());
        assert!(scanner.buffered().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_read_error_ends_stream() {
        let source = FailAfter {
            data: Some(b"data: partial".to_vec()),
            err: Some(Cancelled.into_io_error()),
        };
        let mut scanner = AsyncFrameScanner::new(source);

        assert!(scanner.read_frame().await.unwrap().is_none());
        assert!(scanner.is_finished());
    }

    #[tokio::test]
    async fn test_source_error_is_surfaced() {
        let source = FailAfter {
            data: Some(b"data: partial".to_vec()),
            err: Some(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated")),
        };
        let mut scanner = AsyncFrameScanner::new(source);

        let err = scanner.read_frame().await.unwrap_err();
        assert!(matches!(err, ScanError::Io(_)));
        assert!(scanner.read_frame().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_capacity_exceeded() {
        let stream = vec![b'z'; 64];
        let mut scanner = AsyncFrameScanner::with_max_buffer_size(&stream[..], 10);

        let err = scanner.read_frame().await.unwrap_err();
        assert!(err.is_capacity_exceeded());
    }
}
