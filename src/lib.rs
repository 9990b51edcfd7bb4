//! # sse-scanner
//!
//! Incremental frame scanner for Server-Sent-Events byte streams.
//!
//! An event stream is a sequence of frames separated by blank lines. This
//! crate finds those blank lines, whichever mix of `\r`, `\n` and `\r\n`
//! terminators the server uses, and hands back each frame as raw bytes.
//! Transport, reconnection and field validation are left to the caller.
//!
//! ## Architecture
//!
//! - **Protocol**: boundary search and the accumulation buffer, independent of I/O
//! - **Scanner**: pull-based readers over `std::io::Read` or `tokio::io::AsyncRead`
//!
//! ## Example
//!
//! ```
//! use sse_scanner::{protocol::Event, FrameScanner};
//!
//! let body = &b"event: greeting\ndata: hello\r\n\r\ndata: bye\n\n"[..];
//!
//! for frame in FrameScanner::new(body) {
//!     let frame = frame.unwrap();
//!     if let Some(event) = Event::from_frame(&frame) {
//!         assert!(!event.data().is_empty());
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod protocol;
pub mod scanner;

pub use config::ScannerConfig;
pub use error::{Result, ScanError};
pub use scanner::{AsyncFrameScanner, FrameScanner};
