//! Field decomposition of a frame.
//!
//! Splits a raw frame into its `id`, `data`, `event` and `retry` fields.
//! Values stay raw bytes: nothing here checks UTF-8 or interprets the fields.
//!
//! # Example
//!
//! ```
//! use sse_scanner::protocol::Event;
//!
//! let event = Event::from_frame(b"event: update\ndata: a\ndata: b").unwrap();
//! assert_eq!(event.event(), b"update");
//! assert_eq!(event.data(), b"a\nb");
//! ```

use std::time::SystemTime;

use bytes::{Bytes, BytesMut};

const ID: &[u8] = b"id:";
const DATA: &[u8] = b"data:";
const EVENT: &[u8] = b"event:";
const RETRY: &[u8] = b"retry:";

/// One decomposed event.
#[derive(Debug, Clone)]
pub struct Event {
    /// Event identifier.
    pub id: Bytes,
    /// Data lines joined with `\n`.
    pub data: Bytes,
    /// Event type label.
    pub event: Bytes,
    /// Retry directive, unparsed.
    pub retry: Bytes,
    /// When the frame was decomposed.
    pub timestamp: SystemTime,
}

impl Event {
    /// Decompose a frame into its fields.
    ///
    /// Returns `None` for an empty frame. Lines split on `\r` or `\n`; lines
    /// with unknown fields (including `:` comments) are ignored.
    pub fn from_frame(frame: &[u8]) -> Option<Self> {
        if frame.is_empty() {
            return None;
        }

        let mut id = Bytes::new();
        let mut data = BytesMut::new();
        let mut event = Bytes::new();
        let mut retry = Bytes::new();

        let lines = frame
            .split(|b| *b == b'\n' || *b == b'\r')
            .filter(|line| !line.is_empty());

        for line in lines {
            if let Some(value) = field_value(line, ID) {
                id = Bytes::copy_from_slice(value);
            } else if let Some(value) = field_value(line, DATA) {
                data.extend_from_slice(value);
                data.extend_from_slice(b"\n");
            } else if line == &DATA[..DATA.len() - 1] {
                // A bare `data` line is a data field with an empty value.
                data.extend_from_slice(b"\n");
            } else if let Some(value) = field_value(line, EVENT) {
                event = Bytes::copy_from_slice(value);
            } else if let Some(value) = field_value(line, RETRY) {
                retry = Bytes::copy_from_slice(value);
            }
        }

        if data.last() == Some(&b'\n') {
            data.truncate(data.len() - 1);
        }

        Some(Self {
            id,
            data: data.freeze(),
            event,
            retry,
            timestamp: SystemTime::now(),
        })
    }

    /// Get the event identifier.
    #[inline]
    pub fn id(&self) -> &[u8] {
        &self.id
    }

    /// Get the data payload.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the event type label.
    #[inline]
    pub fn event(&self) -> &[u8] {
        &self.event
    }

    /// Get the raw retry directive.
    #[inline]
    pub fn retry(&self) -> &[u8] {
        &self.retry
    }
}

/// Value of `line` if it starts with `prefix`, minus one leading space.
fn field_value<'a>(line: &'a [u8], prefix: &[u8]) -> Option<&'a [u8]> {
    let value = line.strip_prefix(prefix)?;
    Some(value.strip_prefix(b" ").unwrap_or(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_frame() {
        assert!(Event::from_frame(b"").is_none());
    }

    #[test]
    fn test_all_fields() {
        let event = Event::from_frame(b"id: 7\nevent: ping\nretry: 3000\ndata: hello").unwrap();

        assert_eq!(event.id(), b"7");
        assert_eq!(event.event(), b"ping");
        assert_eq!(event.retry(), b"3000");
        assert_eq!(event.data(), b"hello");
    }

    #[test]
    fn test_multiline_data_joined() {
        let event = Event::from_frame(b"data:first\r\ndata:second\r\ndata: third").unwrap();
        assert_eq!(event.data(), b"first\nsecond\nthird");
    }

    #[test]
    fn test_bare_data_line() {
        let event = Event::from_frame(b"data\ndata: x").unwrap();
        assert_eq!(event.data(), b"\nx");

        let event = Event::from_frame(b"data").unwrap();
        assert_eq!(event.data(), b"");
    }

    #[test]
    fn test_only_one_space_stripped() {
        let event = Event::from_frame(b"data:  indented").unwrap();
        assert_eq!(event.data(), b" indented");
    }

    #[test]
    fn test_last_id_wins() {
        let event = Event::from_frame(b"id:1\nid:2").unwrap();
        assert_eq!(event.id(), b"2");
    }

    #[test]
    fn test_comments_and_unknown_fields_ignored() {
        let event = Event::from_frame(b": keep-alive\nfoo: bar\ndata: ok").unwrap();
        assert_eq!(event.data(), b"ok");
        assert!(event.id().is_empty());
        assert!(event.event().is_empty());
    }

    #[test]
    fn test_comment_only_frame_has_no_fields() {
        let event = Event::from_frame(b": ping").unwrap();
        assert!(event.data().is_empty());
        assert!(event.retry().is_empty());
    }

    #[test]
    fn test_non_utf8_passes_through() {
        let event = Event::from_frame(b"data: \xff\xfe").unwrap();
        assert_eq!(event.data(), b"\xff\xfe");
    }
}
