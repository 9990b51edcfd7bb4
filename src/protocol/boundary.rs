//! Blank-line boundary detection.
//!
//! An event stream separates frames with an empty line. Because the line
//! terminator may be `\r`, `\n` or `\r\n`, and the two terminators making up
//! the blank line need not use the same convention, five byte patterns count
//! as a boundary:
//!
//! ```text
//! ┌────────────┬────────┐
//! │ Pattern    │ Length │
//! ├────────────┼────────┤
//! │ \r\r       │ 2      │
//! │ \n\n       │ 2      │
//! │ \r\n\n     │ 3      │
//! │ \n\r\n     │ 3      │
//! │ \r\n\r\n   │ 4      │
//! └────────────┴────────┘
//! ```
//!
//! The earliest starting offset wins.

/// Longest boundary pattern in bytes.
pub const MAX_BOUNDARY_LEN: usize = 4;

/// Boundary patterns, longest first.
const PATTERNS: [&[u8]; 5] = [b"\r\n\r\n", b"\r\n\n", b"\n\r\n", b"\r\r", b"\n\n"];

/// A located blank-line boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    /// Offset of the first boundary byte.
    pub position: usize,
    /// Number of bytes the boundary occupies (2, 3 or 4).
    pub len: usize,
}

impl Boundary {
    /// Offset just past the boundary.
    #[inline]
    pub fn end(&self) -> usize {
        self.position + self.len
    }
}

/// Find the earliest boundary in `data`.
///
/// Returns `None` when no complete boundary is present.
///
/// # Example
///
/// ```
/// use sse_scanner::protocol::{find_boundary, Boundary};
///
/// assert_eq!(
///     find_boundary(b"data:hi\r\n\r\nrest"),
///     Some(Boundary { position: 7, len: 4 })
/// );
/// assert_eq!(find_boundary(b"data:hi\r\n"), None);
/// ```
#[inline]
pub fn find_boundary(data: &[u8]) -> Option<Boundary> {
    find_boundary_from(data, 0)
}

/// Find the earliest boundary starting at or after `start`.
///
/// Used to resume a search after more bytes were appended: if a previous
/// search over `data[..n]` found nothing, every boundary in `data` starts at
/// or after `n.saturating_sub(MAX_BOUNDARY_LEN - 1)`.
pub fn find_boundary_from(data: &[u8], start: usize) -> Option<Boundary> {
    if data.len() < 2 {
        return None;
    }

    for position in start..data.len() - 1 {
        let b = data[position];
        if b != b'\r' && b != b'\n' {
            continue;
        }
        if let Some(len) = match_at(&data[position..]) {
            return Some(Boundary { position, len });
        }
    }

    None
}

/// Length of the boundary pattern `tail` starts with, if any.
///
/// Patterns are tried longest first, so `\r\n\r\n` is reported as 4 even
/// though `\r\n` followed by more data could begin other patterns.
#[inline]
fn match_at(tail: &[u8]) -> Option<usize> {
    PATTERNS
        .iter()
        .copied()
        .find(|pattern| tail.starts_with(pattern))
        .map(|pattern| pattern.len())
}
