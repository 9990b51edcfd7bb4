//! Protocol module - boundary detection, framing, and event fields.
//!
//! This module implements the byte-level side of an event stream:
//! - Blank-line boundary detection across `\r`, `\n` and `\r\n` endings
//! - Frame buffer for accumulating partial reads
//! - Event struct with raw field accessors

mod boundary;
mod event;
mod frame_buffer;

pub use boundary::{find_boundary, find_boundary_from, Boundary, MAX_BOUNDARY_LEN};
pub use event::Event;
pub use frame_buffer::FrameBuffer;
