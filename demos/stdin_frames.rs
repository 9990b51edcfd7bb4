//! Stdin Frames - split an event stream read from stdin.
//!
//! This example demonstrates:
//! - Creating a blocking `FrameScanner` with a custom buffer limit
//! - Iterating over frames until end of stream
//! - Decomposing each frame into an `Event`
//!
//! # Running
//!
//! ```sh
//! printf 'id: 1\ndata: hello\n\nevent: bye\r\ndata: world\r\n\r\n' \
//!     | RUST_LOG=sse_scanner=trace cargo run --example stdin_frames
//! ```

use sse_scanner::protocol::Event;
use sse_scanner::{FrameScanner, ScannerConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout only carries frames
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = ScannerConfig::default().max_buffer_size(1024 * 1024);
    let scanner = FrameScanner::with_config(std::io::stdin().lock(), config);

    for (index, frame) in scanner.enumerate() {
        let frame = frame?;
        match Event::from_frame(&frame) {
            Some(event) => println!(
                "#{} id={:?} event={:?} data={:?}",
                index,
                String::from_utf8_lossy(event.id()),
                String::from_utf8_lossy(event.event()),
                String::from_utf8_lossy(event.data()),
            ),
            None => println!("#{} <empty frame>", index),
        }
    }

    Ok(())
}
