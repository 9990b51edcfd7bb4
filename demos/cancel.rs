//! Cancel - stop an async event stream from another task.
//!
//! This example demonstrates:
//! - Creating an `AsyncFrameScanner` over tokio's stdin
//! - Attaching a `CancellationToken`
//! - Cancellation ending the stream cleanly instead of failing
//!
//! # Running
//!
//! ```sh
//! # Type frames separated by blank lines; the stream stops after 10 seconds.
//! cargo run --example cancel
//! ```

use std::time::Duration;

use sse_scanner::AsyncFrameScanner;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let token = CancellationToken::new();
    let timer = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(10)).await;
        timer.cancel();
    });

    let mut scanner = AsyncFrameScanner::new(tokio::io::stdin()).with_cancellation(token);

    let mut count = 0usize;
    while let Some(frame) = scanner.read_frame().await? {
        count += 1;
        println!("frame {}: {:?}", count, String::from_utf8_lossy(&frame));
    }

    println!("stream ended after {} frames", count);
    Ok(())
}
