//! Multi-Room TCP Chat Relay - Entry Point
//!
//! Binds the listener and accepts connections until a fatal socket error.

use std::env;

use tracing_subscriber::EnvFilter;

use chat_relay::{Server, DEFAULT_MAX_ROOMS};

/// Default listen address, on the relay's well-known port
const DEFAULT_ADDR: &str = "0.0.0.0:1004";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging with environment filter
    // Use RUST_LOG env var to control log level
    // e.g., RUST_LOG=debug or RUST_LOG=chat_relay=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chat_relay=info")),
        )
        .init();

    // Bind address and room capacity from the command line, with defaults
    let addr = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());
    let max_rooms = match env::args().nth(2) {
        Some(arg) => arg.parse()?,
        None => DEFAULT_MAX_ROOMS,
    };

    let server = Server::bind(&addr, max_rooms).await?;
    server.run().await?;

    Ok(())
}
