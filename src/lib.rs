//! Multi-Room TCP Chat Relay Library
//!
//! A line-oriented chat relay: clients connect over TCP, join a numbered
//! room, register a display name, then exchange messages and a small
//! command set.
//!
//! # Features
//! - Numbered rooms with "new" allocation and explicit numeric selection
//! - Colorized join/leave announcements and chat broadcasts
//! - `/list`, `/rooms`, `/whisper`, `/exit` commands
//! - Silent rejection of invalid or full room requests
//!
//! # Architecture
//! One tokio task per connection plus a per-connection writer task. All
//! shared state lives in the [`Registry`], a fixed table of rooms behind a
//! single lock. Deliveries go through bounded per-client outbox channels;
//! broadcast snapshots membership under the lock and sends after releasing
//! it, so no socket write ever happens inside the critical section.
//!
//! # Example
//! ```ignore
//! use chat_relay::Server;
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = Server::bind("0.0.0.0:1004", 10).await.unwrap();
//!     server.run().await.unwrap();
//! }
//! ```

pub mod client;
pub mod command;
pub mod error;
pub mod handler;
pub mod message;
pub mod registry;
pub mod room;
pub mod server;
pub mod types;

// Re-export main types for convenience
pub use client::ClientRecord;
pub use command::{Command, EXIT_TOKEN};
pub use error::{RegistryError, SendError, ServerError};
pub use handler::handle_connection;
pub use registry::{Registry, DEFAULT_MAX_ROOMS};
pub use room::Room;
pub use server::Server;
pub use types::{ClientId, Color, RoomId};
