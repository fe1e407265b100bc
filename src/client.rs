//! Client record definition
//!
//! Represents a registered client: identity, display name, color tag, room
//! and the outbox channel feeding its writer task.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::error::SendError;
use crate::types::{ClientId, Color, RoomId};

/// Upper bound on stored username length, in characters
pub const MAX_USERNAME_LEN: usize = 64;

/// Registered client information
///
/// One per active connection. Username, color and room are assigned once at
/// registration and never change. The connection's write half is owned by
/// the session's writer task; the registry only ever holds the outbox
/// sender, so delivering to a client can never touch the socket directly.
#[derive(Debug, Clone)]
pub struct ClientRecord {
    /// Unique identifier for this client
    pub id: ClientId,
    /// Display name, not required to be unique within a room
    pub username: String,
    /// Cosmetic color tag picked at registration
    pub color: Color,
    /// The room this client registered into
    pub room: RoomId,
    /// Session outbox; lines queued here are written by the writer task
    outbox: mpsc::Sender<String>,
}

impl ClientRecord {
    /// Create a record for a freshly registered client
    ///
    /// The username is stored as received, bounded to [`MAX_USERNAME_LEN`]
    /// characters.
    pub fn new(username: String, room: RoomId, outbox: mpsc::Sender<String>) -> Self {
        let username = if username.chars().count() > MAX_USERNAME_LEN {
            username.chars().take(MAX_USERNAME_LEN).collect()
        } else {
            username
        };
        Self {
            id: ClientId::new(),
            username,
            color: Color::random(),
            room,
            outbox,
        }
    }

    /// Queue a line for delivery to this client
    ///
    /// Non-blocking: a full outbox means a stalled peer, and a closed one a
    /// departed peer. Either way the caller decides whether to care.
    pub fn send(&self, line: String) -> Result<(), SendError> {
        self.outbox.try_send(line).map_err(|e| match e {
            TrySendError::Full(_) => SendError::Full,
            TrySendError::Closed(_) => SendError::Closed,
        })
    }

    /// A clone of the outbox sender, for deliveries outside the registry lock
    pub fn outbox(&self) -> mpsc::Sender<String> {
        self.outbox.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_creation() {
        let (tx, _rx) = mpsc::channel(32);
        let record = ClientRecord::new("alice".to_string(), RoomId(3), tx);

        assert_eq!(record.username, "alice");
        assert_eq!(record.room, RoomId(3));
    }

    #[tokio::test]
    async fn test_username_bounded() {
        let (tx, _rx) = mpsc::channel(32);
        let long = "x".repeat(MAX_USERNAME_LEN + 20);
        let record = ClientRecord::new(long, RoomId(0), tx);

        assert_eq!(record.username.chars().count(), MAX_USERNAME_LEN);
    }

    #[tokio::test]
    async fn test_send_queues_line() {
        let (tx, mut rx) = mpsc::channel(32);
        let record = ClientRecord::new("alice".to_string(), RoomId(0), tx);

        record.send("hello\n".to_string()).unwrap();
        assert_eq!(rx.recv().await.unwrap(), "hello\n");
    }

    #[tokio::test]
    async fn test_send_reports_closed_outbox() {
        let (tx, rx) = mpsc::channel(32);
        let record = ClientRecord::new("alice".to_string(), RoomId(0), tx);
        drop(rx);

        assert!(matches!(
            record.send("hello\n".to_string()),
            Err(SendError::Closed)
        ));
    }

    #[tokio::test]
    async fn test_send_reports_full_outbox() {
        let (tx, _rx) = mpsc::channel(1);
        let record = ClientRecord::new("alice".to_string(), RoomId(0), tx);

        record.send("one\n".to_string()).unwrap();
        assert!(matches!(
            record.send("two\n".to_string()),
            Err(SendError::Full)
        ));
    }
}
