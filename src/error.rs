//! Error types for the chat relay
//!
//! Defines fatal server errors, registry rejections, and outbox send errors.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

use crate::types::RoomId;

/// Fatal server errors
///
/// A failure on the listening socket itself. Propagates out of the accept
/// loop and terminates the process; per-connection errors never become one
/// of these.
#[derive(Debug, Error)]
pub enum ServerError {
    /// IO error on bind/listen/accept (fatal)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Room registry rejections
///
/// Returned by registry operations so the caller decides how to surface
/// them. The session handler maps every variant to a silent connection
/// close; a rejected client never receives an explanatory byte.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Every room slot is occupied, "new" cannot allocate
    #[error("all {0} rooms are occupied")]
    RoomsFull(usize),

    /// Requested room id is outside the table
    #[error("room {0} is out of range")]
    OutOfRange(RoomId),

    /// Requested room exists but has no members
    #[error("room {0} is not active")]
    NotActive(RoomId),
}

/// Outbox send errors
///
/// Occurs when delivering a line to a client whose outbox channel is full
/// or whose writer task has gone away. Broadcast and whisper delivery
/// ignore these per the delivery-failure policy.
#[derive(Debug, Error)]
pub enum SendError {
    /// The client's writer task has ended
    #[error("outbox closed")]
    Closed,

    /// The client's bounded outbox is full (stalled peer)
    #[error("outbox full")]
    Full,
}
