//! Command parsing and dispatch
//!
//! Lines whose first character is `/` are commands. The first
//! whitespace-delimited token selects the command, case-sensitively; the
//! dispatcher alone decides every reply or targeted delivery for the line.
//! No command ever broadcasts to the whole room.

use crate::client::ClientRecord;
use crate::message;
use crate::registry::Registry;

/// Command prefix character
pub const COMMAND_PREFIX: char = '/';

/// The literal a client sends to leave gracefully
///
/// Handled by the session loop before command dispatch, since it ends the
/// session rather than producing a reply.
pub const EXIT_TOKEN: &str = "/exit";

/// A parsed command line
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    /// `/list`: usernames in the sender's room, to the sender only
    List,
    /// `/rooms`: ids of all active rooms, to the sender only
    Rooms,
    /// `/whisper <target> <message>`: private delivery within the room
    Whisper { target: &'a str, text: &'a str },
    /// `/whisper` with no target token
    WhisperMissingTarget,
    /// Any other `/`-prefixed first token
    Unknown,
}

impl<'a> Command<'a> {
    /// Parse a received line
    ///
    /// Returns `None` for ordinary chat lines (no `/` prefix).
    pub fn parse(line: &'a str) -> Option<Self> {
        if !line.starts_with(COMMAND_PREFIX) {
            return None;
        }

        let mut parts = line.splitn(2, char::is_whitespace);
        let head = parts.next().unwrap_or(line);
        let rest = parts.next().unwrap_or("");

        let cmd = match head {
            "/list" => Command::List,
            "/rooms" => Command::Rooms,
            "/whisper" => match rest.trim_start().split_once(char::is_whitespace) {
                Some((target, text)) => Command::Whisper {
                    target,
                    text: text.trim_start(),
                },
                None if !rest.trim_start().is_empty() => Command::Whisper {
                    target: rest.trim_start(),
                    text: "",
                },
                None => Command::WhisperMissingTarget,
            },
            _ => Command::Unknown,
        };
        Some(cmd)
    }
}

/// Execute a command on behalf of `client`
///
/// Replies go to the issuer's own outbox; a whisper additionally delivers
/// to exactly one other member. Delivery failures are ignored here: a dead
/// issuer is detected by its own read loop, and a dead whisper target is
/// detected by its own session, per the delivery-failure policy.
pub fn dispatch(cmd: Command<'_>, client: &ClientRecord, registry: &Registry) {
    match cmd {
        Command::List => {
            let names = registry.usernames(client.room);
            let _ = client.send(message::user_list(&names));
        }
        Command::Rooms => {
            let rooms = registry.active_rooms();
            let _ = client.send(message::room_list(&rooms));
        }
        Command::Whisper { target, text } => {
            match registry.find_member(client.room, target) {
                Some(outbox) => {
                    let _ = outbox.try_send(message::whisper(&client.username, text));
                }
                None => {
                    let _ = client.send(message::USER_NOT_FOUND.to_string());
                }
            }
        }
        Command::WhisperMissingTarget => {
            let _ = client.send(message::WHISPER_USAGE.to_string());
        }
        Command::Unknown => {
            let _ = client.send(message::UNKNOWN_COMMAND.to_string());
        }
    }
}
