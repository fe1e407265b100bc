//! Wire line formatting
//!
//! Every server-to-client message is one newline-terminated chunk of plain
//! text (some replies span several lines). The functions here produce the
//! exact bytes queued into client outboxes; nothing else in the crate
//! formats protocol text.

use crate::client::ClientRecord;
use crate::types::{Color, RoomId, COLOR_RESET};

/// Color used for private whisper deliveries
const WHISPER_COLOR: &str = "\x1b[35m";

/// Fixed reply for an unrecognized `/` command
pub const UNKNOWN_COMMAND: &str = "Unknown command.\n";

/// Reply when a whisper target is not in the sender's room
pub const USER_NOT_FOUND: &str = "User not found in this room.\n";

/// Reply when a whisper line carries no target
pub const WHISPER_USAGE: &str = "Usage: /whisper <user> <message>\n";

/// The room id reply closing the room-select step
pub fn room_assigned(room: RoomId) -> String {
    format!("{room}\n")
}

/// Join announcement, colorized with the joiner's tag
pub fn joined(client: &ClientRecord) -> String {
    format!("{}{} joined the chat!{COLOR_RESET}\n", client.color, client.username)
}

/// Leave announcement for an explicit exit
pub fn left(client: &ClientRecord) -> String {
    format!("{}{} left the chat.{COLOR_RESET}\n", client.color, client.username)
}

/// A chat line as delivered to the other room members
pub fn chat(color: Color, username: &str, text: &str) -> String {
    format!("{color}[{username}]: {text}{COLOR_RESET}\n")
}

/// A private whisper as delivered to its target
pub fn whisper(from: &str, text: &str) -> String {
    format!("{WHISPER_COLOR}[Private from {from}]: {text}{COLOR_RESET}\n")
}

/// The `/list` reply: header plus one entry per member
pub fn user_list(usernames: &[String]) -> String {
    let mut out = String::from("Users in this room:\n");
    for name in usernames {
        out.push_str("- ");
        out.push_str(name);
        out.push('\n');
    }
    out
}

/// The `/rooms` reply: header plus one entry per active room
pub fn room_list(rooms: &[RoomId]) -> String {
    let mut out = String::from("Active rooms:\n");
    for room in rooms {
        out.push_str(&format!("Room {room}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_assigned() {
        assert_eq!(room_assigned(RoomId(0)), "0\n");
        assert_eq!(room_assigned(RoomId(7)), "7\n");
    }

    #[test]
    fn test_chat_line_format() {
        let line = chat(Color::random(), "alice", "hello");
        assert!(line.contains("[alice]: hello"));
        assert!(line.ends_with("\x1b[0m\n"));
    }

    #[test]
    fn test_whisper_format() {
        assert_eq!(
            whisper("bob", "hi"),
            "\x1b[35m[Private from bob]: hi\x1b[0m\n"
        );
    }

    #[test]
    fn test_user_list() {
        let names = vec!["alice".to_string(), "bob".to_string()];
        assert_eq!(user_list(&names), "Users in this room:\n- alice\n- bob\n");
    }

    #[test]
    fn test_room_list() {
        let rooms = vec![RoomId(0), RoomId(3)];
        assert_eq!(room_list(&rooms), "Active rooms:\nRoom 0\nRoom 3\n");
    }

    #[test]
    fn test_empty_lists_are_just_headers() {
        assert_eq!(user_list(&[]), "Users in this room:\n");
        assert_eq!(room_list(&[]), "Active rooms:\n");
    }
}
