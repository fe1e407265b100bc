//! Basic type definitions for the chat relay
//!
//! Provides newtype wrappers for type safety:
//! - `ClientId`: UUID-based unique client identifier
//! - `RoomId`: numeric room slot in `[0, capacity)`
//! - `Color`: ANSI color tag assigned to a client at registration

use std::num::ParseIntError;
use std::str::FromStr;

use uuid::Uuid;

/// Unique client identifier (newtype pattern)
///
/// Wraps a UUID v4 for type-safe client identification. Used to match a
/// member on removal and to exclude the sender from broadcasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub Uuid);

impl ClientId {
    /// Create a new random client ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric room identifier
///
/// A slot index into the registry's room table. Range checking against the
/// table capacity happens in the registry; parsing only requires a decimal
/// integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomId(pub usize);

impl RoomId {
    /// Slot index into the room table
    pub fn index(self) -> usize {
        self.0
    }
}

impl FromStr for RoomId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<usize>().map(Self)
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ANSI escape sequence that resets all terminal attributes
pub const COLOR_RESET: &str = "\x1b[0m";

/// The fixed palette clients are colored from
pub const COLOR_PALETTE: [&str; 12] = [
    "\x1b[31m", "\x1b[32m", "\x1b[33m", "\x1b[34m",
    "\x1b[35m", "\x1b[36m", "\x1b[91m", "\x1b[92m",
    "\x1b[93m", "\x1b[94m", "\x1b[95m", "\x1b[96m",
];

/// Cosmetic color tag assigned to a client at registration
///
/// Chosen pseudo-randomly from [`COLOR_PALETTE`]; not unique per client.
/// `Display` yields the ANSI escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(&'static str);

impl Color {
    /// Pick a random color from the palette
    pub fn random() -> Self {
        use rand::seq::SliceRandom;
        let code = COLOR_PALETTE
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(COLOR_PALETTE[0]);
        Self(code)
    }

    /// The raw escape sequence
    pub fn code(self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_unique() {
        let id1 = ClientId::new();
        let id2 = ClientId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_room_id_parse() {
        let id: RoomId = "7".parse().unwrap();
        assert_eq!(id, RoomId(7));
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn test_room_id_parse_rejects_garbage() {
        assert!("new".parse::<RoomId>().is_err());
        assert!("-1".parse::<RoomId>().is_err());
        assert!("3x".parse::<RoomId>().is_err());
        assert!("".parse::<RoomId>().is_err());
    }

    #[test]
    fn test_color_from_palette() {
        for _ in 0..32 {
            let color = Color::random();
            assert!(COLOR_PALETTE.contains(&color.code()));
        }
    }
}
