//! Room struct definition
//!
//! One numbered room slot holding an unordered membership of client records.

use crate::client::ClientRecord;
use crate::types::ClientId;

/// A chat room slot
///
/// Membership order carries no meaning. A room is *active* iff it has at
/// least one member; an emptied room is indistinguishable from one never
/// used, so its slot becomes available again for allocation.
#[derive(Debug, Default)]
pub struct Room {
    members: Vec<ClientRecord>,
}

impl Room {
    /// Create an empty room slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the room has any members
    pub fn is_active(&self) -> bool {
        !self.members.is_empty()
    }

    /// Number of members currently registered
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Insert a member
    pub fn add(&mut self, client: ClientRecord) {
        self.members.push(client);
    }

    /// Remove the member with the given id
    ///
    /// No-op if the id is not present, so deregistration is idempotent.
    pub fn remove(&mut self, id: ClientId) {
        self.members.retain(|m| m.id != id);
    }

    /// Find a member by exact username, first match wins
    pub fn find_by_username(&self, name: &str) -> Option<&ClientRecord> {
        self.members.iter().find(|m| m.username == name)
    }

    /// The usernames of all current members
    pub fn usernames(&self) -> Vec<String> {
        self.members.iter().map(|m| m.username.clone()).collect()
    }

    /// Iterate over all members
    pub fn members(&self) -> impl Iterator<Item = &ClientRecord> {
        self.members.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoomId;
    use tokio::sync::mpsc;

    fn member(name: &str) -> ClientRecord {
        let (tx, _rx) = mpsc::channel(32);
        // The receiver is dropped; these records are only inspected, never
        // delivered to.
        ClientRecord::new(name.to_string(), RoomId(0), tx)
    }

    #[tokio::test]
    async fn test_empty_room_inactive() {
        let room = Room::new();
        assert!(!room.is_active());
        assert_eq!(room.member_count(), 0);
    }

    #[tokio::test]
    async fn test_add_and_remove() {
        let mut room = Room::new();
        let alice = member("alice");
        let alice_id = alice.id;

        room.add(alice);
        assert!(room.is_active());
        assert_eq!(room.member_count(), 1);

        room.remove(alice_id);
        assert!(!room.is_active());
    }

    #[tokio::test]
    async fn test_remove_absent_is_noop() {
        let mut room = Room::new();
        room.add(member("alice"));

        room.remove(ClientId::new());
        assert_eq!(room.member_count(), 1);
    }

    #[tokio::test]
    async fn test_find_by_username_exact() {
        let mut room = Room::new();
        room.add(member("alice"));
        room.add(member("bob"));

        assert!(room.find_by_username("alice").is_some());
        assert!(room.find_by_username("Alice").is_none());
        assert!(room.find_by_username("carol").is_none());
    }

    #[tokio::test]
    async fn test_find_duplicate_first_match_wins() {
        let mut room = Room::new();
        let first = member("alice");
        let first_id = first.id;
        room.add(first);
        room.add(member("alice"));

        assert_eq!(room.find_by_username("alice").unwrap().id, first_id);
    }

    #[tokio::test]
    async fn test_usernames() {
        let mut room = Room::new();
        room.add(member("alice"));
        room.add(member("bob"));

        let mut names = room.usernames();
        names.sort();
        assert_eq!(names, vec!["alice".to_string(), "bob".to_string()]);
    }
}
