//! Room registry: the shared state of the relay
//!
//! A fixed-capacity table of rooms behind one process-wide lock. Every
//! membership mutation and every full-table scan goes through this single
//! lock, so no two tasks ever observe membership concurrently.
//!
//! Broadcast snapshots the member outboxes under the lock and performs the
//! actual deliveries after releasing it. Combined with bounded per-client
//! outbox channels this keeps socket writes out of the critical section,
//! so a stalled peer in one room can no longer stall every other room.

use std::sync::{Mutex, MutexGuard};

use tokio::sync::mpsc;
use tracing::debug;

use crate::client::ClientRecord;
use crate::error::RegistryError;
use crate::room::Room;
use crate::types::{ClientId, RoomId};

/// Default number of room slots
pub const DEFAULT_MAX_ROOMS: usize = 10;

/// The fixed-size room table plus its lock
///
/// Created once at startup and shared across all session tasks. Rooms and
/// client records churn continuously; the table itself lives until process
/// exit.
#[derive(Debug)]
pub struct Registry {
    rooms: Mutex<Vec<Room>>,
    capacity: usize,
}

impl Registry {
    /// Create a registry with `capacity` room slots, all empty
    pub fn new(capacity: usize) -> Self {
        let rooms = (0..capacity).map(|_| Room::new()).collect();
        Self {
            rooms: Mutex::new(rooms),
            capacity,
        }
    }

    /// Number of room slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Room>> {
        // The table is plain data; a poisoned lock still holds a usable
        // membership state, so recover instead of propagating the panic.
        self.rooms.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Allocate a room for a `"new"` request
    ///
    /// Scans for the lowest-numbered inactive slot. The slot is not
    /// reserved; it stays empty until the client registers.
    pub fn allocate(&self) -> Result<RoomId, RegistryError> {
        let rooms = self.lock();
        rooms
            .iter()
            .position(|r| !r.is_active())
            .map(RoomId)
            .ok_or(RegistryError::RoomsFull(self.capacity))
    }

    /// Validate an explicit numeric room selection
    ///
    /// The id must be in range and the room active at this moment.
    pub fn select(&self, id: RoomId) -> Result<RoomId, RegistryError> {
        let rooms = self.lock();
        match rooms.get(id.index()) {
            None => Err(RegistryError::OutOfRange(id)),
            Some(room) if !room.is_active() => Err(RegistryError::NotActive(id)),
            Some(_) => Ok(id),
        }
    }

    /// Register a client into its room
    pub fn join(&self, client: ClientRecord) {
        let room = client.room;
        let username = client.username.clone();
        let mut rooms = self.lock();
        if let Some(slot) = rooms.get_mut(room.index()) {
            slot.add(client);
            debug!("{} registered into room {}", username, room);
        }
    }

    /// Deregister a client from a room
    ///
    /// Idempotent: removing an id that is no longer present is a no-op.
    pub fn release(&self, room: RoomId, id: ClientId) {
        let mut rooms = self.lock();
        if let Some(slot) = rooms.get_mut(room.index()) {
            slot.remove(id);
            debug!("client {} released from room {}", id, room);
        }
    }

    /// Usernames of everyone in `room`, for `/list`
    pub fn usernames(&self, room: RoomId) -> Vec<String> {
        let rooms = self.lock();
        rooms
            .get(room.index())
            .map(Room::usernames)
            .unwrap_or_default()
    }

    /// Ids of all currently active rooms, for `/rooms`
    pub fn active_rooms(&self) -> Vec<RoomId> {
        let rooms = self.lock();
        rooms
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_active())
            .map(|(i, _)| RoomId(i))
            .collect()
    }

    /// Look up a member of `room` by exact username
    ///
    /// The scan runs under the registry lock; only the outbox sender leaves
    /// the critical section. First match wins when names collide.
    pub fn find_member(&self, room: RoomId, name: &str) -> Option<mpsc::Sender<String>> {
        let rooms = self.lock();
        rooms
            .get(room.index())?
            .find_by_username(name)
            .map(ClientRecord::outbox)
    }

    /// Deliver `line` to every member of `room` except `exclude`
    ///
    /// Membership is snapshotted under the lock; deliveries happen after it
    /// is released, as non-blocking sends into each member's bounded
    /// outbox. A failed delivery is ignored: the member is not removed and
    /// nothing is reported to the broadcaster. Cleanup of a dead peer is
    /// the job of that peer's own session.
    pub fn broadcast(&self, room: RoomId, line: &str, exclude: Option<ClientId>) {
        let targets: Vec<ClientRecord> = {
            let rooms = self.lock();
            let Some(slot) = rooms.get(room.index()) else {
                return;
            };
            slot.members()
                .filter(|m| Some(m.id) != exclude)
                .cloned()
                .collect()
        };

        for member in targets {
            if let Err(e) = member.send(line.to_string()) {
                debug!("dropping broadcast to client {}: {}", member.id, e);
            }
        }
    }
}
