use log::info;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::GameError;
use crate::models::room::{Room, Seat};
use crate::state::lock;

/// Shared handle to one room; lock it for every read or write of board and turn.
pub type RoomHandle = Arc<Mutex<Room>>;

/// Registry of active rooms.
///
/// The directory lock is only held to look up, insert or remove a handle;
/// each room has its own mutex so separate games never wait on each other.
#[derive(Default)]
pub struct RoomStore {
    rooms: Mutex<HashMap<String, RoomHandle>>,
}

impl RoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_room(&self, id: &str, white: Seat, black: Seat) -> Result<RoomHandle, GameError> {
        let mut rooms = lock(&self.rooms);
        if rooms.contains_key(id) {
            return Err(GameError::RoomExists(id.to_string()));
        }
        let handle = Arc::new(Mutex::new(Room::new(id, white, black)));
        rooms.insert(id.to_string(), Arc::clone(&handle));
        info!("Created room {} ({} active)", id, rooms.len());
        Ok(handle)
    }

    pub fn get_room(&self, id: &str) -> Result<RoomHandle, GameError> {
        lock(&self.rooms)
            .get(id)
            .cloned()
            .ok_or(GameError::RoomNotFound)
    }

    pub fn remove_room(&self, id: &str) {
        let mut rooms = lock(&self.rooms);
        if rooms.remove(id).is_some() {
            info!("Removed room {} ({} active)", id, rooms.len());
        }
    }

    /// Handles of every active room, taken under one directory lock.
    pub fn handles(&self) -> Vec<RoomHandle> {
        lock(&self.rooms).values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.rooms).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
