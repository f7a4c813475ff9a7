use log::debug;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::models::messages::PlayerInfo;
use crate::state::lock;

/// A player waiting for an opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub session_id: String,
    pub player: PlayerInfo,
}

/// FIFO of waiting players. Every operation is a single critical section.
#[derive(Default)]
pub struct MatchQueue {
    entries: Mutex<VecDeque<QueueEntry>>,
}

impl MatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends to the tail. Returns false if the session or the user is already waiting.
    pub fn enqueue(&self, entry: QueueEntry) -> bool {
        let mut entries = lock(&self.entries);
        if entries
            .iter()
            .any(|e| e.session_id == entry.session_id || e.player.id == entry.player.id)
        {
            return false;
        }
        debug!("Queued session {} ({} waiting)", entry.session_id, entries.len() + 1);
        entries.push_back(entry);
        true
    }

    /// Removes and returns the two oldest entries once at least two are waiting.
    pub fn dequeue_pair_if_ready(&self) -> Option<(QueueEntry, QueueEntry)> {
        let mut entries = lock(&self.entries);
        if entries.len() < 2 {
            return None;
        }
        let first = entries.pop_front()?;
        let second = entries.pop_front()?;
        Some((first, second))
    }

    pub fn remove_by_session(&self, session_id: &str) -> bool {
        let mut entries = lock(&self.entries);
        let before = entries.len();
        entries.retain(|e| e.session_id != session_id);
        entries.len() != before
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
