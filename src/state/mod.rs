use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod queue;
pub mod room_store;

pub use queue::{MatchQueue, QueueEntry};
pub use room_store::{RoomHandle, RoomStore};

/// Locks a mutex, recovering the data if a previous holder panicked.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
