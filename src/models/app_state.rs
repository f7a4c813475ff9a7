use std::sync::Arc;

use crate::dispatcher::Dispatcher;
use crate::records::RecordsService;
use crate::state::{MatchQueue, RoomStore};
use crate::websocket::sessions::SessionRegistry;

/// Application state shared between connections
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(records: Arc<dyn RecordsService>) -> Self {
        let sessions = Arc::new(SessionRegistry::new());
        let dispatcher = Dispatcher::new(
            Arc::new(RoomStore::new()),
            Arc::new(MatchQueue::new()),
            records,
            sessions.clone(),
        );
        Self {
            dispatcher,
            sessions,
        }
    }
}
