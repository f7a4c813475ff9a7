use actix::Recipient;
use log::{info, warn};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::dispatcher::Notifier;
use crate::models::messages::{ChessWebSocketMessage, ServerMessage};
use crate::state::lock;

/// Live websocket actors keyed by session id.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, Recipient<ChessWebSocketMessage>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, session_id: &str, recipient: Recipient<ChessWebSocketMessage>) {
        let mut sessions = lock(&self.sessions);
        sessions.insert(session_id.to_string(), recipient);
        info!("Total active sessions: {}", sessions.len());
    }

    pub fn unregister(&self, session_id: &str) {
        let mut sessions = lock(&self.sessions);
        sessions.remove(session_id);
        info!("Total active sessions: {}", sessions.len());
    }
}

impl Notifier for SessionRegistry {
    fn notify(&self, session_id: &str, message: &ServerMessage) {
        let recipient = match lock(&self.sessions).get(session_id) {
            Some(recipient) => recipient.clone(),
            None => {
                warn!("Session not found for connection ID: {}", session_id);
                return;
            }
        };

        match serde_json::to_string(message) {
            Ok(text) => recipient.do_send(ChessWebSocketMessage(text)),
            Err(e) => warn!("Error serializing message: {}", e),
        }
    }
}
