//! Shared test doubles for dispatcher integration tests.
#![allow(dead_code)]

use futures::future::BoxFuture;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chess_match_server::game::Position;
use chess_match_server::models::{GameRecord, MoveRequest, PlayerInfo, ServerMessage, UserId};
use chess_match_server::records::RecordsService;
use chess_match_server::state::{MatchQueue, RoomStore};
use chess_match_server::{Dispatcher, Notifier, RecordsError};

/// Records every event per session instead of sending it anywhere.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, ServerMessage)>>,
}

impl RecordingNotifier {
    pub fn for_session(&self, session_id: &str) -> Vec<ServerMessage> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == session_id)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, session_id: &str, message: &ServerMessage) {
        self.sent
            .lock()
            .unwrap()
            .push((session_id.to_string(), message.clone()));
    }
}

/// In-memory records service. Player one is white unless `swap_colors` is set.
#[derive(Default)]
pub struct MockRecords {
    pub fail_create: AtomicBool,
    pub swap_colors: AtomicBool,
    pub bogus_seats: AtomicBool,
    pub fail_update: AtomicBool,
    created: AtomicUsize,
    pub results: Mutex<Vec<(String, UserId)>>,
}

impl RecordsService for MockRecords {
    fn create_game<'a>(
        &'a self,
        player_one: &'a PlayerInfo,
        player_two: &'a PlayerInfo,
    ) -> BoxFuture<'a, Result<GameRecord, RecordsError>> {
        Box::pin(async move {
            if self.fail_create.load(Ordering::SeqCst) {
                return Err(RecordsError::Status(500));
            }
            let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
            let (white, black) = if self.swap_colors.load(Ordering::SeqCst) {
                (player_two.id, player_one.id)
            } else {
                (player_one.id, player_two.id)
            };
            let black = if self.bogus_seats.load(Ordering::SeqCst) {
                999
            } else {
                black
            };
            Ok(GameRecord {
                id: format!("room-{n}"),
                white_player_id: white,
                black_player_id: black,
            })
        })
    }

    fn update_game_result<'a>(
        &'a self,
        room_id: &'a str,
        winner_id: UserId,
    ) -> BoxFuture<'a, Result<(), RecordsError>> {
        Box::pin(async move {
            if self.fail_update.load(Ordering::SeqCst) {
                return Err(RecordsError::Status(503));
            }
            self.results
                .lock()
                .unwrap()
                .push((room_id.to_string(), winner_id));
            Ok(())
        })
    }
}

pub struct Harness {
    pub dispatcher: Dispatcher,
    pub notifier: Arc<RecordingNotifier>,
    pub records: Arc<MockRecords>,
}

pub fn harness() -> Harness {
    let notifier = Arc::new(RecordingNotifier::default());
    let records = Arc::new(MockRecords::default());
    let dispatcher = Dispatcher::new(
        Arc::new(RoomStore::new()),
        Arc::new(MatchQueue::new()),
        records.clone(),
        notifier.clone(),
    );
    Harness {
        dispatcher,
        notifier,
        records,
    }
}

pub fn player(id: UserId) -> PlayerInfo {
    PlayerInfo {
        id,
        username: format!("player{id}"),
        email: format!("player{id}@example.com"),
    }
}

pub fn pos(row: u8, col: u8) -> Position {
    Position::new(row, col).unwrap()
}

pub fn mv(from: (u8, u8), to: (u8, u8)) -> MoveRequest {
    MoveRequest {
        from: pos(from.0, from.1),
        to: pos(to.0, to.1),
    }
}
