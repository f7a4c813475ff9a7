//! Entry point for every client event.
//!
//! The dispatcher sequences queue admission, room lookup, rule checks, board
//! mutation and broadcasts. Room state is only touched under that room's
//! mutex, and no lock is held while waiting on the records service.

use log::{debug, info, warn};
use std::sync::Arc;

use crate::error::GameError;
use crate::game::{rules, Color, Position};
use crate::models::messages::{
    GameOverReason, MoveRequest, PlayerInfo, ServerMessage, UserId,
};
use crate::models::room::{Room, RoomSnapshot, RoomStatus, Seat};
use crate::records::RecordsService;
use crate::state::{lock, MatchQueue, QueueEntry, RoomStore};

/// Delivers server events to connected sessions. Sending must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, session_id: &str, message: &ServerMessage);
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The game goes on with `next` to move.
    Continue { next: Color, in_check: bool },
    Checkmate { winner: Color },
}

#[derive(Clone)]
pub struct Dispatcher {
    rooms: Arc<RoomStore>,
    queue: Arc<MatchQueue>,
    records: Arc<dyn RecordsService>,
    notifier: Arc<dyn Notifier>,
}

impl Dispatcher {
    pub fn new(
        rooms: Arc<RoomStore>,
        queue: Arc<MatchQueue>,
        records: Arc<dyn RecordsService>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            rooms,
            queue,
            records,
            notifier,
        }
    }

    pub fn rooms(&self) -> &RoomStore {
        &self.rooms
    }

    pub fn queue(&self) -> &MatchQueue {
        &self.queue
    }

    fn broadcast(&self, room: &Room, message: &ServerMessage) {
        debug!("Broadcasting to room {}: {:?}", room.id, message);
        for member in &room.members {
            self.notifier.notify(member, message);
        }
    }

    /// Queues the player and starts a match as soon as two are waiting.
    pub async fn search_for_game(&self, session_id: &str, player: PlayerInfo) {
        let entry = QueueEntry {
            session_id: session_id.to_string(),
            player,
        };
        if !self.queue.enqueue(entry) {
            info!("Session {} is already waiting for a game", session_id);
            return;
        }

        match self.queue.dequeue_pair_if_ready() {
            Some((first, second)) => self.start_match(first, second).await,
            None => info!("Session {} waiting for an opponent", session_id),
        }
    }

    async fn start_match(&self, first: QueueEntry, second: QueueEntry) {
        info!(
            "Pairing user {} with user {}",
            first.player.id, second.player.id
        );

        let record = match self
            .records
            .create_game(&first.player, &second.player)
            .await
        {
            Ok(record) => record,
            Err(e) => {
                warn!("Error creating game: {}", e);
                self.pairing_failed(&first, &second);
                return;
            }
        };

        let (white, black) = if record.white_player_id == first.player.id
            && record.black_player_id == second.player.id
        {
            (&first, &second)
        } else if record.white_player_id == second.player.id
            && record.black_player_id == first.player.id
        {
            (&second, &first)
        } else {
            warn!(
                "Game {} seats users {} and {}, expected {} and {}",
                record.id,
                record.white_player_id,
                record.black_player_id,
                first.player.id,
                second.player.id
            );
            self.pairing_failed(&first, &second);
            return;
        };

        let handle = match self.rooms.create_room(
            &record.id,
            Seat::new(white.player.id, white.session_id.clone()),
            Seat::new(black.player.id, black.session_id.clone()),
        ) {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Could not register room {}: {}", record.id, e);
                self.pairing_failed(&first, &second);
                return;
            }
        };

        let room = lock(&handle);
        for (me, opponent, is_white) in [(white, black, true), (black, white, false)] {
            self.notifier.notify(
                &me.session_id,
                &ServerMessage::GameFound {
                    opponent: opponent.player.clone(),
                    game_info: record.clone(),
                    is_white_player: is_white,
                    current_turn: Color::White,
                },
            );
        }
        self.broadcast(&room, &ServerMessage::TurnUpdate { turn: room.turn });
    }

    fn pairing_failed(&self, first: &QueueEntry, second: &QueueEntry) {
        let message = ServerMessage::GameError {
            message: GameError::PairingFailed.to_string(),
        };
        self.notifier.notify(&first.session_id, &message);
        self.notifier.notify(&second.session_id, &message);
    }

    /// Binds `session_id` to the room, rebinding the seat if `user_id` owns one.
    pub fn join_room(
        &self,
        session_id: &str,
        room_id: &str,
        user_id: UserId,
    ) -> Result<RoomSnapshot, GameError> {
        let joined = self.rooms.get_room(room_id).and_then(|handle| {
            let mut room = lock(&handle);
            if !room.is_active() {
                return Err(GameError::RoomNotFound);
            }

            if let Some(color) = room.rebind_session(user_id, session_id) {
                info!(
                    "Rebound {} seat of room {} to session {}",
                    color, room_id, session_id
                );
            }
            room.add_member(session_id);

            let in_check = rules::is_in_check(&room.board, room.turn);
            self.broadcast(
                &room,
                &ServerMessage::Check {
                    player: room.turn,
                    in_check,
                },
            );
            Ok(room.snapshot())
        });

        match &joined {
            Ok(snapshot) => self.notifier.notify(
                session_id,
                &ServerMessage::RoomJoined {
                    room_id: room_id.to_string(),
                    success: true,
                    game_data: Some(snapshot.clone()),
                    message: None,
                },
            ),
            Err(_) => {
                info!("Session {} tried to join missing room {}", session_id, room_id);
                self.notifier.notify(
                    session_id,
                    &ServerMessage::RoomJoined {
                        room_id: room_id.to_string(),
                        success: false,
                        game_data: None,
                        message: Some("Room not found".to_string()),
                    },
                );
            }
        }
        joined
    }

    /// Validates and applies a move. Rejections are sent back to the sender as `invalidMove`.
    pub fn make_move(
        &self,
        session_id: &str,
        room_id: &str,
        mv: MoveRequest,
    ) -> Result<MoveOutcome, GameError> {
        let result = self.try_move(session_id, room_id, mv);
        if let Err(e) = &result {
            info!(
                "Rejected move {} -> {} in room {} from {}: {}",
                mv.from, mv.to, room_id, session_id, e
            );
            self.notifier.notify(
                session_id,
                &ServerMessage::InvalidMove {
                    reason: e.to_string(),
                },
            );
        }
        result
    }

    fn try_move(
        &self,
        session_id: &str,
        room_id: &str,
        mv: MoveRequest,
    ) -> Result<MoveOutcome, GameError> {
        let handle = self.rooms.get_room(room_id)?;
        let mut room = lock(&handle);
        if !room.is_active() {
            return Err(GameError::RoomNotFound);
        }

        let mover = room.turn;
        if room.seat(mover).session_id != session_id {
            return Err(GameError::NotYourTurn);
        }
        if !rules::is_legal_move(&room.board, mv.from, mv.to, mover) {
            return Err(GameError::IllegalMove);
        }

        room.apply_move(mv.from, mv.to);
        self.broadcast(
            &room,
            &ServerMessage::OpponentMove {
                from: mv.from,
                to: mv.to,
            },
        );
        self.broadcast(
            &room,
            &ServerMessage::BoardUpdate {
                board_state: room.board.clone(),
            },
        );

        let next = mover.opposite();
        let in_check = rules::is_in_check(&room.board, next);

        if in_check && rules::is_checkmate(&room.board, next) {
            room.status = RoomStatus::Finished;
            self.broadcast(
                &room,
                &ServerMessage::GameOver {
                    winner: mover,
                    reason: GameOverReason::Checkmate,
                },
            );
            let winner_id = room.seat(mover).user_id;
            drop(room);

            info!("Room {} finished: {} wins by checkmate", room_id, mover);
            self.rooms.remove_room(room_id);
            self.report_result(room_id, winner_id);
            return Ok(MoveOutcome::Checkmate { winner: mover });
        }

        self.broadcast(
            &room,
            &ServerMessage::Check {
                player: next,
                in_check,
            },
        );
        room.turn = next;
        self.broadcast(&room, &ServerMessage::TurnUpdate { turn: next });
        Ok(MoveOutcome::Continue { next, in_check })
    }

    /// Sends the result to the records service on a separate task. Failures are only logged.
    fn report_result(&self, room_id: &str, winner_id: UserId) {
        let records = Arc::clone(&self.records);
        let room_id = room_id.to_string();
        actix_rt::spawn(async move {
            match records.update_game_result(&room_id, winner_id).await {
                Ok(()) => info!("Recorded winner {} for room {}", winner_id, room_id),
                Err(e) => warn!("Failed to record result for room {}: {}", room_id, e),
            }
        });
    }

    /// Legal destinations for the piece on `from`, sent back as `availableMoves`.
    pub fn get_moves(
        &self,
        session_id: &str,
        room_id: &str,
        from: Position,
    ) -> Result<Vec<Position>, GameError> {
        let moves = self.rooms.get_room(room_id).and_then(|handle| {
            let room = lock(&handle);
            if !room.is_active() {
                return Err(GameError::RoomNotFound);
            }
            Ok(rules::legal_destinations(&room.board, from))
        });

        match &moves {
            Ok(moves) => self.notifier.notify(
                session_id,
                &ServerMessage::AvailableMoves {
                    from,
                    moves: moves.clone(),
                },
            ),
            Err(e) => self.notifier.notify(
                session_id,
                &ServerMessage::InvalidMove {
                    reason: e.to_string(),
                },
            ),
        }
        moves
    }

    /// Cleans up after a closed connection: leaves the queue and every room the
    /// session is a member of. Rooms stay open so the player can rejoin.
    pub fn disconnect(&self, session_id: &str) {
        if self.queue.remove_by_session(session_id) {
            info!("Removed session {} from the queue", session_id);
        }
        for handle in self.rooms.handles() {
            let mut room = lock(&handle);
            self.leave(&mut room, session_id);
        }
    }

    /// Stops room broadcasts to `session_id`. If it held a seat, the other members are told.
    pub fn leave_room(&self, session_id: &str, room_id: &str) {
        if let Ok(handle) = self.rooms.get_room(room_id) {
            let mut room = lock(&handle);
            self.leave(&mut room, session_id);
        }
    }

    fn leave(&self, room: &mut Room, session_id: &str) {
        if !room.remove_member(session_id) {
            return;
        }
        if let Some(color) = room.color_of_session(session_id) {
            info!("{} player left room {}", color, room.id);
            self.broadcast(
                room,
                &ServerMessage::PlayerDisconnected {
                    message: "Your opponent has disconnected".to_string(),
                },
            );
        }
    }
}
