use serde::{Deserialize, Serialize};

use crate::game::{Board, Color, Position};
use crate::models::messages::UserId;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Active,
    Finished,
}

/// One side of a match: the owning user and the transport session currently bound to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub user_id: UserId,
    pub session_id: String,
}

impl Seat {
    pub fn new(user_id: UserId, session_id: impl Into<String>) -> Self {
        Self {
            user_id,
            session_id: session_id.into(),
        }
    }
}

/// State of a single match
#[derive(Debug, Clone)]
pub struct Room {
    pub id: String,
    pub white: Seat,
    pub black: Seat,
    pub turn: Color,
    pub board: Board,
    pub status: RoomStatus,
    /// Sessions that receive room broadcasts.
    pub members: Vec<String>,
}

impl Room {
    pub fn new(id: impl Into<String>, white: Seat, black: Seat) -> Self {
        let members = vec![white.session_id.clone(), black.session_id.clone()];
        Self {
            id: id.into(),
            white,
            black,
            turn: Color::White,
            board: Board::starting(),
            status: RoomStatus::Active,
            members,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == RoomStatus::Active
    }

    pub fn seat(&self, color: Color) -> &Seat {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn seat_mut(&mut self, color: Color) -> &mut Seat {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// Color currently bound to `session_id`, if any.
    pub fn color_of_session(&self, session_id: &str) -> Option<Color> {
        if self.white.session_id == session_id {
            Some(Color::White)
        } else if self.black.session_id == session_id {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Moves a piece without touching the turn. Legality is the caller's job.
    pub fn apply_move(&mut self, from: Position, to: Position) {
        self.board.move_piece(from, to);
    }

    /// Points the seat owned by `user_id` at `session_id`. Returns the color that was
    /// rebound, or `None` if the user owns no seat or the session was already bound.
    pub fn rebind_session(&mut self, user_id: UserId, session_id: &str) -> Option<Color> {
        let color = if self.white.user_id == user_id {
            Color::White
        } else if self.black.user_id == user_id {
            Color::Black
        } else {
            return None;
        };

        let seat = self.seat_mut(color);
        if seat.session_id == session_id {
            return None;
        }
        let previous = std::mem::replace(&mut seat.session_id, session_id.to_string());
        self.members.retain(|member| *member != previous);
        self.add_member(session_id);
        Some(color)
    }

    pub fn add_member(&mut self, session_id: &str) {
        if !self.members.iter().any(|member| member == session_id) {
            self.members.push(session_id.to_string());
        }
    }

    /// Returns false if the session was not a member.
    pub fn remove_member(&mut self, session_id: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member != session_id);
        self.members.len() != before
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            room_id: self.id.clone(),
            white_player_id: self.white.user_id,
            black_player_id: self.black.user_id,
            white_session_id: self.white.session_id.clone(),
            black_session_id: self.black.session_id.clone(),
            turn: self.turn,
            board_state: self.board.clone(),
            status: self.status,
        }
    }
}

/// Full room state sent to a joining client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub room_id: String,
    pub white_player_id: UserId,
    pub black_player_id: UserId,
    pub white_session_id: String,
    pub black_session_id: String,
    pub turn: Color,
    pub board_state: Board,
    pub status: RoomStatus,
}
