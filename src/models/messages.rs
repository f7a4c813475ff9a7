use actix::Message;
use serde::{Deserialize, Serialize};

use crate::game::{Board, Color, Position};
use crate::models::room::RoomSnapshot;

/// Durable user id issued by the account service.
pub type UserId = i64;

/// Player identity as sent with `searchForGame`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlayerInfo {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

/// Game row created by the records service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: String,
    pub white_player_id: UserId,
    pub black_player_id: UserId,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Position,
    pub to: Position,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameOverReason {
    Checkmate,
}

/// Message sent from client to server
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    SearchForGame(PlayerInfo),
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: String, user_id: UserId },
    #[serde(rename_all = "camelCase")]
    MakeMove {
        room_id: String,
        #[serde(rename = "move")]
        mv: MoveRequest,
    },
    #[serde(rename_all = "camelCase")]
    GetMoves { room_id: String, from: Position },
}

/// Message sent from server to client
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    GameFound {
        opponent: PlayerInfo,
        game_info: GameRecord,
        is_white_player: bool,
        current_turn: Color,
    },
    #[serde(rename_all = "camelCase")]
    RoomJoined {
        room_id: String,
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        game_data: Option<RoomSnapshot>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        message: Option<String>,
    },
    TurnUpdate { turn: Color },
    #[serde(rename_all = "camelCase")]
    BoardUpdate { board_state: Board },
    OpponentMove { from: Position, to: Position },
    #[serde(rename_all = "camelCase")]
    Check { player: Color, in_check: bool },
    GameOver { winner: Color, reason: GameOverReason },
    InvalidMove { reason: String },
    GameError { message: String },
    AvailableMoves { from: Position, moves: Vec<Position> },
    PlayerDisconnected { message: String },
    Error { message: String },
}

/// Serialized frame delivered to a websocket actor.
#[derive(Message)]
#[rtype(result = "()")]
pub struct ChessWebSocketMessage(pub String);
