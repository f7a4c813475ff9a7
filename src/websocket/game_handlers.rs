use log::info;

use crate::game::Position;
use crate::models::{ClientMessage, MoveRequest, PlayerInfo, UserId};
use crate::websocket::handler::ChessWebSocket;

impl ChessWebSocket {
    pub fn handle_message(&mut self, msg: ClientMessage) {
        match msg {
            ClientMessage::SearchForGame(player) => self.handle_search(player),
            ClientMessage::JoinRoom { room_id, user_id } => self.handle_join(room_id, user_id),
            ClientMessage::MakeMove { room_id, mv } => self.handle_move(&room_id, mv),
            ClientMessage::GetMoves { room_id, from } => self.handle_get_moves(&room_id, from),
        }
    }

    fn handle_search(&mut self, player: PlayerInfo) {
        info!("Session {} searching as user {}", self.id, player.id);
        // pairing waits on the records service, so it runs off the actor
        let dispatcher = self.app_state.dispatcher.clone();
        let session_id = self.id.clone();
        actix::spawn(async move {
            dispatcher.search_for_game(&session_id, player).await;
        });
    }

    fn handle_join(&mut self, room_id: String, user_id: UserId) {
        let joined = self
            .app_state
            .dispatcher
            .join_room(&self.id, &room_id, user_id);
        if joined.is_ok() {
            if let Some(previous) = self.room_id.replace(room_id.clone()) {
                if previous != room_id {
                    self.app_state.dispatcher.leave_room(&self.id, &previous);
                }
            }
        }
    }

    fn handle_move(&mut self, room_id: &str, mv: MoveRequest) {
        let _ = self.app_state.dispatcher.make_move(&self.id, room_id, mv);
    }

    fn handle_get_moves(&mut self, room_id: &str, from: Position) {
        let _ = self.app_state.dispatcher.get_moves(&self.id, room_id, from);
    }
}
