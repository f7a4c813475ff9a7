use actix::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{info, warn};
use uuid::Uuid;

use crate::models::{AppState, ChessWebSocketMessage, ClientMessage, ServerMessage};

/// One websocket connection. `room_id` is set once the session joins a room.
pub struct ChessWebSocket {
    pub id: String,
    pub app_state: web::Data<AppState>,
    pub room_id: Option<String>,
}

impl ChessWebSocket {
    pub fn new(app_state: web::Data<AppState>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            app_state,
            room_id: None,
        }
    }

    /// Replies to this connection only.
    pub fn reply(&self, message: &ServerMessage, ctx: &mut ws::WebsocketContext<Self>) {
        match serde_json::to_string(message) {
            Ok(text) => ctx.text(text),
            Err(e) => warn!("Error serializing message: {}", e),
        }
    }
}

impl Actor for ChessWebSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        // Register the actor with the application state
        self.app_state
            .sessions
            .register(&self.id, ctx.address().recipient());
        info!("WebSocket connection started: {}", self.id);
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        self.app_state.dispatcher.disconnect(&self.id);
        self.app_state.sessions.unregister(&self.id);
        info!("WebSocket connection closed: {}", self.id);

        Running::Stop
    }
}

impl Handler<ChessWebSocketMessage> for ChessWebSocket {
    type Result = ();

    fn handle(&mut self, msg: ChessWebSocketMessage, ctx: &mut Self::Context) {
        ctx.text(msg.0);
    }
}

// WebSocket message handler
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ChessWebSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {}
            Ok(ws::Message::Text(text)) => {
                match serde_json::from_str::<ClientMessage>(text.as_ref()) {
                    Ok(client_msg) => {
                        info!("Session {} sent {:?}", self.id, client_msg);
                        self.handle_message(client_msg);
                    }
                    Err(e) => {
                        warn!("Error parsing client message: {}", e);
                        self.reply(
                            &ServerMessage::Error {
                                message: format!("Invalid message format: {}", e),
                            },
                            ctx,
                        );
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                warn!("Binary messages are not supported");
                self.reply(
                    &ServerMessage::Error {
                        message: "Binary messages are not supported".to_string(),
                    },
                    ctx,
                );
            }
            Ok(ws::Message::Close(reason)) => {
                info!("Connection closed: {:?}", reason);
                ctx.close(reason);
                ctx.stop();
            }
            _ => {
                ctx.stop();
            }
        }
    }
}

/// WebSocket connection handler
pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let ws = ChessWebSocket::new(app_state);
    info!("New WebSocket connection: {}", ws.id);
    ws::start(ws, &req, stream)
}
