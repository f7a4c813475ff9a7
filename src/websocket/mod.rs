pub mod game_handlers;
pub mod handler;
pub mod sessions;

pub use handler::{ws_index, ChessWebSocket};
