use thiserror::Error;

/// Rejections reported back to the session that caused them.
/// None of these change room or queue state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Game not found.")]
    RoomNotFound,

    #[error("Not your turn.")]
    NotYourTurn,

    #[error("Invalid chess move.")]
    IllegalMove,

    #[error("Failed to create game")]
    PairingFailed,

    #[error("Room {0} already exists")]
    RoomExists(String),
}

/// Failures talking to the records service.
#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("records service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("records service returned status {0}")]
    Status(u16),

    #[error("invalid records service response: {0}")]
    InvalidResponse(String),
}
