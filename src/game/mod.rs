pub mod board;
pub mod rules;

pub use board::{Board, Color, Piece, PieceKind, Position};
