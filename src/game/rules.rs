//! Move legality, check and checkmate detection.
//!
//! Every function here is pure: it reads a board snapshot and never mutates
//! it. Castling, en passant and promotion are not part of the rule set.

use super::board::{Board, Color, Piece, PieceKind, Position};

/// Full legality of moving the piece on `from` to `to` for `side`, including king safety.
pub fn is_legal_move(board: &Board, from: Position, to: Position, side: Color) -> bool {
    let piece = match board.piece_at(from) {
        Some(piece) => piece,
        None => return false,
    };
    if piece.color != side {
        return false;
    }
    if board.piece_at(to).is_some_and(|target| target.color == side) {
        return false;
    }
    if !is_valid_geometry(board, piece, from, to) {
        return false;
    }

    let mut scratch = board.clone();
    scratch.move_piece(from, to);
    !is_in_check(&scratch, side)
}

/// Piece movement pattern only; ignores whose turn it is and king safety.
pub fn is_valid_geometry(board: &Board, piece: Piece, from: Position, to: Position) -> bool {
    let dx = to.col() as i8 - from.col() as i8;
    let dy = to.row() as i8 - from.row() as i8;

    match piece.kind {
        PieceKind::Pawn => is_valid_pawn_move(board, piece.color, from, to, dx, dy),
        PieceKind::Rook => is_valid_rook_move(board, from, to, dx, dy),
        PieceKind::Knight => is_valid_knight_move(dx, dy),
        PieceKind::Bishop => is_valid_bishop_move(board, from, to, dx, dy),
        PieceKind::Queen => {
            is_valid_rook_move(board, from, to, dx, dy)
                || is_valid_bishop_move(board, from, to, dx, dy)
        }
        PieceKind::King => is_valid_king_move(dx, dy),
    }
}

fn is_valid_pawn_move(
    board: &Board,
    color: Color,
    from: Position,
    to: Position,
    dx: i8,
    dy: i8,
) -> bool {
    let direction = color.forward();

    if dx == 0 && dy == direction {
        return board.is_empty_at(to);
    }

    if dx == 0 && dy == 2 * direction && from.row() == color.pawn_row() {
        let intermediate_clear = from
            .offset(direction, 0)
            .is_some_and(|square| board.is_empty_at(square));
        return intermediate_clear && board.is_empty_at(to);
    }

    if dx.abs() == 1 && dy == direction {
        return board
            .piece_at(to)
            .is_some_and(|target| target.color != color);
    }

    false
}

fn is_valid_rook_move(board: &Board, from: Position, to: Position, dx: i8, dy: i8) -> bool {
    (dx == 0) != (dy == 0) && is_path_clear(board, from, to)
}

fn is_valid_bishop_move(board: &Board, from: Position, to: Position, dx: i8, dy: i8) -> bool {
    dx != 0 && dx.abs() == dy.abs() && is_path_clear(board, from, to)
}

fn is_valid_knight_move(dx: i8, dy: i8) -> bool {
    matches!((dx.abs(), dy.abs()), (2, 1) | (1, 2))
}

fn is_valid_king_move(dx: i8, dy: i8) -> bool {
    (dx, dy) != (0, 0) && dx.abs() <= 1 && dy.abs() <= 1
}

/// True if every square strictly between `from` and `to` is empty.
/// Only meaningful for straight or diagonal lines.
fn is_path_clear(board: &Board, from: Position, to: Position) -> bool {
    let step_row = (to.row() as i8 - from.row() as i8).signum();
    let step_col = (to.col() as i8 - from.col() as i8).signum();

    let mut current = from.offset(step_row, step_col);
    while let Some(square) = current {
        if square == to {
            return true;
        }
        if !board.is_empty_at(square) {
            return false;
        }
        current = square.offset(step_row, step_col);
    }
    // walked off the board without reaching `to`; not a line
    false
}

/// True if any opposing piece's movement pattern reaches `color`'s king.
/// A board without a king of that color is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let king = match board.find_king(color) {
        Some(king) => king,
        None => return false,
    };

    board
        .pieces()
        .filter(|(_, piece)| piece.color != color)
        .any(|(from, piece)| is_valid_geometry(board, piece, from, king))
}

/// In check with no legal move for any of `color`'s pieces.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    if !is_in_check(board, color) {
        return false;
    }

    let has_escape = board
        .pieces()
        .filter(|(_, piece)| piece.color == color)
        .any(|(from, _)| Position::all().any(|to| is_legal_move(board, from, to, color)));
    !has_escape
}

/// Every square the piece on `from` may legally move to. Empty if `from` is empty.
pub fn legal_destinations(board: &Board, from: Position) -> Vec<Position> {
    match board.piece_at(from) {
        Some(piece) => Position::all()
            .filter(|to| is_legal_move(board, from, *to, piece.color))
            .collect(),
        None => Vec::new(),
    }
}
