//! Square-attacked-by-side detection (Component Design §4.1), used both
//! to filter legal moves (is my own king attacked after the move?) and
//! by move generation (castling's "king does not pass through check").

use crate::constants::{square_on_board, BISHOP_DIRS, KING_DIRS, KNIGHT_DIRS, ROOK_DIRS};

use super::types::{Piece, Side, Square};
use super::Board;

/// `true` iff any piece belonging to `by_side` attacks `sq`, grounded on
/// the per-piece-type scans in the original engine's attack detection.
pub(crate) fn is_attacked(board: &Board, sq: Square, by_side: Side) -> bool {
    if pawn_attacks(board, sq, by_side) {
        return true;
    }
    if knight_attacks(board, sq, by_side) {
        return true;
    }
    if king_attacks(board, sq, by_side) {
        return true;
    }
    if sliding_attacks(board, sq, by_side, &ROOK_DIRS, Piece::is_rook_or_queen) {
        return true;
    }
    if sliding_attacks(board, sq, by_side, &BISHOP_DIRS, Piece::is_bishop_or_queen) {
        return true;
    }
    false
}

fn pawn_attacks(board: &Board, sq: Square, by_side: Side) -> bool {
    let (back_left, back_right, pawn) = match by_side {
        Side::White => (-11, -9, Piece::WhitePawn),
        Side::Black => (11, 9, Piece::BlackPawn),
        Side::Both => unreachable!("attack queries are always single-sided"),
    };
    for delta in [back_left, back_right] {
        let from = sq.offset(delta);
        if from.on_board() && board.piece_at(from) == pawn {
            return true;
        }
    }
    false
}

fn knight_attacks(board: &Board, sq: Square, by_side: Side) -> bool {
    let knight = match by_side {
        Side::White => Piece::WhiteKnight,
        Side::Black => Piece::BlackKnight,
        Side::Both => unreachable!("attack queries are always single-sided"),
    };
    KNIGHT_DIRS.iter().any(|&delta| {
        let from = sq.offset(delta);
        from.on_board() && board.piece_at(from) == knight
    })
}

fn king_attacks(board: &Board, sq: Square, by_side: Side) -> bool {
    let king = match by_side {
        Side::White => Piece::WhiteKing,
        Side::Black => Piece::BlackKing,
        Side::Both => unreachable!("attack queries are always single-sided"),
    };
    KING_DIRS.iter().any(|&delta| {
        let from = sq.offset(delta);
        from.on_board() && board.piece_at(from) == king
    })
}

fn sliding_attacks(
    board: &Board,
    sq: Square,
    by_side: Side,
    dirs: &[i32],
    matches_kind: fn(Piece) -> bool,
) -> bool {
    for &delta in dirs {
        let mut cursor = sq.offset(delta);
        while square_on_board(cursor) {
            let piece = board.piece_at(cursor);
            if piece != Piece::Empty {
                if piece.colour() == Some(by_side) && matches_kind(piece) {
                    return true;
                }
                break;
            }
            cursor = cursor.offset(delta);
        }
    }
    false
}
