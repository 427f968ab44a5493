//! Game-result adjudication (Component Design §4.4): checkmate,
//! stalemate, the fifty-move rule, threefold repetition, and
//! insufficient material.

use super::types::{Piece, Side};
use super::Board;

/// The outcome of a position, judged from `player`'s point of view. MCTS
/// rollouts turn this directly into a backpropagated reward via
/// [`GameResult::reward`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameResult {
    InProgress,
    Win,
    Loss,
    Draw,
}

impl GameResult {
    /// `None` while the game is undecided; `Some(1.0 | 0.5 | 0.0)` once
    /// it isn't, for use as a UCT backpropagation reward.
    #[must_use]
    pub fn reward(self) -> Option<f64> {
        match self {
            GameResult::InProgress => None,
            GameResult::Win => Some(1.0),
            GameResult::Draw => Some(0.5),
            GameResult::Loss => Some(0.0),
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != GameResult::InProgress
    }
}

pub(crate) fn result(board: &Board, player: Side) -> GameResult {
    if board.fifty_move() > 100 {
        return GameResult::Draw;
    }
    if threefold_count(board) >= 3 {
        return GameResult::Draw;
    }
    if is_material_draw(board) {
        return GameResult::Draw;
    }

    let side_to_move = board.side();
    if !board.legal_moves().is_empty() {
        return GameResult::InProgress;
    }

    let king = board.king_square(side_to_move);
    if board.is_attacked(king, side_to_move.opponent()) {
        if side_to_move == player {
            GameResult::Loss
        } else {
            GameResult::Win
        }
    } else {
        GameResult::Draw
    }
}

/// Number of times the current position key has occurred in this game,
/// counting the present occurrence (so a genuine threefold repetition
/// reports 3).
pub(crate) fn threefold_count(board: &Board) -> usize {
    let current = board.pos_key();
    let mut count = 1;
    for ply in 0..board.hist_ply() {
        if board.history[ply].pos_key == current {
            count += 1;
        }
    }
    count
}

/// `true` when neither side has enough material to force checkmate: no
/// pawns, no rooks, no queens, and each side individually has at most one
/// bishop and at most one knight, not both on the same side (Component
/// Design §4.4 step 3: checked per side, not as a combined total).
pub(crate) fn is_material_draw(board: &Board) -> bool {
    let pawns = board.piece_count(Piece::WhitePawn) + board.piece_count(Piece::BlackPawn);
    if pawns > 0 {
        return false;
    }
    let heavy = board.piece_count(Piece::WhiteRook)
        + board.piece_count(Piece::WhiteQueen)
        + board.piece_count(Piece::BlackRook)
        + board.piece_count(Piece::BlackQueen);
    if heavy > 0 {
        return false;
    }

    let white_bishops = board.piece_count(Piece::WhiteBishop);
    let white_knights = board.piece_count(Piece::WhiteKnight);
    let black_bishops = board.piece_count(Piece::BlackBishop);
    let black_knights = board.piece_count(Piece::BlackKnight);

    let side_ok = |bishops: u8, knights: u8| bishops <= 1 && knights <= 1 && !(bishops >= 1 && knights >= 1);

    side_ok(white_bishops, white_knights) && side_ok(black_bishops, black_knights)
}
