//! Applying and reverting a single move (Component Design §4.3). The two
//! halves are exact inverses: `unmake_move` restores everything
//! `make_move` changed, including the incremental Zobrist key.

use crate::constants::CASTLE_UPDATE;
use crate::zobrist;

use super::types::{sq, Move, Piece, Side, Square};
use super::{Board, Undo};

fn clear_piece(board: &mut Board, at: Square) {
    let piece = board.piece_at(at);
    debug_assert_ne!(piece, Piece::Empty);
    board.pos_key ^= zobrist::piece_key(piece, at.index());
    board.pieces[at.index()] = Piece::Empty;
    board.piece_count[piece.index()] -= 1;
}

fn add_piece(board: &mut Board, at: Square, piece: Piece) {
    board.pos_key ^= zobrist::piece_key(piece, at.index());
    board.pieces[at.index()] = piece;
    board.piece_count[piece.index()] += 1;
    if piece.is_king() {
        board.king_sq[piece.colour().expect("king always has a colour").index()] = at;
    }
}

fn move_piece(board: &mut Board, from: Square, to: Square) {
    let piece = board.piece_at(from);
    debug_assert_ne!(piece, Piece::Empty);
    board.pos_key ^= zobrist::piece_key(piece, from.index());
    board.pieces[from.index()] = Piece::Empty;
    board.pos_key ^= zobrist::piece_key(piece, to.index());
    board.pieces[to.index()] = piece;
    if piece.is_king() {
        board.king_sq[piece.colour().expect("king always has a colour").index()] = to;
    }
}

fn clear_en_passant(board: &mut Board) {
    if let Some(ep) = board.en_passant.take() {
        board.pos_key ^= zobrist::piece_key(Piece::Empty, ep.index());
    }
}

fn set_en_passant(board: &mut Board, ep: Square) {
    board.en_passant = Some(ep);
    board.pos_key ^= zobrist::piece_key(Piece::Empty, ep.index());
}

/// Applies `m` to `board`. Returns `false` (and reverts the move) if it
/// leaves the mover's own king attacked, matching "legality is checked
/// by attempting the move and inspecting the resulting position"
/// (Component Design §4.3).
pub(crate) fn make_move(board: &mut Board, m: Move) -> bool {
    let side = board.side;
    let from = m.from_sq();
    let to = m.to_sq();

    board.history[board.hist_ply] = Undo {
        mv: m,
        castle_rights: board.castle_rights,
        en_passant: board.en_passant,
        fifty_move: board.fifty_move,
        pos_key: board.pos_key,
    };
    board.hist_ply += 1;

    if m.is_en_passant() {
        let captured_sq = match side {
            Side::White => to.offset(-10),
            Side::Black => to.offset(10),
            Side::Both => unreachable!("make_move always has a concrete side to move"),
        };
        clear_piece(board, captured_sq);
    } else if m.captured() != Piece::Empty {
        clear_piece(board, to);
    }

    clear_en_passant(board);
    board.pos_key ^= zobrist::castle_key(board.castle_rights.0);
    board.castle_rights.restrict(CASTLE_UPDATE[from.index()] & CASTLE_UPDATE[to.index()]);
    board.pos_key ^= zobrist::castle_key(board.castle_rights.0);

    board.fifty_move += 1;
    if m.captured() != Piece::Empty || board.piece_at(from).is_pawn() {
        board.fifty_move = 0;
    }

    if m.is_pawn_start() {
        let ep = match side {
            Side::White => from.offset(10),
            Side::Black => from.offset(-10),
            Side::Both => unreachable!("make_move always has a concrete side to move"),
        };
        set_en_passant(board, ep);
    }

    move_piece(board, from, to);

    if m.promoted() != Piece::Empty {
        clear_piece(board, to);
        add_piece(board, to, m.promoted());
    }

    if m.is_castle() {
        match to {
            s if s == sq::G1 => move_piece(board, sq::H1, sq::F1),
            s if s == sq::C1 => move_piece(board, sq::A1, sq::D1),
            s if s == sq::G8 => move_piece(board, sq::H8, sq::F8),
            s if s == sq::C8 => move_piece(board, sq::A8, sq::D8),
            _ => unreachable!("castle move always lands the king on g1/c1/g8/c8"),
        }
    }

    board.side = side.opponent();
    board.pos_key ^= zobrist::side_key();

    let king_sq = board.king_sq[side.index()];
    if board.is_attacked(king_sq, board.side) {
        unmake_move(board);
        return false;
    }
    true
}

/// Strict inverse of the most recent successful `make_move`.
pub(crate) fn unmake_move(board: &mut Board) {
    board.hist_ply -= 1;
    let undo = board.history[board.hist_ply];
    let m = undo.mv;
    let side_that_moved = board.side.opponent();

    board.side = side_that_moved;

    let from = m.from_sq();
    let to = m.to_sq();

    if m.is_castle() {
        match to {
            s if s == sq::G1 => move_piece(board, sq::F1, sq::H1),
            s if s == sq::C1 => move_piece(board, sq::D1, sq::A1),
            s if s == sq::G8 => move_piece(board, sq::F8, sq::H8),
            s if s == sq::C8 => move_piece(board, sq::D8, sq::A8),
            _ => unreachable!("castle move always lands the king on g1/c1/g8/c8"),
        }
    }

    if m.promoted() != Piece::Empty {
        clear_piece(board, to);
        add_piece(board, from, Piece::of_colour(super::types::PieceKind::Pawn, side_that_moved));
    } else {
        move_piece(board, to, from);
    }

    if m.is_en_passant() {
        let captured_sq = match side_that_moved {
            Side::White => to.offset(-10),
            Side::Black => to.offset(10),
            Side::Both => unreachable!("unmake_move always has a concrete mover"),
        };
        add_piece(board, captured_sq, m.captured());
    } else if m.captured() != Piece::Empty {
        add_piece(board, to, m.captured());
    }

    board.castle_rights = undo.castle_rights;
    board.en_passant = undo.en_passant;
    board.fifty_move = undo.fifty_move;
    board.pos_key = undo.pos_key;
}
