//! Pseudo-legal move generation (Component Design §4.2). Legality (the
//! mover's own king must not end up in check) is filtered afterwards by
//! attempting `make_move` and checking `is_attacked`, not here.

use crate::constants::{square_on_board, BISHOP_DIRS, KING_DIRS, KNIGHT_DIRS, ROOK_DIRS};

use super::types::{flag, sq, CastleRights, Move, MoveList, Piece, PieceKind, Side, Square};
use super::Board;

pub(crate) fn generate_all_moves(board: &Board) -> MoveList {
    let mut moves = MoveList::new();
    match board.side() {
        Side::White => generate_pawn_moves_white(board, &mut moves),
        Side::Black => generate_pawn_moves_black(board, &mut moves),
        Side::Both => return moves,
    }
    generate_knight_moves(board, &mut moves);
    generate_sliding_moves(board, &mut moves);
    generate_king_moves(board, &mut moves);
    generate_castle_moves(board, &mut moves);
    moves
}

const PROMOTION_KINDS: [PieceKind; 4] = [PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight];

fn push_pawn_move(moves: &mut MoveList, side: Side, from: Square, to: Square, captured: Piece) {
    let promotion_rank = match side {
        Side::White => 7,
        Side::Black => 0,
        Side::Both => unreachable!("side to move is never Both mid-generation"),
    };
    if to.rank() == Some(promotion_rank) {
        for &kind in &PROMOTION_KINDS {
            let promoted = Piece::of_colour(kind, side);
            moves.push(Move::new(from, to, captured, promoted, flag::NONE));
        }
    } else {
        moves.push(Move::new(from, to, captured, Piece::Empty, flag::NONE));
    }
}

fn generate_pawn_moves_white(board: &Board, moves: &mut MoveList) {
    for sq64 in 0..64u8 {
        let from = Square::from_sq64(sq64);
        if board.piece_at(from) != Piece::WhitePawn {
            continue;
        }
        let one_up = from.offset(10);
        if board.piece_at(one_up) == Piece::Empty {
            push_pawn_move(moves, Side::White, from, one_up, Piece::Empty);
            if from.rank() == Some(1) {
                let two_up = from.offset(20);
                if board.piece_at(two_up) == Piece::Empty {
                    moves.push(Move::new(from, two_up, Piece::Empty, Piece::Empty, flag::PAWN_START));
                }
            }
        }
        for delta in [9, 11] {
            let target = from.offset(delta);
            if !target.on_board() {
                continue;
            }
            let captured = board.piece_at(target);
            if captured.colour() == Some(Side::Black) {
                push_pawn_move(moves, Side::White, from, target, captured);
            } else if Some(target) == board.en_passant() {
                moves.push(Move::new(from, target, Piece::BlackPawn, Piece::Empty, flag::EN_PASS));
            }
        }
    }
}

fn generate_pawn_moves_black(board: &Board, moves: &mut MoveList) {
    for sq64 in 0..64u8 {
        let from = Square::from_sq64(sq64);
        if board.piece_at(from) != Piece::BlackPawn {
            continue;
        }
        let one_down = from.offset(-10);
        if board.piece_at(one_down) == Piece::Empty {
            push_pawn_move(moves, Side::Black, from, one_down, Piece::Empty);
            if from.rank() == Some(6) {
                let two_down = from.offset(-20);
                if board.piece_at(two_down) == Piece::Empty {
                    moves.push(Move::new(from, two_down, Piece::Empty, Piece::Empty, flag::PAWN_START));
                }
            }
        }
        for delta in [-9, -11] {
            let target = from.offset(delta);
            if !target.on_board() {
                continue;
            }
            let captured = board.piece_at(target);
            if captured.colour() == Some(Side::White) {
                push_pawn_move(moves, Side::Black, from, target, captured);
            } else if Some(target) == board.en_passant() {
                moves.push(Move::new(from, target, Piece::WhitePawn, Piece::Empty, flag::EN_PASS));
            }
        }
    }
}

fn generate_knight_moves(board: &Board, moves: &mut MoveList) {
    let knight = match board.side() {
        Side::White => Piece::WhiteKnight,
        Side::Black => Piece::BlackKnight,
        Side::Both => return,
    };
    let own_side = board.side();
    for sq64 in 0..64u8 {
        let from = Square::from_sq64(sq64);
        if board.piece_at(from) != knight {
            continue;
        }
        for &delta in &KNIGHT_DIRS {
            let to = from.offset(delta);
            if !to.on_board() {
                continue;
            }
            let occupant = board.piece_at(to);
            if occupant.colour() == Some(own_side) {
                continue;
            }
            moves.push(Move::new(from, to, occupant, Piece::Empty, flag::NONE));
        }
    }
}

fn generate_sliding_moves(board: &Board, moves: &mut MoveList) {
    let own_side = board.side();
    for sq64 in 0..64u8 {
        let from = Square::from_sq64(sq64);
        let piece = board.piece_at(from);
        if piece.colour() != Some(own_side) {
            continue;
        }
        let dirs: &[i32] = match piece {
            Piece::WhiteRook | Piece::BlackRook => &ROOK_DIRS,
            Piece::WhiteBishop | Piece::BlackBishop => &BISHOP_DIRS,
            Piece::WhiteQueen | Piece::BlackQueen => &KING_DIRS,
            _ => continue,
        };
        walk_rays(board, moves, from, dirs, own_side);
    }
}

fn walk_rays(board: &Board, moves: &mut MoveList, from: Square, dirs: &[i32], own_side: Side) {
    for &delta in dirs {
        let mut to = from.offset(delta);
        while square_on_board(to) {
            let occupant = board.piece_at(to);
            if occupant == Piece::Empty {
                moves.push(Move::new(from, to, Piece::Empty, Piece::Empty, flag::NONE));
            } else {
                if occupant.colour() != Some(own_side) {
                    moves.push(Move::new(from, to, occupant, Piece::Empty, flag::NONE));
                }
                break;
            }
            to = to.offset(delta);
        }
    }
}

fn generate_king_moves(board: &Board, moves: &mut MoveList) {
    let king = match board.side() {
        Side::White => Piece::WhiteKing,
        Side::Black => Piece::BlackKing,
        Side::Both => return,
    };
    let own_side = board.side();
    let from = board.king_square(own_side);
    debug_assert_eq!(board.piece_at(from), king);
    for &delta in &KING_DIRS {
        let to = from.offset(delta);
        if !to.on_board() {
            continue;
        }
        let occupant = board.piece_at(to);
        if occupant.colour() == Some(own_side) {
            continue;
        }
        moves.push(Move::new(from, to, occupant, Piece::Empty, flag::NONE));
    }
}

fn generate_castle_moves(board: &Board, moves: &mut MoveList) {
    let rights = board.castle_rights();
    match board.side() {
        Side::White => {
            if rights.has(CastleRights::WHITE_KING)
                && board.piece_at(sq::F1) == Piece::Empty
                && board.piece_at(sq::G1) == Piece::Empty
                && !board.is_attacked(sq::E1, Side::Black)
                && !board.is_attacked(sq::F1, Side::Black)
            {
                moves.push(Move::new(sq::E1, sq::G1, Piece::Empty, Piece::Empty, flag::CASTLE));
            }
            if rights.has(CastleRights::WHITE_QUEEN)
                && board.piece_at(sq::D1) == Piece::Empty
                && board.piece_at(sq::C1) == Piece::Empty
                && board.piece_at(sq::B1) == Piece::Empty
                && !board.is_attacked(sq::E1, Side::Black)
                && !board.is_attacked(sq::D1, Side::Black)
            {
                moves.push(Move::new(sq::E1, sq::C1, Piece::Empty, Piece::Empty, flag::CASTLE));
            }
        }
        Side::Black => {
            if rights.has(CastleRights::BLACK_KING)
                && board.piece_at(sq::F8) == Piece::Empty
                && board.piece_at(sq::G8) == Piece::Empty
                && !board.is_attacked(sq::E8, Side::White)
                && !board.is_attacked(sq::F8, Side::White)
            {
                moves.push(Move::new(sq::E8, sq::G8, Piece::Empty, Piece::Empty, flag::CASTLE));
            }
            if rights.has(CastleRights::BLACK_QUEEN)
                && board.piece_at(sq::D8) == Piece::Empty
                && board.piece_at(sq::C8) == Piece::Empty
                && board.piece_at(sq::B8) == Piece::Empty
                && !board.is_attacked(sq::E8, Side::White)
                && !board.is_attacked(sq::D8, Side::White)
            {
                moves.push(Move::new(sq::E8, sq::C8, Piece::Empty, Piece::Empty, flag::CASTLE));
            }
        }
        Side::Both => {}
    }
}
