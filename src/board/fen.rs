//! FEN parsing and emission (External Interfaces: FEN parser / emitter).

use std::fmt;

use super::types::{CastleRights, Piece, Side, Square};
use super::Board;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";

/// Why a FEN string was rejected. User input only; the engine itself
/// never produces a FEN it cannot parse back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FenError {
    WrongFieldCount { found: usize },
    BadPlacement { detail: String },
    BadSideToMove(String),
    BadCastling(String),
    BadEnPassant(String),
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::WrongFieldCount { found } => {
                write!(f, "FEN needs at least 4 space-separated fields, found {found}")
            }
            FenError::BadPlacement { detail } => write!(f, "bad piece placement: {detail}"),
            FenError::BadSideToMove(s) => write!(f, "bad side to move: {s:?}"),
            FenError::BadCastling(s) => write!(f, "bad castling availability: {s:?}"),
            FenError::BadEnPassant(s) => write!(f, "bad en passant target: {s:?}"),
        }
    }
}

impl std::error::Error for FenError {}

pub(crate) fn parse_fen(text: &str) -> Result<Board, FenError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(FenError::WrongFieldCount { found: fields.len() });
    }

    let mut board = Board::empty();

    let mut rank = 7i32;
    let mut file = 0i32;
    for c in fields[0].chars() {
        match c {
            '/' => {
                if file != 8 {
                    return Err(FenError::BadPlacement {
                        detail: format!("rank {} has {} files, expected 8", rank + 1, file),
                    });
                }
                rank -= 1;
                file = 0;
            }
            '1'..='8' => {
                file += c.to_digit(10).expect("matched digit") as i32;
            }
            piece_char => {
                let piece = Piece::from_char(piece_char).ok_or_else(|| FenError::BadPlacement {
                    detail: format!("unrecognised piece letter {piece_char:?}"),
                })?;
                if !(0..8).contains(&file) || !(0..8).contains(&rank) {
                    return Err(FenError::BadPlacement {
                        detail: "piece placement overruns the board".into(),
                    });
                }
                let sq = Square::from_file_rank(file as u8, rank as u8);
                board.pieces[sq.index()] = piece;
                board.piece_count[piece.index()] += 1;
                if piece.is_king() {
                    board.king_sq[piece.colour().expect("king has a colour").index()] = sq;
                }
                file += 1;
            }
        }
    }
    if rank != 0 || file != 8 {
        return Err(FenError::BadPlacement {
            detail: "placement does not cover exactly 8 ranks of 8 files".into(),
        });
    }

    board.side = match fields[1] {
        "w" => Side::White,
        "b" => Side::Black,
        other => return Err(FenError::BadSideToMove(other.to_string())),
    };

    let mut castle = CastleRights::default();
    if fields[2] != "-" {
        for c in fields[2].chars() {
            match c {
                'K' => castle.set(CastleRights::WHITE_KING),
                'Q' => castle.set(CastleRights::WHITE_QUEEN),
                'k' => castle.set(CastleRights::BLACK_KING),
                'q' => castle.set(CastleRights::BLACK_QUEEN),
                _ => return Err(FenError::BadCastling(fields[2].to_string())),
            }
        }
    }
    board.castle_rights = castle;

    if fields[3] != "-" {
        let ep = Square::parse(fields[3]).ok_or_else(|| FenError::BadEnPassant(fields[3].to_string()))?;
        board.en_passant = Some(ep);
    }

    board.pos_key = board.generate_pos_key();
    Ok(board)
}

pub(crate) fn generate_fen(board: &Board) -> String {
    let mut placement = String::new();
    for rank in (0..8u8).rev() {
        let mut empty_run = 0u8;
        for file in 0..8u8 {
            let sq = Square::from_file_rank(file, rank);
            let piece = board.piece_at(sq);
            if piece == Piece::Empty {
                empty_run += 1;
            } else {
                if empty_run > 0 {
                    placement.push_str(&empty_run.to_string());
                    empty_run = 0;
                }
                placement.push(piece.to_char());
            }
        }
        if empty_run > 0 {
            placement.push_str(&empty_run.to_string());
        }
        if rank != 0 {
            placement.push('/');
        }
    }

    let side = match board.side() {
        Side::White => "w",
        Side::Black => "b",
        Side::Both => "-",
    };

    let castling = board.castle_rights().to_string();
    let ep = board.en_passant().map(|s| s.name()).unwrap_or_else(|| "-".to_string());

    format!("{placement} {side} {castling} {ep}")
}
