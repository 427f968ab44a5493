//! The chess rules kernel (Component Design §4): mutable board state,
//! attack detection, move generation, make/unmake, FEN I/O, and
//! adjudication.

mod adjudication;
mod attack;
mod fen;
mod make_unmake;
mod movegen;
mod types;

#[cfg(test)]
mod tests;
#[cfg(test)]
mod proptests;

pub use adjudication::GameResult;
pub use fen::FenError;
pub use types::{flag, sq, CastleRights, Move, MoveList, Piece, PieceKind, Side, Square};

use std::fmt;

use crate::constants::BOARD_SQ_NUM;

/// Snapshot taken before a move is made, sufficient to reconstruct the
/// exact pre-move state in `unmake_move` (Data Model: Undo record).
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Undo {
    pub(crate) mv: Move,
    pub(crate) castle_rights: CastleRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) fifty_move: u32,
    pub(crate) pos_key: u64,
}

/// A complete chess position: the 10x12 mailbox, side to move, castling
/// rights, en-passant target, move counters, Zobrist key, and the
/// undo-history stack (Data Model: Board entity).
///
/// `Board` is plain-old-data: cloning it copies a `[Piece; 120]` array, a
/// handful of scalars, and a fixed-size history buffer, never a heap
/// allocation. The parallel driver relies on this to hand each worker an
/// independent value copy (§4.8, Design Notes).
#[derive(Clone)]
pub struct Board {
    pieces: [Piece; BOARD_SQ_NUM],
    king_sq: [Square; 2],
    side: Side,
    en_passant: Option<Square>,
    castle_rights: CastleRights,
    fifty_move: u32,
    hist_ply: usize,
    pos_key: u64,
    piece_count: [u8; 13],
    history: [Undo; crate::constants::MAX_GAME_MOVES],
}

impl Board {
    /// An empty board: every cell `OffBoard`, side `Both`, no history.
    /// Matches the lifecycle in Data Model: "created empty ... then the
    /// playing area is cleared to `Empty`, then `parse_fen` ... populates
    /// it."
    #[must_use]
    pub fn empty() -> Self {
        let mut board = Board {
            pieces: [Piece::OffBoard; BOARD_SQ_NUM],
            king_sq: [Square::from_mailbox(0); 2],
            side: Side::Both,
            en_passant: None,
            castle_rights: CastleRights::default(),
            fifty_move: 0,
            hist_ply: 0,
            pos_key: 0,
            piece_count: [0; 13],
            history: [Undo::default(); crate::constants::MAX_GAME_MOVES],
        };
        for sq64 in 0..64u8 {
            let sq = Square::from_sq64(sq64);
            board.pieces[sq.index()] = Piece::Empty;
        }
        board
    }

    /// The standard starting position.
    #[must_use]
    pub fn startpos() -> Self {
        Self::from_fen(fen::STARTPOS_FEN).expect("startpos FEN is well-formed")
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn castle_rights(&self) -> CastleRights {
        self.castle_rights
    }

    #[must_use]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[must_use]
    pub fn fifty_move(&self) -> u32 {
        self.fifty_move
    }

    #[must_use]
    pub fn hist_ply(&self) -> usize {
        self.hist_ply
    }

    /// The moves played to reach this position, oldest first. Used by
    /// the opening book to reconstruct the game's move text (External
    /// Interfaces: opening book).
    #[must_use]
    pub fn move_history(&self) -> Vec<Move> {
        self.history[..self.hist_ply].iter().map(|u| u.mv).collect()
    }

    #[must_use]
    pub fn pos_key(&self) -> u64 {
        self.pos_key
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Piece {
        self.pieces[sq.index()]
    }

    #[must_use]
    pub fn king_square(&self, side: Side) -> Square {
        self.king_sq[side.index()]
    }

    #[must_use]
    pub fn piece_count(&self, piece: Piece) -> u8 {
        self.piece_count[piece.index()]
    }

    /// Recomputes the Zobrist key from scratch; used by tests to check
    /// that incremental updates in make/unmake never drift (Testable
    /// Properties: "For any reachable position, `pos_key` equals
    /// `generate_pos_key(state)`").
    #[must_use]
    pub fn generate_pos_key(&self) -> u64 {
        let mut key = 0u64;
        for sq120 in 0..BOARD_SQ_NUM {
            let piece = self.pieces[sq120];
            if piece != Piece::Empty && piece != Piece::OffBoard {
                key ^= crate::zobrist::piece_key(piece, sq120);
            }
        }
        if self.side == Side::White {
            key ^= crate::zobrist::side_key();
        }
        key ^= crate::zobrist::castle_key(self.castle_rights.0);
        if let Some(ep) = self.en_passant {
            key ^= crate::zobrist::piece_key(Piece::Empty, ep.index());
        }
        key
    }

    /// Legal moves for the side to move: pseudo-legal generation filtered
    /// by make/unmake (Component Design §4.4 step 4).
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        let pseudo = self.generate_moves();
        let mut legal = MoveList::new();
        let mut scratch = self.clone();
        for &m in &pseudo {
            if scratch.make_move(m) {
                scratch.unmake_move();
                legal.push(m);
            }
        }
        legal
    }

    /// `true` iff `sq` is attacked by any piece belonging to `by_side`
    /// (Component Design §4.1).
    #[must_use]
    pub fn is_attacked(&self, sq: Square, by_side: Side) -> bool {
        attack::is_attacked(self, sq, by_side)
    }

    /// Pseudo-legal moves for the side to move (Component Design §4.2).
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        movegen::generate_all_moves(self)
    }

    /// Applies `m`; returns `false` (and reverts) if it leaves the mover's
    /// own king in check (Component Design §4.3).
    #[must_use = "an illegal move has already been reverted; check the result"]
    pub fn make_move(&mut self, m: Move) -> bool {
        make_unmake::make_move(self, m)
    }

    /// Strict inverse of the most recent successful `make_move`
    /// (Component Design §4.3).
    pub fn unmake_move(&mut self) {
        make_unmake::unmake_move(self);
    }

    /// Parses user move text (long algebraic, e.g. `e2e4`, `a7a8q`)
    /// against the currently-legal moves (External Interfaces: Move
    /// text / shell collaborator `parse_move`).
    #[must_use]
    pub fn parse_move(&self, text: &str) -> Option<Move> {
        if text.len() < 4 {
            return None;
        }
        let from = Square::parse(&text[0..2])?;
        let to = Square::parse(&text[2..4])?;
        let promo_char = text.as_bytes().get(4).copied();

        for m in self.generate_moves() {
            if m.from_sq() != from || m.to_sq() != to {
                continue;
            }
            let promoted = m.promoted();
            if promoted == Piece::Empty {
                if promo_char.is_none() {
                    return Some(m);
                }
                continue;
            }
            let wants = match promo_char {
                Some(b'q') => Piece::of_colour(PieceKind::Queen, self.side),
                Some(b'r') => Piece::of_colour(PieceKind::Rook, self.side),
                Some(b'b') => Piece::of_colour(PieceKind::Bishop, self.side),
                Some(b'n') => Piece::of_colour(PieceKind::Knight, self.side),
                _ => continue,
            };
            if wants == promoted {
                return Some(m);
            }
        }
        None
    }

    /// The game-theoretic result from `player`'s point of view
    /// (Component Design §4.4).
    #[must_use]
    pub fn result(&self, player: Side) -> GameResult {
        adjudication::result(self, player)
    }

    #[must_use]
    pub fn threefold_count(&self) -> usize {
        adjudication::threefold_count(self)
    }

    #[must_use]
    pub fn is_material_draw(&self) -> bool {
        adjudication::is_material_draw(self)
    }

    /// Parses a FEN string (External Interfaces: FEN parser).
    pub fn from_fen(text: &str) -> Result<Board, FenError> {
        fen::parse_fen(text)
    }

    /// Emits `<placement> <side> <castling> <ep>` (External Interfaces:
    /// FEN emitter).
    #[must_use]
    pub fn to_fen(&self) -> String {
        fen::generate_fen(self)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for rank in (0..8u8).rev() {
            write!(f, "{}  ", rank + 1)?;
            for file in 0..8u8 {
                let sq = Square::from_file_rank(file, rank);
                write!(f, "{:>3}", self.piece_at(sq).to_char())?;
            }
            writeln!(f)?;
        }
        write!(f, "\n   ")?;
        for file in 0..8u8 {
            write!(f, "{:>3}", (b'a' + file) as char)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "side:{}",
            match self.side {
                Side::White => 'w',
                Side::Black => 'b',
                Side::Both => '-',
            }
        )?;
        writeln!(
            f,
            "enPas:{}",
            self.en_passant.map(|s| s.name()).unwrap_or_else(|| "-".into())
        )?;
        writeln!(f, "castle:{}", self.castle_rights)?;
        write!(f, "posKey:{:X}", self.pos_key)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen())
    }
}
