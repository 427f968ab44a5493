//! Zobrist hashing for mailbox chess positions.
//!
//! Provides the incrementally-updatable 64-bit position key make/unmake
//! relies on to stay in sync with a full recomputation (Component Design
//! §4.5).

use rand::prelude::*;

use crate::board::Piece;
use crate::constants::BOARD_SQ_NUM;

pub(crate) struct ZobristKeys {
    /// `piece_keys[piece][sq120]`, including `Piece::Empty` (index 0),
    /// whose row doubles as the en-passant-square keys per §4.5.
    pub(crate) piece_keys: [[u64; BOARD_SQ_NUM]; 13],
    pub(crate) side_key: u64,
    pub(crate) castle_keys: [u64; 16],
}

impl ZobristKeys {
    fn new() -> Self {
        // Fixed seed: the spec only requires the hash be internally
        // consistent for one process run, not stable across builds.
        let mut rng = StdRng::seed_from_u64(0x536c_696e_6b79);
        let mut piece_keys = [[0u64; BOARD_SQ_NUM]; 13];
        for row in &mut piece_keys {
            for key in row.iter_mut() {
                *key = rng.gen();
            }
        }

        let side_key = rng.gen();

        let mut castle_keys = [0u64; 16];
        for key in castle_keys.iter_mut() {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            side_key,
            castle_keys,
        }
    }
}

/// Process-wide, read-only, initialised once on first use.
pub(crate) static ZOBRIST: std::sync::LazyLock<ZobristKeys> = std::sync::LazyLock::new(ZobristKeys::new);

#[inline]
pub(crate) fn piece_key(piece: Piece, sq120: usize) -> u64 {
    ZOBRIST.piece_keys[piece.index()][sq120]
}

#[inline]
pub(crate) fn side_key() -> u64 {
    ZOBRIST.side_key
}

#[inline]
pub(crate) fn castle_key(castle_mask: u8) -> u64 {
    ZOBRIST.castle_keys[castle_mask as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_stable_within_a_process() {
        assert_eq!(piece_key(Piece::WhitePawn, 21), piece_key(Piece::WhitePawn, 21));
        assert_ne!(piece_key(Piece::WhitePawn, 21), piece_key(Piece::BlackPawn, 21));
    }

    #[test]
    fn castle_keys_cover_full_mask_range() {
        for mask in 0..16u8 {
            let _ = castle_key(mask);
        }
    }
}
