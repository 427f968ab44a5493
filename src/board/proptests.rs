//! Property-based make/unmake and FEN round-trip tests, in the spirit of
//! the teacher's `board/tests/proptest.rs`.

use super::*;
use proptest::prelude::*;

fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=20usize
}

fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

fn play_random_moves(board: &mut Board, rng: &mut impl rand::Rng, num_moves: usize) -> usize {
    let mut made = 0;
    for _ in 0..num_moves {
        let moves = board.legal_moves();
        if moves.is_empty() {
            break;
        }
        let idx = rng.gen_range(0..moves.len());
        let mv = *moves.as_slice().get(idx).expect("idx is within bounds");
        assert!(board.make_move(mv));
        made += 1;
    }
    made
}

proptest! {
    /// make_move followed by unmake_move restores the position key and
    /// FEN exactly, for any sequence of legal moves from the startpos.
    #[test]
    fn make_unmake_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        use rand::SeedableRng;

        let mut board = Board::startpos();
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

        let initial_key = board.pos_key();
        let initial_fen = board.to_fen();

        let made = play_random_moves(&mut board, &mut rng, num_moves);
        for _ in 0..made {
            board.unmake_move();
        }

        prop_assert_eq!(board.pos_key(), initial_key);
        prop_assert_eq!(board.to_fen(), initial_fen);
    }

    /// The incrementally maintained Zobrist key always matches a full
    /// recomputation from board state, after any sequence of legal moves.
    #[test]
    fn pos_key_matches_full_recomputation(seed in seed_strategy(), num_moves in move_count_strategy()) {
        use rand::SeedableRng;

        let mut board = Board::startpos();
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let moves = board.legal_moves();
            if moves.is_empty() {
                break;
            }
            let idx = rng.gen_range(0..moves.len());
            let mv = *moves.as_slice().get(idx).expect("idx is within bounds");
            assert!(board.make_move(mv));
            prop_assert_eq!(board.pos_key(), board.generate_pos_key());
        }
    }

    /// Every position reached by a random legal game round-trips through
    /// FEN text without losing any state `to_fen`/`from_fen` are meant to
    /// preserve.
    #[test]
    fn fen_roundtrip_along_a_random_game(seed in seed_strategy(), num_moves in move_count_strategy()) {
        use rand::SeedableRng;

        let mut board = Board::startpos();
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

        play_random_moves(&mut board, &mut rng, num_moves);

        let fen = board.to_fen();
        let restored = Board::from_fen(&fen).expect("engine never emits an unparseable FEN");
        prop_assert_eq!(restored.to_fen(), fen);
        prop_assert_eq!(restored.pos_key(), board.pos_key());
    }
}
