//! Opening book lookup (External Interfaces: opening book), grounded on
//! a substring match against a flat file of space-separated game lines:
//! each line is a full game's move text, and the book offers whatever
//! token follows the longest prefix matching the moves played so far.

use std::fs;
use std::io;
use std::path::Path;

use rand::Rng;

use crate::board::{Board, Move};

/// Past this many plies a book is assumed to have run out of prepared
/// lines; lookups beyond it always miss.
const MAX_BOOK_PLY: usize = 25;

/// A loaded book: one line per prepared game, long-algebraic moves
/// separated by single spaces (`"e2e4 e7e5 g1f3 "`).
pub struct OpeningBook {
    lines: Vec<String>,
}

impl OpeningBook {
    /// Reads every line of `path` into memory. The book is small enough
    /// (a few thousand lines at most) that re-scanning it in memory on
    /// every lookup, rather than indexing it, is simpler and plenty fast.
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(OpeningBook {
            lines: text.lines().map(str::to_owned).collect(),
        })
    }

    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        OpeningBook { lines }
    }

    /// Looks up a move for `board`'s current position. Builds the
    /// "moves so far" text from `board.move_history()`, matches it as a
    /// substring against every book line, collects the token following
    /// each match, and picks uniformly among the distinct candidates.
    #[must_use]
    pub fn lookup(&self, board: &Board, rng: &mut impl Rng) -> Option<Move> {
        if board.hist_ply() > MAX_BOOK_PLY {
            return None;
        }

        let mut current_line = String::new();
        for mv in board.move_history() {
            current_line.push_str(&mv.to_long_algebraic());
            current_line.push(' ');
        }

        let mut candidates = Vec::new();
        for line in &self.lines {
            let Some(match_at) = line.find(current_line.as_str()) else {
                continue;
            };
            let after = &line[match_at + current_line.len()..];
            let Some(token) = after.split_whitespace().next() else {
                continue;
            };
            if let Some(mv) = board.parse_move(token) {
                candidates.push(mv);
            }
        }

        if candidates.is_empty() {
            return None;
        }
        let pick = rng.gen_range(0..candidates.len());
        Some(candidates[pick])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn book_with(lines: &[&str]) -> OpeningBook {
        OpeningBook::from_lines(lines.iter().map(|s| (*s).to_owned()).collect())
    }

    #[test]
    fn an_empty_history_offers_every_opening_move_in_the_book() {
        let book = book_with(&["e2e4 e7e5 g1f3 ", "d2d4 d7d5 "]);
        let board = Board::startpos();
        let mut rng = StepRng::new(0, 1);
        let mv = book.lookup(&board, &mut rng).expect("book has candidates");
        assert!(["e2e4", "d2d4"].contains(&mv.to_long_algebraic().as_str()));
    }

    #[test]
    fn the_matched_continuation_follows_the_moves_played_so_far() {
        let book = book_with(&["e2e4 e7e5 g1f3 "]);
        let mut board = Board::startpos();
        for text in ["e2e4", "e7e5"] {
            let mv = board.parse_move(text).expect("legal opening move");
            assert!(board.make_move(mv));
        }
        let mut rng = StepRng::new(0, 1);
        let mv = book.lookup(&board, &mut rng).expect("book continues this line");
        assert_eq!(mv.to_long_algebraic(), "g1f3");
    }

    #[test]
    fn a_line_with_no_match_offers_nothing() {
        let book = book_with(&["d2d4 d7d5 "]);
        let mut board = Board::startpos();
        let mv = board.parse_move("e2e4").expect("legal opening move");
        assert!(board.make_move(mv));
        let mut rng = StepRng::new(0, 1);
        assert!(book.lookup(&board, &mut rng).is_none());
    }

    #[test]
    fn deep_into_the_game_the_book_is_skipped_entirely() {
        // A book line that matches the empty prefix always offers a
        // move at ply 0; once the game runs past the ply cutoff the
        // lookup must return None regardless of what the book contains.
        let book = book_with(&["g1f3 "]);
        let mut board = Board::startpos();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        while board.hist_ply() <= MAX_BOOK_PLY {
            for text in shuffle {
                let mv = board.parse_move(text).expect("knight shuffle move is legal");
                assert!(board.make_move(mv));
            }
        }
        let mut rng = StepRng::new(0, 1);
        assert!(book.lookup(&board, &mut rng).is_none());
    }
}
