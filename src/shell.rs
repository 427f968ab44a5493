//! A thin stdin command loop over the core interfaces (§6, External
//! Interfaces), in the spirit of the original's `utils/commandLoop.go`.
//! This is not a UCI/XBoard implementation: it recognizes just enough
//! `uci`-shaped tokens (`uci`, `isready`, `ucinewgame`, `position`, `go`,
//! `quit`) plus a `perft` diagnostic, and calls straight into
//! [`crate::search::find_best_move`] — no time management, no
//! pondering, no options.

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use crate::board::Board;
use crate::book::OpeningBook;
use crate::perft;
use crate::rng::WorkerRng;
use crate::search::{find_best_move, SearchConfig};

#[cfg(feature = "logging")]
use log::debug;

const DEFAULT_MOVETIME: Duration = Duration::from_secs(2);

/// Runs the command loop against stdin/stdout until `quit` or EOF.
/// `book` is optional: pass `None` to play without one.
pub fn run(mut book: Option<OpeningBook>) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut board = Board::startpos();
    let mut rng = WorkerRng::seeded(0x5EED);

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "uci" => {
                println!("id name chess_engine");
                println!("id author the team");
                println!("uciok");
            }
            "isready" => println!("readyok"),
            "ucinewgame" => board = Board::startpos(),
            "position" => parse_position(&mut board, &parts),
            "go" => handle_go(&board, &parts, book.as_mut(), &mut rng),
            "perft" => handle_perft(&mut board, &parts),
            "print" => println!("{board}"),
            "quit" => break,
            other => eprintln!("unknown command: {other}"),
        }

        let _ = stdout.flush();
    }
}

fn parse_position(board: &mut Board, parts: &[&str]) {
    let mut i = 1;
    if parts.get(i) == Some(&"startpos") {
        *board = Board::startpos();
        i += 1;
    } else if parts.get(i) == Some(&"fen") {
        let fen_fields = &parts[i + 1..];
        let moves_at = fen_fields.iter().position(|&p| p == "moves").unwrap_or(fen_fields.len());
        let fen_text = fen_fields[..moves_at].join(" ");
        match Board::from_fen(&fen_text) {
            Ok(parsed) => *board = parsed,
            Err(err) => {
                eprintln!("bad FEN: {err}");
                return;
            }
        }
        i += 1 + moves_at;
    }

    if parts.get(i) == Some(&"moves") {
        for text in &parts[i + 1..] {
            match board.parse_move(text) {
                Some(mv) => {
                    let _ = board.make_move(mv);
                }
                None => eprintln!("illegal move: {text}"),
            }
        }
    }
}

fn handle_go(board: &Board, parts: &[&str], book: Option<&mut OpeningBook>, rng: &mut WorkerRng) {
    if let Some(book) = book {
        if let Some(mv) = book.lookup(board, rng) {
            #[cfg(feature = "logging")]
            debug!("book move {mv}");
            println!("bestmove {}", mv.to_long_algebraic());
            return;
        }
    }

    let mut config = SearchConfig::default();
    if let Some(pos) = parts.iter().position(|&p| p == "movetime") {
        if let Some(ms) = parts.get(pos + 1).and_then(|s| s.parse::<u64>().ok()) {
            config.time_budget = Duration::from_millis(ms);
        }
    } else {
        config.time_budget = DEFAULT_MOVETIME;
    }

    match find_best_move(board, &config) {
        Some(outcome) => {
            #[cfg(feature = "logging")]
            debug!(
                "{} simulations, opponent reply score {:.3}",
                outcome.simulations, outcome.score
            );
            println!("bestmove {}", outcome.mv.to_long_algebraic());
        }
        None => println!("bestmove 0000"),
    }
}

fn handle_perft(board: &mut Board, parts: &[&str]) {
    let Some(depth) = parts.get(1).and_then(|s| s.parse::<u32>().ok()) else {
        eprintln!("usage: perft <depth>");
        return;
    };
    let start = Instant::now();
    let nodes = perft::perft(board, depth);
    println!("perft {depth}: {nodes} nodes in {:?}", start.elapsed());
}
