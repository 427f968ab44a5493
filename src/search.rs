//! The parallel search driver (Component Design §4.10): one worker
//! thread per root candidate move, each running an independent UCT
//! search until a shared wall-clock deadline, fanning results back in
//! to pick a move.

use std::thread;
use std::time::{Duration, Instant};

use crate::board::{Board, Move};
use crate::mcts::{run_worker, RootOutcome};
use crate::rng::{derive_seed, WorkerRng};

#[cfg(feature = "logging")]
use log::{debug, info};

/// Tunables for one call to [`find_best_move`].
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Wall-clock budget handed to every worker; the driver does not
    /// itself enforce a hard deadline beyond this.
    pub time_budget: Duration,
    /// Upper bound on concurrent worker threads. Root positions with
    /// fewer legal moves than this simply use fewer workers; positions
    /// with more dispatch the extra candidates in a second wave.
    pub max_workers: usize,
    /// Session seed workers derive their private RNG streams from
    /// (Design Notes §4.8: reproducible given the same seed and worker
    /// count).
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            time_budget: Duration::from_secs(5),
            max_workers: thread::available_parallelism().map_or(4, std::num::NonZeroUsize::get),
            seed: 0xC0FF_EE_u64,
        }
    }
}

/// One root candidate move together with the statistics its worker
/// collected.
pub struct RootCandidate {
    pub mv: Move,
    pub outcome: RootOutcome,
}

/// `find_best_move`'s result (External Interfaces §6:
/// `find_best_move(state, deadline) -> (move, score, simulations)`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchOutcome {
    pub mv: Move,
    /// The opponent's best-reply win rate after `mv`, the quantity the
    /// driver minimises (Component Design §4.10 step 3).
    pub score: f64,
    /// Total playouts run across every root candidate's worker.
    pub simulations: u64,
}

/// Searches `board` for the side to move's best move under `config`.
///
/// Panics if `board` has no legal moves: the caller must have already
/// adjudicated the game over before invoking the search (Component
/// Design §4.8 step 1, Error Handling §7 item 3 — this is a search-level
/// failure, not a recoverable condition).
#[must_use]
pub fn find_best_move(board: &Board, config: &SearchConfig) -> Option<SearchOutcome> {
    let legal = board.legal_moves();
    assert!(
        !legal.is_empty(),
        "find_best_move called with no legal moves; adjudication should have caught this first"
    );
    if legal.len() == 1 {
        let only = legal.into_vec()[0];
        #[cfg(feature = "logging")]
        debug!("single legal move {only}, skipping search");
        return Some(SearchOutcome {
            mv: only,
            score: 0.5,
            simulations: 0,
        });
    }

    let candidates = run_all_workers(board, legal.into_vec(), config);
    pick_best(candidates)
}

/// Runs every root candidate's worker and returns their statistics, used
/// by [`find_best_move`] and by callers that want the full spread (e.g.
/// a shell's `analyze` command).
#[must_use]
pub fn run_all_workers(board: &Board, moves: Vec<Move>, config: &SearchConfig) -> Vec<RootCandidate> {
    let mover = board.side();
    let deadline = Instant::now() + config.time_budget;

    let mut results = Vec::with_capacity(moves.len());
    for (wave_index, chunk) in moves.chunks(config.max_workers.max(1)).enumerate() {
        let handles: Vec<_> = chunk
            .iter()
            .enumerate()
            .map(|(slot, &mv)| {
                let mut worker_board = board.clone();
                let seed = derive_seed(config.seed, wave_index * config.max_workers + slot);
                thread::spawn(move || {
                    let applied = worker_board.make_move(mv);
                    debug_assert!(applied, "root candidate moves are always legal");
                    let mut rng = WorkerRng::seeded(seed);
                    let outcome = run_worker(worker_board, mover, deadline, &mut rng);
                    (mv, outcome)
                })
            })
            .collect();

        for handle in handles {
            match handle.join() {
                Ok((mv, outcome)) => results.push(RootCandidate { mv, outcome }),
                Err(_) => {
                    #[cfg(feature = "logging")]
                    log::error!("a search worker panicked; dropping its candidate");
                }
            }
        }
    }

    #[cfg(feature = "logging")]
    info!("searched {} root candidates for {:?}", results.len(), mover);

    results
}

/// Picks the candidate that minimises the opponent's best reply, ties
/// broken by keeping the first one encountered in dispatch order
/// (Component Design §4.8 step 3: "tie-break: first encountered"), so
/// the same inputs always choose the same move (Testable Properties:
/// deterministic given a fixed seed). `sort_by` is stable, so a plain
/// comparison on `opponent_best_reply` alone preserves that order on ties.
fn pick_best(mut candidates: Vec<RootCandidate>) -> Option<SearchOutcome> {
    let simulations: u64 = candidates.iter().map(|c| u64::from(c.outcome.visits)).sum();

    candidates.sort_by(|a, b| {
        a.outcome
            .opponent_best_reply
            .partial_cmp(&b.outcome.opponent_best_reply)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    candidates.into_iter().next().map(|c| SearchOutcome {
        mv: c.mv,
        score: c.outcome.opponent_best_reply,
        simulations,
    })
}
