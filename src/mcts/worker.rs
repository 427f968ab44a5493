//! One root-parallel UCT worker: given a board already advanced by its
//! assigned root candidate move, repeatedly select/expand/rollout/
//! backpropagate until a wall-clock deadline, then report what it found
//! (Component Design §4.9, §4.10: seed -> select -> expand -> rollout ->
//! backpropagate -> revert).

use std::time::Instant;

use rand::Rng;

use crate::board::{Board, GameResult, Side};

use super::Tree;

/// What a worker reports back to the driver about its root candidate
/// move's subtree.
pub struct RootOutcome {
    /// Total playouts run through this candidate's subtree.
    pub visits: u32,
    /// `wins/visits` for the side that played the root candidate move,
    /// i.e. how good this move looks for us.
    pub own_win_rate: f64,
    /// The best `wins/visits` any of the opponent's immediate replies
    /// achieved for the opponent, or `0.5` if the deadline hit before a
    /// single reply was ever expanded. The driver prefers the candidate
    /// that minimises this.
    pub opponent_best_reply: f64,
}

/// Reference side every reward in a worker's tree is computed against,
/// so backpropagation only needs one `if` to flip perspective per node
/// instead of re-deriving the mover at every level.
const REFERENCE_SIDE: Side = Side::White;

const MAX_ROLLOUT_PLIES: u32 = 200;

/// Runs one worker's private search until `deadline`. `board` must
/// already have the root candidate move applied; `mover` is the side
/// that played it.
pub fn run_worker(mut board: Board, mover: Side, deadline: Instant, rng: &mut impl Rng) -> RootOutcome {
    let opponent = mover.opponent();
    let legal_after_seed = board.legal_moves();

    // Seed (Component Design §4.7 step 1): the root candidate move already
    // ended the game. There is no opponent reply to explore, so report the
    // outcome directly instead of entering a tree with no children.
    if legal_after_seed.is_empty() {
        let game_result = board.result(opponent);
        let opponent_score = game_result.reward().unwrap_or(0.5);
        return RootOutcome {
            visits: 1,
            own_win_rate: 1.0 - opponent_score,
            opponent_best_reply: opponent_score,
        };
    }

    let mut tree = Tree::new_root(legal_after_seed, mover);
    let root_board = board.clone();

    while Instant::now() < deadline {
        board = root_board.clone();
        let mut node_idx = tree.root();
        let mut path = vec![node_idx];

        // Select: descend while fully expanded and not terminal.
        while !tree.has_untried(node_idx) && tree.has_children(node_idx) {
            node_idx = tree.select_child(node_idx);
            let mv = tree.node(node_idx).move_from_parent();
            let _ = board.make_move(mv);
            path.push(node_idx);
        }

        // Expand: try one untried move, if any remain.
        if tree.has_untried(node_idx) {
            let slot = rng.gen_range(0..tree.untried_len(node_idx));
            let mv = tree.take_untried(node_idx, slot);
            let _ = board.make_move(mv);
            let player_just_moved = board.side().opponent();
            let child_idx = tree.add_child(node_idx, mv, board.legal_moves(), player_just_moved);
            node_idx = child_idx;
            path.push(node_idx);
        }

        rollout(&mut board, rng);
        let outcome: GameResult = board.result(REFERENCE_SIDE);
        let reward = outcome.reward().unwrap_or(0.5);

        for &idx in path.iter().rev() {
            let perspective = tree.node(idx).player_just_moved();
            let node_reward = if perspective == REFERENCE_SIDE { reward } else { 1.0 - reward };
            tree.update(idx, node_reward);
        }
    }

    summarize(&tree)
}

fn rollout(board: &mut Board, rng: &mut impl Rng) {
    for _ in 0..MAX_ROLLOUT_PLIES {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return;
        }
        if board.fifty_move() > 100 || board.is_material_draw() || board.threefold_count() >= 3 {
            return;
        }
        let slot = rng.gen_range(0..moves.len());
        let mv = *moves.as_slice().get(slot).expect("slot is within bounds");
        let _ = board.make_move(mv);
    }
}

/// Ranks children by descending visits and reports the most-visited
/// child's `wins/visits` as `opponent_best_reply` (Component Design §4.7
/// step 3). Ties keep the first child seen.
fn summarize(tree: &Tree) -> RootOutcome {
    let root = tree.node(tree.root());
    let visits = root.visits();
    let own_win_rate = if visits == 0 { 0.5 } else { root.wins() / f64::from(visits) };

    let mut opponent_best_reply = 0.5;
    let mut most_visits = 0;
    for &child_idx in tree.children_of(tree.root()) {
        let child = tree.node(child_idx);
        if child.visits() > most_visits {
            most_visits = child.visits();
            opponent_best_reply = child.wins() / f64::from(child.visits());
        }
    }

    RootOutcome {
        visits,
        own_win_rate,
        opponent_best_reply,
    }
}

