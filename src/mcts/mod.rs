//! The UCT search tree (Component Design §4.9): an arena of [`Node`]s
//! addressed by index, since a classic `Rc<RefCell<Node>>` tree fights
//! the borrow checker the moment backpropagation needs to walk back up
//! a path it just descended.

mod worker;

pub use worker::{run_worker, RootOutcome};

use crate::board::{Move, MoveList, Side};

/// One position in a worker's private search tree. `player_just_moved`
/// is the side that made the move leading into this node, i.e. the side
/// whose turn it was one ply up — not the side to move here.
pub(crate) struct Node {
    wins: f64,
    visits: u32,
    untried_moves: Vec<Move>,
    player_just_moved: Side,
    move_from_parent: Move,
    children: Vec<usize>,
}

impl Node {
    fn new(untried_moves: Vec<Move>, player_just_moved: Side, move_from_parent: Move) -> Self {
        Node {
            wins: 0.0,
            visits: 0,
            untried_moves,
            player_just_moved,
            move_from_parent,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub(crate) fn visits(&self) -> u32 {
        self.visits
    }

    #[must_use]
    pub(crate) fn wins(&self) -> f64 {
        self.wins
    }

    #[must_use]
    fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.5
        } else {
            self.wins / f64::from(self.visits)
        }
    }

    #[must_use]
    pub(crate) fn move_from_parent(&self) -> Move {
        self.move_from_parent
    }

    #[must_use]
    pub(crate) fn player_just_moved(&self) -> Side {
        self.player_just_moved
    }

    #[must_use]
    fn children(&self) -> &[usize] {
        &self.children
    }

    #[must_use]
    fn has_untried(&self) -> bool {
        !self.untried_moves.is_empty()
    }
}

/// A worker's private search tree, rooted at the position reached after
/// its assigned root candidate move.
pub(crate) struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn new_root(untried_moves: MoveList, player_just_moved: Side) -> Self {
        Tree {
            nodes: vec![Node::new(untried_moves.into_vec(), player_just_moved, Move::NULL)],
        }
    }

    fn root(&self) -> usize {
        0
    }

    fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    fn has_untried(&self, idx: usize) -> bool {
        self.nodes[idx].has_untried()
    }

    fn has_children(&self, idx: usize) -> bool {
        !self.nodes[idx].children().is_empty()
    }

    fn children_of(&self, idx: usize) -> &[usize] {
        self.nodes[idx].children()
    }

    fn untried_len(&self, idx: usize) -> usize {
        self.nodes[idx].untried_moves.len()
    }

    /// Removes one untried move from `parent` at `slot` (swap-pop: order
    /// among untried moves is never meaningful) and returns it so the
    /// caller can apply it to the board before building the child node.
    fn take_untried(&mut self, parent: usize, slot: usize) -> Move {
        self.nodes[parent].untried_moves.swap_remove(slot)
    }

    fn add_child(&mut self, parent: usize, mv: Move, untried_moves: MoveList, player_just_moved: Side) -> usize {
        let child_idx = self.nodes.len();
        self.nodes.push(Node::new(untried_moves.into_vec(), player_just_moved, mv));
        self.nodes[parent].children.push(child_idx);
        child_idx
    }

    /// UCB1 selection among `parent`'s children: `wins/visits +
    /// sqrt(2*ln(parent.visits)/visits)`, ties broken by keeping the
    /// first child seen (Component Design §4.9).
    fn select_child(&self, parent: usize) -> usize {
        let parent_visits = f64::from(self.nodes[parent].visits.max(1));
        let mut best_idx = self.nodes[parent].children[0];
        let mut best_score = f64::NEG_INFINITY;
        for &idx in &self.nodes[parent].children {
            let node = &self.nodes[idx];
            let exploitation = node.win_rate();
            let exploration = if node.visits == 0 {
                f64::INFINITY
            } else {
                (2.0 * parent_visits.ln() / f64::from(node.visits)).sqrt()
            };
            let score = exploitation + exploration;
            if score > best_score {
                best_score = score;
                best_idx = idx;
            }
        }
        best_idx
    }

    fn update(&mut self, idx: usize, reward: f64) {
        let node = &mut self.nodes[idx];
        node.visits += 1;
        node.wins += reward;
    }
}
