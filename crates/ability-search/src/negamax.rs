//! Negamax search with alpha-beta pruning.
//!
//! The tree is walked in place with apply/undo on a single state. Only
//! moves are searched; orders are left to the caller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ability_core::Move;
use ability_engine::{legal_moves, make_move, undo, GameState, MoveList};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::eval::{evaluate, CHECKMATE};
use crate::SearchConfig;

/// Bound wider than any reachable score.
const INFINITY: i32 = CHECKMATE + 1;

/// The move a search settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best: Move,
    /// Score for the side to move at the root.
    pub score: i32,
    /// Nodes visited.
    pub nodes: u64,
}

/// Search state
pub struct Searcher {
    depth: u8,
    randomize: bool,
    rng: StdRng,
    nodes: u64,
    stop: Arc<AtomicBool>,
}

impl Searcher {
    pub fn new(config: &SearchConfig) -> Self {
        Self::with_stop(config, Arc::new(AtomicBool::new(false)))
    }

    /// A searcher that gives up as soon as `stop` is set.
    pub fn with_stop(config: &SearchConfig, stop: Arc<AtomicBool>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Searcher {
            depth: config.depth.max(1),
            randomize: config.randomize,
            rng,
            nodes: 0,
            stop,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Searches the side to move's moves.
    ///
    /// Returns `None` if there is no legal move or the search was stopped.
    /// The state is back to where it started on return.
    pub fn search(&mut self, state: &mut GameState) -> Option<SearchOutcome> {
        self.nodes = 0;
        debug!(depth = self.depth, side = %state.side_to_move(), "search started");

        let (score, best) = self.negamax(state, self.depth, -INFINITY, INFINITY)?;
        let best = best?;

        debug!(best = %best, score, nodes = self.nodes, "search finished");
        Some(SearchOutcome {
            best,
            score,
            nodes: self.nodes,
        })
    }

    /// Returns the score for the side to move and the move achieving it, or
    /// `None` once stopped.
    fn negamax(
        &mut self,
        state: &mut GameState,
        depth: u8,
        mut alpha: i32,
        beta: i32,
    ) -> Option<(i32, Option<Move>)> {
        if self.stop.load(Ordering::Relaxed) {
            return None;
        }
        self.nodes += 1;

        let mut moves = legal_moves(state);
        if moves.is_empty() {
            let score = if state.is_check() { -CHECKMATE } else { 0 };
            return Some((score, None));
        }
        if depth == 0 {
            return Some((state.side_to_move().sign() * evaluate(state.board()), None));
        }

        if self.randomize {
            moves.as_mut_slice().shuffle(&mut self.rng);
        }

        let mut best_score = -INFINITY;
        let mut best = None;
        for &m in &moves {
            make_move(state, m);
            let child = self.negamax(state, depth - 1, -beta, -alpha);
            undo(state);
            let score = -child?.0;

            if depth == self.depth {
                trace!(mv = %m, score, "root move");
            }
            if score > best_score {
                best_score = score;
                best = Some(m);
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        Some((best_score, best))
    }
}

/// Runs a search on a copy of `state`.
pub fn best_move(state: &GameState, config: &SearchConfig) -> Option<SearchOutcome> {
    let mut scratch = state.clone();
    Searcher::new(config).search(&mut scratch)
}

/// Picks a legal move uniformly at random.
pub fn random_move<R: Rng + ?Sized>(moves: &MoveList, rng: &mut R) -> Option<Move> {
    moves.as_slice().choose(rng).copied()
}
