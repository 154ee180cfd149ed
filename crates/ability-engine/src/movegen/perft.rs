//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Orders are not counted; they do not end a turn.

use super::{legal_moves, make_move, undo};
use crate::GameState;

/// Counts the number of leaf nodes at the given depth.
///
/// The state is walked with apply/undo and is unchanged on return.
pub fn perft(state: &mut GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(state);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        make_move(state, *m);
        nodes += perft(state, depth - 1);
        undo(state);
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(state: &mut GameState, depth: u32) -> Vec<(String, u64)> {
    let moves = legal_moves(state);
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        make_move(state, *m);
        let nodes = if depth > 1 {
            perft(state, depth - 1)
        } else {
            1
        };
        undo(state);
        results.push((m.coords(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
