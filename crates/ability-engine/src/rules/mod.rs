//! Rule set abstraction.
//!
//! This module provides the [`RuleSet`] trait which abstracts over the
//! starting layout and end-of-game logic. Both rule sets share the same
//! generator; they differ in which abilities are seeded.

mod ability;
mod classic;

pub use ability::AbilityChess;
pub use classic::ClassicChess;

use ability_core::{Color, Order};

use crate::movegen::{legal_moves, legal_orders};
use crate::{GameState, MoveList};

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// The side to move has a legal move or order.
    Ongoing,
    /// The side to move is in check with nothing to play.
    Checkmate { winner: Color },
    /// The side to move is not in check but has nothing to play.
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }
}

/// Trait for the rule sets the engine can play.
///
/// # Example
///
/// ```
/// use ability_engine::rules::{AbilityChess, RuleSet};
///
/// let state = AbilityChess.initial_state();
/// let moves = AbilityChess.legal_moves(&state);
/// assert_eq!(moves.len(), 24);
/// ```
pub trait RuleSet {
    /// Returns the initial state for this rule set.
    fn initial_state(&self) -> GameState;

    /// Generates all legal moves for the side to move.
    fn legal_moves(&self, state: &GameState) -> MoveList {
        legal_moves(state)
    }

    /// Generates all orders available to the side to move.
    fn legal_orders(&self, state: &GameState) -> Vec<Order> {
        legal_orders(state)
    }

    /// Returns true if the side to move is in check.
    fn is_check(&self, state: &GameState) -> bool {
        state.is_check()
    }

    /// Decides whether the game is over.
    ///
    /// A side with no move but an unused order is still playing: the order
    /// may open a move.
    fn status(&self, state: &GameState) -> GameStatus {
        if !self.legal_moves(state).is_empty() || !self.legal_orders(state).is_empty() {
            return GameStatus::Ongoing;
        }
        if self.is_check(state) {
            GameStatus::Checkmate {
                winner: state.side_to_move().opposite(),
            }
        } else {
            GameStatus::Stalemate
        }
    }

    /// Returns true if the game is over.
    fn is_game_over(&self, state: &GameState) -> bool {
        self.status(state).is_over()
    }
}
