//! Game session: validated play on a single state.
//!
//! The [`Game`] struct wraps a [`GameState`] and adds:
//! - Validation of submitted moves and orders against a fresh query
//! - A notation history of applied actions
//! - A revision counter so results computed on an older state can be
//!   recognized and rejected

use ability_core::{Action, FenError, Move, Order};
use thiserror::Error;
use tracing::debug;

use crate::movegen::{legal_moves, legal_orders, make_move, make_order, undo};
use crate::rules::{AbilityChess, ClassicChess, GameStatus, RuleSet};
use crate::{GameState, MoveList};

/// A recorded action in game history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameAction {
    /// The applied action, with the flags the generator gave it.
    pub action: Action,
    /// Rendered notation, e.g. `exd5` or `Kraus:d2d3`.
    pub notation: String,
}

/// Error type for game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The move is not legal in the current state.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// The order is not available in the current state.
    #[error("illegal order: {0}")]
    IllegalOrder(String),
    /// The game has already ended.
    #[error("game has already ended")]
    GameOver,
    /// A search result was computed for an older revision.
    #[error("stale search result: computed at revision {searched}, game is at {current}")]
    StaleSearch { searched: u64, current: u64 },
}

/// A game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    history: Vec<GameAction>,
    revision: u64,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the variant starting layout.
    pub fn new() -> Self {
        Self::from_state(AbilityChess.initial_state())
    }

    /// Creates a standard chess game on the same engine.
    pub fn classic() -> Self {
        Self::from_state(ClassicChess.initial_state())
    }

    /// Creates a game from a prepared state.
    pub fn from_state(state: GameState) -> Self {
        Game {
            state,
            history: Vec::new(),
            revision: 0,
        }
    }

    /// Creates a game from a FEN string with optional ability tags.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_state(GameState::from_fen(fen)?))
    }

    /// Restarts with the variant starting layout.
    pub fn reset(&mut self) {
        self.state = AbilityChess.initial_state();
        self.history.clear();
        self.revision += 1;
        debug!(revision = self.revision, "game reset");
    }

    /// Returns a reference to the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Changes on every apply, undo and reset.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns all legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        legal_moves(&self.state)
    }

    /// Returns all orders available to the side to move.
    pub fn legal_orders(&self) -> Vec<Order> {
        legal_orders(&self.state)
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.state.is_check()
    }

    pub fn status(&self) -> GameStatus {
        AbilityChess.status(&self.state)
    }

    /// Applied actions, oldest first.
    pub fn history(&self) -> &[GameAction] {
        &self.history
    }

    /// Plays a move, matched against the legal moves by its squares.
    pub fn play_move(&mut self, m: Move) -> Result<(), GameError> {
        self.ensure_ongoing()?;
        let legal = self
            .legal_moves()
            .find(m.from(), m.to())
            .ok_or_else(|| GameError::IllegalMove(m.coords()))?;
        self.apply(Action::Move(legal));
        Ok(())
    }

    /// Places an order, matched by its squares and ability.
    pub fn place_order(&mut self, order: Order) -> Result<(), GameError> {
        self.ensure_ongoing()?;
        let legal = self
            .legal_orders()
            .into_iter()
            .find(|o| *o == order)
            .ok_or_else(|| GameError::IllegalOrder(order.notation()))?;
        self.apply(Action::Order(legal));
        Ok(())
    }

    /// Plays a move or an order.
    pub fn play(&mut self, action: Action) -> Result<(), GameError> {
        match action {
            Action::Move(m) => self.play_move(m),
            Action::Order(o) => self.place_order(o),
        }
    }

    /// Plays a move given in coordinate notation (e.g. "e2e4").
    pub fn play_coords(&mut self, coords: &str) -> Result<(), GameError> {
        self.ensure_ongoing()?;
        let legal = Move::parse_coords(coords)
            .and_then(|(from, to)| self.legal_moves().find(from, to))
            .ok_or_else(|| GameError::IllegalMove(coords.to_string()))?;
        self.apply(Action::Move(legal));
        Ok(())
    }

    /// Plays a move chosen by a search started at `revision`.
    ///
    /// Fails with [`GameError::StaleSearch`] if the game changed since.
    pub fn accept_search(&mut self, revision: u64, best: Move) -> Result<(), GameError> {
        if revision != self.revision {
            debug!(
                searched = revision,
                current = self.revision,
                "stale search result rejected"
            );
            return Err(GameError::StaleSearch {
                searched: revision,
                current: self.revision,
            });
        }
        self.play_move(best)
    }

    /// Takes back the most recent action. Does nothing at the start.
    pub fn undo(&mut self) -> Option<Action> {
        let action = undo(&mut self.state)?;
        self.history.pop();
        self.revision += 1;
        debug!(action = %action, revision = self.revision, "action undone");
        Some(action)
    }

    fn ensure_ongoing(&self) -> Result<(), GameError> {
        if self.status().is_over() {
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    fn apply(&mut self, action: Action) {
        let notation = action.notation();
        match action {
            Action::Move(m) => make_move(&mut self.state, m),
            Action::Order(o) => make_order(&mut self.state, o),
        }
        self.revision += 1;
        debug!(action = %notation, revision = self.revision, "action applied");
        self.history.push(GameAction { action, notation });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ability_core::{Ability, Color, Square};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.revision(), 0);
        assert!(game.history().is_empty());
        assert!(!game.is_check());
        assert_eq!(game.status(), GameStatus::Ongoing);
    }

    #[test]
    fn play_coords_records_notation() {
        let mut game = Game::new();
        game.play_coords("e2e4").unwrap();
        game.play_coords("d7d5").unwrap();
        game.play_coords("e4d5").unwrap();
        let notation: Vec<&str> = game.history().iter().map(|a| a.notation.as_str()).collect();
        assert_eq!(notation, ["e4", "d5", "exd5"]);
        assert_eq!(game.revision(), 3);
    }

    #[test]
    fn illegal_move_leaves_game_untouched() {
        let mut game = Game::new();
        let before = game.state().clone();
        assert_eq!(
            game.play_coords("e2e5"),
            Err(GameError::IllegalMove("e2e5".to_string()))
        );
        assert_eq!(game.play_coords("zz"), Err(GameError::IllegalMove("zz".to_string())));
        assert_eq!(game.state(), &before);
        assert_eq!(game.revision(), 0);
    }

    #[test]
    fn submitted_move_gets_legal_flags() {
        let mut game = Game::new();
        let piece = game.state().board().piece_at(sq("e2")).unwrap();
        // submitted without the double-push flag
        let m = Move::new(sq("e2"), sq("e4"), piece, None, ability_core::MoveFlag::Normal);
        game.play_move(m).unwrap();
        assert_eq!(game.state().en_passant(), Some(sq("e3")));
    }

    #[test]
    fn orders_are_validated() {
        let mut game = Game::new();
        let order = game.legal_orders()[0];
        game.place_order(order).unwrap();
        assert_eq!(game.history()[0].notation, "Furniture:b1a1");
        assert_eq!(game.state().side_to_move(), Color::White);

        // the same order cannot be given twice
        assert_eq!(
            game.place_order(order),
            Err(GameError::IllegalOrder("Furniture:b1a1".to_string()))
        );
        assert!(!game
            .state()
            .order_available(Color::White, Ability::ShanonFurniture));
    }

    #[test]
    fn undo_restores_and_bumps_revision() {
        let mut game = Game::new();
        let start = game.state().clone();
        game.play_coords("g1f3").unwrap();
        assert!(game.undo().is_some());
        assert_eq!(game.state(), &start);
        assert_eq!(game.revision(), 2);
        assert!(game.history().is_empty());
        assert_eq!(game.undo(), None);
        assert_eq!(game.revision(), 2);
    }

    #[test]
    fn stale_search_rejected() {
        let mut game = Game::new();
        let revision = game.revision();
        let best = game.legal_moves()[0];
        game.play_coords("e2e4").unwrap();
        assert_eq!(
            game.accept_search(revision, best),
            Err(GameError::StaleSearch {
                searched: 0,
                current: 1
            })
        );

        let best = game.legal_moves()[0];
        game.accept_search(game.revision(), best).unwrap();
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn cannot_move_after_game_over() {
        let mut game = Game::classic();
        for coords in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            game.play_coords(coords).unwrap();
        }
        assert_eq!(
            game.status(),
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
        assert_eq!(game.play_coords("a2a3"), Err(GameError::GameOver));
    }

    #[test]
    fn reset_starts_over() {
        let mut game = Game::new();
        game.play_coords("e2e4").unwrap();
        game.reset();
        assert!(game.history().is_empty());
        assert_eq!(game.state(), &GameState::variant_start());
        assert_eq!(game.revision(), 2);
    }
}
