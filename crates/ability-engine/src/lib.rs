//! Rules engine for ability chess.
//!
//! This crate provides:
//! - [`Board`] - 64 cells, each holding an optional piece and a barrier flag
//! - [`GameState`] - Board plus turn, castling, en passant, packages, orders
//!   and the active barrier, with an undo history
//! - [`Game`] - Validated play with notation history and a revision counter
//! - [`RuleSet`] - Trait over starting layouts ([`AbilityChess`], [`ClassicChess`])
//! - Move and order generation, apply and undo
//!
//! # Architecture
//!
//! The board is a mailbox: every query walks rays square by square, which
//! keeps barrier squares and ability tags simple to honor. Legality is
//! derived from a pins-and-checks scan of the mover's king, and every
//! applied action pushes an undo record onto the state.
//!
//! # Example
//!
//! ```
//! use ability_engine::{legal_moves, legal_orders, make_move, undo, GameState};
//!
//! let mut state = GameState::variant_start();
//! let moves = legal_moves(&state);
//! assert_eq!(moves.len(), 24);
//! assert_eq!(legal_orders(&state).len(), 49);
//!
//! make_move(&mut state, moves[0]);
//! undo(&mut state);
//! assert_eq!(state, GameState::variant_start());
//! ```

mod board;
mod game;
pub mod movegen;
pub mod rules;
mod state;

pub use board::Board;
pub use game::{Game, GameAction, GameError};
pub use movegen::{
    detect, is_attacked, legal_moves, legal_orders, make_move, make_order, undo, Check,
    KingSafety, MoveList, Pin,
};
pub use rules::{AbilityChess, ClassicChess, GameStatus, RuleSet};
pub use state::{Barrier, CastlingRights, GameState, Package};
