//! Core types for ability chess.
//!
//! This crate provides the value types shared by the engine and the search:
//! - [`Piece`], [`Color`], [`Ability`] and [`PieceCode`] for piece identity
//! - [`Cell`] for board squares that may also carry a barrier
//! - [`Square`] and [`Direction`] for board geometry
//! - [`Move`], [`Order`] and [`Action`] with notation rendering
//! - FEN parsing with ability tags

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{write_placement, FenError, FenParser};
pub use mov::{Action, Move, MoveFlag, MoveOrigin, Order};
pub use piece::{Ability, Cell, Piece, PieceCode};
pub use square::{Direction, Square};
