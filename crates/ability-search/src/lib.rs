//! Move search for ability chess.
//!
//! This crate provides:
//! - [`evaluate`] - Static material and placement score, positive for White
//! - [`Searcher`] - Negamax with alpha-beta pruning to a fixed depth
//! - [`random_move`] - Fallback when no search is wanted
//! - [`spawn_search`] - Search on a worker thread with cancellation
//! - [`SearchConfig`] - Depth, shuffling and seed, loadable from TOML
//!
//! # Example
//!
//! ```
//! use ability_engine::GameState;
//! use ability_search::{best_move, SearchConfig};
//!
//! let config = SearchConfig {
//!     depth: 2,
//!     randomize: false,
//!     seed: None,
//! };
//! let outcome = best_move(&GameState::variant_start(), &config).unwrap();
//! println!("{} scores {}", outcome.best, outcome.score);
//! ```

mod config;
mod eval;
mod negamax;
mod worker;

pub use config::{ConfigError, SearchConfig};
pub use eval::{evaluate, piece_value, CHECKMATE};
pub use negamax::{best_move, random_move, SearchOutcome, Searcher};
pub use worker::{spawn_search, SearchHandle, SearchResult};
