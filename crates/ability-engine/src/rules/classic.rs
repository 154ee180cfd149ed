//! Standard chess on the same engine.

use super::RuleSet;
use crate::GameState;

/// Standard chess: the ability engine with no abilities seeded.
///
/// Useful for validating the generator against known perft counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicChess;

impl RuleSet for ClassicChess {
    fn initial_state(&self) -> GameState {
        GameState::classic_start()
    }
}
