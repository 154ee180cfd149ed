//! The variant with abilities and orders.

use super::RuleSet;
use crate::GameState;

/// Chess with every ability seeded on its starting piece.
///
/// - Okonogi pawn (e2 / d7): diagonal step forward without capturing
/// - Kanon rook (a-file): delayed capture of an enemy it was facing
/// - Shanon rook (h-file): delayed recapture on a square it was guarding
/// - Akasaka queen (White only): moves across the board edges
/// - Kraus pawn (d2 / e7): order pushing the enemy in front of it back
/// - Furniture knight (b1, White only): order raising a 2x2 barrier
#[derive(Debug, Clone, Copy, Default)]
pub struct AbilityChess;

impl RuleSet for AbilityChess {
    fn initial_state(&self) -> GameState {
        GameState::variant_start()
    }
}
