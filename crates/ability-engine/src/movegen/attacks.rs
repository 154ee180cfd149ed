//! Check and pin detection around a king square.
//!
//! The detector casts the eight compass rays and the knight jumps from the
//! king outwards. Barriered squares stop rays and silence knights standing
//! on them, and a king standing on a barrier cannot be attacked at all.

use ability_core::{Color, Direction, Piece, PieceCode, Square};

use crate::Board;

/// A friendly piece that shields its king from an enemy slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    /// The pinned piece.
    pub square: Square,
    /// Unit direction from the king towards the pinner.
    pub direction: Direction,
}

/// An enemy piece attacking the king.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    /// The checking piece.
    pub square: Square,
    /// Unit direction from the king towards the checker; `None` for knights.
    pub direction: Option<Direction>,
}

impl Check {
    /// Returns true if moving a piece to `sq` resolves this check: capturing
    /// the checker or, for a ray check, blocking between it and the king.
    pub fn is_blocked_by(&self, king: Square, sq: Square) -> bool {
        if sq == self.square {
            return true;
        }
        let Some(dir) = self.direction else {
            return false;
        };
        let mut n = 1;
        while let Some(step) = king.offset(dir, n) {
            if step == self.square {
                return false;
            }
            if step == sq {
                return true;
            }
            n += 1;
        }
        false
    }
}

/// Checks and pins against one king, as seen from a given square.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KingSafety {
    pub in_check: bool,
    pub pins: Vec<Pin>,
    pub checks: Vec<Check>,
}

impl KingSafety {
    /// Pin direction for the piece on `sq`, if it is pinned.
    pub fn pin_on(&self, sq: Square) -> Option<Direction> {
        self.pins
            .iter()
            .find(|p| p.square == sq)
            .map(|p| p.direction)
    }

    #[inline]
    pub fn is_double_check(&self) -> bool {
        self.checks.len() > 1
    }
}

/// Detects checks and pins against `color`'s king placed on `king`.
///
/// `king` need not be where the king currently stands: friendly kings are
/// transparent, so a king step can be validated without touching the board.
pub fn detect(board: &Board, king: Square, color: Color) -> KingSafety {
    let mut safety = KingSafety::default();
    if board.is_barrier(king) {
        return safety;
    }

    for dir in Direction::ALL {
        let mut candidate: Option<Square> = None;
        let mut n = 1;
        while let Some(sq) = king.offset(dir, n) {
            let cell = board.cell(sq);
            if cell.barrier {
                break;
            }
            match cell.piece {
                None => {}
                Some(p) if p.color == color => {
                    if p.piece == Piece::King {
                        n += 1;
                        continue;
                    }
                    if candidate.is_some() {
                        break;
                    }
                    candidate = Some(sq);
                }
                Some(enemy) => {
                    if attacks_along(enemy, dir, n, color) {
                        match candidate {
                            None => safety.checks.push(Check {
                                square: sq,
                                direction: Some(dir),
                            }),
                            Some(pinned) => safety.pins.push(Pin {
                                square: pinned,
                                direction: dir,
                            }),
                        }
                    }
                    break;
                }
            }
            n += 1;
        }
    }

    for jump in Direction::KNIGHT {
        let Some(sq) = king.offset(jump, 1) else {
            continue;
        };
        let cell = board.cell(sq);
        if cell.barrier {
            continue;
        }
        if let Some(p) = cell.piece {
            if p.color != color && p.piece == Piece::Knight {
                safety.checks.push(Check {
                    square: sq,
                    direction: None,
                });
            }
        }
    }

    safety.in_check = !safety.checks.is_empty();
    safety
}

/// Whether `enemy`, found `distance` squares from the king along `dir`,
/// attacks back down the ray. `color` is the king's color.
fn attacks_along(enemy: PieceCode, dir: Direction, distance: i8, color: Color) -> bool {
    match enemy.piece {
        Piece::Rook => dir.is_orthogonal(),
        Piece::Bishop => dir.is_diagonal(),
        Piece::Queen => true,
        Piece::King => distance == 1,
        Piece::Pawn => distance == 1 && dir.is_diagonal() && dir.dr == color.pawn_direction(),
        Piece::Knight => false,
    }
}

/// Returns true if `color`'s king on `king` would be attacked.
#[inline]
pub fn is_attacked(board: &Board, king: Square, color: Color) -> bool {
    detect(board, king, color).in_check
}
