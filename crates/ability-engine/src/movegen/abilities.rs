//! Moves granted by abilities.
//!
//! Ability moves are appended after all standard moves, in a second
//! row-major pass. A move whose squares already appear in the list is not
//! added twice, and every candidate is checked against the mover's king on a
//! scratch board before it is accepted.

use ability_core::{Ability, Color, Direction, Move, MoveFlag, MoveOrigin, PieceCode, Square};

use super::{capturable, leaves_king_safe, KingSafety, MoveList};
use crate::{Board, GameState};

pub(super) fn generate(state: &GameState, safety: &KingSafety, moves: &mut MoveList) {
    let color = state.side_to_move();
    let board = state.board();
    let king = state.king_square(color);
    let mut candidates = Vec::new();

    for (from, piece) in board.pieces_of(color) {
        let Some(ability) = piece.ability else {
            continue;
        };
        if board.is_barrier(from) {
            continue;
        }

        candidates.clear();
        match ability {
            Ability::Okonogi => okonogi(board, from, piece, &mut candidates),
            Ability::Kanon | Ability::Shanon => {
                if let Some(package) = state.package(color, ability) {
                    redeem(board, from, piece, ability, package.targets(), safety, &mut candidates);
                }
            }
            Ability::Akasaka => akasaka(board, from, piece, &mut candidates),
            Ability::Kraus | Ability::ShanonFurniture => {}
        }

        for m in candidates.drain(..) {
            if !moves.contains(m.from(), m.to()) && leaves_king_safe(board, king, &m) {
                moves.push(m);
            }
        }
    }
}

/// Diagonal step forward onto an empty square, without capturing.
fn okonogi(board: &Board, from: Square, piece: PieceCode, out: &mut Vec<Move>) {
    let color = piece.color;
    for dc in [-1, 1] {
        let Some(to) = from.offset(Direction::new(color.pawn_direction(), dc), 1) else {
            continue;
        };
        if !board.is_vacant(to) {
            continue;
        }
        let flag = if to.row() == color.promotion_row() {
            MoveFlag::Promotion
        } else {
            MoveFlag::Normal
        };
        out.push(
            Move::new(from, to, piece, None, flag)
                .with_origin(MoveOrigin::Ability(Ability::Okonogi)),
        );
    }
}

/// Captures on recorded squares now holding enemy pieces. A pinned rook may
/// only take along its pin axis.
fn redeem(
    board: &Board,
    from: Square,
    piece: PieceCode,
    ability: Ability,
    targets: impl Iterator<Item = Square>,
    safety: &KingSafety,
    out: &mut Vec<Move>,
) {
    let pin = safety.pin_on(from);
    for to in targets {
        let Some(target) = capturable(board, to, piece.color) else {
            continue;
        };
        if let Some(axis) = pin {
            if !from.direction_to(to).is_some_and(|d| d.is_parallel(axis)) {
                continue;
            }
        }
        out.push(
            Move::new(from, to, piece, Some(target), MoveFlag::Normal)
                .with_origin(MoveOrigin::Ability(ability)),
        );
    }
}

/// Queen rays on a torus. Only squares reached after wrapping past an edge
/// are produced; the unwrapped part of each ray is ordinary queen movement.
fn akasaka(board: &Board, from: Square, piece: PieceCode, out: &mut Vec<Move>) {
    for dir in Direction::ALL {
        for n in 1..8 {
            let (to, crossed) = from.wrapping_offset(dir, n);
            if to == from {
                break;
            }
            let cell = board.cell(to);
            if cell.barrier {
                break;
            }
            match cell.piece {
                None => {
                    if crossed {
                        out.push(akasaka_move(from, to, piece, None));
                    }
                }
                Some(p) => {
                    if crossed && capturable(board, to, piece.color).is_some() {
                        out.push(akasaka_move(from, to, piece, Some(p)));
                    }
                    break;
                }
            }
        }
    }
}

fn akasaka_move(from: Square, to: Square, piece: PieceCode, captured: Option<PieceCode>) -> Move {
    Move::new(from, to, piece, captured, MoveFlag::Normal)
        .with_origin(MoveOrigin::Ability(Ability::Akasaka))
}

/// Scans the four rook rays from `from` and records, per ray, the first
/// piece if it belongs to `target`. Rays stop at barriers.
pub(crate) fn package_scan(board: &Board, from: Square, target: Color) -> Vec<Square> {
    let mut found = Vec::with_capacity(4);
    for dir in Direction::ORTHOGONAL {
        let mut n = 1;
        while let Some(sq) = from.offset(dir, n) {
            let cell = board.cell(sq);
            if cell.barrier {
                break;
            }
            if let Some(p) = cell.piece {
                if p.color == target {
                    found.push(sq);
                }
                break;
            }
            n += 1;
        }
    }
    found
}
