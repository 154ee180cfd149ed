//! One-shot orders.
//!
//! Querying orders never mutates the state. Orders are applied with
//! [`make_order`](super::make_order) and reverted by the generic
//! [`undo`](super::undo). An order leaves the turn with the same side.

use ability_core::{Ability, Color, Direction, Order, Piece, PieceCode, Square};

use super::is_attacked;
use crate::{Barrier, Board, GameState};

/// Generates all orders available to the side to move.
///
/// Orders after which either king would stand in check are not offered.
pub fn legal_orders(state: &GameState) -> Vec<Order> {
    let color = state.side_to_move();
    let board = state.board();
    let mut orders = Vec::new();

    for (from, piece) in board.pieces_of(color) {
        let Some(ability) = piece.ability else {
            continue;
        };
        if !ability.is_order() || !state.order_available(color, ability) || board.is_barrier(from)
        {
            continue;
        }
        match ability {
            Ability::Kraus => {
                if let Some(order) = kraus(state, from, piece) {
                    orders.push(order);
                }
            }
            Ability::ShanonFurniture => {
                if state.barrier().is_none() {
                    barriers(state, from, piece, &mut orders);
                }
            }
            _ => {}
        }
    }

    orders
}

/// Square a Kraus push sends the target to.
pub(crate) fn kraus_landing(order: &Order) -> Option<Square> {
    let forward = Direction::new(order.piece().color.pawn_direction(), 0);
    order.from().offset(forward, 2)
}

fn kraus(state: &GameState, from: Square, piece: PieceCode) -> Option<Order> {
    let board = state.board();
    let forward = Direction::new(piece.color.pawn_direction(), 0);
    let front = from.offset(forward, 1)?;
    let landing = from.offset(forward, 2)?;

    let target = board.cell(front);
    let pushed = target.piece?;
    if target.barrier
        || pushed.color == piece.color
        || pushed.piece == Piece::King
        || !board.is_vacant(landing)
    {
        return None;
    }

    let mut scratch = *board;
    scratch.relocate(front, landing);
    kings_safe(state, &scratch).then(|| Order::new(from, front, piece, target, Ability::Kraus))
}

fn barriers(state: &GameState, from: Square, piece: PieceCode, orders: &mut Vec<Order>) {
    let board = state.board();
    for row in 0..7 {
        for col in 0..7 {
            let corner = Square::new(row, col);
            let Some(barrier) = Barrier::at(corner, piece.color) else {
                continue;
            };
            let mut scratch = *board;
            for sq in barrier.squares() {
                scratch.set_barrier(sq, true);
            }
            if kings_safe(state, &scratch) {
                orders.push(Order::new(
                    from,
                    corner,
                    piece,
                    board.cell(corner),
                    Ability::ShanonFurniture,
                ));
            }
        }
    }
}

fn kings_safe(state: &GameState, board: &Board) -> bool {
    Color::ALL
        .iter()
        .all(|&c| !is_attacked(board, state.king_square(c), c))
}
