//! Applying and undoing actions in place.
//!
//! Every applied move or order pushes exactly one undo record; [`undo`] pops
//! it and restores the state field by field.

use ability_core::{Ability, Action, Color, Move, MoveFlag, Order, Piece, PieceCode, Square};

use super::abilities::package_scan;
use super::orders::kraus_landing;
use crate::state::{order_slot, package_slot, UndoRecord};
use crate::{Barrier, GameState, Package};

/// Applies a legal move.
///
/// The move must come from [`legal_moves`](super::legal_moves) for this
/// state; anything else corrupts the state.
pub fn make_move(state: &mut GameState, m: Move) {
    let color = m.piece().color;
    debug_assert_eq!(color, state.side_to_move);
    debug_assert_eq!(state.board.piece_at(m.from()), Some(m.piece()));

    let mut record = snapshot(state, Action::Move(m));

    // Packages are recorded from the position the mover leaves behind.
    for ability in [Ability::Kanon, Ability::Shanon] {
        let Some(slot) = package_slot(ability) else {
            continue;
        };
        let target = match ability {
            Ability::Kanon => color.opposite(),
            _ => color,
        };
        state.packages[color.index()][slot] = state
            .board
            .find_ability(color, ability)
            .and_then(|rook| Package::from_targets(package_scan(&state.board, rook, target)));
    }

    let piece = state.board.take_piece(m.from());
    let captured_sq = if m.is_en_passant() {
        Square::new(m.from().row(), m.to().col())
    } else {
        m.to()
    };
    record.captured = state
        .board
        .take_piece(captured_sq)
        .map(|captured| (captured_sq, captured));

    let placed = if m.is_promotion() {
        Some(PieceCode::new(color, Piece::Queen))
    } else {
        piece
    };
    state.board.set_piece(m.to(), placed);

    match m.flag() {
        MoveFlag::CastleKingside => {
            let row = color.back_row();
            state.board.relocate(Square::new(row, 7), Square::new(row, 5));
        }
        MoveFlag::CastleQueenside => {
            let row = color.back_row();
            state.board.relocate(Square::new(row, 0), Square::new(row, 3));
        }
        _ => {}
    }

    if m.piece().piece == Piece::King {
        state.kings[color.index()] = m.to();
        state.castling.remove_color(color);
    }
    state.castling.revoke_corner(m.from());
    state.castling.revoke_corner(m.to());

    state.en_passant = if m.flag() == MoveFlag::DoublePush {
        Some(Square::new(
            (m.from().row() + m.to().row()) / 2,
            m.from().col(),
        ))
    } else {
        None
    };

    if let Some(barrier) = state.barrier.take() {
        match barrier.tick() {
            Some(next) => state.barrier = Some(next),
            None => {
                for sq in barrier.squares() {
                    state.board.set_barrier(sq, false);
                }
            }
        }
    }

    if m.piece().piece == Piece::Pawn || record.captured.is_some() {
        state.halfmove_clock = 0;
    } else {
        state.halfmove_clock = state.halfmove_clock.saturating_add(1);
    }
    if color == Color::Black {
        state.fullmove_number = state.fullmove_number.saturating_add(1);
    }
    state.side_to_move = color.opposite();
    state.history.push(record);
}

/// Applies a legal order. The side to move does not change.
///
/// The order must come from [`legal_orders`](super::legal_orders) for this
/// state.
pub fn make_order(state: &mut GameState, order: Order) {
    let color = order.piece().color;
    debug_assert_eq!(color, state.side_to_move);
    debug_assert!(state.order_available(color, order.ability()));

    let record = snapshot(state, Action::Order(order));

    match order.ability() {
        Ability::Kraus => {
            if let Some(landing) = kraus_landing(&order) {
                state.board.relocate(order.to(), landing);
            }
        }
        Ability::ShanonFurniture => {
            if let Some(barrier) = Barrier::at(order.to(), color) {
                for sq in barrier.squares() {
                    state.board.set_barrier(sq, true);
                }
                state.barrier = Some(barrier);
            }
        }
        Ability::Okonogi | Ability::Kanon | Ability::Shanon | Ability::Akasaka => {}
    }

    if let Some(slot) = order_slot(order.ability()) {
        state.orders[color.index()][slot] = false;
    }
    state.history.push(record);
}

/// Reverts the most recent action and returns it. Does nothing on an empty
/// history.
pub fn undo(state: &mut GameState) -> Option<Action> {
    let record = state.history.pop()?;

    if let Some(current) = state.barrier {
        for sq in current.squares() {
            state.board.set_barrier(sq, false);
        }
    }
    if let Some(previous) = record.barrier {
        for sq in previous.squares() {
            state.board.set_barrier(sq, true);
        }
    }

    match record.action {
        Action::Move(m) => {
            let color = m.piece().color;
            state.board.set_piece(m.to(), None);
            state.board.set_piece(m.from(), Some(m.piece()));
            if let Some((sq, piece)) = record.captured {
                state.board.set_piece(sq, Some(piece));
            }
            match m.flag() {
                MoveFlag::CastleKingside => {
                    let row = color.back_row();
                    state.board.relocate(Square::new(row, 5), Square::new(row, 7));
                }
                MoveFlag::CastleQueenside => {
                    let row = color.back_row();
                    state.board.relocate(Square::new(row, 3), Square::new(row, 0));
                }
                _ => {}
            }
            if m.piece().piece == Piece::King {
                state.kings[color.index()] = m.from();
            }
            state.side_to_move = color;
        }
        Action::Order(order) => {
            if order.ability() == Ability::Kraus {
                if let Some(landing) = kraus_landing(&order) {
                    state.board.relocate(landing, order.to());
                }
            }
        }
    }

    state.en_passant = record.en_passant;
    state.castling = record.castling;
    state.packages = record.packages;
    state.orders = record.orders;
    state.barrier = record.barrier;
    state.halfmove_clock = record.halfmove_clock;
    state.fullmove_number = record.fullmove_number;

    Some(record.action)
}

fn snapshot(state: &GameState, action: Action) -> UndoRecord {
    UndoRecord {
        action,
        captured: None,
        en_passant: state.en_passant,
        castling: state.castling,
        packages: state.packages,
        orders: state.orders,
        barrier: state.barrier,
        halfmove_clock: state.halfmove_clock,
        fullmove_number: state.fullmove_number,
    }
}
