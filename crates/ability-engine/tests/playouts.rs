//! Property-based tests over random playouts from the variant start.

use ability_core::{Action, Color, Piece};
use ability_engine::{
    is_attacked, legal_moves, legal_orders, make_move, make_order, undo, Barrier, GameState,
};
use proptest::prelude::*;
use proptest::sample::Index;

/// Everything the side to move may submit: moves first, then orders.
fn actions(state: &GameState) -> Vec<Action> {
    let mut all: Vec<Action> = legal_moves(state)
        .as_slice()
        .iter()
        .copied()
        .map(Action::Move)
        .collect();
    all.extend(legal_orders(state).into_iter().map(Action::Order));
    all
}

fn apply(state: &mut GameState, action: Action) {
    match action {
        Action::Move(m) => make_move(state, m),
        Action::Order(o) => make_order(state, o),
    }
}

fn picks() -> impl Strategy<Value = Vec<Index>> {
    prop::collection::vec(any::<Index>(), 1..60)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: undoing every applied action restores the start exactly
    #[test]
    fn prop_apply_undo_restores_state(picks in picks()) {
        let mut state = GameState::variant_start();
        let initial = state.clone();
        let mut snapshots = Vec::new();

        for pick in &picks {
            let all = actions(&state);
            if all.is_empty() {
                break;
            }
            snapshots.push(state.clone());
            apply(&mut state, all[pick.index(all.len())]);
        }

        while let Some(expected) = snapshots.pop() {
            prop_assert!(undo(&mut state).is_some());
            prop_assert_eq!(&state, &expected);
        }
        prop_assert_eq!(state, initial);
    }

    /// Property: no applied action leaves the actor's king attacked
    #[test]
    fn prop_king_never_left_in_check(picks in picks()) {
        let mut state = GameState::variant_start();

        for pick in &picks {
            let all = actions(&state);
            if all.is_empty() {
                break;
            }
            let action = all[pick.index(all.len())];
            let mover = state.side_to_move();
            apply(&mut state, action);

            let king = state.king_square(mover);
            prop_assert!(
                !is_attacked(state.board(), king, mover),
                "{} left the {} king attacked", action, mover
            );
            if let Action::Order(_) = action {
                let other = mover.opposite();
                prop_assert!(!is_attacked(state.board(), state.king_square(other), other));
            }
        }
    }

    /// Property: both kings survive and stand where the state says
    #[test]
    fn prop_kings_are_never_captured(picks in picks()) {
        let mut state = GameState::variant_start();

        for pick in &picks {
            let all = actions(&state);
            if all.is_empty() {
                break;
            }
            apply(&mut state, all[pick.index(all.len())]);

            for color in Color::ALL {
                prop_assert_eq!(state.board().count(color, Piece::King), 1);
                prop_assert_eq!(state.board().find_king(color), Some(state.king_square(color)));
            }
        }
    }

    /// Property: the board's barrier flags mirror the active barrier
    #[test]
    fn prop_barrier_flags_match_state(picks in picks()) {
        let mut state = GameState::variant_start();

        for pick in &picks {
            let all = actions(&state);
            if all.is_empty() {
                break;
            }
            apply(&mut state, all[pick.index(all.len())]);

            let flagged = ability_core::Square::all()
                .filter(|&sq| state.board().is_barrier(sq))
                .count();
            match state.barrier() {
                Some(barrier) => {
                    prop_assert!(barrier.remaining() >= 1);
                    prop_assert!(barrier.remaining() <= Barrier::DURATION);
                    prop_assert_eq!(flagged, 4);
                    for sq in barrier.squares() {
                        prop_assert!(state.board().is_barrier(sq));
                    }
                }
                None => prop_assert_eq!(flagged, 0),
            }
        }
    }

    /// Property: querying moves and orders never changes the state
    #[test]
    fn prop_queries_are_pure(picks in picks()) {
        let mut state = GameState::variant_start();

        for pick in &picks {
            let before = state.clone();
            let all = actions(&state);
            prop_assert_eq!(&state, &before);
            if all.is_empty() {
                break;
            }
            apply(&mut state, all[pick.index(all.len())]);
        }
    }
}
