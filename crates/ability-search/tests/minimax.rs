//! Alpha-beta must agree with a plain exhaustive minimax.

use ability_engine::{legal_moves, make_move, undo, GameState};
use ability_search::{evaluate, SearchConfig, Searcher, CHECKMATE};
use proptest::prelude::*;
use proptest::sample::Index;

/// Full-width negamax without pruning or shuffling.
fn minimax(state: &mut GameState, depth: u8) -> i32 {
    let moves = legal_moves(state);
    if moves.is_empty() {
        return if state.is_check() { -CHECKMATE } else { 0 };
    }
    if depth == 0 {
        return state.side_to_move().sign() * evaluate(state.board());
    }
    let mut best = i32::MIN;
    for &m in &moves {
        make_move(state, m);
        best = best.max(-minimax(state, depth - 1));
        undo(state);
    }
    best
}

fn fixed(depth: u8) -> SearchConfig {
    SearchConfig {
        depth,
        randomize: false,
        seed: None,
    }
}

fn check_agreement(state: &GameState, depth: u8) {
    let mut scratch = state.clone();
    let outcome = Searcher::new(&fixed(depth))
        .search(&mut scratch)
        .expect("position has moves");
    assert_eq!(scratch, *state);

    let mut exhaustive = state.clone();
    assert_eq!(outcome.score, minimax(&mut exhaustive, depth));

    // the chosen move is worth exactly the reported score
    make_move(&mut exhaustive, outcome.best);
    assert_eq!(-minimax(&mut exhaustive, depth - 1), outcome.score);
}

#[test]
fn depth_three_matches_minimax() {
    let state = GameState::from_fen("4k3/3p4/8/8/8/2N5/3Q4/4K3 w - - 0 1").unwrap();
    check_agreement(&state, 3);
}

#[test]
fn depth_three_matches_minimax_for_black() {
    let state = GameState::from_fen("4k3/3p4/2n5/8/8/8/3R4/4K3 b - - 0 1").unwrap();
    check_agreement(&state, 3);
}

#[test]
fn shuffling_does_not_change_the_score() {
    let state = GameState::from_fen("4k3/3p4/8/8/8/2N5/3Q4/4K3 w - - 0 1").unwrap();
    let exact = Searcher::new(&fixed(3))
        .search(&mut state.clone())
        .unwrap()
        .score;
    for seed in 0..4 {
        let config = SearchConfig {
            depth: 3,
            randomize: true,
            seed: Some(seed),
        };
        let outcome = Searcher::new(&config).search(&mut state.clone()).unwrap();
        assert_eq!(outcome.score, exact);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Property: pruning never changes the root score on variant positions
    #[test]
    fn prop_alpha_beta_matches_minimax(picks in prop::collection::vec(any::<Index>(), 0..12)) {
        let mut state = GameState::variant_start();
        for pick in &picks {
            let moves = legal_moves(&state);
            if moves.is_empty() {
                break;
            }
            make_move(&mut state, moves[pick.index(moves.len())]);
        }
        prop_assume!(!legal_moves(&state).is_empty());

        let outcome = Searcher::new(&fixed(2)).search(&mut state.clone()).unwrap();
        prop_assert_eq!(outcome.score, minimax(&mut state.clone(), 2));
    }
}
