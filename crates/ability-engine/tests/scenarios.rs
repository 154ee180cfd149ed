//! Rule scenarios played through the public API.

use ability_core::{Ability, Color, Square};
use ability_engine::{
    is_attacked, legal_moves, legal_orders, make_move, make_order, undo, AbilityChess, GameState,
    GameStatus, RuleSet,
};

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

fn state(fen: &str) -> GameState {
    GameState::from_fen(fen).unwrap_or_else(|e| panic!("bad FEN {fen}: {e}"))
}

fn play(state: &mut GameState, coords: &str) {
    let m = legal_moves(state)
        .find(sq(&coords[0..2]), sq(&coords[2..4]))
        .unwrap_or_else(|| panic!("{coords} is not legal"));
    make_move(state, m);
}

fn order_notations(state: &GameState) -> Vec<String> {
    legal_orders(state).iter().map(|o| o.notation()).collect()
}

#[test]
fn double_check_allows_only_king_moves() {
    // rook on the e-file and bishop on the a5-e1 diagonal both hit e1
    let state = state("k3r3/8/8/8/Rb6/8/8/4K3 w - - 0 1");
    let moves = legal_moves(&state);
    assert!(moves.as_slice().iter().all(|m| m.from() == sq("e1")));
    let mut coords: Vec<String> = moves.as_slice().iter().map(|m| m.coords()).collect();
    coords.sort();
    assert_eq!(coords, ["e1d1", "e1f1", "e1f2"]);
}

#[test]
fn discovered_and_knight_check_leave_only_the_king() {
    // the knight on e4 screens the rook; stepping to d6 checks from both
    let mut state = state("3qkb2/8/8/8/4N3/8/8/4R2K w - - 0 1");
    play(&mut state, "e4d6");

    let safety = state.safety();
    assert!(safety.is_double_check());
    assert_eq!(safety.checks.len(), 2);

    // the queen could take the knight and the bishop could block on e7,
    // but neither answers both checks
    let moves = legal_moves(&state);
    let coords: Vec<String> = moves.as_slice().iter().map(|m| m.coords()).collect();
    assert_eq!(coords, ["e8d7"]);
}

#[test]
fn en_passant_rank_pin() {
    // taking on d6 would clear both pawns off the fifth rank
    let state = state("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
    let moves = legal_moves(&state);
    assert!(!moves.contains(sq("e5"), sq("d6")));
    assert!(moves.contains(sq("e5"), sq("e6")));
}

#[test]
fn en_passant_allowed_without_pin() {
    let state = state("8/8/8/3pP3/8/8/8/K6k w - d6 0 1");
    let m = legal_moves(&state).find(sq("e5"), sq("d6")).unwrap();
    assert!(m.is_en_passant());
}

#[test]
fn castling_through_attacked_square_is_illegal() {
    // the rook on f8 watches f1
    let state = state("4kr2/8/8/8/8/8/8/4K2R w K - 0 1");
    assert!(!legal_moves(&state).contains(sq("e1"), sq("g1")));
}

#[test]
fn barrier_shields_checked_king() {
    let mut state = state("4k3/8/8/8/8/8/8/r3K1N[furniture]1 w - - 0 1");
    assert!(state.is_check());
    assert_eq!(
        order_notations(&state),
        [
            "Furniture:g1a1",
            "Furniture:g1b1",
            "Furniture:g1c1",
            "Furniture:g1d1",
            "Furniture:g1e1",
        ]
    );

    let order = legal_orders(&state)
        .into_iter()
        .find(|o| o.to() == sq("c1"))
        .unwrap();
    make_order(&mut state, order);
    assert!(!state.is_check());
    assert_eq!(state.side_to_move(), Color::White);
    // the rook on a1 is now walled in along the first rank
    assert!(!state.board().is_vacant(sq("d1")));
}

#[test]
fn barrier_blocks_movement_until_it_lapses() {
    let mut state = state("4k3/8/8/8/8/8/8/R3K1N[furniture]1 w - - 0 1");
    let order = legal_orders(&state)
        .into_iter()
        .find(|o| o.to() == sq("c1"))
        .unwrap();
    make_order(&mut state, order);

    let moves = legal_moves(&state);
    assert!(moves.contains(sq("a1"), sq("b1")));
    assert!(!moves.contains(sq("a1"), sq("c1")));
    assert!(!moves.contains(sq("e1"), sq("d1")));

    for (i, coords) in ["a1a2", "e8e7", "a2a1", "e7e8"].into_iter().enumerate() {
        assert_eq!(
            state.barrier().map(|b| b.remaining()),
            Some(4 - i as u8),
            "before {coords}"
        );
        play(&mut state, coords);
    }

    assert!(state.barrier().is_none());
    for s in ["c1", "d1", "c2", "d2"] {
        assert!(!state.board().is_barrier(sq(s)));
    }
    assert!(legal_moves(&state).contains(sq("a1"), sq("d1")));
    // the one barrier White had is spent
    assert!(legal_orders(&state).is_empty());
}

#[test]
fn lapsing_barrier_is_seen_by_the_mover() {
    // the barrier on d4-e5 is all that stands between the e8 rook and e1
    let mut state = state("n[furniture]3r2k/8/8/8/8/8/4B3/4K3 b - - 0 1");
    let order = legal_orders(&state)
        .into_iter()
        .find(|o| o.to() == sq("d4"))
        .unwrap();
    make_order(&mut state, order);
    for coords in ["h8g8", "e2d3", "g8h8"] {
        play(&mut state, coords);
    }
    assert_eq!(state.barrier().map(|b| b.remaining()), Some(1));
    assert!(!state.is_check());

    let moves = legal_moves(&state);
    let mut coords: Vec<String> = moves.as_slice().iter().map(|m| m.coords()).collect();
    coords.sort();
    assert_eq!(coords, ["d3e2", "e1d1", "e1d2", "e1f1", "e1f2"]);

    for &m in &moves {
        make_move(&mut state, m);
        assert!(state.barrier().is_none());
        assert!(
            !is_attacked(state.board(), state.king_square(Color::White), Color::White),
            "{} leaves the king open",
            m.coords()
        );
        undo(&mut state);
    }
}

#[test]
fn kraus_order_is_single_use() {
    let mut state = state("4k3/8/8/8/8/3r4/3P[kraus]4/K7 w - - 0 1");
    let start = state.clone();
    assert_eq!(order_notations(&state), ["Kraus:d2d3"]);

    let push = legal_orders(&state)[0];
    make_order(&mut state, push);
    assert!(!state.order_available(Color::White, Ability::Kraus));
    play(&mut state, "a1a2");
    play(&mut state, "d4d3");

    // the rook is back in front of the pawn but the push is spent
    assert!(legal_orders(&state).is_empty());

    for _ in 0..3 {
        assert!(undo(&mut state).is_some());
    }
    assert_eq!(state, start);
    assert_eq!(order_notations(&state), ["Kraus:d2d3"]);
}

#[test]
fn ability_moves_follow_standard_moves() {
    let state = GameState::variant_start();
    let moves = legal_moves(&state);
    assert_eq!(moves.len(), 24);
    let tail: Vec<String> = moves.as_slice()[20..].iter().map(|m| m.coords()).collect();
    // Akasaka wraps south from d1 before the Okonogi pawn on e2 is reached
    assert_eq!(tail, ["d1d8", "d1c8", "e2d3", "e2f3"]);
}

#[test]
fn fools_mate_with_abilities_still_mates() {
    let mut state = GameState::variant_start();
    for coords in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        play(&mut state, coords);
    }
    assert!(state.is_check());
    // White still holds an unused barrier order, and a barrier on g3 or f2
    // blocks the diagonal
    assert!(!legal_orders(&state).is_empty());
    assert_eq!(AbilityChess.status(&state), GameStatus::Ongoing);
}

#[test]
fn checkmate_when_nothing_remains() {
    let mut state = GameState::classic_start();
    for coords in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        play(&mut state, coords);
    }
    assert!(legal_moves(&state).is_empty());
    assert!(legal_orders(&state).is_empty());
    assert_eq!(
        AbilityChess.status(&state),
        GameStatus::Checkmate {
            winner: Color::Black
        }
    );
}
