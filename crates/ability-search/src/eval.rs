//! Static evaluation.
//!
//! Scores are integers in tenths of a pawn: ten times the material balance
//! plus a placement bonus per piece. Positive favors White.

use ability_core::{Color, Piece, Square};
use ability_engine::Board;

/// Score of a side that has been mated.
pub const CHECKMATE: i32 = 10_000;

/// Material value in pawns. The king is not counted.
pub const fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 1,
        Piece::Knight => 3,
        Piece::Bishop => 3,
        Piece::Rook => 5,
        Piece::Queen => 10,
        Piece::King => 0,
    }
}

// Tables are laid out as seen from White's side of the board: the first
// row is the eighth rank.

const KNIGHT: [[i32; 8]; 8] = [
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 2, 2, 2, 2, 2, 2, 1],
    [1, 2, 3, 3, 3, 3, 2, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 2, 3, 3, 3, 3, 2, 1],
    [1, 2, 2, 2, 2, 2, 2, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
];

const BISHOP: [[i32; 8]; 8] = [
    [4, 3, 2, 1, 1, 2, 3, 4],
    [3, 4, 3, 2, 2, 3, 4, 3],
    [2, 3, 4, 3, 3, 4, 3, 2],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [2, 3, 4, 3, 3, 4, 3, 2],
    [3, 4, 3, 2, 2, 3, 4, 3],
    [4, 3, 2, 1, 1, 2, 3, 4],
];

const QUEEN: [[i32; 8]; 8] = [
    [1, 1, 1, 3, 1, 1, 1, 1],
    [1, 2, 3, 3, 3, 1, 1, 1],
    [1, 4, 3, 3, 3, 4, 2, 1],
    [1, 2, 3, 3, 3, 2, 2, 1],
    [1, 2, 3, 3, 3, 2, 2, 1],
    [1, 4, 3, 3, 3, 4, 2, 1],
    [1, 1, 2, 3, 3, 1, 1, 1],
    [1, 1, 1, 3, 1, 1, 1, 1],
];

const ROOK: [[i32; 8]; 8] = [
    [4, 3, 4, 4, 4, 4, 3, 4],
    [4, 4, 4, 4, 4, 4, 4, 4],
    [1, 1, 2, 3, 3, 2, 1, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 1, 2, 3, 3, 2, 1, 1],
    [4, 4, 4, 4, 4, 4, 4, 4],
    [4, 3, 4, 4, 4, 4, 3, 4],
];

const WHITE_PAWN: [[i32; 8]; 8] = [
    [8, 8, 8, 8, 8, 8, 8, 8],
    [8, 8, 8, 8, 8, 8, 8, 8],
    [5, 6, 6, 7, 7, 6, 6, 5],
    [2, 3, 3, 5, 5, 3, 3, 2],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 1, 2, 3, 3, 2, 1, 1],
    [1, 1, 1, 0, 0, 1, 1, 1],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const BLACK_PAWN: [[i32; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [1, 1, 1, 0, 0, 1, 1, 1],
    [1, 1, 2, 3, 3, 2, 1, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [2, 3, 3, 5, 5, 3, 3, 2],
    [5, 6, 6, 7, 7, 6, 6, 5],
    [8, 8, 8, 8, 8, 8, 8, 8],
    [8, 8, 8, 8, 8, 8, 8, 8],
];

/// Placement bonus for a piece on `sq`.
fn placement(piece: Piece, color: Color, sq: Square) -> i32 {
    let table = match (piece, color) {
        (Piece::Pawn, Color::White) => &WHITE_PAWN,
        (Piece::Pawn, Color::Black) => &BLACK_PAWN,
        (Piece::Knight, _) => &KNIGHT,
        (Piece::Bishop, _) => &BISHOP,
        (Piece::Rook, _) => &ROOK,
        (Piece::Queen, _) => &QUEEN,
        (Piece::King, _) => return 0,
    };
    table[7 - sq.row() as usize][sq.col() as usize]
}

/// Evaluates the board from White's point of view.
pub fn evaluate(board: &Board) -> i32 {
    board
        .pieces()
        .map(|(sq, p)| {
            p.color.sign() * (10 * piece_value(p.piece) + placement(p.piece, p.color, sq))
        })
        .sum()
}
