//! The 8x8 cell grid.

use ability_core::{Ability, Cell, Color, Piece, PieceCode, Square};
use std::fmt;

/// 64 cells indexed by [`Square::index`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; 64],
}

impl Board {
    /// A board with no pieces and no barrier.
    pub const fn empty() -> Self {
        Board {
            cells: [Cell::EMPTY; 64],
        }
    }

    #[inline]
    pub fn cell(&self, sq: Square) -> Cell {
        self.cells[sq.index() as usize]
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<PieceCode> {
        self.cells[sq.index() as usize].piece
    }

    #[inline]
    pub fn is_barrier(&self, sq: Square) -> bool {
        self.cells[sq.index() as usize].barrier
    }

    /// No piece and no barrier.
    #[inline]
    pub fn is_vacant(&self, sq: Square) -> bool {
        self.cells[sq.index() as usize].is_vacant()
    }

    /// Places or removes a piece, leaving the barrier flag untouched.
    #[inline]
    pub fn set_piece(&mut self, sq: Square, piece: Option<PieceCode>) {
        self.cells[sq.index() as usize].piece = piece;
    }

    /// Removes and returns the piece on `sq`.
    #[inline]
    pub fn take_piece(&mut self, sq: Square) -> Option<PieceCode> {
        self.cells[sq.index() as usize].piece.take()
    }

    #[inline]
    pub fn set_barrier(&mut self, sq: Square, barrier: bool) {
        self.cells[sq.index() as usize].barrier = barrier;
    }

    /// Moves whatever stands on `from` to `to`, returning what stood on `to`.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<PieceCode> {
        let piece = self.take_piece(from);
        let replaced = self.piece_at(to);
        self.set_piece(to, piece);
        replaced
    }

    /// Iterates occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, PieceCode)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Iterates the squares holding pieces of `color`, row-major.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, PieceCode)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Finds the square of `color`'s king.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.piece == Piece::King)
            .map(|(sq, _)| sq)
    }

    /// Finds the piece of `color` carrying `ability`.
    pub fn find_ability(&self, color: Color, ability: Ability) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.ability == Some(ability))
            .map(|(sq, _)| sq)
    }

    /// Counts the pieces of a kind and color.
    pub fn count(&self, color: Color, piece: Piece) -> usize {
        self.pieces_of(color).filter(|(_, p)| p.piece == piece).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

/// Prints the board with rank 8 on top; barriered squares are shown in
/// brackets.
impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..8u8).rev() {
            for col in 0..8u8 {
                let cell = self.cell(Square::new(row, col));
                let c = cell
                    .piece
                    .map(|p| p.piece.to_fen_char(p.color))
                    .unwrap_or('.');
                if cell.barrier {
                    write!(f, "[{}]", c)?;
                } else {
                    write!(f, " {} ", c)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn empty_board() {
        let board = Board::empty();
        assert_eq!(board.pieces().count(), 0);
        assert!(board.is_vacant(sq("e4")));
        assert_eq!(board.find_king(Color::White), None);
    }

    #[test]
    fn relocate_returns_replaced_piece() {
        let mut board = Board::empty();
        let rook = PieceCode::new(Color::White, Piece::Rook);
        let knight = PieceCode::new(Color::Black, Piece::Knight);
        board.set_piece(sq("a1"), Some(rook));
        board.set_piece(sq("a5"), Some(knight));

        assert_eq!(board.relocate(sq("a1"), sq("a5")), Some(knight));
        assert_eq!(board.piece_at(sq("a5")), Some(rook));
        assert_eq!(board.piece_at(sq("a1")), None);
    }

    #[test]
    fn barrier_is_independent_of_piece() {
        let mut board = Board::empty();
        board.set_barrier(sq("c3"), true);
        assert!(!board.is_vacant(sq("c3")));
        assert_eq!(board.piece_at(sq("c3")), None);

        board.set_piece(sq("c3"), Some(PieceCode::new(Color::White, Piece::Pawn)));
        board.take_piece(sq("c3"));
        assert!(board.is_barrier(sq("c3")));
    }

    #[test]
    fn find_ability_piece() {
        let mut board = Board::empty();
        board.set_piece(sq("h1"), Some(PieceCode::new(Color::White, Piece::Rook)));
        board.set_piece(
            sq("a1"),
            Some(PieceCode::with_ability(Color::White, Piece::Rook, Ability::Kanon)),
        );
        assert_eq!(board.find_ability(Color::White, Ability::Kanon), Some(sq("a1")));
        assert_eq!(board.find_ability(Color::Black, Ability::Kanon), None);
        assert_eq!(board.count(Color::White, Piece::Rook), 2);
    }
}
