//! Move generation.
//!
//! Legal moves are produced in a fixed order: a row-major scan from a1 with
//! each piece's directions in [`Direction::ALL`] order, followed by a second
//! row-major pass that adds ability moves.

mod abilities;
mod attacks;
mod make;
mod orders;
pub mod perft;

use ability_core::{Color, Direction, Move, MoveFlag, Piece, PieceCode, Square};

use crate::{Board, GameState};

pub use attacks::{detect, is_attacked, Check, KingSafety, Pin};
pub use make::{make_move, make_order, undo};
pub use orders::legal_orders;

/// A list of generated moves.
#[derive(Clone, Default)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Typical upper bound on the number of moves in a position.
    pub const CAPACITY: usize = 64;

    /// Creates an empty move list.
    #[inline]
    pub fn new() -> Self {
        MoveList {
            moves: Vec::with_capacity(Self::CAPACITY),
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Mutable access, e.g. for shuffling during search.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        self.moves.retain(f);
    }

    /// Finds the move between two squares.
    pub fn find(&self, from: Square, to: Square) -> Option<Move> {
        self.moves
            .iter()
            .find(|m| m.from() == from && m.to() == to)
            .copied()
    }

    /// Returns true if a move between the two squares is listed.
    #[inline]
    pub fn contains(&self, from: Square, to: Square) -> bool {
        self.find(from, to).is_some()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates all legal moves for the side to move.
pub fn legal_moves(state: &GameState) -> MoveList {
    let color = state.side_to_move();
    let safety = state.safety();
    let king = state.king_square(color);
    let generator = Generator {
        board: state.board(),
        color,
        king,
        safety: &safety,
        en_passant: state.en_passant(),
        castling: state.castling(),
    };

    let mut moves = MoveList::new();

    if safety.is_double_check() {
        if let Some(piece) = state.board().piece_at(king) {
            generator.king_moves(king, piece, &mut moves);
        }
    } else {
        generator.all_moves(&mut moves);
        abilities::generate(state, &safety, &mut moves);
    }

    // The barrier comes down as this move lands, so the king must also be
    // safe on the open board.
    if let Some(barrier) = state.barrier().filter(|b| b.remaining() == 1) {
        let mut lifted = *state.board();
        for sq in barrier.squares() {
            lifted.set_barrier(sq, false);
        }
        moves.retain(|m| leaves_king_safe(&lifted, king, m));
    }
    moves
}

/// Returns true if playing `m` leaves its own king unattacked.
///
/// Works on a copy of the board, so it can be used for moves whose effect
/// the pin rules do not capture, such as jumps and wrapped rays.
pub(crate) fn leaves_king_safe(board: &Board, king: Square, m: &Move) -> bool {
    let color = m.piece().color;
    let mut scratch = *board;
    scratch.take_piece(m.from());
    if m.is_en_passant() {
        scratch.take_piece(Square::new(m.from().row(), m.to().col()));
    }
    scratch.set_piece(m.to(), Some(m.piece()));
    let row = color.back_row();
    match m.flag() {
        MoveFlag::CastleKingside => {
            scratch.relocate(Square::new(row, 7), Square::new(row, 5));
        }
        MoveFlag::CastleQueenside => {
            scratch.relocate(Square::new(row, 0), Square::new(row, 3));
        }
        _ => {}
    }
    let king = if m.piece().piece == Piece::King {
        m.to()
    } else {
        king
    };
    !is_attacked(&scratch, king, color)
}

/// Standard chess movement for one side, honoring pins and barriers.
struct Generator<'a> {
    board: &'a Board,
    color: Color,
    king: Square,
    safety: &'a KingSafety,
    en_passant: Option<Square>,
    castling: crate::CastlingRights,
}

impl Generator<'_> {
    /// Standard moves outside double check, with the single-check filter.
    fn all_moves(&self, moves: &mut MoveList) {
        for (from, piece) in self.board.pieces_of(self.color) {
            if self.board.is_barrier(from) {
                continue;
            }
            match piece.piece {
                Piece::Pawn => self.pawn_moves(from, piece, moves),
                Piece::Knight => self.knight_moves(from, piece, moves),
                Piece::Bishop => self.slider_moves(from, piece, &Direction::DIAGONAL, moves),
                Piece::Rook => self.slider_moves(from, piece, &Direction::ORTHOGONAL, moves),
                Piece::Queen => self.slider_moves(from, piece, &Direction::ALL, moves),
                Piece::King => self.king_moves(from, piece, moves),
            }
        }

        if let [check] = self.safety.checks.as_slice() {
            moves.retain(|m| {
                m.piece().piece == Piece::King
                    || m.is_en_passant()
                    || check.is_blocked_by(self.king, m.to())
            });
        }
    }

    /// The enemy piece on `sq` if it may be captured: not a king and not on
    /// a barrier.
    fn capturable(&self, sq: Square) -> Option<PieceCode> {
        capturable(self.board, sq, self.color)
    }

    fn allowed(&self, from: Square, dir: Direction) -> bool {
        self.safety
            .pin_on(from)
            .map_or(true, |pin| pin.is_parallel(dir))
    }

    fn pawn_moves(&self, from: Square, piece: PieceCode, moves: &mut MoveList) {
        let forward = Direction::new(self.color.pawn_direction(), 0);
        let promotion_row = self.color.promotion_row();
        let flag_for = |to: Square| {
            if to.row() == promotion_row {
                MoveFlag::Promotion
            } else {
                MoveFlag::Normal
            }
        };

        if self.allowed(from, forward) {
            if let Some(one) = from.offset(forward, 1) {
                if self.board.is_vacant(one) {
                    moves.push(Move::new(from, one, piece, None, flag_for(one)));
                    if from.row() == self.color.pawn_row() {
                        if let Some(two) = from.offset(forward, 2) {
                            if self.board.is_vacant(two) {
                                moves.push(Move::new(from, two, piece, None, MoveFlag::DoublePush));
                            }
                        }
                    }
                }
            }
        }

        for dc in [-1, 1] {
            let diagonal = Direction::new(self.color.pawn_direction(), dc);
            if !self.allowed(from, diagonal) {
                continue;
            }
            let Some(to) = from.offset(diagonal, 1) else {
                continue;
            };
            if let Some(target) = self.capturable(to) {
                moves.push(Move::new(from, to, piece, Some(target), flag_for(to)));
            } else if Some(to) == self.en_passant {
                self.en_passant_move(from, to, piece, moves);
            }
        }
    }

    fn en_passant_move(&self, from: Square, to: Square, piece: PieceCode, moves: &mut MoveList) {
        let captured_sq = Square::new(from.row(), to.col());
        let captured = self.board.cell(captured_sq);
        let Some(pawn) = captured.piece else {
            return;
        };
        if captured.barrier || !self.board.is_vacant(to) || !pawn.is(self.color.opposite(), Piece::Pawn)
        {
            return;
        }
        let m = Move::new(from, to, piece, Some(pawn), MoveFlag::EnPassant);
        // Removing both pawns from the rank can expose the king sideways.
        if leaves_king_safe(self.board, self.king, &m) {
            moves.push(m);
        }
    }

    fn knight_moves(&self, from: Square, piece: PieceCode, moves: &mut MoveList) {
        if self.safety.pin_on(from).is_some() {
            return;
        }
        for jump in Direction::KNIGHT {
            let Some(to) = from.offset(jump, 1) else {
                continue;
            };
            if self.board.is_vacant(to) {
                moves.push(Move::new(from, to, piece, None, MoveFlag::Normal));
            } else if let Some(target) = self.capturable(to) {
                moves.push(Move::new(from, to, piece, Some(target), MoveFlag::Normal));
            }
        }
    }

    fn slider_moves(
        &self,
        from: Square,
        piece: PieceCode,
        directions: &[Direction],
        moves: &mut MoveList,
    ) {
        for &dir in directions {
            if !self.allowed(from, dir) {
                continue;
            }
            let mut n = 1;
            while let Some(to) = from.offset(dir, n) {
                if self.board.is_vacant(to) {
                    moves.push(Move::new(from, to, piece, None, MoveFlag::Normal));
                    n += 1;
                    continue;
                }
                if let Some(target) = self.capturable(to) {
                    moves.push(Move::new(from, to, piece, Some(target), MoveFlag::Normal));
                }
                break;
            }
        }
    }

    fn king_moves(&self, from: Square, piece: PieceCode, moves: &mut MoveList) {
        for dir in Direction::ALL {
            let Some(to) = from.offset(dir, 1) else {
                continue;
            };
            let captured = if self.board.is_vacant(to) {
                None
            } else if let Some(target) = self.capturable(to) {
                Some(target)
            } else {
                continue;
            };
            if !is_attacked(self.board, to, self.color) {
                moves.push(Move::new(from, to, piece, captured, MoveFlag::Normal));
            }
        }
        self.castling_moves(from, piece, moves);
    }

    fn castling_moves(&self, from: Square, piece: PieceCode, moves: &mut MoveList) {
        let row = self.color.back_row();
        if self.safety.in_check || from != Square::new(row, 4) || self.board.is_barrier(from) {
            return;
        }
        if self.castling.can_castle_kingside(self.color) {
            self.try_castle(piece, 7, &[5, 6], &[5, 6], 6, MoveFlag::CastleKingside, moves);
        }
        if self.castling.can_castle_queenside(self.color) {
            self.try_castle(piece, 0, &[1, 2, 3], &[3, 2], 2, MoveFlag::CastleQueenside, moves);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn try_castle(
        &self,
        king: PieceCode,
        rook_col: u8,
        empty: &[u8],
        safe: &[u8],
        target_col: u8,
        flag: MoveFlag,
        moves: &mut MoveList,
    ) {
        let row = self.color.back_row();
        let rook = self.board.cell(Square::new(row, rook_col));
        match rook.piece {
            Some(p) if p.is(self.color, Piece::Rook) && !rook.barrier => {}
            _ => return,
        }
        if !empty.iter().all(|&c| self.board.is_vacant(Square::new(row, c))) {
            return;
        }
        if safe
            .iter()
            .any(|&c| is_attacked(self.board, Square::new(row, c), self.color))
        {
            return;
        }
        moves.push(Move::new(
            Square::new(row, 4),
            Square::new(row, target_col),
            king,
            None,
            flag,
        ));
    }
}

/// The piece on `sq` if `color` may capture it.
pub(crate) fn capturable(board: &Board, sq: Square, color: Color) -> Option<PieceCode> {
    let cell = board.cell(sq);
    if cell.barrier {
        return None;
    }
    cell.piece
        .filter(|p| p.color != color && p.piece != Piece::King)
}
