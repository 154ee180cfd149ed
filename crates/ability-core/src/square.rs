//! Board squares and compass directions.

use std::fmt;

/// A square on the 8x8 board, addressed by (row, col).
///
/// Row 0 is White's back rank (rank 1) and column 0 is the a-file, so the
/// index `row * 8 + col` runs a1 = 0, b1 = 1, ..., h8 = 63.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from row and column.
    ///
    /// Both coordinates must be in 0-7.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8);
        Square(row * 8 + col)
    }

    /// Creates a square from signed coordinates, or `None` when off the board.
    #[inline]
    pub const fn at(row: i8, col: i8) -> Option<Self> {
        if row >= 0 && row < 8 && col >= 0 && col < 8 {
            Some(Square((row as u8) * 8 + col as u8))
        } else {
            None
        }
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Some(Square::new(rank - b'1', file - b'a'))
    }

    /// Iterates all 64 squares in row-major order (a1, b1, ..., h8).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    /// Steps `n` times in `dir`, or `None` when that leaves the board.
    #[inline]
    pub const fn offset(self, dir: Direction, n: i8) -> Option<Self> {
        Square::at(self.row() as i8 + dir.dr * n, self.col() as i8 + dir.dc * n)
    }

    /// Steps `n` times in `dir` on a torus: rows and columns wrap modulo 8.
    ///
    /// The flag is true when the walk crossed at least one board edge.
    pub fn wrapping_offset(self, dir: Direction, n: i8) -> (Self, bool) {
        let row = self.row() as i8 + dir.dr * n;
        let col = self.col() as i8 + dir.dc * n;
        let crossed = !(0..8).contains(&row) || !(0..8).contains(&col);
        let sq = Square::new(row.rem_euclid(8) as u8, col.rem_euclid(8) as u8);
        (sq, crossed)
    }

    /// Unit direction from `self` towards `other` if both share a row,
    /// column or diagonal.
    pub fn direction_to(self, other: Square) -> Option<Direction> {
        if self == other {
            return None;
        }
        let dr = other.row() as i8 - self.row() as i8;
        let dc = other.col() as i8 - self.col() as i8;
        if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
            return None;
        }
        Some(Direction::new(dr.signum(), dc.signum()))
    }

    /// The file letter ('a'-'h').
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.col()) as char
    }

    /// The rank digit ('1'-'8').
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'1' + self.row()) as char
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }

    // Common squares
    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

/// A step on the board as (row delta, column delta).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub dr: i8,
    pub dc: i8,
}

impl Direction {
    pub const NORTH: Direction = Direction::new(1, 0);
    pub const SOUTH: Direction = Direction::new(-1, 0);
    pub const EAST: Direction = Direction::new(0, 1);
    pub const WEST: Direction = Direction::new(0, -1);
    pub const NORTH_EAST: Direction = Direction::new(1, 1);
    pub const NORTH_WEST: Direction = Direction::new(1, -1);
    pub const SOUTH_EAST: Direction = Direction::new(-1, 1);
    pub const SOUTH_WEST: Direction = Direction::new(-1, -1);

    /// Rook directions.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::NORTH,
        Direction::WEST,
        Direction::SOUTH,
        Direction::EAST,
    ];

    /// Bishop directions.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NORTH_WEST,
        Direction::NORTH_EAST,
        Direction::SOUTH_EAST,
        Direction::SOUTH_WEST,
    ];

    /// Orthogonal directions first, then diagonals.
    pub const ALL: [Direction; 8] = [
        Direction::NORTH,
        Direction::WEST,
        Direction::SOUTH,
        Direction::EAST,
        Direction::NORTH_WEST,
        Direction::NORTH_EAST,
        Direction::SOUTH_EAST,
        Direction::SOUTH_WEST,
    ];

    /// Knight jumps.
    pub const KNIGHT: [Direction; 8] = [
        Direction::new(2, -1),
        Direction::new(2, 1),
        Direction::new(1, -2),
        Direction::new(1, 2),
        Direction::new(-1, -2),
        Direction::new(-1, 2),
        Direction::new(-2, -1),
        Direction::new(-2, 1),
    ];

    #[inline]
    pub const fn new(dr: i8, dc: i8) -> Self {
        Direction { dr, dc }
    }

    #[inline]
    pub const fn reverse(self) -> Self {
        Direction::new(-self.dr, -self.dc)
    }

    #[inline]
    pub const fn is_orthogonal(self) -> bool {
        (self.dr == 0) != (self.dc == 0)
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self.dr != 0 && self.dc != 0 && (self.dr == self.dc || self.dr == -self.dc)
    }

    /// True if `other` runs along the same line, in either sense.
    #[inline]
    pub fn is_parallel(self, other: Direction) -> bool {
        self == other || self == other.reverse()
    }
}
