//! Move, order and action representation.

use crate::{Ability, Cell, PieceCode, Square};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Flags for special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Normal move (no special action).
    Normal = 0,
    /// Pawn double push from its starting row.
    DoublePush = 1,
    /// Kingside castling (O-O).
    CastleKingside = 2,
    /// Queenside castling (O-O-O).
    CastleQueenside = 3,
    /// En passant capture.
    EnPassant = 4,
    /// Pawn promotion. Pawns always promote to a queen.
    Promotion = 5,
}

impl MoveFlag {
    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

/// Which generator produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOrigin {
    /// Ordinary chess movement.
    Standard,
    /// Granted by the moving piece's ability.
    Ability(Ability),
}

/// A move between two squares.
///
/// Carries the moved and captured pieces so it can be applied, undone and
/// rendered without looking at the board. Two moves are equal when their
/// start and end squares are equal; flags, pieces and origin are ignored.
#[derive(Clone, Copy)]
pub struct Move {
    from: Square,
    to: Square,
    piece: PieceCode,
    captured: Option<PieceCode>,
    flag: MoveFlag,
    origin: MoveOrigin,
}

impl Move {
    /// Creates a standard move.
    #[inline]
    pub const fn new(
        from: Square,
        to: Square,
        piece: PieceCode,
        captured: Option<PieceCode>,
        flag: MoveFlag,
    ) -> Self {
        Move {
            from,
            to,
            piece,
            captured,
            flag,
            origin: MoveOrigin::Standard,
        }
    }

    /// Marks the move as produced by an ability.
    #[inline]
    pub const fn with_origin(mut self, origin: MoveOrigin) -> Self {
        self.origin = origin;
        self
    }

    #[inline]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// The piece being moved, as it stood before the move.
    #[inline]
    pub const fn piece(&self) -> PieceCode {
        self.piece
    }

    /// The captured piece; for en passant the pawn beside the mover.
    #[inline]
    pub const fn captured(&self) -> Option<PieceCode> {
        self.captured
    }

    #[inline]
    pub const fn flag(&self) -> MoveFlag {
        self.flag
    }

    #[inline]
    pub const fn origin(&self) -> MoveOrigin {
        self.origin
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.flag == MoveFlag::Promotion
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.flag == MoveFlag::EnPassant
    }

    #[inline]
    pub const fn is_castling(&self) -> bool {
        self.flag.is_castling()
    }

    /// Returns coordinate notation (e.g. "e2e4").
    pub fn coords(&self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Renders algebraic-style notation: `e4`, `exd5`, `Nf3`, `Qxh7`,
    /// `O-O`, `O-O-O`, `e8=Q`. No disambiguation or check suffixes.
    pub fn notation(&self) -> String {
        match self.flag {
            MoveFlag::CastleKingside => return "O-O".to_string(),
            MoveFlag::CastleQueenside => return "O-O-O".to_string(),
            _ => {}
        }

        let mut s = String::new();
        match self.piece.piece.letter() {
            Some(letter) => {
                s.push(letter);
                if self.is_capture() {
                    s.push('x');
                }
            }
            None => {
                if self.is_capture() {
                    s.push(self.from.file_char());
                    s.push('x');
                }
            }
        }
        s.push_str(&self.to.to_algebraic());
        if self.is_promotion() {
            s.push_str("=Q");
        }
        s
    }

    /// Parses coordinate notation ("e2e4") into start and end squares.
    pub fn parse_coords(s: &str) -> Option<(Square, Square)> {
        if s.len() != 4 || !s.is_ascii() {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        Some((from, to))
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.coords())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}

/// A one-shot order issued by an ability piece.
///
/// `from` is the ordering piece. For a Kraus push `to` is the enemy piece
/// being pushed; for a barrier `to` is the lowest corner of the 2x2 block.
/// Orders are equal when squares and ability match.
#[derive(Clone, Copy)]
pub struct Order {
    from: Square,
    to: Square,
    piece: PieceCode,
    target: Cell,
    ability: Ability,
}

impl Order {
    #[inline]
    pub const fn new(from: Square, to: Square, piece: PieceCode, target: Cell, ability: Ability) -> Self {
        Order {
            from,
            to,
            piece,
            target,
            ability,
        }
    }

    #[inline]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// The piece giving the order.
    #[inline]
    pub const fn piece(&self) -> PieceCode {
        self.piece
    }

    /// The contents of `to` when the order was generated.
    #[inline]
    pub const fn target(&self) -> Cell {
        self.target
    }

    #[inline]
    pub const fn ability(&self) -> Ability {
        self.ability
    }

    /// Renders `<Ability>:<from><to>`, e.g. `Kraus:d2d3`.
    pub fn notation(&self) -> String {
        format!("{}:{}{}", self.ability.name(), self.from, self.to)
    }
}

impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.ability == other.ability
    }
}

impl Eq for Order {}

impl Hash for Order {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.ability.hash(state);
    }
}

impl fmt::Debug for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order({})", self.notation())
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}

/// Anything a player can submit: a move or an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move(Move),
    Order(Order),
}

impl Action {
    pub fn notation(&self) -> String {
        match self {
            Action::Move(m) => m.notation(),
            Action::Order(o) => o.notation(),
        }
    }
}

impl From<Move> for Action {
    fn from(m: Move) -> Self {
        Action::Move(m)
    }
}

impl From<Order> for Action {
    fn from(o: Order) -> Self {
        Action::Order(o)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}
