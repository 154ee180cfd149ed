//! Piece, ability and board-cell representation.

use crate::Color;
use std::fmt;

/// The six types of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// All piece types in order.
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// Returns the index of this piece type (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the FEN character for this piece with the given color.
    pub const fn to_fen_char(self, color: Color) -> char {
        let c = match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a FEN character into a piece and color.
    pub const fn from_fen_char(c: char) -> Option<(Piece, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        Some((piece, color))
    }

    /// Returns the notation letter, or `None` for pawns.
    pub const fn letter(self) -> Option<char> {
        match self {
            Piece::Pawn => None,
            Piece::Knight => Some('N'),
            Piece::Bishop => Some('B'),
            Piece::Rook => Some('R'),
            Piece::Queen => Some('Q'),
            Piece::King => Some('K'),
        }
    }

    /// Returns true if this piece is a sliding piece (bishop, rook, or queen).
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, Piece::Bishop | Piece::Rook | Piece::Queen)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Piece::Pawn => "Pawn",
            Piece::Knight => "Knight",
            Piece::Bishop => "Bishop",
            Piece::Rook => "Rook",
            Piece::Queen => "Queen",
            Piece::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// Special abilities bound to individual seeded pieces.
///
/// Each ability belongs to exactly one piece type. Okonogi, Kanon, Shanon
/// and Akasaka add moves; Kraus and ShanonFurniture only grant a one-shot
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Ability {
    /// Pawn: steps diagonally forward without capturing.
    Okonogi = 0,
    /// Rook: captures, one turn late, an enemy it was facing.
    Kanon = 1,
    /// Rook: recaptures, one turn late, on a square it was guarding.
    Shanon = 2,
    /// Pawn: order that pushes the enemy piece in front of it back.
    Kraus = 3,
    /// Knight: order that raises a 2x2 barrier.
    ShanonFurniture = 4,
    /// Queen: moves across the board edges.
    Akasaka = 5,
}

impl Ability {
    /// All abilities in order.
    pub const ALL: [Ability; 6] = [
        Ability::Okonogi,
        Ability::Kanon,
        Ability::Shanon,
        Ability::Kraus,
        Ability::ShanonFurniture,
        Ability::Akasaka,
    ];

    /// The piece type that can carry this ability.
    pub const fn piece(self) -> Piece {
        match self {
            Ability::Okonogi | Ability::Kraus => Piece::Pawn,
            Ability::Kanon | Ability::Shanon => Piece::Rook,
            Ability::ShanonFurniture => Piece::Knight,
            Ability::Akasaka => Piece::Queen,
        }
    }

    /// Returns true if the ability is used through an order rather than moves.
    pub const fn is_order(self) -> bool {
        matches!(self, Ability::Kraus | Ability::ShanonFurniture)
    }

    /// Lowercase tag used inside layout strings, e.g. `R[kanon]`.
    pub const fn tag(self) -> &'static str {
        match self {
            Ability::Okonogi => "okonogi",
            Ability::Kanon => "kanon",
            Ability::Shanon => "shanon",
            Ability::Kraus => "kraus",
            Ability::ShanonFurniture => "furniture",
            Ability::Akasaka => "akasaka",
        }
    }

    /// Parses a layout tag (case-insensitive).
    pub fn from_tag(tag: &str) -> Option<Self> {
        Ability::ALL
            .into_iter()
            .find(|a| a.tag().eq_ignore_ascii_case(tag))
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Ability::Okonogi => "Okonogi",
            Ability::Kanon => "Kanon",
            Ability::Shanon => "Shanon",
            Ability::Kraus => "Kraus",
            Ability::ShanonFurniture => "Furniture",
            Ability::Akasaka => "Akasaka",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete piece on the board: color, type and optional ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceCode {
    pub color: Color,
    pub piece: Piece,
    pub ability: Option<Ability>,
}

impl PieceCode {
    /// A piece without an ability.
    #[inline]
    pub const fn new(color: Color, piece: Piece) -> Self {
        PieceCode {
            color,
            piece,
            ability: None,
        }
    }

    /// A piece carrying `ability`.
    ///
    /// The ability must belong to `piece`; mismatches are a seeding bug.
    #[inline]
    pub const fn with_ability(color: Color, piece: Piece, ability: Ability) -> Self {
        debug_assert!(ability.piece() as u8 == piece as u8);
        PieceCode {
            color,
            piece,
            ability: Some(ability),
        }
    }

    #[inline]
    pub const fn is(self, color: Color, piece: Piece) -> bool {
        self.color as u8 == color as u8 && self.piece as u8 == piece as u8
    }
}

impl fmt::Display for PieceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.piece.to_fen_char(self.color))?;
        if let Some(ability) = self.ability {
            write!(f, "[{}]", ability.tag())?;
        }
        Ok(())
    }
}

/// Contents of one board square.
///
/// An empty square and an empty barriered square are different values:
/// nothing may enter a barriered square, occupied or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub piece: Option<PieceCode>,
    pub barrier: bool,
}

impl Cell {
    /// A plain empty square.
    pub const EMPTY: Cell = Cell {
        piece: None,
        barrier: false,
    };

    #[inline]
    pub const fn occupied(piece: PieceCode) -> Self {
        Cell {
            piece: Some(piece),
            barrier: false,
        }
    }

    /// No piece and no barrier.
    #[inline]
    pub const fn is_vacant(self) -> bool {
        self.piece.is_none() && !self.barrier
    }

    /// Returns the piece if it belongs to `color`.
    #[inline]
    pub fn piece_of(self, color: Color) -> Option<PieceCode> {
        self.piece.filter(|p| p.color == color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_to_fen() {
        assert_eq!(Piece::Pawn.to_fen_char(Color::White), 'P');
        assert_eq!(Piece::Pawn.to_fen_char(Color::Black), 'p');
        assert_eq!(Piece::King.to_fen_char(Color::White), 'K');
        assert_eq!(Piece::Knight.to_fen_char(Color::Black), 'n');
    }

    #[test]
    fn piece_from_fen() {
        assert_eq!(Piece::from_fen_char('P'), Some((Piece::Pawn, Color::White)));
        assert_eq!(Piece::from_fen_char('p'), Some((Piece::Pawn, Color::Black)));
        assert_eq!(Piece::from_fen_char('x'), None);
    }

    #[test]
    fn ability_owner_piece() {
        assert_eq!(Ability::Okonogi.piece(), Piece::Pawn);
        assert_eq!(Ability::Kraus.piece(), Piece::Pawn);
        assert_eq!(Ability::Kanon.piece(), Piece::Rook);
        assert_eq!(Ability::Shanon.piece(), Piece::Rook);
        assert_eq!(Ability::ShanonFurniture.piece(), Piece::Knight);
        assert_eq!(Ability::Akasaka.piece(), Piece::Queen);
    }

    #[test]
    fn ability_tags_roundtrip() {
        for ability in Ability::ALL {
            assert_eq!(Ability::from_tag(ability.tag()), Some(ability));
        }
        assert_eq!(Ability::from_tag("KANON"), Some(Ability::Kanon));
        assert_eq!(Ability::from_tag("nope"), None);
    }

    #[test]
    fn order_abilities() {
        let orders: Vec<_> = Ability::ALL.into_iter().filter(|a| a.is_order()).collect();
        assert_eq!(orders, vec![Ability::Kraus, Ability::ShanonFurniture]);
    }

    #[test]
    fn empty_and_barriered_cells_differ() {
        let barriered = Cell {
            piece: None,
            barrier: true,
        };
        assert!(Cell::EMPTY.is_vacant());
        assert!(!barriered.is_vacant());
        assert_ne!(Cell::EMPTY, barriered);
    }

    #[test]
    fn piece_code_display() {
        let rook = PieceCode::with_ability(Color::Black, Piece::Rook, Ability::Kanon);
        assert_eq!(rook.to_string(), "r[kanon]");
        assert_eq!(PieceCode::new(Color::White, Piece::Queen).to_string(), "Q");
    }
}
