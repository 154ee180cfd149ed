//! Game state: board plus everything needed to generate, apply and undo
//! actions.

use ability_core::{
    write_placement, Ability, Action, Color, FenError, FenParser, Piece, PieceCode, Square,
};

use crate::movegen::{detect, KingSafety};
use crate::Board;

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove_kingside(color);
        self.remove_queenside(color);
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_KINGSIDE,
            Color::Black => !Self::BLACK_KINGSIDE,
        };
        self.0 &= mask;
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_QUEENSIDE,
            Color::Black => !Self::BLACK_QUEENSIDE,
        };
        self.0 &= mask;
    }

    /// Revokes whatever right is tied to a rook corner. Other squares are
    /// ignored.
    pub fn revoke_corner(&mut self, sq: Square) {
        match sq {
            Square::A1 => self.remove_queenside(Color::White),
            Square::H1 => self.remove_kingside(Color::White),
            Square::A8 => self.remove_queenside(Color::Black),
            Square::H8 => self.remove_kingside(Color::Black),
            _ => {}
        }
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    fn parse(field: &str) -> Self {
        let mut flags = 0u8;
        for c in field.chars() {
            match c {
                'K' => flags |= Self::WHITE_KINGSIDE,
                'Q' => flags |= Self::WHITE_QUEENSIDE,
                'k' => flags |= Self::BLACK_KINGSIDE,
                'q' => flags |= Self::BLACK_QUEENSIDE,
                _ => {}
            }
        }
        CastlingRights::new(flags)
    }

    fn to_fen(self) -> String {
        if self.0 == 0 {
            return "-".to_string();
        }
        let mut s = String::with_capacity(4);
        if self.can_castle_kingside(Color::White) {
            s.push('K');
        }
        if self.can_castle_queenside(Color::White) {
            s.push('Q');
        }
        if self.can_castle_kingside(Color::Black) {
            s.push('k');
        }
        if self.can_castle_queenside(Color::Black) {
            s.push('q');
        }
        s
    }
}

/// Squares recorded by a rook ability for a capture on the owner's next
/// turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Package {
    targets: [Option<Square>; 4],
}

impl Package {
    /// Builds a package from up to four squares; `None` if there are none.
    pub fn from_targets(squares: impl IntoIterator<Item = Square>) -> Option<Self> {
        let mut package = Package::default();
        let mut len = 0;
        for sq in squares.into_iter().take(4) {
            package.targets[len] = Some(sq);
            len += 1;
        }
        (len > 0).then_some(package)
    }

    pub fn targets(&self) -> impl Iterator<Item = Square> + '_ {
        self.targets.iter().flatten().copied()
    }

    pub fn contains(&self, sq: Square) -> bool {
        self.targets().any(|t| t == sq)
    }
}

/// An active 2x2 barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Barrier {
    squares: [Square; 4],
    remaining: u8,
    owner: Color,
}

impl Barrier {
    /// Number of applied moves a barrier stays up.
    pub const DURATION: u8 = 4;

    /// A fresh barrier whose lowest-row, lowest-column square is `corner`.
    ///
    /// Returns `None` if the block would leave the board.
    pub fn at(corner: Square, owner: Color) -> Option<Self> {
        if corner.row() > 6 || corner.col() > 6 {
            return None;
        }
        let (r, c) = (corner.row(), corner.col());
        Some(Barrier {
            squares: [
                Square::new(r, c),
                Square::new(r, c + 1),
                Square::new(r + 1, c),
                Square::new(r + 1, c + 1),
            ],
            remaining: Self::DURATION,
            owner,
        })
    }

    pub fn squares(&self) -> [Square; 4] {
        self.squares
    }

    /// Moves left before the barrier disappears.
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    pub fn owner(&self) -> Color {
        self.owner
    }

    /// Counts down one applied move. Returns `None` once expired.
    pub(crate) fn tick(self) -> Option<Self> {
        let remaining = self.remaining.saturating_sub(1);
        (remaining > 0).then_some(Barrier { remaining, ..self })
    }
}

/// What undo needs to restore an applied action exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UndoRecord {
    pub(crate) action: Action,
    pub(crate) captured: Option<(Square, PieceCode)>,
    pub(crate) en_passant: Option<Square>,
    pub(crate) castling: CastlingRights,
    pub(crate) packages: [[Option<Package>; 2]; 2],
    pub(crate) orders: [[bool; 2]; 2],
    pub(crate) barrier: Option<Barrier>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

/// Slot of a rook ability in the package table.
pub(crate) const fn package_slot(ability: Ability) -> Option<usize> {
    match ability {
        Ability::Kanon => Some(0),
        Ability::Shanon => Some(1),
        _ => None,
    }
}

/// Slot of an order ability in the availability table.
pub(crate) const fn order_slot(ability: Ability) -> Option<usize> {
    match ability {
        Ability::Kraus => Some(0),
        Ability::ShanonFurniture => Some(1),
        _ => None,
    }
}

/// Complete game state.
///
/// Mutated in place by [`make_move`](crate::make_move),
/// [`make_order`](crate::make_order) and [`undo`](crate::undo). Check and pin
/// information is not stored; [`GameState::safety`] derives it on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) kings: [Square; 2],
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    /// Deferred-capture packages, indexed by color then rook ability.
    pub(crate) packages: [[Option<Package>; 2]; 2],
    /// Unused orders, indexed by color then order ability.
    pub(crate) orders: [[bool; 2]; 2],
    pub(crate) barrier: Option<Barrier>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) history: Vec<UndoRecord>,
}

impl GameState {
    /// The variant starting position with every ability seeded.
    ///
    /// The layout is a constant that the FEN round-trip tests parse, so the
    /// `expect` cannot fire.
    pub fn variant_start() -> Self {
        Self::from_fen(FenParser::VARIANT_STARTPOS).expect("VARIANT_STARTPOS is valid")
    }

    /// The standard chess starting position, without abilities. Never
    /// panics, as above.
    pub fn classic_start() -> Self {
        Self::from_fen(FenParser::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a state from a FEN string with optional ability tags.
    ///
    /// Each color needs exactly one king. Orders start available for every
    /// order ability present on the board.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;

        let mut board = Board::empty();
        for (sq, piece) in &parsed.pieces {
            board.set_piece(*sq, Some(*piece));
        }

        let mut kings = [Square::E1, Square::E8];
        for color in Color::ALL {
            if board.count(color, Piece::King) != 1 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "expected exactly one {} king",
                    color
                )));
            }
            if let Some(sq) = board.find_king(color) {
                kings[color.index()] = sq;
            }
        }

        let mut orders = [[false; 2]; 2];
        for (_, piece) in board.pieces() {
            if let Some(slot) = piece.ability.and_then(order_slot) {
                orders[piece.color.index()][slot] = true;
            }
        }

        Ok(GameState {
            board,
            side_to_move: parsed.active_color,
            kings,
            castling: CastlingRights::parse(&parsed.castling),
            en_passant: parsed.en_passant,
            packages: [[None; 2]; 2],
            orders,
            barrier: None,
            halfmove_clock: parsed.halfmove_clock,
            fullmove_number: parsed.fullmove_number,
            history: Vec::new(),
        })
    }

    /// Converts the state to a FEN string with ability tags.
    ///
    /// Packages, spent orders and barriers have no FEN field and are not
    /// written.
    pub fn to_fen(&self) -> String {
        let placement = write_placement(|sq| self.board.piece_at(sq));
        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let en_passant = self
            .en_passant
            .map(|sq| sq.to_algebraic())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{} {} {} {} {} {}",
            placement,
            side,
            self.castling.to_fen(),
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// The pending package of a rook ability, if any.
    pub fn package(&self, color: Color, ability: Ability) -> Option<&Package> {
        package_slot(ability).and_then(|slot| self.packages[color.index()][slot].as_ref())
    }

    /// True while `color` still holds the order of `ability`.
    pub fn order_available(&self, color: Color, ability: Ability) -> bool {
        order_slot(ability).is_some_and(|slot| self.orders[color.index()][slot])
    }

    #[inline]
    pub fn barrier(&self) -> Option<&Barrier> {
        self.barrier.as_ref()
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Number of applied actions that can be undone.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Applied actions, oldest first.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.history.iter().map(|r| r.action)
    }

    /// The most recently applied action.
    pub fn last_action(&self) -> Option<Action> {
        self.history.last().map(|r| r.action)
    }

    /// Checks and pins against the side to move.
    pub fn safety(&self) -> KingSafety {
        self.safety_of(self.side_to_move)
    }

    /// Checks and pins against `color`'s king.
    pub fn safety_of(&self, color: Color) -> KingSafety {
        detect(&self.board, self.king_square(color), color)
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.safety().in_check
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::variant_start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn classic_fen_roundtrip() {
        let state = GameState::classic_start();
        assert_eq!(state.to_fen(), FenParser::STARTPOS);
    }

    #[test]
    fn variant_fen_roundtrip() {
        let state = GameState::variant_start();
        assert_eq!(state.to_fen(), FenParser::VARIANT_STARTPOS);
    }

    #[test]
    fn custom_fen_roundtrip() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let state = GameState::from_fen(fen).unwrap();
        assert_eq!(state.to_fen(), fen);
    }

    #[test]
    fn variant_seeds_orders() {
        let state = GameState::variant_start();
        for color in Color::ALL {
            assert!(state.order_available(color, Ability::Kraus));
            assert!(state.order_available(color, Ability::ShanonFurniture));
            assert!(!state.order_available(color, Ability::Kanon));
            assert!(state.package(color, Ability::Kanon).is_none());
        }
        let classic = GameState::classic_start();
        assert!(!classic.order_available(Color::White, Ability::Kraus));
    }

    #[test]
    fn kings_located() {
        let state = GameState::variant_start();
        assert_eq!(state.king_square(Color::White), Square::E1);
        assert_eq!(state.king_square(Color::Black), Square::E8);
    }

    #[test]
    fn missing_king_rejected() {
        assert!(matches!(
            GameState::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            GameState::from_fen("k6k/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn castling_rights() {
        let mut rights = CastlingRights::ALL;
        rights.remove_kingside(Color::White);
        assert!(!rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::White));

        rights.revoke_corner(Square::A8);
        assert!(!rights.can_castle_queenside(Color::Black));
        assert!(rights.can_castle_kingside(Color::Black));

        rights.revoke_corner(sq("e4"));
        rights.remove_color(Color::Black);
        assert_eq!(rights.raw(), CastlingRights::WHITE_QUEENSIDE);
        assert_eq!(rights.to_fen(), "Q");
        assert_eq!(CastlingRights::NONE.to_fen(), "-");
    }

    #[test]
    fn package_holds_up_to_four() {
        assert!(Package::from_targets([]).is_none());
        let package = Package::from_targets([sq("a5"), sq("c1")]).unwrap();
        assert!(package.contains(sq("a5")));
        assert!(!package.contains(sq("a6")));
        assert_eq!(package.targets().count(), 2);
    }

    #[test]
    fn barrier_geometry_and_countdown() {
        assert!(Barrier::at(sq("h4"), Color::White).is_none());
        assert!(Barrier::at(sq("d8"), Color::White).is_none());

        let barrier = Barrier::at(sq("c3"), Color::Black).unwrap();
        assert_eq!(barrier.squares(), [sq("c3"), sq("d3"), sq("c4"), sq("d4")]);
        assert_eq!(barrier.remaining(), Barrier::DURATION);

        let mut current = Some(barrier);
        let mut ticks = 0;
        while let Some(b) = current {
            current = b.tick();
            ticks += 1;
        }
        assert_eq!(ticks, Barrier::DURATION);
    }
}
