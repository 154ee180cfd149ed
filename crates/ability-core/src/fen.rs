//! FEN parsing extended with ability tags.
//!
//! Layouts use standard FEN, except that a piece letter may be followed by
//! a bracketed ability tag: `R[kanon]`, `P[okonogi]`, `N[furniture]`.

use crate::{Ability, Color, Piece, PieceCode, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("unknown ability tag: {0}")]
    UnknownAbility(String),

    #[error("ability {ability} cannot be carried by a {piece}")]
    AbilityMismatch { ability: Ability, piece: Piece },

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Parsed FEN data.
///
/// Holds the decoded placement and the remaining fields. The engine turns
/// this into its own state representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Every occupied square with its piece, in row-major order from a1.
    pub pieces: Vec<(Square, PieceCode)>,
    /// Side to move.
    pub active_color: Color,
    /// Castling availability (e.g., "KQkq", "-").
    pub castling: String,
    /// En passant target square.
    pub en_passant: Option<Square>,
    /// Halfmove clock (parsed for compatibility, unused by the rules).
    pub halfmove_clock: u32,
    /// Fullmove number.
    pub fullmove_number: u32,
}

impl FenParser {
    /// The standard starting position, without abilities.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// The variant starting position with every ability seeded.
    pub const VARIANT_STARTPOS: &'static str = "r[kanon]nbqkbnr[shanon]/pppp[okonogi]p[kraus]ppp/8/8/8/8/PPPP[kraus]P[okonogi]PPP/R[kanon]N[furniture]BQ[akasaka]KBNR[shanon] w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let pieces = Self::parse_placement(parts[0])?;

        let active_color = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = parts[2];
        Self::validate_castling(castling)?;

        let en_passant = Self::parse_en_passant(parts[3])?;

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = parts[5]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(FenParser {
            pieces,
            active_color,
            castling: castling.to_string(),
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_placement(placement: &str) -> Result<Vec<(Square, PieceCode)>, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut pieces = Vec::with_capacity(32);
        for (i, rank) in ranks.iter().enumerate() {
            let row = (7 - i) as u8;
            let mut col = 0u32;
            let mut chars = rank.chars().peekable();
            while let Some(c) = chars.next() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip;
                    continue;
                }
                let (piece, color) = Piece::from_fen_char(c).ok_or_else(|| {
                    FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        8 - i
                    ))
                })?;

                let mut code = PieceCode::new(color, piece);
                if chars.peek() == Some(&'[') {
                    chars.next();
                    let tag: String = chars.by_ref().take_while(|&t| t != ']').collect();
                    let ability =
                        Ability::from_tag(&tag).ok_or_else(|| FenError::UnknownAbility(tag.clone()))?;
                    if ability.piece() != piece {
                        return Err(FenError::AbilityMismatch { ability, piece });
                    }
                    code.ability = Some(ability);
                }

                if col >= 8 {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "rank {} has more than 8 squares",
                        8 - i
                    )));
                }
                pieces.push((Square::new(row, col as u8), code));
                col += 1;
            }
            if col != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    8 - i,
                    col
                )));
            }
        }

        pieces.sort_by_key(|(sq, _)| *sq);
        Ok(pieces)
    }

    fn validate_castling(castling: &str) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }

        for c in castling.chars() {
            if !"KQkq".contains(c) {
                return Err(FenError::InvalidCastlingRights(format!(
                    "invalid character '{}'",
                    c
                )));
            }
        }

        Ok(())
    }

    fn parse_en_passant(ep: &str) -> Result<Option<Square>, FenError> {
        if ep == "-" {
            return Ok(None);
        }

        match Square::from_algebraic(ep) {
            Some(sq) if sq.row() == 2 || sq.row() == 5 => Ok(Some(sq)),
            _ => Err(FenError::InvalidEnPassantSquare(ep.to_string())),
        }
    }
}

/// Writes the placement field for a board given by a square lookup.
pub fn write_placement(piece_at: impl Fn(Square) -> Option<PieceCode>) -> String {
    let mut out = String::new();
    for row in (0..8u8).rev() {
        let mut empty = 0;
        for col in 0..8u8 {
            match piece_at(Square::new(row, col)) {
                Some(code) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push_str(&code.to_string());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
        if row > 0 {
            out.push('/');
        }
    }
    out
}
