//! # Core Types - Sides, Piece Kinds & the Ending Catalogue
//!
//! ## Overview
//!
//! Board cells store bare [`PieceCode`]s (see [`crate::constants`]). This module gives those codes
//! meaning: which [`Side`] owns a code, which [`PieceKind`] it moves as, and which letter renders it.
//! It also defines [`Ending`], the process-wide selection of an endgame class that fixes the
//! initial material and the active heuristic set.
//!
//! ## Ending Catalogue
//!
//! | Token  | White material | Canonical layout (white to move) |
//! |--------|----------------|----------------------------------|
//! | `KRK`  | K + R          | Ra1, Ke1, ke8                    |
//! | `KRRK` | K + R + R      | Ra1, Rh1, Ke1, ke8               |
//! | `KQK`  | K + Q          | Qd1, Ke1, ke8                    |
//!
//! The canonical layouts are simply the standard starting array with every other piece removed,
//! which is why the codes in the table line up with the squares they start on.

use crate::constants::*;
use crate::error::{EngineError, EngineResult};
use std::fmt;
use std::str::FromStr;

/// The two players
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    White,
    Black,
}

impl Side {
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Piece code of this side's king
    #[inline]
    pub fn king_code(self) -> PieceCode {
        match self {
            Side::White => WHITE_KING,
            Side::Black => BLACK_KING,
        }
    }

    /// Rank delta a pawn of this side advances by
    #[inline]
    pub fn pawn_push(self) -> i16 {
        match self {
            Side::White => N,
            Side::Black => S,
        }
    }

    /// Rank (0-7) pawns of this side start on
    #[inline]
    pub fn pawn_start_rank(self) -> u8 {
        match self {
            Side::White => 1,
            Side::Black => 6,
        }
    }

    /// FEN side-to-move token
    pub fn fen_char(self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// How a piece moves
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// SAN / algebraic letter; pawns have none
    pub fn letter(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Knight => Some('N'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Rook => Some('R'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King => Some('K'),
        }
    }

    /// Material value in centipawns; kings count as zero
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => PAWN_VALUE,
            PieceKind::Knight => KNIGHT_VALUE,
            PieceKind::Bishop => BISHOP_VALUE,
            PieceKind::Rook => ROOK_VALUE,
            PieceKind::Queen => QUEEN_VALUE,
            PieceKind::King => 0,
        }
    }

    pub fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }
}

const BACK_RANK_KINDS: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// True for codes in the fixed piece table
#[inline]
pub fn is_valid_code(code: PieceCode) -> bool {
    (0..PIECE_CODES as PieceCode).contains(&code)
}

/// Owner of a piece code
///
/// # Panics
///
/// Panics on codes outside the piece table; callers only pass codes read from a board.
#[inline]
pub fn side_of(code: PieceCode) -> Side {
    assert!(is_valid_code(code), "piece code {code} outside the piece table");
    if code < FIRST_BLACK_CODE {
        Side::White
    } else {
        Side::Black
    }
}

/// Movement kind of a piece code
///
/// # Panics
///
/// Panics on codes outside the piece table.
#[inline]
pub fn kind_of(code: PieceCode) -> PieceKind {
    assert!(is_valid_code(code), "piece code {code} outside the piece table");
    match code {
        0..=7 => BACK_RANK_KINDS[code as usize],
        8..=23 => PieceKind::Pawn,
        _ => BACK_RANK_KINDS[(code - BLACK_QUEEN_ROOK) as usize],
    }
}

/// FEN letter of a piece code (upper case for white)
pub fn fen_letter(code: PieceCode) -> char {
    let letter = kind_of(code).letter().unwrap_or('P');
    match side_of(code) {
        Side::White => letter,
        Side::Black => letter.to_ascii_lowercase(),
    }
}

/// Endgame class selecting initial material and active heuristics
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ending {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "KRK"))]
    Krk,
    #[cfg_attr(feature = "serde", serde(rename = "KRRK"))]
    Krrk,
    #[cfg_attr(feature = "serde", serde(rename = "KQK"))]
    Kqk,
}

impl Ending {
    pub const ALL: [Ending; 3] = [Ending::Krk, Ending::Krrk, Ending::Kqk];

    /// Canonical placement, white to move
    pub fn layout(self) -> &'static [(Square, PieceCode)] {
        match self {
            Ending::Krk => &[(0x00, WHITE_QUEEN_ROOK), (0x04, WHITE_KING), (0x74, BLACK_KING)],
            Ending::Krrk => &[
                (0x00, WHITE_QUEEN_ROOK),
                (0x04, WHITE_KING),
                (0x07, WHITE_KING_ROOK),
                (0x74, BLACK_KING),
            ],
            Ending::Kqk => &[(0x03, WHITE_QUEEN), (0x04, WHITE_KING), (0x74, BLACK_KING)],
        }
    }

    /// Piece codes making up the ending
    pub fn pieces(self) -> impl Iterator<Item = PieceCode> {
        self.layout().iter().map(|&(_, code)| code)
    }

    /// True when the attacking material includes a rook
    pub fn has_rook(self) -> bool {
        self.pieces().any(|code| kind_of(code) == PieceKind::Rook)
    }

    pub fn name(self) -> &'static str {
        match self {
            Ending::Krk => "KRK",
            Ending::Krrk => "KRRK",
            Ending::Kqk => "KQK",
        }
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ending {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let token = s.trim();
        Ending::ALL
            .into_iter()
            .find(|ending| ending.name().eq_ignore_ascii_case(token))
            .ok_or_else(|| EngineError::UnknownEnding {
                name: token.to_string(),
            })
    }
}
