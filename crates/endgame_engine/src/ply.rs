//! # Move Codec - Packed Ply Identifiers
//!
//! ## Overview
//!
//! A [`Ply`] packs one half-move into a single `u32`:
//!
//! ```text
//!  31      24 23      16 15       8 7        0
//! +----------+----------+----------+----------+
//! |  origin  |  target  |  moved   | captured |
//! |  square  |  square  |  piece   |  piece   |
//! +----------+----------+----------+----------+
//! ```
//!
//! Piece codes are stored as their `u8` bit pattern, so "no captured piece" (`-1`) becomes `0xFF`.
//! Squares are 0x88 indices (at most `0x77`), which keeps every identifier below `2^31`.
//!
//! ## Why a Packed Integer?
//!
//! The identifier is the search tree's node key. Equality and hashing of a `u32` are defined purely
//! on data, so two plies are the same node iff all four fields match, independent of where the
//! node happens to be allocated. Ordering of identifiers is (origin, destination, moved, captured),
//! which is also the generator's stable enumeration order.
//!
//! ## Rendering
//!
//! [`Ply::notation`] renders `<Letter><from>-<to>` (`"Ra1-h1"`); pawns have no letter. The
//! [`fmt::Display`] form adds the raw fields for logging:
//!
//! ```text
//! move: Ra1-h1	from: 0	to: 7	movedPiece: 0	targetPiece: -1
//! ```

use crate::constants::*;
use crate::geometry::{is_on_board, parse_square, square_name};
use crate::types::{is_valid_code, kind_of};
use std::fmt;

/// One half-move, packed into a single integer identifier
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ply(u32);

#[inline]
fn check_piece_field(code: PieceCode) {
    assert!(
        code == EMPTY || is_valid_code(code),
        "piece code {code} outside the piece table"
    );
}

impl Ply {
    /// Pack (origin, destination, moved piece, captured piece) into one identifier
    ///
    /// `target` is [`EMPTY`] for a quiet move.
    ///
    /// # Panics
    ///
    /// Out-of-range fields are a programming error and panic.
    pub fn encode(from: Square, to: Square, moved: PieceCode, target: PieceCode) -> Ply {
        assert!(is_on_board(from as i16), "origin {from} is not a board square");
        assert!(is_on_board(to as i16), "destination {to} is not a board square");
        check_piece_field(moved);
        check_piece_field(target);
        Ply((from as u32) << 24 | (to as u32) << 16 | (moved as u8 as u32) << 8 | target as u8 as u32)
    }

    /// Exact inverse of [`Ply::encode`]
    pub fn decode(self) -> (Square, Square, PieceCode, PieceCode) {
        (self.from(), self.to(), self.moved(), self.target())
    }

    /// Rebuild a ply from a raw identifier
    pub fn from_id(id: u32) -> Ply {
        Ply(id)
    }

    #[inline]
    pub fn id(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn from(self) -> Square {
        (self.0 >> 24) as Square
    }

    #[inline]
    pub fn to(self) -> Square {
        (self.0 >> 16) as Square
    }

    #[inline]
    pub fn moved(self) -> PieceCode {
        (self.0 >> 8) as u8 as PieceCode
    }

    #[inline]
    pub fn target(self) -> PieceCode {
        self.0 as u8 as PieceCode
    }

    #[inline]
    pub fn is_capture(self) -> bool {
        self.target() != EMPTY
    }

    /// Algebraic form, e.g. `"Ra1-h1"`
    pub fn notation(self) -> String {
        let mut text = String::with_capacity(6);
        if self.moved() != EMPTY {
            if let Some(letter) = kind_of(self.moved()).letter() {
                text.push(letter);
            }
        }
        text.push_str(&square_name(self.from()));
        text.push('-');
        text.push_str(&square_name(self.to()));
        text
    }

    /// UCI long-algebraic form, e.g. `"a1h1"`
    pub fn uci(self) -> String {
        format!("{}{}", square_name(self.from()), square_name(self.to()))
    }
}

impl fmt::Display for Ply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "move: {}\tfrom: {}\tto: {}\tmovedPiece: {}\ttargetPiece: {}",
            self.notation(),
            self.from(),
            self.to(),
            self.moved(),
            self.target()
        )
    }
}

/// Parse a UCI long-algebraic move (`"e2e4"`, promotion suffix ignored) into (origin, destination)
pub fn parse_uci_squares(text: &str) -> Option<(Square, Square)> {
    let text = text.trim();
    if !(4..=5).contains(&text.len()) || !text.is_ascii() {
        return None;
    }
    Some((parse_square(&text[0..2])?, parse_square(&text[2..4])?))
}
