//! Error types for the endgame engine
//!
//! Provides custom error types for board construction, move application,
//! FEN parsing and ending selection.

use crate::constants::{PieceCode, Square};
use crate::types::Side;
use thiserror::Error;

/// Errors that can occur in the endgame engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Square index outside the real 0x88 board
    #[error("Invalid square index: {square} (must satisfy square & 0x88 == 0)")]
    InvalidSquare { square: u32 },

    /// Piece code outside the fixed piece table
    #[error("Invalid piece code: {code} (must be 0-31)")]
    InvalidPiece { code: i32 },

    /// Two pieces placed on the same square
    #[error("Square {square} is already occupied")]
    SquareOccupied { square: Square },

    /// The same piece identity placed twice
    #[error("Piece code {code} is placed more than once")]
    DuplicatePiece { code: PieceCode },

    /// A side has no king
    #[error("No {side} king on the board")]
    MissingKing { side: Side },

    /// No piece at source square
    #[error("No piece at source square {square}")]
    NoPieceAtSquare { square: Square },

    /// Piece does not belong to the side to move
    #[error("Piece at square {square} does not belong to the side to move ({side})")]
    WrongSideToMove { square: Square, side: Side },

    /// Destination unreachable by the piece's movement rule
    #[error("Invalid move: from square {from} to square {to}")]
    IllegalDisplacement { from: Square, to: Square },

    /// Move would leave the mover's own king attacked
    #[error("Move from square {from} to square {to} leaves the king in check")]
    LeavesKingInCheck { from: Square, to: Square },

    /// Kings are never captured
    #[error("Move from square {from} would capture the king on square {to}")]
    KingCapture { from: Square, to: Square },

    /// Undo requested with an empty move history
    #[error("No move to undo")]
    NothingToUndo,

    /// Ending token not in the catalogue
    #[error("Unknown ending type: {name}")]
    UnknownEnding { name: String },

    /// Malformed FEN text
    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },
}

/// Result type alias for endgame engine operations
pub type EngineResult<T> = Result<T, EngineError>;
