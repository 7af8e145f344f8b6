//! Move execution and validation
//!
//! [`Board::apply_move`] checks that a move is a displacement of the piece; these functions
//! additionally require that the mover's king is safe afterwards.

use crate::board::Board;
use crate::error::{EngineError, EngineResult};
use crate::move_gen::{is_in_check, legal_moves};
use crate::ply::Ply;
use crate::types::side_of;

/// Execute a fully legal move
///
/// # Arguments
///
/// * `board` - The position, mutated on success only
/// * `from` - Origin 0x88 square
/// * `to` - Destination 0x88 square
///
/// # Errors
///
/// Every [`Board::apply_move`] error, plus [`EngineError::LeavesKingInCheck`].
///
/// # Examples
///
/// ```rust,ignore
/// // Ra1-a5 in the canonical KRK layout
/// let ply = do_move(&mut board, 0x00, 0x40)?;
/// assert_eq!(ply.notation(), "Ra1-a5");
/// ```
pub fn do_move(board: &mut Board, from: u8, to: u8) -> EngineResult<Ply> {
    let ply = board.apply_move(from, to)?;
    if is_in_check(board, side_of(ply.moved())) {
        board.undo_move()?;
        return Err(EngineError::LeavesKingInCheck { from, to });
    }
    Ok(ply)
}

/// Legal ply of the side to move going from `from` to `to`, if any
pub fn find_legal_move(board: &mut Board, from: u8, to: u8) -> Option<Ply> {
    let side = board.side_to_move();
    legal_moves(board, side)
        .into_iter()
        .find(|ply| ply.from() == from && ply.to() == to)
}

pub fn is_legal_move(board: &mut Board, from: u8, to: u8) -> bool {
    find_legal_move(board, from, to).is_some()
}
