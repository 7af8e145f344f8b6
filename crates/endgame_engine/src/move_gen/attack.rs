//! Attack detection and check testing
//!
//! To decide whether a square is attacked, every piece of the attacking side is asked whether it
//! reaches the square: steppers by offset, sliders by a shared line with a clear ray. This is
//! cheaper than generating the attacker's moves, and it also sees attacks on squares occupied by
//! the attacker's own pieces (defended pieces).

use super::pawn;
use super::sliding::is_ray_clear;
use crate::board::Board;
use crate::constants::*;
use crate::geometry::{king_distance, line_step, offset, same_diagonal};
use crate::types::*;

fn reaches(board: &Board, from: Square, code: PieceCode, square: Square) -> bool {
    match kind_of(code) {
        PieceKind::Pawn => pawn::attacks(from, side_of(code)).any(|sq| sq == square),
        PieceKind::Knight => KNIGHT_DIRS.iter().any(|&dir| offset(from, dir) == Some(square)),
        PieceKind::King => from != square && king_distance(from, square) == 1,
        kind => {
            let Some(step) = line_step(from, square) else {
                return false;
            };
            let diagonal = same_diagonal(from, square);
            let allowed = match kind {
                PieceKind::Rook => !diagonal,
                PieceKind::Bishop => diagonal,
                _ => true,
            };
            allowed && is_ray_clear(board, from, square, step)
        }
    }
}

/// Check if a square is attacked by pieces of `by`
///
/// # Arguments
///
/// * `board` - The current position
/// * `square` - Target 0x88 square
/// * `by` - Side whose pieces might attack
///
/// # Examples
///
/// ```rust,ignore
/// // Is d5 covered by white?
/// let attacked = is_square_attacked(&board, 0x43, Side::White);
/// ```
pub fn is_square_attacked(board: &Board, square: Square, by: Side) -> bool {
    board
        .pieces_of(by)
        .any(|(from, code)| reaches(board, from, code, square))
}

/// Check if `side`'s king is attacked
pub fn is_in_check(board: &Board, side: Side) -> bool {
    board
        .king_square(side)
        .is_some_and(|king| is_square_attacked(board, king, side.opposite()))
}
