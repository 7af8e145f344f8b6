//! Single-step move generation (kings and knights)
//!
//! Leapers visit a fixed set of offsets and never slide, so blocking only matters on the
//! destination square itself.

use crate::board::Board;
use crate::constants::*;
use crate::geometry::offset;
use crate::ply::Ply;
use crate::types::*;

/// Emit one ply per offset that lands on an empty or enemy-occupied square
///
/// # Arguments
///
/// * `board` - Position to generate from
/// * `from` - Square of the moving piece
/// * `code` - Piece code standing on `from`
/// * `dirs` - [`KING_DIRS`] or [`KNIGHT_DIRS`]
/// * `moves` - Output buffer
pub fn generate(board: &Board, from: Square, code: PieceCode, dirs: &[i16], moves: &mut Vec<Ply>) {
    let side = side_of(code);
    for &dir in dirs {
        let Some(to) = offset(from, dir) else {
            continue;
        };
        let target = board.cell(to);
        if target == EMPTY {
            moves.push(Ply::encode(from, to, code, EMPTY));
        } else if side_of(target) != side && kind_of(target) != PieceKind::King {
            moves.push(Ply::encode(from, to, code, target));
        }
    }
}
