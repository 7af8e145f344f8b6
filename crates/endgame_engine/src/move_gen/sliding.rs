//! Sliding piece move generation (rooks, bishops, queens)
//!
//! ## Algorithm
//!
//! For each direction, step from the origin until the ray leaves the board:
//! 1. Empty square - emit a quiet ply and continue
//! 2. Enemy piece - emit a capture and stop (kings excepted)
//! 3. Own piece - stop without emitting

use crate::board::Board;
use crate::constants::*;
use crate::geometry::offset;
use crate::ply::Ply;
use crate::types::*;

pub fn generate(board: &Board, from: Square, code: PieceCode, dirs: &[i16], moves: &mut Vec<Ply>) {
    let side = side_of(code);
    for &dir in dirs {
        let mut current = from;
        while let Some(to) = offset(current, dir) {
            let target = board.cell(to);
            if target == EMPTY {
                moves.push(Ply::encode(from, to, code, EMPTY));
                current = to;
                continue;
            }
            if side_of(target) != side && kind_of(target) != PieceKind::King {
                moves.push(Ply::encode(from, to, code, target));
            }
            break;
        }
    }
}

/// Check if every square strictly between `from` and `to` along `step` is empty
pub fn is_ray_clear(board: &Board, from: Square, to: Square, step: i16) -> bool {
    let mut current = from;
    loop {
        match offset(current, step) {
            Some(next) if next == to => return true,
            Some(next) if board.cell(next) == EMPTY => current = next,
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rook_on_open_board_has_fourteen_moves() {
        let board = Board::from_placement([(0x33, WHITE_QUEEN_ROOK), (0x00, WHITE_KING), (0x77, BLACK_KING)]).unwrap();
        let mut moves = Vec::new();
        generate(&board, 0x33, WHITE_QUEEN_ROOK, &ROOK_DIRS, &mut moves);
        assert_eq!(moves.len(), 14);
    }

    #[test]
    fn test_ray_stops_at_blocker() {
        let board = Board::from_placement([(0x00, WHITE_QUEEN_ROOK), (0x02, WHITE_KING), (0x77, BLACK_KING)]).unwrap();
        assert!(is_ray_clear(&board, 0x00, 0x02, E));
        assert!(!is_ray_clear(&board, 0x00, 0x03, E));
    }
}
