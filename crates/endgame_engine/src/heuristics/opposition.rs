//! Rook checks while the kings stand in opposition
//!
//! With the kings facing each other across one square, a rook check along the edge-ward line
//! forces the defending king back. This is the standard technique for mating with a rook.

use crate::board::Board;
use crate::geometry::are_in_opposition;
use crate::move_gen::gives_check;
use crate::ply::Ply;
use crate::types::{kind_of, side_of, PieceKind};

/// Keep the rook moves that give check, provided the kings are in opposition
///
/// The side is taken from the candidates' moving pieces. Returns an empty list when the kings
/// are not in opposition or no rook move checks.
///
/// # Examples
///
/// ```rust,ignore
/// // Kd4, Rc5 vs kd6
/// let moves = legal_moves(&mut board, Side::White);
/// let checks = rook_checks_in_opposition(&mut board, &moves);
/// assert_eq!(checks.len(), 2);   // Rc5-d5+, Rc5-c6+
/// ```
pub fn rook_checks_in_opposition(board: &mut Board, moves: &[Ply]) -> Vec<Ply> {
    let Some(side) = moves.first().map(|ply| side_of(ply.moved())) else {
        return Vec::new();
    };
    let (Some(own), Some(enemy)) = (board.king_square(side), board.king_square(side.opposite())) else {
        return Vec::new();
    };
    if !are_in_opposition(own, enemy) {
        return Vec::new();
    }

    moves
        .iter()
        .copied()
        .filter(|&ply| kind_of(ply.moved()) == PieceKind::Rook && gives_check(board, ply))
        .collect()
}
