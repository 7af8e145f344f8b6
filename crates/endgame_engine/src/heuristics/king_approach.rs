//! King-approach policy
//!
//! The defending king can only be mated with the attacking king's help. While the kings are far
//! apart, the attacker spends its king moves closing the distance; once they are within the
//! threshold, the king stays put and the rook or queen does the work.

use crate::board::Board;
use crate::geometry::king_distance;
use crate::ply::Ply;
use crate::types::Side;

/// Narrow the attacker's candidates by king distance
///
/// # Arguments
///
/// * `board` - Position the candidates belong to
/// * `side` - The attacking side
/// * `moves` - Candidate plies of `side`
/// * `threshold` - Chebyshev distance above which the king must close in
///
/// # Returns
///
/// Above the threshold: the king moves that reduce the distance. At or below it: every non-king
/// move. Either list may be empty; the pipeline guard then keeps `moves`.
pub fn king_approach(board: &Board, side: Side, moves: &[Ply], threshold: u8) -> Vec<Ply> {
    let (Some(own), Some(enemy)) = (board.king_square(side), board.king_square(side.opposite())) else {
        return moves.to_vec();
    };
    let distance = king_distance(own, enemy);
    let king = side.king_code();

    if distance > threshold {
        moves
            .iter()
            .copied()
            .filter(|ply| ply.moved() == king && king_distance(ply.to(), enemy) < distance)
            .collect()
    } else {
        moves.iter().copied().filter(|ply| ply.moved() != king).collect()
    }
}
