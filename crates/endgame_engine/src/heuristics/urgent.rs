//! Urgent-move detection
//!
//! A mate in one ends the game, so nothing else is worth considering. Failing that, a capture in
//! these endgames either wins the defender's last hope or removes the attacker's material, and
//! the search should look at it first.

use crate::board::Board;
use crate::move_gen::is_checkmate;
use crate::ply::Ply;
use crate::types::side_of;

/// Check if `ply` delivers checkmate
pub fn is_mating_move(board: &mut Board, ply: Ply) -> bool {
    let opponent = side_of(ply.moved()).opposite();
    board.make_move(ply);
    let mate = is_checkmate(board, opponent);
    board.unmake_move();
    mate
}

/// Keep only mating moves if any exist, else only captures if any exist
///
/// Returns the input unchanged when nothing is urgent.
pub fn urgent_moves(board: &mut Board, moves: &[Ply]) -> Vec<Ply> {
    let mates: Vec<Ply> = moves
        .iter()
        .copied()
        .filter(|&ply| is_mating_move(board, ply))
        .collect();
    if !mates.is_empty() {
        return mates;
    }

    let captures: Vec<Ply> = moves.iter().copied().filter(|ply| ply.is_capture()).collect();
    if !captures.is_empty() {
        return captures;
    }

    moves.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::move_gen::legal_moves;
    use crate::types::{Ending, Side};

    #[test]
    fn test_mate_in_one_is_isolated() {
        // Kb6, Rc1 vs ka8: Rc8 is mate
        let mut board =
            Board::from_placement([(0x02, WHITE_QUEEN_ROOK), (0x51, WHITE_KING), (0x70, BLACK_KING)]).unwrap();
        let moves = legal_moves(&mut board, Side::White);
        let urgent = urgent_moves(&mut board, &moves);
        assert_eq!(urgent.len(), 1);
        assert_eq!(urgent[0].notation(), "Rc1-c8");
    }

    #[test]
    fn test_defender_captures_hanging_rook() {
        let mut board = Board::from_placement([(0x00, WHITE_KING), (0x63, WHITE_QUEEN_ROOK), (0x74, BLACK_KING)])
            .unwrap()
            .with_side_to_move(Side::Black);
        let moves = legal_moves(&mut board, Side::Black);
        let urgent = urgent_moves(&mut board, &moves);
        assert_eq!(urgent.len(), 1);
        assert!(urgent[0].is_capture());
    }

    #[test]
    fn test_quiet_position_passes_through() {
        let mut board = Board::for_ending(Ending::Krk).unwrap();
        let moves = legal_moves(&mut board, Side::White);
        assert_eq!(urgent_moves(&mut board, &moves), moves);
    }
}
