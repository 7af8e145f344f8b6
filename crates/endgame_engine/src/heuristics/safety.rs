//! Safe-moves-only filtering
//!
//! A candidate is unsafe when the opponent can answer it with a capture. With a lone defending
//! king this means exactly "the move leaves a piece en prise".

use crate::board::Board;
use crate::move_gen::legal_moves;
use crate::ply::Ply;
use crate::types::side_of;

/// Check if the opponent has a capturing reply after `ply`
pub fn allows_capture(board: &mut Board, ply: Ply) -> bool {
    let opponent = side_of(ply.moved()).opposite();
    board.make_move(ply);
    let exposed = legal_moves(board, opponent).iter().any(|reply| reply.is_capture());
    board.unmake_move();
    exposed
}

/// Drop candidates after which the opponent can capture
pub fn only_safe_moves(board: &mut Board, moves: &[Ply]) -> Vec<Ply> {
    moves
        .iter()
        .copied()
        .filter(|&ply| !allows_capture(board, ply))
        .collect()
}
