//! Pawn move generation
//!
//! Single push, double push from the start rank through an empty square, and diagonal captures.
//! No en passant and no promotion: a pawn on the last rank has no forward square.

use crate::board::Board;
use crate::constants::*;
use crate::geometry::{offset, rank_of};
use crate::ply::Ply;
use crate::types::*;

pub fn generate(board: &Board, from: Square, code: PieceCode, moves: &mut Vec<Ply>) {
    let side = side_of(code);
    let push = side.pawn_push();

    if let Some(one) = offset(from, push) {
        if board.cell(one) == EMPTY {
            moves.push(Ply::encode(from, one, code, EMPTY));
            if rank_of(from) == side.pawn_start_rank() {
                if let Some(two) = offset(one, push) {
                    if board.cell(two) == EMPTY {
                        moves.push(Ply::encode(from, two, code, EMPTY));
                    }
                }
            }
        }
    }

    for capture in [push + W, push + E] {
        let Some(to) = offset(from, capture) else {
            continue;
        };
        let target = board.cell(to);
        if target != EMPTY && side_of(target) != side && kind_of(target) != PieceKind::King {
            moves.push(Ply::encode(from, to, code, target));
        }
    }
}

/// Squares a pawn of `side` on `from` attacks
pub fn attacks(from: Square, side: Side) -> impl Iterator<Item = Square> {
    let push = side.pawn_push();
    [push + W, push + E]
        .into_iter()
        .filter_map(move |delta| offset(from, delta))
}
