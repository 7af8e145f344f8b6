//! Cut-off evaluation for rollouts
//!
//! Scores positions where a rollout hit its depth cap without reaching a result:
//! - Material balance (piece values)
//! - Pawn advancement (pawn-square table)
//! - Mop-up terms: drive the defending king to the edge and bring the attacking king close
//!
//! [`cutoff_reward`] squashes the centipawn score through a logistic curve into `[0, 1]`, the
//! same range the search uses for terminal rewards.

use crate::board::Board;
use crate::constants::*;
use crate::geometry::{center_distance, file_of, manhattan_distance, rank_of};
use crate::types::*;

/// Pawn-Square Table, from white's perspective, rank 1 first
///
/// Values are in centipawns; black pawns read the table rank-mirrored.
const PAWN_PST: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      5,   5,   5,   5,   5,   5,   5,   5,
     10,  10,  10,  15,  15,  10,  10,  10,
     20,  20,  25,  30,  30,  25,  20,  20,
     35,  35,  40,  45,  45,  40,  35,  35,
     60,  60,  65,  70,  70,  65,  60,  60,
    100, 100, 100, 100, 100, 100, 100, 100,
      0,   0,   0,   0,   0,   0,   0,   0,
];

/// Weight of the defending king's distance from the centre
const EDGE_WEIGHT: i32 = 10;
/// Weight of the kings' proximity
const PROXIMITY_WEIGHT: i32 = 4;

fn pawn_bonus(square: Square, side: Side) -> i32 {
    let rank = match side {
        Side::White => rank_of(square),
        Side::Black => 7 - rank_of(square),
    };
    PAWN_PST[(rank * 8 + file_of(square)) as usize]
}

/// Mop-up score for `attacker` in centipawns
///
/// Rewards a cornered defending king and a short king-to-king distance.
pub fn mop_up(board: &Board, attacker: Side) -> i32 {
    let (Some(own), Some(enemy)) = (board.king_square(attacker), board.king_square(attacker.opposite())) else {
        return 0;
    };
    EDGE_WEIGHT * center_distance(enemy) as i32
        + PROXIMITY_WEIGHT * (14 - manhattan_distance(own, enemy) as i32)
}

/// Evaluate the position from `perspective`, in centipawns
///
/// # Examples
///
/// ```rust,ignore
/// let board = Board::for_ending(Ending::Krk)?;
/// assert!(evaluate(&board, Side::White) > 0);
/// ```
pub fn evaluate(board: &Board, perspective: Side) -> i32 {
    let mut white = 0;
    let mut black = 0;
    for (square, code) in board.pieces() {
        let side = side_of(code);
        let kind = kind_of(code);
        let mut score = kind.value();
        if kind == PieceKind::Pawn {
            score += pawn_bonus(square, side);
        }
        match side {
            Side::White => white += score,
            Side::Black => black += score,
        }
    }

    let attacker = board.attacking_side();
    let mop = if board.has_non_king_material(attacker) {
        mop_up(board, attacker)
    } else {
        0
    };
    let attacker_score = match attacker {
        Side::White => white - black + mop,
        Side::Black => black - white + mop,
    };

    if perspective == attacker {
        attacker_score
    } else {
        -attacker_score
    }
}

/// Logistic reward in `[0, 1]` for `perspective`
pub fn cutoff_reward(board: &Board, perspective: Side) -> f64 {
    let score = evaluate(board, perspective) as f64;
    1.0 / (1.0 + (-score / EVAL_SCALE).exp())
}
