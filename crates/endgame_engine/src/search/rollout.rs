//! Terminal detection and random rollouts

use crate::board::Board;
use crate::constants::*;
use crate::evaluation::cutoff_reward;
use crate::heuristics::HeuristicPipeline;
use crate::move_gen::{has_legal_move, is_in_check};
use rand::Rng;

/// Why a position ends the game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerminalKind {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
}

impl TerminalKind {
    /// Reward for the side that moved into the terminal position
    pub fn reward(self) -> f64 {
        match self {
            TerminalKind::Checkmate => WIN_REWARD,
            _ => DRAW_REWARD,
        }
    }

    pub fn is_draw(self) -> bool {
        self != TerminalKind::Checkmate
    }
}

/// Classify the position for the side to move; `None` while play continues
///
/// Running out of moves outranks the draw rules, so a mate delivered on the hundredth half-move
/// still counts as a mate.
pub fn terminal_kind(board: &mut Board) -> Option<TerminalKind> {
    let side = board.side_to_move();
    if !has_legal_move(board, side) {
        return Some(if is_in_check(board, side) {
            TerminalKind::Checkmate
        } else {
            TerminalKind::Stalemate
        });
    }
    if board.is_insufficient_material() {
        return Some(TerminalKind::InsufficientMaterial);
    }
    if board.is_fifty_move_draw() {
        return Some(TerminalKind::FiftyMoveRule);
    }
    None
}

/// Reward for delivering mate after `depth` rollout plies
fn mate_reward(depth: u32) -> f64 {
    (WIN_REWARD - MATE_DEPTH_PENALTY * depth as f64).max(MIN_MATE_REWARD)
}

/// Play random filtered moves from the current position and score the result
///
/// The reward is seen from the side that played the move leading to the current position. The
/// board is restored before returning.
///
/// # Arguments
///
/// * `board` - Position to simulate from, left unchanged
/// * `pipeline` - Filter applied to each ply's legal moves
/// * `max_depth` - Plies before falling back to [`cutoff_reward`]
/// * `rng` - Source of the random move choice
pub fn rollout<R: Rng + ?Sized>(board: &mut Board, pipeline: &HeuristicPipeline, max_depth: u32, rng: &mut R) -> f64 {
    let perspective = board.side_to_move().opposite();
    let mut played = 0u32;

    let reward = loop {
        if let Some(kind) = terminal_kind(board) {
            break match kind {
                TerminalKind::Checkmate => {
                    let value = mate_reward(played);
                    if board.side_to_move() == perspective {
                        1.0 - value
                    } else {
                        value
                    }
                }
                _ => DRAW_REWARD,
            };
        }
        if played >= max_depth {
            break cutoff_reward(board, perspective);
        }

        let side = board.side_to_move();
        let moves = pipeline.candidate_moves(board, side);
        if moves.is_empty() {
            break DRAW_REWARD;
        }
        let ply = moves[rng.random_range(0..moves.len())];
        board.make_move(ply);
        played += 1;
    };

    for _ in 0..played {
        board.unmake_move();
    }
    reward
}
