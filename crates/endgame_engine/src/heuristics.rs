//! # Heuristic Filter - Endgame Policy Pipeline
//!
//! ## Overview
//!
//! The generator's legal moves are narrowed by an ordered list of named [`Stage`]s before they
//! reach the search tree. Each stage is a plain function over (board, candidates) in its own
//! module, so it can be tested in isolation:
//!
//! | Stage | Module | Applies to | Keeps |
//! |-------|--------|------------|-------|
//! | [`Stage::UrgentMoves`] | [`urgent`] | both sides | mates, else captures |
//! | [`Stage::OnlySafeMoves`] | [`safety`] | both sides | moves that leave nothing en prise |
//! | [`Stage::KingApproach`] | [`king_approach`] | attacker | closing king moves when far, non-king moves when near |
//! | [`Stage::RookChecksInOpposition`] | [`opposition`] | attacker, rook endings | rook checks |
//!
//! ## Guard
//!
//! A stage never adds candidates. If a stage's output is empty, [`HeuristicPipeline::filter`]
//! keeps that stage's input instead, so a non-empty candidate list always stays non-empty.
//!
//! ## Configuration
//!
//! [`HeuristicSettings`] carries one toggle per stage plus the king-approach distance trigger.
//! [`HeuristicPipeline::for_ending`] turns settings and an [`Ending`] into the active stage list.

pub mod king_approach;
pub mod opposition;
pub mod safety;
pub mod urgent;

pub use king_approach::king_approach;
pub use opposition::rook_checks_in_opposition;
pub use safety::only_safe_moves;
pub use urgent::urgent_moves;

use crate::board::Board;
use crate::constants::*;
use crate::geometry::are_in_opposition;
use crate::move_gen::legal_moves;
use crate::ply::Ply;
use crate::types::*;
use std::fmt;

/// Heuristic toggles
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeuristicSettings {
    /// Restrict to mating moves, else captures, when any exist
    pub urgent_moves: bool,
    /// Drop moves after which the opponent can capture something
    pub only_safe_moves: bool,
    /// King distance above which the attacking king must close in
    pub king_approach_distance_threshold: u8,
    /// Enable the king-approach stage
    pub king_prefers_closing_distance: bool,
    /// Enable the opposition rook-check stage (rook endings only)
    pub rook_checks_in_opposition: bool,
}

impl Default for HeuristicSettings {
    fn default() -> Self {
        Self {
            urgent_moves: true,
            only_safe_moves: true,
            king_approach_distance_threshold: DEFAULT_KING_APPROACH_THRESHOLD,
            king_prefers_closing_distance: true,
            rook_checks_in_opposition: true,
        }
    }
}

/// One named pruning policy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    UrgentMoves,
    OnlySafeMoves,
    KingApproach { threshold: u8 },
    RookChecksInOpposition,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::UrgentMoves => "urgent_moves",
            Stage::OnlySafeMoves => "only_safe_moves",
            Stage::KingApproach { .. } => "king_approach",
            Stage::RookChecksInOpposition => "rook_checks_in_opposition",
        }
    }

    fn attacker_only(self) -> bool {
        matches!(self, Stage::KingApproach { .. } | Stage::RookChecksInOpposition)
    }

    /// Run the stage for `side` over `moves`
    ///
    /// Attacker-only stages pass the candidates through unchanged for the defender, and for an
    /// attacker without material left.
    pub fn apply(self, board: &mut Board, side: Side, moves: &[Ply]) -> Vec<Ply> {
        if self.attacker_only() && (side != board.attacking_side() || !board.has_non_king_material(side)) {
            return moves.to_vec();
        }

        match self {
            Stage::UrgentMoves => urgent_moves(board, moves),
            Stage::OnlySafeMoves => only_safe_moves(board, moves),
            Stage::KingApproach { threshold } => king_approach(board, side, moves, threshold),
            Stage::RookChecksInOpposition => {
                let kings = (board.king_square(side), board.king_square(side.opposite()));
                match kings {
                    (Some(own), Some(enemy)) if are_in_opposition(own, enemy) => {
                        rook_checks_in_opposition(board, moves)
                    }
                    _ => moves.to_vec(),
                }
            }
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered list of active stages
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeuristicPipeline {
    stages: Vec<Stage>,
}

impl HeuristicPipeline {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// Pipeline with no stages; returns the generator's moves untouched
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Active stages for an ending, in declared order
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let pipeline = HeuristicPipeline::for_ending(Ending::Kqk, &HeuristicSettings::default());
    /// // No rook, so no opposition stage
    /// assert_eq!(pipeline.stages().len(), 3);
    /// ```
    pub fn for_ending(ending: Ending, settings: &HeuristicSettings) -> Self {
        let mut stages = Vec::with_capacity(4);
        if settings.urgent_moves {
            stages.push(Stage::UrgentMoves);
        }
        if settings.only_safe_moves {
            stages.push(Stage::OnlySafeMoves);
        }
        if settings.king_prefers_closing_distance {
            stages.push(Stage::KingApproach {
                threshold: settings.king_approach_distance_threshold,
            });
        }
        if settings.rook_checks_in_opposition && ending.has_rook() {
            stages.push(Stage::RookChecksInOpposition);
        }
        Self { stages }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Narrow `moves` stage by stage, never returning an empty list for a non-empty input
    pub fn filter(&self, board: &mut Board, side: Side, moves: Vec<Ply>) -> Vec<Ply> {
        let mut current = moves;
        for &stage in &self.stages {
            if current.len() <= 1 {
                break;
            }
            let narrowed = stage.apply(board, side, &current);
            if narrowed.is_empty() {
                tracing::trace!("[HEURISTICS] {} would empty {} candidates, keeping input", stage, current.len());
                continue;
            }
            if narrowed.len() < current.len() {
                tracing::trace!("[HEURISTICS] {}: {} -> {} candidates", stage, current.len(), narrowed.len());
            }
            current = narrowed;
        }
        current
    }

    /// Legal moves of `side` after filtering
    pub fn candidate_moves(&self, board: &mut Board, side: Side) -> Vec<Ply> {
        let moves = legal_moves(board, side);
        self.filter(board, side, moves)
    }
}
