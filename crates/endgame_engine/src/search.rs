//! Monte-Carlo Tree Search over filtered endgame moves
//!
//! This module implements the move decision:
//! - Arena search tree keyed by packed ply identifiers ([`tree`])
//! - UCT selection, expansion with heuristically filtered moves, backpropagation ([`mcts`])
//! - Bounded random rollouts with a logistic cut-off evaluation ([`rollout`])
//!
//! One [`Board`](crate::board::Board) is rolled forward along the selection and rollout path and
//! unwound before the next iteration starts, so nodes never own a board copy.
//!
//! ## Rewards
//!
//! Every reward lies in `[0, 1]` and is seen from the side that played the node's ply. A
//! checkmate is worth 1 to the mating side, any draw 0.5. Backpropagation hands `1 - r` to each
//! parent, so a parent choosing among its children always maximises.
//!
//! ## Budget
//!
//! [`SearchSettings::iterations`] bounds the loop, [`SearchSettings::time_limit_ms`] optionally
//! bounds it in wall-clock time. Both are checked before an iteration starts; an iteration that
//! has started always finishes its backpropagation.

pub mod mcts;
pub mod rollout;
pub mod tree;

pub use mcts::search;
pub use rollout::{terminal_kind, TerminalKind};
pub use tree::{Node, NodeId, NodeState, SearchTree};

use crate::constants::*;
use crate::ply::Ply;

/// Search budget and tuning
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchSettings {
    /// Iterations per decision
    pub iterations: u32,
    /// Optional wall-clock limit per decision
    pub time_limit_ms: Option<u64>,
    /// UCT exploration constant
    pub exploration: f64,
    /// Maximum plies per rollout before the cut-off evaluation
    pub rollout_depth: u32,
    /// Base seed for the per-game random generator
    pub seed: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            time_limit_ms: None,
            exploration: DEFAULT_EXPLORATION,
            rollout_depth: DEFAULT_ROLLOUT_DEPTH,
            seed: 0,
        }
    }
}

/// Statistics of one root child
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChildStats {
    pub ply: Ply,
    pub visits: u32,
    pub mean_reward: f64,
}

/// Outcome of one decision
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// Committed ply: most visits, ties broken by mean reward
    pub best: Ply,
    pub visits: u32,
    pub mean_reward: f64,
    pub root_visits: u32,
    pub iterations: u32,
    pub elapsed_ms: u64,
    /// Root children in generator order
    pub children: Vec<ChildStats>,
}
