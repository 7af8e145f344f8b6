//! Run settings
//!
//! [`EndgameSettings`] is everything a batch of games needs: which ending, how the first
//! position is chosen, how hard the engine thinks, which heuristics filter its moves and which
//! external oracles are consulted. Every field carries a default, so a settings file only has to
//! name what it changes:
//!
//! ```json
//! {
//!   "ending": "KQK",
//!   "start": "random",
//!   "games": 10,
//!   "search": { "iterations": 4000, "seed": 7 }
//! }
//! ```
//!
//! The engine's own [`SearchSettings`] and [`HeuristicSettings`] are embedded as-is.

use crate::core::error::{CoreError, CoreResult};
use endgame_engine::api::StartPosition;
use endgame_engine::{Ending, HeuristicSettings, SearchSettings};
use endgame_oracle::{TablebaseConfig, UciConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default cap on plies per game
pub const DEFAULT_MAX_PLIES: u32 = 200;

/// Settings for one run of the endgame player
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndgameSettings {
    /// Material on the board
    pub ending: Ending,
    /// How each game's first position is chosen
    pub start: StartPosition,
    /// Games played per run
    pub games: u32,
    /// A game still running after this many plies is abandoned unfinished
    pub max_plies: u32,
    pub search: SearchSettings,
    pub heuristics: HeuristicSettings,
    /// UCI engine consulted on the attacker's moves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_engine: Option<UciConfig>,
    /// Tablebase prober consulted on each start position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tablebase: Option<TablebaseConfig>,
    /// Where finished games are appended as PGN
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pgn_output: Option<PathBuf>,
}

impl Default for EndgameSettings {
    fn default() -> Self {
        Self {
            ending: Ending::default(),
            start: StartPosition::default(),
            games: 1,
            max_plies: DEFAULT_MAX_PLIES,
            search: SearchSettings::default(),
            heuristics: HeuristicSettings::default(),
            reference_engine: None,
            tablebase: None,
            pgn_output: None,
        }
    }
}

impl EndgameSettings {
    /// Reject settings that parse but cannot drive a game
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidSettings`] naming the first offending field.
    pub fn validate(&self) -> CoreResult<()> {
        let invalid = |message: &str| {
            Err(CoreError::InvalidSettings {
                message: message.to_string(),
            })
        };

        if self.games == 0 {
            return invalid("games must be at least 1");
        }
        if self.max_plies == 0 {
            return invalid("max_plies must be at least 1");
        }
        if self.search.iterations == 0 {
            return invalid("search.iterations must be at least 1");
        }
        if !self.search.exploration.is_finite() || self.search.exploration < 0.0 {
            return invalid("search.exploration must be a finite, non-negative number");
        }
        if self.search.time_limit_ms == Some(0) {
            return invalid("search.time_limit_ms must be positive when set");
        }
        Ok(())
    }

    /// Seed of game `round`; consecutive games never share a random stream
    pub fn seed_for_round(&self, round: u32) -> u64 {
        self.search.seed.wrapping_add(u64::from(round))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = EndgameSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.ending, Ending::Krk);
        assert_eq!(settings.max_plies, 200);
        assert_eq!(settings.search.iterations, 2000);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{"ending":"KQK","start":"random","search":{"iterations":50,"seed":9}}"#;
        let settings: EndgameSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.ending, Ending::Kqk);
        assert_eq!(settings.start, StartPosition::Random);
        assert_eq!(settings.search.iterations, 50);
        assert_eq!(settings.search.seed, 9);
        assert_eq!(settings.search.rollout_depth, SearchSettings::default().rollout_depth);
        assert_eq!(settings.games, 1);
        assert!(settings.heuristics.only_safe_moves);
    }

    #[test]
    fn test_fen_start_position_json() {
        let json = r#"{"start":{"fen":"8/8/3k4/2R5/3K4/8/8/8 w - - 0 1"}}"#;
        let settings: EndgameSettings = serde_json::from_str(json).unwrap();
        assert_eq!(
            settings.start,
            StartPosition::Fen("8/8/3k4/2R5/3K4/8/8/8 w - - 0 1".to_string())
        );
    }

    #[test]
    fn test_validation_rejects_zero_budget() {
        let mut settings = EndgameSettings::default();
        settings.search.iterations = 0;
        assert!(matches!(settings.validate(), Err(CoreError::InvalidSettings { .. })));

        let mut settings = EndgameSettings::default();
        settings.games = 0;
        assert!(settings.validate().is_err());

        let mut settings = EndgameSettings::default();
        settings.search.exploration = f64::NAN;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_seed_for_round() {
        let mut settings = EndgameSettings::default();
        settings.search.seed = u64::MAX;
        assert_eq!(settings.seed_for_round(0), u64::MAX);
        assert_eq!(settings.seed_for_round(1), 0);
    }
}
