//! Command-line interface
//!
//! Flags override the loaded [`EndgameSettings`] field by field; anything not given on the
//! command line keeps its settings-file (or default) value.

use crate::core::EndgameSettings;
use clap::Parser;
use endgame_engine::api::StartPosition;
use endgame_engine::{Ending, HeuristicSettings};
use endgame_oracle::{TablebaseConfig, UciConfig};
use std::path::PathBuf;

/// Self-play of basic chess endgames with Monte-Carlo Tree Search
#[derive(Parser, Debug)]
#[command(name = "xfendgame", version, about)]
pub struct Cli {
    /// Settings file (defaults to settings.json in the user config directory)
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Ending to play: KRK, KRRK or KQK
    #[arg(short, long)]
    pub ending: Option<Ending>,

    /// Start each game from a random legal placement
    #[arg(long, conflicts_with = "fen")]
    pub random: bool,

    /// Start each game from this FEN position
    #[arg(long)]
    pub fen: Option<String>,

    /// Number of games to play
    #[arg(short = 'n', long)]
    pub games: Option<u32>,

    /// MCTS iterations per move
    #[arg(short, long)]
    pub iterations: Option<u32>,

    /// Wall-clock limit per move in milliseconds
    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    /// Base random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Abandon a game after this many plies
    #[arg(long)]
    pub max_plies: Option<u32>,

    /// Turn every heuristic filter off
    #[arg(long)]
    pub no_heuristics: bool,

    /// UCI engine binary to compare the attacker's moves against
    #[arg(long)]
    pub engine: Option<PathBuf>,

    /// Tablebase prober command for start positions
    #[arg(long)]
    pub tablebase: Option<PathBuf>,

    /// Append finished games to this PGN file
    #[arg(short, long)]
    pub pgn: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Write the effective settings to this file and exit
    #[arg(long)]
    pub dump_settings: Option<PathBuf>,
}

impl Cli {
    /// Overlay the flags that were given onto `settings`
    pub fn apply(&self, settings: &mut EndgameSettings) {
        if let Some(ending) = self.ending {
            settings.ending = ending;
        }
        if self.random {
            settings.start = StartPosition::Random;
        }
        if let Some(fen) = &self.fen {
            settings.start = StartPosition::Fen(fen.clone());
        }
        if let Some(games) = self.games {
            settings.games = games;
        }
        if let Some(iterations) = self.iterations {
            settings.search.iterations = iterations;
        }
        if let Some(limit) = self.time_limit_ms {
            settings.search.time_limit_ms = Some(limit);
        }
        if let Some(seed) = self.seed {
            settings.search.seed = seed;
        }
        if let Some(max_plies) = self.max_plies {
            settings.max_plies = max_plies;
        }
        if self.no_heuristics {
            settings.heuristics = HeuristicSettings {
                urgent_moves: false,
                only_safe_moves: false,
                king_prefers_closing_distance: false,
                rook_checks_in_opposition: false,
                ..settings.heuristics.clone()
            };
        }
        if let Some(program) = &self.engine {
            let config = settings.reference_engine.get_or_insert_with(UciConfig::default);
            config.program = program.clone();
        }
        if let Some(program) = &self.tablebase {
            let config = settings.tablebase.get_or_insert_with(TablebaseConfig::default);
            config.program = program.clone();
        }
        if let Some(pgn) = &self.pgn {
            settings.pgn_output = Some(pgn.clone());
        }
    }
}
