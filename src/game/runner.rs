//! Game orchestration
//!
//! [`play_game`] owns one [`Board`] and one seeded random generator per game and drives the
//! engine against itself:
//!
//! ```text
//! new_game ──► tablebase probe (once)
//!    │
//!    └─► loop: game_state ─► reply (MCTS) ─► consult reference (attacker only)
//!                  ▲                                  │
//!                  └──────── do_move + SAN ◄──────────┘
//! ```
//!
//! The loop stops on any terminal state or when `max_plies` plies have been played.
//! [`play_batch`] plays `games` rounds with per-round seeds; a round that fails is logged and
//! skipped.

use crate::core::{CoreError, CoreResult, EndgameSettings};
use crate::game::oracle::Oracles;
use crate::game::record::{GameOutcome, GameRecord};
use crate::game::san::san;
use endgame_engine::api::{do_move, game_state, new_game, reply};
use endgame_engine::HeuristicPipeline;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use tracing::{debug, error, info};

/// Play one game to completion
///
/// # Arguments
///
/// * `settings` - Ending, start position, search budget and heuristics
/// * `round` - Game number; selects the seed via [`EndgameSettings::seed_for_round`]
/// * `oracles` - External collaborators; their failures never end the game
///
/// # Errors
///
/// Start-position errors (bad FEN) and engine errors while applying a move.
///
/// # Examples
///
/// ```rust,ignore
/// let record = play_game(&EndgameSettings::default(), 0, &mut Oracles::none())?;
/// println!("{}", record.to_pgn());
/// ```
pub fn play_game(settings: &EndgameSettings, round: u32, oracles: &mut Oracles) -> CoreResult<GameRecord> {
    let seed = settings.seed_for_round(round);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = new_game(settings.ending, &settings.start, &mut rng)?;
    let pipeline = HeuristicPipeline::for_ending(settings.ending, &settings.heuristics);
    let attacker = board.attacking_side();

    let mut record = GameRecord::new(round, seed, settings.ending, &board);
    record.tablebase = oracles.probe(&record.start_fen);
    record.reference_engine = oracles.reference_name().map(str::to_string);

    info!(
        "[GAME] Game {} ({}) starting from {} with seed {}",
        round + 1,
        settings.ending,
        record.start_fen,
        seed
    );

    let outcome = loop {
        if let Some(outcome) = GameOutcome::from_state(game_state(&mut board)) {
            break outcome;
        }
        if record.ply_count() >= settings.max_plies as usize {
            break GameOutcome::MaxPlies;
        }

        let side = board.side_to_move();
        let fen = board.to_fen();
        let result = reply(&mut board, &pipeline, &settings.search, &mut rng).ok_or(CoreError::NoReply {
            ply: record.ply_count(),
        })?;
        let best = result.best;

        if side == attacker {
            if let Some(annotation) = oracles.consult(&fen, best, record.ply_count()) {
                record.annotations.push(annotation);
            }
        }

        let notation = san(&mut board, best)?;
        do_move(&mut board, best.from(), best.to())?;
        debug!(
            "[GAME] {} plays {} ({} visits, mean {:.3}, {} iterations in {} ms)",
            side,
            notation,
            result.visits,
            result.mean_reward,
            result.iterations,
            result.elapsed_ms
        );
        record.push(best, notation);
    };

    record.outcome = Some(outcome);
    info!(
        "[GAME] Game {} finished: {} after {} plies",
        round + 1,
        outcome,
        record.ply_count()
    );
    Ok(record)
}

/// Play `settings.games` games; failed rounds are logged and left out
pub fn play_batch(settings: &EndgameSettings, oracles: &mut Oracles) -> Vec<GameRecord> {
    let mut records = Vec::with_capacity(settings.games as usize);
    for round in 0..settings.games {
        match play_game(settings, round, oracles) {
            Ok(record) => records.push(record),
            Err(e) => error!("[GAME] Game {} failed: {}", round + 1, e),
        }
    }
    records
}

/// Aggregate results of a batch
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchSummary {
    pub games: usize,
    pub white_wins: usize,
    pub black_wins: usize,
    pub draws: usize,
    pub unfinished: usize,
    /// Mean plies to mate over decisive games
    pub mean_mate_plies: Option<f64>,
    pub consultations: usize,
    pub agreements: usize,
}

impl BatchSummary {
    pub fn from_records(records: &[GameRecord]) -> Self {
        let mut summary = BatchSummary {
            games: records.len(),
            ..Default::default()
        };
        let mut mate_plies = 0usize;
        for record in records {
            match record.outcome {
                Some(GameOutcome::Checkmate { winner }) => {
                    if winner == endgame_engine::Side::White {
                        summary.white_wins += 1;
                    } else {
                        summary.black_wins += 1;
                    }
                    mate_plies += record.ply_count();
                }
                Some(outcome) if outcome.is_draw() => summary.draws += 1,
                _ => summary.unfinished += 1,
            }
            summary.consultations += record.consultations();
            summary.agreements += record.agreements();
        }
        let decisive = summary.white_wins + summary.black_wins;
        if decisive > 0 {
            summary.mean_mate_plies = Some(mate_plies as f64 / decisive as f64);
        }
        summary
    }

    /// Fraction of consultations where the reference engine agreed
    pub fn agreement_rate(&self) -> Option<f64> {
        (self.consultations > 0).then(|| self.agreements as f64 / self.consultations as f64)
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} game(s): {} white wins, {} black wins, {} draws, {} unfinished",
            self.games, self.white_wins, self.black_wins, self.draws, self.unfinished
        )?;
        if let Some(plies) = self.mean_mate_plies {
            write!(f, ", mate in {plies:.1} plies on average")?;
        }
        if let Some(rate) = self.agreement_rate() {
            write!(f, ", reference agreement {:.0}%", rate * 100.0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use endgame_engine::api::StartPosition;
    use endgame_engine::{Board, Ending, Side};

    fn quick_settings() -> EndgameSettings {
        let mut settings = EndgameSettings::default();
        settings.search.iterations = 60;
        settings.search.rollout_depth = 20;
        settings.max_plies = 12;
        settings
    }

    #[test]
    fn test_terminal_start_position_plays_nothing() {
        let settings = EndgameSettings {
            start: StartPosition::Fen("R1k5/8/2K5/8/8/8/8/8 b - - 0 1".to_string()),
            ..quick_settings()
        };
        let record = play_game(&settings, 0, &mut Oracles::none()).unwrap();
        assert_eq!(record.ply_count(), 0);
        assert_eq!(record.outcome, Some(GameOutcome::Checkmate { winner: Side::White }));
    }

    #[test]
    fn test_game_respects_ply_cap() {
        let settings = quick_settings();
        let record = play_game(&settings, 0, &mut Oracles::none()).unwrap();
        assert!(record.ply_count() <= 12);
        assert_eq!(record.plies.len(), record.san.len());
        assert!(record.outcome.is_some());
        if record.outcome == Some(GameOutcome::MaxPlies) {
            assert_eq!(record.ply_count(), 12);
        }
    }

    #[test]
    fn test_same_round_replays_identically() {
        let settings = quick_settings();
        let first = play_game(&settings, 3, &mut Oracles::none()).unwrap();
        let second = play_game(&settings, 3, &mut Oracles::none()).unwrap();
        assert_eq!(first.plies, second.plies);
        assert_eq!(first.seed, settings.seed_for_round(3));
    }

    #[test]
    fn test_bad_fen_round_is_skipped() {
        let mut settings = quick_settings();
        settings.games = 2;
        settings.start = StartPosition::Fen("not a fen".to_string());
        assert!(play_game(&settings, 0, &mut Oracles::none()).is_err());
        assert!(play_batch(&settings, &mut Oracles::none()).is_empty());
    }

    #[test]
    fn test_batch_summary_counts() {
        let board = Board::for_ending(Ending::Krk).unwrap();
        let mut won = GameRecord::new(0, 0, Ending::Krk, &board);
        won.outcome = Some(GameOutcome::Checkmate { winner: Side::White });
        for _ in 0..10 {
            won.push(endgame_engine::Ply::from_id(0), "Ra7".to_string());
        }
        let mut drawn = GameRecord::new(1, 1, Ending::Krk, &board);
        drawn.outcome = Some(GameOutcome::Stalemate);
        let mut open = GameRecord::new(2, 2, Ending::Krk, &board);
        open.outcome = Some(GameOutcome::MaxPlies);

        let summary = BatchSummary::from_records(&[won, drawn, open]);
        assert_eq!(summary.games, 3);
        assert_eq!(summary.white_wins, 1);
        assert_eq!(summary.draws, 1);
        assert_eq!(summary.unfinished, 1);
        assert_eq!(summary.mean_mate_plies, Some(10.0));
        assert_eq!(summary.agreement_rate(), None);
        assert!(summary.to_string().starts_with("3 game(s): 1 white wins"));
    }
}
