//! Integration tests for game orchestration
//!
//! Plays short games through the public `xfendgame::game` API with stub oracles standing in for
//! the UCI engine and the tablebase process.

use chrono::NaiveDate;
use endgame_engine::api::StartPosition;
use endgame_engine::{Board, Ending, Side};
use endgame_oracle::{OracleError, OracleResult, ReferenceEngine, Tablebase, TablebaseEntry, TablebaseOutcome};
use std::cell::Cell;
use std::rc::Rc;
use xfendgame::core::EndgameSettings;
use xfendgame::game::{play_batch, play_game, BatchSummary, GameOutcome, Oracles};

/// Suggests the first legal move of the position and counts its calls
struct FirstMoveEngine {
    calls: Rc<Cell<u32>>,
}

impl ReferenceEngine for FirstMoveEngine {
    fn name(&self) -> &str {
        "first-move"
    }

    fn suggest_move(&mut self, fen: &str) -> OracleResult<String> {
        self.calls.set(self.calls.get() + 1);
        let mut board = Board::from_fen(fen).map_err(|e| OracleError::Protocol(e.to_string()))?;
        let side = board.side_to_move();
        endgame_engine::move_gen::legal_moves(&mut board, side)
            .first()
            .map(|ply| ply.uci())
            .ok_or_else(|| OracleError::Protocol("no move".to_string()))
    }
}

/// Always fails, as an engine binary that cannot be parsed would
struct GarbageEngine;

impl ReferenceEngine for GarbageEngine {
    fn name(&self) -> &str {
        "garbage"
    }

    fn suggest_move(&mut self, _fen: &str) -> OracleResult<String> {
        Err(OracleError::Protocol("expected bestmove, got 'hello'".to_string()))
    }
}

struct StubTablebase;

impl Tablebase for StubTablebase {
    fn name(&self) -> &str {
        "stub"
    }

    fn probe(&mut self, _fen: &str) -> OracleResult<TablebaseEntry> {
        Ok(TablebaseEntry {
            outcome: TablebaseOutcome::Win,
            distance: Some(23),
            best_move: Some("a1a7".to_string()),
        })
    }
}

fn quick_settings(ending: Ending) -> EndgameSettings {
    let mut settings = EndgameSettings::default();
    settings.ending = ending;
    settings.search.iterations = 80;
    settings.search.rollout_depth = 24;
    settings.max_plies = 16;
    settings
}

#[test]
fn test_reference_engine_consulted_on_attacker_moves_only() {
    //! White attacks in KRK, so consultations happen on white's plies only

    let calls = Rc::new(Cell::new(0));
    let engine = FirstMoveEngine { calls: Rc::clone(&calls) };
    let mut oracles = Oracles::new(Some(Box::new(engine)), Some(Box::new(StubTablebase)));

    let record = play_game(&quick_settings(Ending::Krk), 0, &mut oracles).unwrap();

    let white_plies = record.ply_count().div_ceil(2);
    assert_eq!(record.consultations(), white_plies);
    assert_eq!(calls.get() as usize, white_plies);
    assert!(record.annotations.iter().all(|a| a.ply_index % 2 == 0));
    assert_eq!(record.reference_engine.as_deref(), Some("first-move"));
    assert_eq!(record.tablebase.as_ref().map(|entry| entry.distance), Some(Some(23)));
}

#[test]
fn test_failing_oracle_does_not_end_game() {
    let settings = quick_settings(Ending::Kqk);
    let mut with_garbage = Oracles::new(Some(Box::new(GarbageEngine)), None);
    let mut without = Oracles::none();

    let noisy = play_game(&settings, 1, &mut with_garbage).unwrap();
    let quiet = play_game(&settings, 1, &mut without).unwrap();

    assert_eq!(noisy.plies, quiet.plies, "oracle failures must not change play");
    assert_eq!(noisy.consultations(), 0);
    assert!(noisy.outcome.is_some());
}

#[test]
fn test_mate_in_one_is_played() {
    let mut settings = quick_settings(Ending::Krk);
    settings.start = StartPosition::Fen("k7/8/1K6/8/8/8/8/2R5 w - - 0 1".to_string());
    settings.search.iterations = 400;

    let record = play_game(&settings, 0, &mut Oracles::none()).unwrap();
    assert_eq!(record.san, vec!["Rc8#".to_string()]);
    assert_eq!(record.outcome, Some(GameOutcome::Checkmate { winner: Side::White }));
    assert_eq!(record.result_token(), "1-0");
}

#[test]
fn test_batch_pgn_output() {
    let mut settings = quick_settings(Ending::Krrk);
    settings.games = 2;
    settings.start = StartPosition::Random;

    let records = play_batch(&settings, &mut Oracles::none());
    assert_eq!(records.len(), 2);
    assert_ne!(records[0].seed, records[1].seed);

    let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    for record in &records {
        let pgn = record.to_pgn_dated(date);
        assert!(pgn.contains("[Ending \"KRRK\"]"));
        assert!(pgn.contains(&format!("[FEN \"{}\"]", record.start_fen)));
        assert!(pgn.contains(&format!("[PlyCount \"{}\"]", record.ply_count())));
        assert!(pgn.trim_end().ends_with(record.result_token()));
    }

    let summary = BatchSummary::from_records(&records);
    assert_eq!(summary.games, 2);
    assert_eq!(
        summary.white_wins + summary.black_wins + summary.draws + summary.unfinished,
        2
    );
}

#[test]
fn test_recorded_plies_replay_to_final_position() {
    let settings = quick_settings(Ending::Krrk);
    let record = play_game(&settings, 2, &mut Oracles::none()).unwrap();

    let mut board = Board::from_fen(&record.start_fen).unwrap();
    for ply in &record.plies {
        endgame_engine::api::do_move(&mut board, ply.from(), ply.to()).unwrap();
    }
    assert_eq!(board.plies_played(), record.ply_count());
}
