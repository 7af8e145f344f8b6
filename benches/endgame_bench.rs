//! Endgame Engine Benchmarks
//!
//! Performance benchmarks for the per-ply hot path using Criterion.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use endgame_engine::evaluation::cutoff_reward;
use endgame_engine::move_gen::legal_moves;
use endgame_engine::search::search;
use endgame_engine::{Board, Ending, HeuristicPipeline, HeuristicSettings, SearchSettings, Side};
use rand::rngs::StdRng;
use rand::SeedableRng;

const OPPOSITION_FEN: &str = "8/8/3k4/2R5/3K4/8/8/8 w - - 0 1";

fn bench_board_from_fen(c: &mut Criterion) {
    c.bench_function("board_from_fen", |b| {
        b.iter(|| black_box(Board::from_fen(black_box(OPPOSITION_FEN))))
    });
}

fn bench_legal_moves_krrk(c: &mut Criterion) {
    let mut board = Board::for_ending(Ending::Krrk).unwrap();

    c.bench_function("legal_moves_krrk", |b| {
        b.iter(|| black_box(legal_moves(&mut board, Side::White)))
    });
}

fn bench_heuristic_filter(c: &mut Criterion) {
    let mut board = Board::from_fen(OPPOSITION_FEN).unwrap();
    let pipeline = HeuristicPipeline::for_ending(Ending::Krk, &HeuristicSettings::default());

    c.bench_function("heuristic_filter_opposition", |b| {
        b.iter(|| black_box(pipeline.candidate_moves(&mut board, Side::White)))
    });
}

fn bench_cutoff_evaluation(c: &mut Criterion) {
    let board = Board::from_fen(OPPOSITION_FEN).unwrap();

    c.bench_function("cutoff_reward", |b| {
        b.iter(|| black_box(cutoff_reward(&board, Side::White)))
    });
}

fn bench_search_krk(c: &mut Criterion) {
    let pipeline = HeuristicPipeline::for_ending(Ending::Krk, &HeuristicSettings::default());
    let settings = SearchSettings {
        iterations: 200,
        ..SearchSettings::default()
    };

    c.bench_function("mcts_200_iterations_krk", |b| {
        b.iter(|| {
            let mut board = Board::for_ending(Ending::Krk).unwrap();
            let mut rng = StdRng::seed_from_u64(settings.seed);
            black_box(search(&mut board, &pipeline, &settings, &mut rng).map(|result| result.best))
        })
    });
}

criterion_group!(
    benches,
    bench_board_from_fen,
    bench_legal_moves_krrk,
    bench_heuristic_filter,
    bench_cutoff_evaluation,
    bench_search_krk,
);
criterion_main!(benches);
