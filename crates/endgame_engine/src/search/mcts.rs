//! MCTS driver
//!
//! ## Iteration
//!
//! 1. **Selection** - from the root, follow [`SearchTree::select_child`] through expanded nodes,
//!    making each ply on the shared board
//! 2. **Expansion** - at an unexpanded node, classify the position; a terminal one is marked and
//!    scored, otherwise one child per filtered legal move is created
//! 3. **Simulation** - [`rollout`] from the expanded node
//! 4. **Backpropagation** - add the reward from the node up to and including the root
//!
//! The board is then unwound along the path, so every iteration starts from the root position.

use super::rollout::{rollout, terminal_kind};
use super::tree::{NodeState, SearchTree};
use super::{ChildStats, SearchResult, SearchSettings};
use crate::board::Board;
use crate::constants::DRAW_REWARD;
use crate::heuristics::HeuristicPipeline;
use instant::Instant;
use rand::Rng;

fn run_iteration<R: Rng + ?Sized>(
    tree: &mut SearchTree,
    board: &mut Board,
    pipeline: &HeuristicPipeline,
    settings: &SearchSettings,
    rng: &mut R,
) {
    let mut node = SearchTree::ROOT;
    let mut depth = 0usize;

    let reward = loop {
        match tree.node(node).state {
            NodeState::Terminal(kind) => break kind.reward(),
            NodeState::Expanded => {
                let Some(child) = tree.select_child(node, settings.exploration) else {
                    break DRAW_REWARD;
                };
                let Some(ply) = tree.node(child).ply else {
                    break DRAW_REWARD;
                };
                board.make_move(ply);
                depth += 1;
                node = child;
            }
            NodeState::Unexpanded => {
                if let Some(kind) = terminal_kind(board) {
                    tree.mark_terminal(node, kind);
                    break kind.reward();
                }
                let side = board.side_to_move();
                let moves = pipeline.candidate_moves(board, side);
                tree.expand(node, &moves);
                break rollout(board, pipeline, settings.rollout_depth, rng);
            }
        }
    };

    tree.backpropagate(node, reward);
    for _ in 0..depth {
        board.unmake_move();
    }
}

/// Choose a ply for the side to move
///
/// Returns `None` when the side to move has no legal move (or the position is otherwise
/// terminal). The board is left exactly as it was passed in.
///
/// # Examples
///
/// ```rust,ignore
/// let mut rng = StdRng::seed_from_u64(settings.seed);
/// let pipeline = HeuristicPipeline::for_ending(Ending::Krk, &HeuristicSettings::default());
/// if let Some(result) = search(&mut board, &pipeline, &settings, &mut rng) {
///     board.apply_move(result.best.from(), result.best.to())?;
/// }
/// ```
pub fn search<R: Rng + ?Sized>(
    board: &mut Board,
    pipeline: &HeuristicPipeline,
    settings: &SearchSettings,
    rng: &mut R,
) -> Option<SearchResult> {
    let start = Instant::now();

    if terminal_kind(board).is_some() {
        tracing::debug!("[SEARCH] Root position is terminal, nothing to search");
        return None;
    }

    let mut tree = SearchTree::new();
    let side = board.side_to_move();
    let root_moves = pipeline.candidate_moves(board, side);
    tree.expand(SearchTree::ROOT, &root_moves);
    if tree.root().children.is_empty() {
        return None;
    }

    let mut iterations = 0u32;
    while iterations < settings.iterations {
        if let Some(limit) = settings.time_limit_ms {
            if iterations > 0 && start.elapsed().as_millis() >= limit as u128 {
                tracing::debug!("[SEARCH] Time limit of {}ms reached after {} iterations", limit, iterations);
                break;
            }
        }
        run_iteration(&mut tree, board, pipeline, settings, rng);
        iterations += 1;
    }

    let best_id = tree.best_child(SearchTree::ROOT)?;
    let best = tree.node(best_id);
    let children = tree
        .root()
        .children
        .iter()
        .filter_map(|&id| {
            let node = tree.node(id);
            node.ply.map(|ply| ChildStats {
                ply,
                visits: node.visits,
                mean_reward: node.mean_reward(),
            })
        })
        .collect();

    let result = SearchResult {
        best: best.ply?,
        visits: best.visits,
        mean_reward: best.mean_reward(),
        root_visits: tree.root().visits,
        iterations,
        elapsed_ms: start.elapsed().as_millis() as u64,
        children,
    };

    tracing::debug!(
        "[SEARCH] {} iterations, {} nodes, {}ms: {} ({} visits, mean {:.3})",
        result.iterations,
        tree.len(),
        result.elapsed_ms,
        result.best.notation(),
        result.visits,
        result.mean_reward
    );

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::heuristics::HeuristicSettings;
    use crate::types::{Ending, Side};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quick_settings(iterations: u32) -> SearchSettings {
        SearchSettings {
            iterations,
            rollout_depth: 16,
            ..SearchSettings::default()
        }
    }

    #[test]
    fn test_root_visits_equal_iterations() {
        let mut board = Board::for_ending(Ending::Krk).unwrap();
        let pipeline = HeuristicPipeline::for_ending(Ending::Krk, &HeuristicSettings::default());
        let settings = quick_settings(120);
        let mut rng = StdRng::seed_from_u64(1);

        let result = search(&mut board, &pipeline, &settings, &mut rng).unwrap();
        assert_eq!(result.root_visits, 120);
        assert_eq!(result.iterations, 120);
        assert_eq!(result.children.iter().map(|c| c.visits).sum::<u32>(), 120);
    }

    #[test]
    fn test_same_seed_same_move() {
        let settings = quick_settings(150);
        let pipeline = HeuristicPipeline::for_ending(Ending::Krrk, &HeuristicSettings::default());

        let run = |seed: u64| {
            let mut board = Board::for_ending(Ending::Krrk).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            search(&mut board, &pipeline, &settings, &mut rng).unwrap()
        };
        let first = run(42);
        let second = run(42);
        assert_eq!(first.best, second.best);
        assert_eq!(first.children, second.children);
    }

    #[test]
    fn test_search_leaves_board_unchanged() {
        let mut board = Board::for_ending(Ending::Kqk).unwrap();
        let before = board.clone();
        let pipeline = HeuristicPipeline::for_ending(Ending::Kqk, &HeuristicSettings::default());
        let mut rng = StdRng::seed_from_u64(3);
        search(&mut board, &pipeline, &quick_settings(60), &mut rng).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn test_finds_mate_in_one_without_heuristics() {
        // Kb6, Rc1 vs ka8: Rc8#
        let mut board =
            Board::from_placement([(0x02, WHITE_QUEEN_ROOK), (0x51, WHITE_KING), (0x70, BLACK_KING)]).unwrap();
        let settings = SearchSettings {
            iterations: 600,
            exploration: 0.3,
            rollout_depth: 8,
            ..SearchSettings::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let result = search(&mut board, &HeuristicPipeline::disabled(), &settings, &mut rng).unwrap();
        assert_eq!(result.best.notation(), "Rc1-c8");
        assert_eq!(result.mean_reward, WIN_REWARD);
    }

    #[test]
    fn test_terminal_root_returns_none() {
        let mut board = Board::from_placement([(0x70, WHITE_QUEEN_ROOK), (0x52, WHITE_KING), (0x72, BLACK_KING)])
            .unwrap()
            .with_side_to_move(Side::Black);
        let mut rng = StdRng::seed_from_u64(0);
        let result = search(&mut board, &HeuristicPipeline::disabled(), &quick_settings(10), &mut rng);
        assert!(result.is_none());
    }

    #[test]
    fn test_time_limit_stops_early() {
        let mut board = Board::for_ending(Ending::Krrk).unwrap();
        let pipeline = HeuristicPipeline::for_ending(Ending::Krrk, &HeuristicSettings::default());
        let settings = SearchSettings {
            iterations: u32::MAX,
            time_limit_ms: Some(50),
            rollout_depth: 8,
            ..SearchSettings::default()
        };
        let mut rng = StdRng::seed_from_u64(9);
        let result = search(&mut board, &pipeline, &settings, &mut rng).unwrap();
        assert!(result.iterations >= 1);
        assert_eq!(result.root_visits, result.iterations);
    }
}
