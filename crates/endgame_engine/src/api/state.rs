//! Game state queries and the MCTS reply

use crate::board::Board;
use crate::heuristics::HeuristicPipeline;
use crate::search::{search, terminal_kind, SearchResult, SearchSettings, TerminalKind};
use crate::types::Side;
use rand::Rng;
use std::fmt;

/// State of the game for the side to move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GameState {
    Playing,
    Checkmate { winner: Side },
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
}

impl GameState {
    pub fn is_over(self) -> bool {
        self != GameState::Playing
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            GameState::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Playing => write!(f, "playing"),
            GameState::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameState::Stalemate => write!(f, "stalemate"),
            GameState::InsufficientMaterial => write!(f, "insufficient material"),
            GameState::FiftyMoveRule => write!(f, "fifty-move rule"),
        }
    }
}

/// Get the current game state
pub fn game_state(board: &mut Board) -> GameState {
    match terminal_kind(board) {
        None => GameState::Playing,
        Some(TerminalKind::Checkmate) => GameState::Checkmate {
            winner: board.side_to_move().opposite(),
        },
        Some(TerminalKind::Stalemate) => GameState::Stalemate,
        Some(TerminalKind::InsufficientMaterial) => GameState::InsufficientMaterial,
        Some(TerminalKind::FiftyMoveRule) => GameState::FiftyMoveRule,
    }
}

/// Get the engine's reply for the side to move
///
/// # Arguments
///
/// * `board` - The position, returned unchanged
/// * `pipeline` - Heuristic filter for the ending being played
/// * `settings` - Search budget
/// * `rng` - The game's random generator
pub fn reply<R: Rng + ?Sized>(
    board: &mut Board,
    pipeline: &HeuristicPipeline,
    settings: &SearchSettings,
    rng: &mut R,
) -> Option<SearchResult> {
    search(board, pipeline, settings, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::types::Ending;

    #[test]
    fn test_game_state_reports_winner() {
        let mut board = Board::from_placement([(0x70, WHITE_QUEEN_ROOK), (0x52, WHITE_KING), (0x72, BLACK_KING)])
            .unwrap()
            .with_side_to_move(Side::Black);
        let state = game_state(&mut board);
        assert_eq!(state, GameState::Checkmate { winner: Side::White });
        assert!(state.is_over());
        assert_eq!(state.to_string(), "checkmate, white wins");
    }

    #[test]
    fn test_fresh_game_is_playing() {
        let mut board = Board::for_ending(Ending::Kqk).unwrap();
        assert_eq!(game_state(&mut board), GameState::Playing);
        assert_eq!(game_state(&mut board).winner(), None);
    }
}
