//! Start positions

use crate::board::Board;
use crate::error::EngineResult;
use crate::types::Ending;
use rand::Rng;

/// How a game's first position is chosen
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StartPosition {
    /// The ending's fixed layout
    #[default]
    Canonical,
    /// A random legal placement of the ending's material
    Random,
    /// An explicit FEN position
    Fen(String),
}

/// Build the first position of a game
///
/// # Arguments
///
/// * `ending` - Material of the game
/// * `start` - How to place it
/// * `rng` - Used only by [`StartPosition::Random`]
///
/// # Errors
///
/// Returns the board-construction error of an invalid FEN. A valid FEN whose material is not
/// the ending's is still played, with a warning.
pub fn new_game<R: Rng + ?Sized>(ending: Ending, start: &StartPosition, rng: &mut R) -> EngineResult<Board> {
    let board = match start {
        StartPosition::Canonical => Board::for_ending(ending)?,
        StartPosition::Random => Board::random_for_ending(ending, rng)?,
        StartPosition::Fen(fen) => {
            let board = Board::from_fen(fen)?;
            if !board.matches_ending(ending) {
                tracing::warn!(
                    "[ENGINE] Start FEN '{}' does not hold {} material; heuristics still follow {}",
                    fen,
                    ending,
                    ending
                );
            }
            board
        }
    };
    tracing::debug!("[ENGINE] New {} game from {}", ending, board.to_fen());
    Ok(board)
}
