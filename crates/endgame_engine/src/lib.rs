//! Endgame engine: 0x88 board, legal move generation, heuristic filtering and MCTS
//!
//! Control flow per ply:
//!
//! ```text
//! Board ──► move_gen::legal_moves ──► heuristics::HeuristicPipeline ──► search::search ──► Ply
//! ```
//!
//! The packed [`Ply`] identifier is shared by every stage: the generator produces it, the
//! pipeline filters it, the search tree keys its nodes by it and the board undoes it.

pub mod api;
pub mod board;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod geometry;
pub mod heuristics;
pub mod move_gen;
pub mod ply;
pub mod search;
pub mod types;

pub use board::Board;
pub use error::{EngineError, EngineResult};
pub use heuristics::{HeuristicPipeline, HeuristicSettings, Stage};
pub use ply::Ply;
pub use search::{SearchResult, SearchSettings};
pub use types::{Ending, PieceKind, Side};
