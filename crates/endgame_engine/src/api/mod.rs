//! Public API for the endgame engine
//!
//! High-level entry points used by the game runner. All functions validate their inputs and
//! report failures through [`EngineResult`](crate::error::EngineResult).
//!
//! ## Module Organization
//!
//! - `game` - Start positions (new_game)
//! - `moves` - Fully legal move execution and lookup (do_move, is_legal_move, find_legal_move)
//! - `state` - Game state queries and the MCTS reply (game_state, reply)

mod game;
mod moves;
mod state;

pub use game::{new_game, StartPosition};
pub use moves::{do_move, find_legal_move, is_legal_move};
pub use state::{game_state, reply, GameState};
