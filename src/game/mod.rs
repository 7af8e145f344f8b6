//! Game module - self-play of endgame positions
//!
//! # Overview
//!
//! - [`runner`] - plays games and batches of games ([`play_game`], [`play_batch`])
//! - [`record`] - [`GameRecord`], outcomes and PGN export
//! - [`san`] - Standard Algebraic Notation for engine plies
//! - [`oracle`] - [`Oracles`], the error-absorbing boundary to the reference engine and
//!   tablebase
//!
//! The engine crate decides every move; this module sequences decisions, validates and records
//! them, and reports.

pub mod oracle;
pub mod record;
pub mod runner;
pub mod san;

pub use oracle::Oracles;
pub use record::{append_pgn, GameOutcome, GameRecord, OracleAnnotation};
pub use runner::{play_batch, play_game, BatchSummary};
pub use san::san;
