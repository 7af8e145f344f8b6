//! External oracles consulted during endgame play
//!
//! Both oracles are blocking, one-shot request/response collaborators behind a trait, so the
//! game runner can work with a stub in tests and with a real process in production:
//!
//! - [`ReferenceEngine`] - a UCI chess engine suggesting a move for a FEN position
//!   ([`UciEngine`] drives a UCI binary through the `stockfish` crate)
//! - [`Tablebase`] - an endgame tablebase returning the theoretical result of a FEN position
//!   ([`CommandTablebase`] runs a prober command and reads its JSON answer)
//!
//! Failures are reported as [`OracleError`]; callers log them and keep playing.

pub mod error;
pub mod tablebase;
pub mod uci;

pub use error::{OracleError, OracleResult};
pub use tablebase::{CommandTablebase, Tablebase, TablebaseConfig, TablebaseEntry, TablebaseOutcome};
pub use uci::{check_bestmove, ReferenceEngine, UciConfig, UciEngine};
