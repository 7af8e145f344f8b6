//! UCI reference engine driver
//!
//! [`UciEngine`] wraps a [`stockfish::Stockfish`] handle, which owns the engine process and the
//! UCI conversation. Each [`ReferenceEngine::suggest_move`] call sets one position, searches to
//! the configured depth and blocks until the best move arrives.

use crate::error::{OracleError, OracleResult};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use stockfish::Stockfish;

/// A chess engine that suggests moves
pub trait ReferenceEngine {
    /// Display name for logs and game records
    fn name(&self) -> &str;

    /// Suggest a move for the side to move in `fen`, in UCI long algebraic notation
    fn suggest_move(&mut self, fen: &str) -> OracleResult<String>;
}

/// How to launch a UCI engine
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UciConfig {
    pub program: PathBuf,
    /// Search depth per request
    pub depth: u32,
}

impl Default for UciConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("stockfish"),
            depth: 12,
        }
    }
}

/// Check the move an engine reported as best
///
/// # Errors
///
/// [`OracleError::Protocol`] when the engine reports no move (empty, `(none)`, `0000`) or
/// something that is not a long-algebraic move.
pub fn check_bestmove(text: &str) -> OracleResult<String> {
    let mv = text.trim();
    match mv {
        "" | "(none)" | "0000" => Err(OracleError::Protocol("engine has no move".to_string())),
        _ if (4..=5).contains(&mv.len()) && mv.is_ascii() => Ok(mv.to_string()),
        _ => Err(OracleError::Protocol(format!("unexpected best move '{mv}'"))),
    }
}

/// Engine name shown in records: the binary's file name
fn display_name(program: &Path) -> String {
    program
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.display().to_string())
}

/// A UCI engine running as a child process
pub struct UciEngine {
    name: String,
    engine: Stockfish,
}

impl UciEngine {
    /// Start the engine binary and set its search depth
    pub fn spawn(config: &UciConfig) -> OracleResult<Self> {
        let program = config.program.display().to_string();
        let mut engine = Stockfish::new(&program).map_err(|source| OracleError::Spawn {
            program: program.clone(),
            source,
        })?;
        engine.set_depth(config.depth);

        let name = display_name(&config.program);
        log::info!("[ORACLE] UCI engine '{}' ready (depth {})", name, config.depth);
        Ok(Self { name, engine })
    }
}

/// A closed pipe means the engine process is gone
fn classify(name: &str, error: io::Error) -> OracleError {
    match error.kind() {
        io::ErrorKind::BrokenPipe | io::ErrorKind::UnexpectedEof => {
            OracleError::Exited(format!("'{name}' stopped answering: {error}"))
        }
        _ => OracleError::Io(error),
    }
}

impl ReferenceEngine for UciEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn suggest_move(&mut self, fen: &str) -> OracleResult<String> {
        self.engine
            .set_fen_position(fen)
            .map_err(|e| classify(&self.name, e))?;
        let output = self.engine.go().map_err(|e| classify(&self.name, e))?;
        let mv = check_bestmove(&output.best_move().to_string())?;
        log::debug!("[ORACLE] {} suggests {} for {}", self.name, mv, fen);
        Ok(mv)
    }
}
