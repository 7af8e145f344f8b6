//! Error types for the oracle integrations

use std::io;
use thiserror::Error;

/// Errors raised while talking to an external oracle
#[derive(Error, Debug)]
pub enum OracleError {
    /// The oracle binary could not be started
    #[error("Failed to start oracle program '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Reading from or writing to the oracle failed
    #[error("Oracle I/O error: {0}")]
    Io(#[from] io::Error),

    /// The oracle answered something unexpected
    #[error("Oracle protocol error: {0}")]
    Protocol(String),

    /// The oracle's answer is not the expected JSON document
    #[error("Oracle output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The oracle process ended before answering, or reported failure
    #[error("Oracle process exited: {0}")]
    Exited(String),
}

/// Result type alias for oracle operations
pub type OracleResult<T> = Result<T, OracleError>;
