//! Error types for the core module
//!
//! Provides custom error types for settings persistence, settings validation
//! and the failures a game can surface from the engine or the record writer.

use endgame_engine::EngineError;
use thiserror::Error;

/// Errors that can occur outside the engine and oracle crates
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings or record file I/O error
    #[error("Settings I/O error: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// Settings serialization/deserialization error
    #[error("Settings serialization error: {0}")]
    SettingsSerialization(#[from] serde_json::Error),

    /// Settings that parse but cannot drive a game
    #[error("Invalid settings: {message}")]
    InvalidSettings { message: String },

    /// The engine refused a position or a move
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// The search returned no move in a position that is not over
    #[error("No reply found at ply {ply}")]
    NoReply { ply: usize },
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
