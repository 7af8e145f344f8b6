//! Core module - settings and their persistence
//!
//! # Overview
//!
//! - [`EndgameSettings`] - ending, start position, search budget, heuristics and oracles
//! - [`load_settings`] / [`save_settings`] - JSON file persistence with fall-back to defaults
//! - [`CoreError`] - errors surfaced by settings handling and game orchestration

pub mod error;
pub mod settings;
pub mod settings_persistence;

pub use error::{CoreError, CoreResult};
pub use settings::{EndgameSettings, DEFAULT_MAX_PLIES};
pub use settings_persistence::{default_settings_path, load_settings, save_settings, try_load_settings};
