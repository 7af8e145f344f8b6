//! xfendgame - endgame self-play around the `endgame_engine` MCTS core
//!
//! - [`core`] - settings, persistence and errors
//! - [`game`] - game loop, batch runner, records and oracle integration
//! - [`cli`] - command-line flags layered over the settings file

pub mod cli;
pub mod core;
pub mod game;
