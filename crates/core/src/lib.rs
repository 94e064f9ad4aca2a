//! Core game logic - the falling-block board engine
//!
//! This crate holds the rules and state of the puzzle and nothing else: no
//! rendering, input polling or frame pacing. Collaborators drive it with
//! commands and ticks and read it back through snapshots.
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Explicit**: all settings come from an [`EngineConfig`]; there is no global state
//! - **Synchronous**: every call runs to completion, nothing blocks
//!
//! # Module Structure
//!
//! - [`board`]: grid of locked cells, row clearing
//! - [`config`]: engine settings and their validation
//! - [`game_state`]: the engine state machine, validity testing, commands and ticks
//! - [`pieces`]: rotation layout tables for the seven kinds
//! - [`rng`]: uniform piece kind and color generation
//! - [`scoring`]: line-clear points and the gravity schedule
//! - [`snapshot`]: read-only views for renderers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: each piece is drawn independently; repeats allowed
//! - **Fixed rotation tables**: 4 states for T/J/L, 2 for I/S/Z, 1 for O; no wall kicks
//! - **Immediate lock**: a piece locks as soon as a downward step fails
//! - **Scoring**: `cleared² × 100` by default, `cleared × 10` when configured
//! - **Top-out**: a locked cell in row 0 (or the configured buffer) ends the game
//!
//! # Example
//!
//! ```
//! use blockfall_core::{spawn_game, Phase};
//! use blockfall_core::types::Command;
//!
//! let mut game = spawn_game(10, 20).unwrap();
//! assert_eq!(game.phase(), Phase::Active);
//!
//! game.apply_command(Command::MoveRight);
//! game.apply_command(Command::Rotate);
//!
//! // Half a second per row at the start
//! game.tick(250);
//! game.tick(251);
//!
//! let snap = game.snapshot();
//! assert_eq!(snap.grid.len(), 20);
//! assert_eq!(snap.score, 0);
//! assert!(!snap.game_over);
//! ```

pub mod board;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, EngineConfig};
pub use game_state::{is_valid, spawn_game, GameState, LockEvent, Phase, Tetromino};
pub use pieces::{get_shape, layouts, PieceShape};
pub use rng::PieceGenerator;
pub use scoring::{calculate_line_score, get_fall_interval_ms, ScoreRule};
pub use snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
