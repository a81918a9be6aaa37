//! Game rules, timing and the ports the engine talks through.
//!
//! This module orchestrates the core data structures into a playable game:
//!
//! - [`GameState`] - Board, active piece, score and the Playing/GameOver lifecycle
//! - [`Game`] - Tick loop that wires a [`GameState`] to an [`InputPort`], a
//!   [`RenderPort`] and a [`Clock`]
//! - [`GameStats`] - Score, level and line clear counters
//! - [`GameConfig`] - Fall interval curve and input stall timing
//! - [`PieceGenerator`] / [`PieceSeed`] - Independent shape and color draws
//! - [`Snapshot`] - Immutable per-tick view handed to renderers
//!
//! # Game Flow
//!
//! 1. Create a [`Game`] with the ports and a seed
//! 2. Call [`Game::tick`] repeatedly; each tick reads the clock and the input,
//!    applies moves, runs gravity and publishes a snapshot
//! 3. When a spawned piece collides, the game enters [`GamePhase::GameOver`]
//! 4. A [`Command::Reset`] from the input starts a fresh game
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_engine::{Command, GameConfig, GameState, PieceSeed};
//!
//! let mut state = GameState::with_seed(GameConfig::default(), PieceSeed::from_u128(7), Duration::ZERO);
//!
//! state.tick(Duration::from_millis(10), &[Command::MoveLeft]);
//! let outcome = state.tick(Duration::from_millis(600), &[]);
//! assert!(outcome.gravity().is_some());
//! ```

pub use self::{
    clock::*, config::*, game::*, game_state::*, game_stats::*, piece_generator::*, ports::*,
    snapshot::*,
};

mod clock;
mod config;
mod game;
mod game_state;
mod game_stats;
mod piece_generator;
mod ports;
mod snapshot;
