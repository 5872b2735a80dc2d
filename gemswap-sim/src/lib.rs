//! GEMSWAP Sim - Headless play of the board engine
//!
//! This crate drives `gemswap-core` without a UI:
//! - Single games played by always taking the hint move
//! - Batches of seeded games, sequential or parallel
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 2: run_batch (phase)
//! - Level 3: GameRunner::play, continue_game (steps)
//! - Level 4: configuration

mod batch;
mod config;
mod game_runner;

pub use batch::{run_batch, BatchResult};
pub use config::SimConfig;
pub use game_runner::{continue_game, EndReason, GameOutcome, GameRunner};
