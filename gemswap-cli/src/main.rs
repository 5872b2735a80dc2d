//! GEMSWAP CLI - Command-line interface
//!
//! Commands:
//! - play: Autoplay a batch of games
//! - hint: Suggest a swap for a board file
//! - check: Show runs and solvability of a board file
//! - save: Play a short session and write a save file
//! - resume: Continue a saved game

mod board_cmd;
mod play_cmd;
mod save_cmd;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use gemswap_core::GameConfig;

#[derive(Parser)]
#[command(name = "gemswap")]
#[command(about = "GEMSWAP match-3 board engine")]
struct Cli {
    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Game configuration JSON file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Autoplay a batch of games
    Play(play_cmd::PlayArgs),
    /// Suggest a swap for a board file
    Hint(board_cmd::BoardArgs),
    /// Show runs and solvability of a board file
    Check(board_cmd::BoardArgs),
    /// Play a short session and write a save file
    Save(save_cmd::SaveArgs),
    /// Continue a saved game
    Resume(save_cmd::ResumeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed, &config),
        Commands::Hint(args) => board_cmd::run_hint(args, &config),
        Commands::Check(args) => board_cmd::run_check(args, &config),
        Commands::Save(args) => save_cmd::run_save(args, cli.seed, &config),
        Commands::Resume(args) => save_cmd::run_resume(args, &config),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&std::path::Path>) -> Result<GameConfig> {
    match path {
        Some(p) => GameConfig::load(p).context("Failed to load configuration"),
        None => Ok(GameConfig::default()),
    }
}

/// Use the given seed, or draw one so the run can be reproduced
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| create_rng(None).gen())
}

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
