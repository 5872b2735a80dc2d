//! Play command - autoplay a batch of games
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), run_batch()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;

use gemswap_core::{GameConfig, GemType};
use gemswap_sim::{run_batch, BatchResult, SimConfig};

use crate::resolve_seed;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Maximum swaps per game
    #[arg(long, default_value = "200")]
    pub max_moves: u32,

    /// Board width (defaults to the config value)
    #[arg(long)]
    pub width: Option<usize>,

    /// Board height (defaults to the config value)
    #[arg(long)]
    pub height: Option<usize>,

    /// Number of gem types (defaults to the config value)
    #[arg(long)]
    pub types: Option<GemType>,

    /// Play games in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Build the batch configuration
/// 2. Play every game
/// 3. Report results
pub fn run(args: PlayArgs, seed: Option<u64>, base: &GameConfig) -> Result<()> {
    let config = build_config(&args, seed, base);

    tracing::info!(
        "Playing {} games on {}x{} boards ({} types, seed {:?})",
        config.games,
        config.game.width,
        config.game.height,
        config.game.gem_types,
        config.seed
    );

    let result = run_batch(&config).context("Failed to play games")?;

    if args.json {
        print_json_results(&result);
    } else {
        print_text_results(&result);
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &PlayArgs, seed: Option<u64>, base: &GameConfig) -> SimConfig {
    let game = base
        .clone()
        .with_size(
            args.width.unwrap_or(base.width),
            args.height.unwrap_or(base.height),
        )
        .with_gem_types(args.types.unwrap_or(base.gem_types));

    SimConfig::games(args.games)
        .with_max_moves(args.max_moves)
        .with_parallel(args.parallel)
        .with_seed(resolve_seed(seed.or(base.seed)))
        .with_game(game)
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Print results as JSON
fn print_json_results(result: &BatchResult) {
    if let Ok(json) = serde_json::to_string_pretty(result) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(result: &BatchResult) {
    println!("\n=== Play Results ===");
    println!("Games:        {}", result.games_played);
    println!("Mean score:   {:.1}", result.mean_score);
    println!("Best score:   {}", result.best_score);
    println!("Mean moves:   {:.1}", result.mean_moves);
    println!(
        "Out of moves: {} ({:.1}%)",
        result.out_of_moves,
        result.out_of_moves_rate() * 100.0
    );

    println!("\nGame details:");
    for (i, game) in result.outcomes.iter().enumerate() {
        println!(
            "  Game {}: score {} (level {}) in {} moves, {:?}",
            i + 1,
            game.score,
            game.level,
            game.moves,
            game.end
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
