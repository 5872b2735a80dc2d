//! Save and resume commands
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_save(), run_resume() - orchestration
//! - Level 2: play_opening(), load_save(), report_outcome()

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use gemswap_core::{Game, GameConfig, SaveGame, Session};
use gemswap_sim::{continue_game, GameOutcome, GameRunner};

use crate::resolve_seed;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SaveArgs {
    /// Save file to write
    #[arg(long, value_name = "FILE")]
    pub out: PathBuf,

    /// Swaps to autoplay before saving
    #[arg(long, default_value = "10")]
    pub moves: u32,
}

#[derive(Args)]
pub struct ResumeArgs {
    /// Save file to read
    #[arg(long, value_name = "FILE")]
    pub save: PathBuf,

    /// Maximum swaps to autoplay after resuming
    #[arg(long, default_value = "200")]
    pub max_moves: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run save command: play a short session and write it to disk
pub fn run_save(args: SaveArgs, seed: Option<u64>, base: &GameConfig) -> Result<()> {
    let seed = resolve_seed(seed.or(base.seed));
    let (game, outcome) = play_opening(base, seed, args.moves)?;

    let save = SaveGame::capture(&game);
    save.save(&args.out)
        .with_context(|| format!("Failed to write save: {}", args.out.display()))?;

    tracing::info!("Saved game to {}", args.out.display());
    println!(
        "Saved {}x{} game (seed {}) after {} moves: score {}, level {}",
        save.width, save.height, seed, outcome.moves, save.score, save.level
    );
    Ok(())
}

/// Run resume command: restore a save and keep playing
pub fn run_resume(args: ResumeArgs, base: &GameConfig) -> Result<()> {
    let mut game = load_save(&args, base)?;
    let outcome = continue_game(&mut game, args.max_moves).context("Failed to play resumed game")?;

    report_outcome(&outcome, args.json);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// New board, settled, then `moves` hint swaps
fn play_opening(base: &GameConfig, seed: u64, moves: u32) -> Result<(Game<Session>, GameOutcome)> {
    let runner = GameRunner::new(base.clone(), moves);
    let mut game = runner.start(seed).context("Invalid board configuration")?;
    let outcome = continue_game(&mut game, moves).context("Failed to play opening")?;
    Ok((game, outcome))
}

fn load_save(args: &ResumeArgs, base: &GameConfig) -> Result<Game<Session>> {
    let save = SaveGame::load(&args.save)
        .with_context(|| format!("Failed to load save: {}", args.save.display()))?;
    let game = save
        .restore(base.clone())
        .with_context(|| format!("Failed to restore save: {}", args.save.display()))?;
    Ok(game)
}

fn report_outcome(outcome: &GameOutcome, json: bool) {
    if json {
        if let Ok(text) = serde_json::to_string_pretty(outcome) {
            println!("{}", text);
        }
        return;
    }

    println!("\n=== Resumed Game ===");
    println!("Score:    {}", outcome.score);
    println!("Level:    {}", outcome.level);
    println!("Moves:    {}", outcome.moves);
    println!("Removed:  {}", outcome.removed);
    println!("Cascade:  {} waves max", outcome.longest_cascade);
    println!("Ended:    {:?}", outcome.end);
}

// ============================================================================
// TESTS
// ============================================================================
