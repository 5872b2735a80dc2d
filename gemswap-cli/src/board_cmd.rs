//! Board commands - inspect a board file (hint, check)
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_hint(), run_check() - orchestration
//! - Level 2: load_board(), report_hint(), report_check()
//! - Level 4: argument parsing utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use gemswap_core::{board_text, combo, find_move, GameConfig, GemType, Grid, Piece};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BoardArgs {
    /// Board text file (one comma-separated row per line)
    #[arg(long, value_name = "FILE")]
    pub board: PathBuf,

    /// Number of gem types (defaults to the config value)
    #[arg(long)]
    pub types: Option<GemType>,

    /// Required board size, e.g. 8x8
    #[arg(long, value_parser = parse_size)]
    pub size: Option<(usize, usize)>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run hint command: print the suggested swap
pub fn run_hint(args: BoardArgs, config: &GameConfig) -> Result<()> {
    let grid = load_board(&args, config)?;
    let hint = find_move(&grid);

    if args.json {
        print_json(&JsonHint::from_move(hint));
    } else {
        report_hint(hint);
    }
    Ok(())
}

/// Run check command: print runs on the board and whether a move exists
pub fn run_check(args: BoardArgs, config: &GameConfig) -> Result<()> {
    let grid = load_board(&args, config)?;
    let found = combo::detect(&grid);
    let hint = find_move(&grid);

    tracing::info!(
        "checked {}x{} board: {} pieces in runs",
        grid.width(),
        grid.height(),
        found.count()
    );

    if args.json {
        #[derive(serde::Serialize)]
        struct JsonCheck {
            width: usize,
            height: usize,
            combo_count: usize,
            combo: Vec<[usize; 2]>,
            solvable: bool,
            hint: JsonHint,
        }

        print_json(&JsonCheck {
            width: grid.width(),
            height: grid.height(),
            combo_count: found.count(),
            combo: found.positions().map(|p| [p.x, p.y]).collect(),
            solvable: hint.is_some(),
            hint: JsonHint::from_move(hint),
        });
    } else {
        report_check(&grid, &found, hint);
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Read and parse the board file
pub(crate) fn load_board(args: &BoardArgs, config: &GameConfig) -> Result<Grid> {
    let text = std::fs::read_to_string(&args.board)
        .with_context(|| format!("Failed to read board: {}", args.board.display()))?;
    let types = args.types.unwrap_or(config.gem_types);

    let rows = board_text::parse_sized(&text, types, args.size)
        .with_context(|| format!("Failed to parse board: {}", args.board.display()))?;
    let grid = Grid::from_rows(&rows, types, config.seed)
        .with_context(|| format!("Invalid board: {}", args.board.display()))?;
    Ok(grid)
}

fn report_hint(hint: Option<(Piece, Piece)>) {
    match hint {
        Some(m) => println!("{}", format_move(m)),
        None => println!("no moves"),
    }
}

fn report_check(grid: &Grid, found: &combo::Combo, hint: Option<(Piece, Piece)>) {
    println!("\n=== Board {}x{} ===", grid.width(), grid.height());
    print!("{}", grid);

    if found.is_empty() {
        println!("\nRuns:   none");
    } else {
        let cells: Vec<String> = found
            .positions()
            .map(|p| format!("({}, {})", p.x, p.y))
            .collect();
        println!("\nRuns:   {} pieces {}", found.count(), cells.join(" "));
    }

    match hint {
        Some(m) => println!("Moves:  yes, {}", format_move(m)),
        None => println!("Moves:  none (game over)"),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

#[derive(serde::Serialize)]
struct JsonHint {
    from: Option<[usize; 2]>,
    to: Option<[usize; 2]>,
}

impl JsonHint {
    fn from_move(hint: Option<(Piece, Piece)>) -> Self {
        Self {
            from: hint.map(|(a, _)| [a.pos.x, a.pos.y]),
            to: hint.map(|(_, b)| [b.pos.x, b.pos.y]),
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    if let Ok(json) = serde_json::to_string_pretty(value) {
        println!("{}", json);
    }
}

/// "swap (x1, y1) <-> (x2, y2)"
pub(crate) fn format_move((a, b): (Piece, Piece)) -> String {
    format!(
        "swap ({}, {}) <-> ({}, {})",
        a.pos.x, a.pos.y, b.pos.x, b.pos.y
    )
}

/// Parse "WxH"
fn parse_size(s: &str) -> std::result::Result<(usize, usize), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{}'", s))?;
    let w = w.trim().parse().map_err(|_| format!("bad width in '{}'", s))?;
    let h = h.trim().parse().map_err(|_| format!("bad height in '{}'", s))?;
    Ok((w, h))
}

// ============================================================================
// TESTS
// ============================================================================
