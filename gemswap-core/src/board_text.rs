//! Board text format
//!
//! One line per row, top row first. Each line holds the gem type of every
//! column, separated by commas:
//!
//! ```text
//! 1, 2, 3, 4
//! 2, 3, 4, 1
//! 0, 4, 1, 2
//! ```
//!
//! Whitespace around tokens is ignored and blank lines are skipped. Type 0
//! is an empty slot; types above the board's type count are rejected.
//! Parsing finishes before any grid is built, so a bad file never yields a
//! partial board.

use crate::error::BoardParseError;
use crate::grid::Grid;
use crate::piece::GemType;

pub const DELIMITER: char = ',';

/// Parse board text into a type matrix `rows[y][x]`
pub fn parse(source: &str, gem_types: GemType) -> Result<Vec<Vec<GemType>>, BoardParseError> {
    parse_sized(source, gem_types, None)
}

/// Parse and additionally require an exact `(width, height)`
pub fn parse_sized(
    source: &str,
    gem_types: GemType,
    size: Option<(usize, usize)>,
) -> Result<Vec<Vec<GemType>>, BoardParseError> {
    let mut rows: Vec<Vec<GemType>> = Vec::new();
    let mut width = size.map(|(w, _)| w);

    for (index, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = index + 1;

        let row = parse_line(line, line_no, gem_types)?;
        match width {
            Some(expected) if expected != row.len() => {
                return Err(BoardParseError::ColumnCount {
                    line: line_no,
                    expected,
                    found: row.len(),
                });
            }
            Some(_) => {}
            None => width = Some(row.len()),
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(BoardParseError::Empty);
    }

    if let Some((_, expected)) = size {
        if rows.len() != expected {
            return Err(BoardParseError::LineCount {
                expected,
                found: rows.len(),
            });
        }
    }

    Ok(rows)
}

/// Parse board text straight into a grid
pub fn load_board(
    source: &str,
    gem_types: GemType,
    seed: Option<u64>,
) -> Result<Grid, BoardParseError> {
    let rows = parse(source, gem_types)?;
    let grid = Grid::from_rows(&rows, gem_types, seed)?;
    tracing::info!("loaded {}x{} board", grid.width(), grid.height());
    Ok(grid)
}

/// Render a grid in the same format `parse` reads
pub fn render(grid: &Grid) -> String {
    let mut out = String::new();
    for row in grid.kind_rows() {
        let tokens: Vec<String> = row.iter().map(|k| k.to_string()).collect();
        out.push_str(&tokens.join(", "));
        out.push('\n');
    }
    out
}

fn parse_line(
    line: &str,
    line_no: usize,
    gem_types: GemType,
) -> Result<Vec<GemType>, BoardParseError> {
    line.split(DELIMITER)
        .enumerate()
        .map(|(col, token)| {
            let token = token.trim();
            let kind: u32 = token.parse().map_err(|_| BoardParseError::InvalidToken {
                line: line_no,
                column: col + 1,
                token: token.to_string(),
            })?;

            if kind > u32::from(gem_types) {
                return Err(BoardParseError::UnknownType {
                    line: line_no,
                    column: col + 1,
                    kind,
                    max: gem_types,
                });
            }
            Ok(kind as GemType)
        })
        .collect()
}
