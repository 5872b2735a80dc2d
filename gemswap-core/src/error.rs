//! Error types for board construction, parsing and persistence

use thiserror::Error;

use crate::piece::GemType;

/// Grid access and construction errors
///
/// `OutOfRange` signals a caller bug: every coordinate the engine hands out
/// is in range, so seeing one means the caller built a position by hand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} board")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("board must be at least 3x3, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("at least 2 gem types are required, got {0}")]
    InvalidTypeCount(u8),
}

/// Board text could not be turned into a grid
///
/// Lines and columns are reported 1-based, the way an editor shows them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("board source is empty")]
    Empty,

    #[error("expected {expected} rows, found {found}")]
    LineCount { expected: usize, found: usize },

    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}, column {column}: '{token}' is not a gem type")]
    InvalidToken {
        line: usize,
        column: usize,
        token: String,
    },

    #[error("line {line}, column {column}: gem type {kind} exceeds maximum {max}")]
    UnknownType {
        line: usize,
        column: usize,
        kind: u32,
        max: GemType,
    },

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// An exported cell list could not be turned back into a grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} board")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("cell ({x}, {y}) appears more than once")]
    DuplicateCell { x: usize, y: usize },

    #[error("cell ({x}, {y}) has gem type {kind}, maximum is {max}")]
    UnknownType {
        x: usize,
        y: usize,
        kind: GemType,
        max: GemType,
    },

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Save/resume failures
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("save file is malformed: {0}")]
    Format(#[from] serde_json::Error),

    #[error("save file version {found} is not supported (expected {expected})")]
    Version { found: u32, expected: u32 },

    #[error("saved board is invalid: {0}")]
    State(#[from] StateError),
}
