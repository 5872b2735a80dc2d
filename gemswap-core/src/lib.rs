//! GEMSWAP Core - Match-3 board engine
//!
//! This crate provides the board simulation for GEMSWAP:
//! - Grid model with seedable spawning
//! - Combo detection and layer-by-layer gravity with refills
//! - Pick/swap selection with deferred revert of unproductive swaps
//! - Solvability scan used for hints and game over
//! - Board text loading, state export/import, save files and scoring
//!
//! Coordinates are `(x, y)` with `x` the column and `y` the row; row 0 is
//! the top edge where new gems appear.

pub mod error;
pub mod piece;
pub mod grid;
pub mod combo;
pub mod gravity;
pub mod cascade;
pub mod solver;
pub mod events;
pub mod selection;
pub mod board_text;
pub mod state;
pub mod session;
pub mod config;
pub mod engine;
pub mod persistence;

// Re-exports for convenient access
pub use error::{BoardParseError, GridError, PersistenceError, StateError};
pub use piece::{GemType, Lifecycle, Piece, PieceId, Pos, Variant, DEFAULT_GEM_TYPES, EMPTY_TYPE};
pub use grid::{is_adjacent, Grid, KindView};
pub use combo::{Combo, MIN_COMBO_LENGTH};
pub use gravity::GravityReport;
pub use cascade::{cascade, CascadeReport};
pub use solver::{any_move_exists, find_move};
pub use events::{BoardEvent, BoardObserver, EventLog};
pub use selection::{
    PendingRevert, PickOutcome, SelectionController, SelectionState, Settled, TickOutcome,
    TransitionProbe,
};
pub use state::{export_state, import_state, CellState};
pub use session::{Session, LEVEL_BASE_TARGET, POINTS_PER_PIECE};
pub use config::GameConfig;
pub use engine::Game;
pub use persistence::{SaveGame, SAVE_VERSION};
