//! Game runner - plays single games by always taking the hint move
//!
//! Level 3 - Step-level implementation

use gemswap_core::{Game, GameConfig, GridError, PickOutcome, Session, TickOutcome};
use serde::Serialize;

/// Why a game stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EndReason {
    /// No swap could make a combo
    OutOfMoves,
    /// The move limit was reached first
    MoveLimit,
}

/// Outcome of a single game
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    /// Seed the board was built from (None for resumed games)
    pub seed: Option<u64>,
    pub score: u64,
    pub level: u32,
    /// Swaps made
    pub moves: u32,
    /// Pieces removed, cascades included
    pub removed: usize,
    /// Most waves in a single cascade
    pub longest_cascade: usize,
    pub end: EndReason,
}

impl GameOutcome {
    /// Check if the board ran out of moves
    pub fn is_out_of_moves(&self) -> bool {
        self.end == EndReason::OutOfMoves
    }
}

/// Game runner that plays games headlessly
pub struct GameRunner {
    /// Board configuration
    config: GameConfig,
    /// Moves after which a game is stopped
    max_moves: u32,
    /// Random seed counter
    seed_counter: u64,
}

impl GameRunner {
    /// Create a new game runner
    pub fn new(config: GameConfig, max_moves: u32) -> Self {
        let seed_counter = config.seed.unwrap_or(42);
        Self {
            config,
            max_moves,
            seed_counter,
        }
    }

    /// Fresh board built from `seed`, settled and ready for the first move
    ///
    /// Runs already on the new board are cleared before play starts and do
    /// not score.
    pub fn start(&self, seed: u64) -> Result<Game<Session>, GridError> {
        let config = self.config.clone().with_seed(seed);
        let mut game = Game::new_board(config, Session::new())?;
        game.settle();
        *game.observer_mut() = Session::new();
        Ok(game)
    }

    /// Play one game on a fresh board built from `seed`
    pub fn play(&self, seed: u64) -> Result<GameOutcome, GridError> {
        let mut game = self.start(seed)?;
        let mut outcome = continue_game(&mut game, self.max_moves)?;
        outcome.seed = Some(seed);
        Ok(outcome)
    }

    /// Play a game with the next seed from the counter
    pub fn play_next(&mut self) -> Result<GameOutcome, GridError> {
        let seed = self.next_seed();
        self.play(seed)
    }

    /// Get next seed and increment counter
    fn next_seed(&mut self) -> u64 {
        let seed = self.seed_counter;
        self.seed_counter = self.seed_counter.wrapping_add(1);
        seed
    }

    /// Reset seed counter
    pub fn reset_seed(&mut self, seed: u64) {
        self.seed_counter = seed;
    }

    /// Get configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

/// Autoplay an existing game until it runs out of moves or `max_moves`
/// swaps have been made
pub fn continue_game(game: &mut Game<Session>, max_moves: u32) -> Result<GameOutcome, GridError> {
    let mut moves = 0u32;
    let mut removed = 0usize;
    let mut longest_cascade = 0usize;

    let (mut state, settled) = game.settle();
    removed += settled.removed;
    longest_cascade = longest_cascade.max(settled.waves);

    let end = loop {
        if state == TickOutcome::OutOfMoves {
            break EndReason::OutOfMoves;
        }
        if moves >= max_moves {
            break EndReason::MoveLimit;
        }
        let Some((a, b)) = game.hint() else {
            break EndReason::OutOfMoves;
        };

        game.pick(a.pos.x, a.pos.y)?;
        match game.pick(b.pos.x, b.pos.y)? {
            PickOutcome::Matched(report) => {
                removed += report.removed;
                longest_cascade = longest_cascade.max(report.waves);
            }
            other => tracing::warn!("hint swap did not match: {:?}", other),
        }
        moves += 1;

        let (next, settled) = game.settle();
        removed += settled.removed;
        longest_cascade = longest_cascade.max(settled.waves);
        state = next;
    };

    let session = game.observer();
    tracing::debug!(
        "game ended after {} moves: score {}, {:?}",
        moves,
        session.score(),
        end
    );

    Ok(GameOutcome {
        seed: None,
        score: session.score(),
        level: session.level(),
        moves,
        removed,
        longest_cascade,
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(max_moves: u32) -> GameRunner {
        GameRunner::new(GameConfig::default().with_size(6, 6).with_gem_types(5), max_moves)
    }

    #[test]
    fn test_play_respects_move_limit() {
        let outcome = runner(5).play(1).unwrap();
        assert!(outcome.moves <= 5);
        if outcome.end == EndReason::MoveLimit {
            assert_eq!(outcome.moves, 5);
        }
        assert_eq!(outcome.seed, Some(1));
    }

    #[test]
    fn test_every_move_scores() {
        let outcome = runner(20).play(3).unwrap();
        assert!(outcome.removed >= 3 * outcome.moves as usize);
        assert!(outcome.score >= 10 * outcome.removed as u64);
        if outcome.moves > 0 {
            assert!(outcome.longest_cascade >= 1);
        }
    }

    #[test]
    fn test_start_is_settled_and_unscored() {
        let game = runner(10).start(4).unwrap();
        assert!(game.grid().is_full());
        assert!(gemswap_core::combo::detect(game.grid()).is_empty());
        assert_eq!(game.observer().score(), 0);
    }

    #[test]
    fn test_zero_moves_allowed() {
        let outcome = runner(0).play(9).unwrap();
        assert_eq!(outcome.moves, 0);
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let r = runner(30);
        assert_eq!(r.play(11).unwrap(), r.play(11).unwrap());
    }

    #[test]
    fn test_seed_counter() {
        let mut r = GameRunner::new(GameConfig::default().with_seed(7), 3);
        assert_eq!(r.play_next().unwrap().seed, Some(7));
        assert_eq!(r.play_next().unwrap().seed, Some(8));
        r.reset_seed(100);
        assert_eq!(r.play_next().unwrap().seed, Some(100));
    }

    #[test]
    fn test_small_board_ends_by_out_of_moves_or_limit() {
        let r = GameRunner::new(GameConfig::default().with_size(4, 4).with_gem_types(7), 500);
        for seed in 0..5 {
            let outcome = r.play(seed).unwrap();
            assert!(outcome.is_out_of_moves() || outcome.moves == 500);
        }
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let r = GameRunner::new(GameConfig::default().with_size(2, 2), 5);
        assert!(r.play(0).is_err());
    }
}
