//! Batch play - many seeded games, optionally in parallel
//!
//! Level 2 - Phase-level implementation

use gemswap_core::GridError;
use rayon::prelude::*;
use serde::Serialize;

use crate::config::SimConfig;
use crate::game_runner::{GameOutcome, GameRunner};

/// Aggregate result of a batch
#[derive(Clone, Debug, Serialize)]
pub struct BatchResult {
    /// Total games played
    pub games_played: usize,
    /// Average final score
    pub mean_score: f64,
    /// Average number of swaps per game
    pub mean_moves: f64,
    /// Games that ended with no move left
    pub out_of_moves: usize,
    /// Highest final score
    pub best_score: u64,
    /// Individual game outcomes, in seed order
    pub outcomes: Vec<GameOutcome>,
}

impl BatchResult {
    /// Create empty result
    pub fn empty() -> Self {
        Self {
            games_played: 0,
            mean_score: 0.0,
            mean_moves: 0.0,
            out_of_moves: 0,
            best_score: 0,
            outcomes: Vec::new(),
        }
    }

    /// Fraction of games that ran out of moves
    pub fn out_of_moves_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.out_of_moves as f64 / self.games_played as f64
        }
    }
}

/// Play every game of the batch (Level 2 phase)
pub fn run_batch(config: &SimConfig) -> Result<BatchResult, GridError> {
    config.game.validate()?;
    if config.games == 0 {
        return Ok(BatchResult::empty());
    }

    let seeds = prepare_seeds(config);
    let runner = GameRunner::new(config.game.clone(), config.max_moves);

    let outcomes = if config.parallel {
        execute_games_parallel(&runner, &seeds)?
    } else {
        execute_games(&runner, &seeds)?
    };

    tracing::info!("batch finished: {} games", outcomes.len());
    Ok(aggregate_results(outcomes))
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// One seed per game, counting up from the base seed
fn prepare_seeds(config: &SimConfig) -> Vec<u64> {
    let base = config.base_seed();
    (0..config.games)
        .map(|i| base.wrapping_add(i as u64))
        .collect()
}

/// Execute games sequentially
fn execute_games(runner: &GameRunner, seeds: &[u64]) -> Result<Vec<GameOutcome>, GridError> {
    seeds.iter().map(|&seed| runner.play(seed)).collect()
}

/// Execute games in parallel using rayon
fn execute_games_parallel(
    runner: &GameRunner,
    seeds: &[u64],
) -> Result<Vec<GameOutcome>, GridError> {
    seeds.par_iter().map(|&seed| runner.play(seed)).collect()
}

/// Aggregate game outcomes into a batch result
fn aggregate_results(outcomes: Vec<GameOutcome>) -> BatchResult {
    if outcomes.is_empty() {
        return BatchResult::empty();
    }

    let n = outcomes.len() as f64;
    let total_score: u64 = outcomes.iter().map(|o| o.score).sum();
    let total_moves: u64 = outcomes.iter().map(|o| u64::from(o.moves)).sum();

    BatchResult {
        games_played: outcomes.len(),
        mean_score: total_score as f64 / n,
        mean_moves: total_moves as f64 / n,
        out_of_moves: outcomes.iter().filter(|o| o.is_out_of_moves()).count(),
        best_score: outcomes.iter().map(|o| o.score).max().unwrap_or(0),
        outcomes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_runner::EndReason;
    use gemswap_core::GameConfig;

    fn outcome(score: u64, moves: u32, end: EndReason) -> GameOutcome {
        GameOutcome {
            seed: None,
            score,
            level: 1,
            moves,
            removed: 0,
            longest_cascade: 0,
            end,
        }
    }

    fn small_config(games: usize) -> SimConfig {
        SimConfig::games(games)
            .with_max_moves(15)
            .with_seed(5)
            .with_game(GameConfig::default().with_size(6, 6).with_gem_types(5))
    }

    #[test]
    fn test_aggregate_empty() {
        let result = aggregate_results(Vec::new());
        assert_eq!(result.games_played, 0);
        assert_eq!(result.out_of_moves_rate(), 0.0);
    }

    #[test]
    fn test_aggregate_results() {
        let result = aggregate_results(vec![
            outcome(100, 4, EndReason::OutOfMoves),
            outcome(300, 10, EndReason::MoveLimit),
        ]);
        assert_eq!(result.games_played, 2);
        assert!((result.mean_score - 200.0).abs() < 1e-9);
        assert!((result.mean_moves - 7.0).abs() < 1e-9);
        assert_eq!(result.out_of_moves, 1);
        assert_eq!(result.best_score, 300);
        assert!((result.out_of_moves_rate() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_seeds_count_up() {
        assert_eq!(prepare_seeds(&small_config(3)), vec![5, 6, 7]);
    }

    #[test]
    fn test_zero_games() {
        let result = run_batch(&small_config(0)).unwrap();
        assert_eq!(result.games_played, 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = run_batch(&small_config(6)).unwrap();
        let parallel = run_batch(&small_config(6).with_parallel(true)).unwrap();

        assert_eq!(sequential.games_played, 6);
        assert_eq!(sequential.outcomes, parallel.outcomes);
        assert_eq!(sequential.best_score, parallel.best_score);
    }

    #[test]
    fn test_invalid_board_rejected() {
        let config = small_config(2).with_game(GameConfig::default().with_gem_types(1));
        assert!(run_batch(&config).is_err());
    }
}
