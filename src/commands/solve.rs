//! Secret solving command
//!
//! Plays one game against a known secret and returns the solution path.

use crate::core::{Code, CodeSpace, Feedback, GameConfig, evaluate};
use crate::solver::Strategy;
use anyhow::{Context, Result, bail};
use log::info;
use rand::prelude::IndexedRandom;

/// Rounds after which a game is abandoned
pub const DEFAULT_MAX_ROUNDS: usize = 100;

/// Configuration for solving a secret
#[derive(Debug, Clone, Copy)]
pub struct SolveConfig {
    pub game: GameConfig,
    pub secret: Code,
    pub max_rounds: usize,
}

impl SolveConfig {
    #[must_use]
    pub const fn new(game: GameConfig, secret: Code) -> Self {
        Self {
            game,
            secret,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

/// Result of solving a secret
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub success: bool,
    pub guesses: Vec<GuessStep>,
    pub secret: Code,
}

impl SolveResult {
    /// Number of guesses played
    #[must_use]
    pub fn rounds(&self) -> usize {
        self.guesses.len()
    }
}

/// A single guess step in the solution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessStep {
    pub guess: Code,
    pub feedback: Feedback,
    pub candidates_before: usize,
    pub candidates_after: usize,
}

/// Solve a known secret with the given strategy
///
/// The strategy is left ready for another game whatever the outcome: after a
/// win, a tripped round guard, or a failed round.
///
/// # Errors
///
/// Returns an error if:
/// - The secret does not fit the game configuration
/// - The strategy fails to produce a guess or rejects the feedback
pub fn solve_secret<S: Strategy>(config: &SolveConfig, strategy: &mut S) -> Result<SolveResult> {
    config
        .game
        .validate_code(&config.secret)
        .with_context(|| format!("Invalid secret {}", config.secret))?;

    let result = play_rounds(config, strategy);
    if !matches!(&result, Ok(solved) if solved.success) {
        strategy.reset();
    }
    result
}

fn play_rounds<S: Strategy>(config: &SolveConfig, strategy: &mut S) -> Result<SolveResult> {
    let n_places = config.game.n_places();
    let mut guesses = Vec::new();

    for round in 1..=config.max_rounds {
        let candidates_before = strategy.candidates().len();
        let guess = strategy
            .new_guess()
            .with_context(|| format!("{} strategy failed in round {round}", strategy.name()))?;

        let feedback = evaluate(&config.secret, &guess);
        info!("{round}. Guess: {guess}, response {feedback}");
        strategy
            .feedback(feedback)
            .with_context(|| format!("{} strategy rejected {feedback}", strategy.name()))?;

        let solved = feedback.is_solved(n_places);
        guesses.push(GuessStep {
            guess,
            feedback,
            candidates_before,
            candidates_after: if solved { 1 } else { strategy.candidates().len() },
        });

        if solved {
            return Ok(SolveResult {
                success: true,
                guesses,
                secret: config.secret,
            });
        }
    }

    Ok(SolveResult {
        success: false,
        guesses,
        secret: config.secret,
    })
}

/// Number of guesses needed for `secret`, failing if the round guard trips
///
/// # Errors
/// Returns an error if solving fails or the secret is not found within
/// `max_rounds`.
pub fn count_guesses<S: Strategy>(
    game: GameConfig,
    secret: Code,
    max_rounds: usize,
    strategy: &mut S,
) -> Result<usize> {
    let config = SolveConfig {
        game,
        secret,
        max_rounds,
    };
    let result = solve_secret(&config, strategy)?;
    if !result.success {
        bail!("The solver could not find {secret} within {max_rounds} guesses");
    }
    Ok(result.rounds())
}

/// Draw a secret uniformly from the code space
#[must_use]
pub fn random_secret(space: &CodeSpace) -> Option<Code> {
    space.codes().choose(&mut rand::rng()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::KnuthStrategy;
    use std::sync::Arc;

    fn setup(n_colors: u8, n_places: usize) -> (GameConfig, KnuthStrategy) {
        let game = GameConfig::new(n_colors, n_places).unwrap();
        (game, KnuthStrategy::new(Arc::new(CodeSpace::new(game))))
    }

    #[test]
    fn solve_secret_succeeds() {
        let (game, mut strategy) = setup(6, 4);
        let secret = Code::new(&[6, 5, 4, 3]).unwrap();

        let result = solve_secret(&SolveConfig::new(game, secret), &mut strategy).unwrap();

        assert!(result.success);
        assert!(result.rounds() <= 5);
        let last = result.guesses.last().unwrap();
        assert_eq!(last.guess, secret);
        assert!(last.feedback.is_solved(4));
    }

    #[test]
    fn solve_records_history() {
        let (game, mut strategy) = setup(4, 3);
        let secret = Code::new(&[2, 2, 3]).unwrap();

        let result = solve_secret(&SolveConfig::new(game, secret), &mut strategy).unwrap();

        assert_eq!(result.guesses[0].candidates_before, 64);
        for step in &result.guesses {
            assert!(step.candidates_after <= step.candidates_before);
            assert_eq!(step.feedback, evaluate(&secret, &step.guess));
        }
        for pair in result.guesses.windows(2) {
            assert_eq!(pair[0].candidates_after, pair[1].candidates_before);
        }
    }

    #[test]
    fn invalid_secret_returns_error() {
        let (game, mut strategy) = setup(4, 3);
        let too_many_colors = Code::new(&[1, 5, 1]).unwrap();
        let too_long = Code::new(&[1, 1, 1, 1]).unwrap();

        assert!(solve_secret(&SolveConfig::new(game, too_many_colors), &mut strategy).is_err());
        assert!(solve_secret(&SolveConfig::new(game, too_long), &mut strategy).is_err());
    }

    #[test]
    fn round_guard_stops_game() {
        let (game, mut strategy) = setup(6, 4);
        let secret = Code::new(&[6, 6, 6, 6]).unwrap();
        let config = SolveConfig {
            max_rounds: 1,
            ..SolveConfig::new(game, secret)
        };

        let result = solve_secret(&config, &mut strategy).unwrap();
        assert!(!result.success);
        assert_eq!(result.rounds(), 1);

        let (_, mut fresh) = setup(6, 4);
        assert!(count_guesses(game, secret, 1, &mut fresh).is_err());
    }

    #[test]
    fn abandoned_game_leaves_strategy_fresh() {
        let (game, mut strategy) = setup(6, 4);
        let secret = Code::new(&[6, 6, 6, 6]).unwrap();
        let config = SolveConfig {
            max_rounds: 2,
            ..SolveConfig::new(game, secret)
        };

        assert!(!solve_secret(&config, &mut strategy).unwrap().success);
        assert_eq!(strategy.candidates().len(), 1296);

        // The next game plays exactly as it would on a new instance
        let other = Code::new(&[1, 3, 5, 2]).unwrap();
        let reused = solve_secret(&SolveConfig::new(game, other), &mut strategy).unwrap();
        let (_, mut fresh) = setup(6, 4);
        let expected = solve_secret(&SolveConfig::new(game, other), &mut fresh).unwrap();
        assert_eq!(reused.guesses, expected.guesses);
    }

    #[test]
    fn strategy_is_reusable_after_a_win() {
        let (game, mut strategy) = setup(3, 3);
        for secret in [Code::new(&[1, 2, 3]).unwrap(), Code::new(&[3, 3, 1]).unwrap()] {
            let rounds = count_guesses(game, secret, DEFAULT_MAX_ROUNDS, &mut strategy).unwrap();
            assert!(rounds >= 1);
            assert_eq!(strategy.candidates().len(), 27);
        }
    }

    #[test]
    fn random_secret_is_valid() {
        let game = GameConfig::new(5, 3).unwrap();
        let space = CodeSpace::new(game);
        let secret = random_secret(&space).unwrap();
        assert!(game.validate_code(&secret).is_ok());
    }
}
