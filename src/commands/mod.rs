//! Command implementations

pub mod first_guess;
pub mod play;
pub mod solve;
pub mod stats;

pub use first_guess::{FirstGuess, first_guess};
pub use play::{PlayOutcome, play};
pub use solve::{
    DEFAULT_MAX_ROUNDS, GuessStep, SolveConfig, SolveResult, count_guesses, random_secret,
    solve_secret,
};
pub use stats::{GuessDistribution, StatsConfig, StatsReport, run_stats};
