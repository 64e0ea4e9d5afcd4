//! Opening guess command

use crate::core::Code;
use crate::solver::{Strategy, StrategyType};
use anyhow::{Context, Result};

/// The opening guess of a strategy and how well it splits the code space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstGuess {
    pub guess: Code,
    /// Distinct feedbacks the guess can produce
    pub buckets: usize,
    /// Codes left in the worst case
    pub largest_bucket: usize,
    /// Guaranteed rounds to isolate the secret, when proven
    pub depth: Option<usize>,
}

/// Compute (or load from the strategy's store) the opening guess
///
/// # Errors
/// Returns an error if the strategy fails to produce a guess.
pub fn first_guess(strategy: &mut StrategyType) -> Result<FirstGuess> {
    let guess = strategy
        .new_guess()
        .with_context(|| format!("{} strategy failed to choose an opening", strategy.name()))?;
    let entry = strategy
        .current_entry()
        .context("Opening guess was not cached")?;

    Ok(FirstGuess {
        guess,
        buckets: entry.partition.len(),
        largest_bucket: entry.partition.largest_bucket(),
        depth: entry.depth,
    })
}
