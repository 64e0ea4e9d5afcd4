//! Batch statistics
//!
//! Replays every secret of the code space with one strategy and aggregates
//! how many guesses each game needed.

use super::solve::{DEFAULT_MAX_ROUNDS, count_guesses};
use crate::core::{CodeSpace, GameConfig};
use crate::solver::{Strategy, StrategyConfig, StrategyType};
use crate::store::{FirstRound, FirstRoundStore, MemoryStore, store_key};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Number of secrets solved with each guess count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessDistribution {
    counts: BTreeMap<usize, usize>,
}

impl GuessDistribution {
    /// Tally a list of per-game guess counts
    pub fn from_rounds(rounds: impl IntoIterator<Item = usize>) -> Self {
        let mut counts = BTreeMap::new();
        for r in rounds {
            *counts.entry(r).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Guess count to number of games, in increasing guess count
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts.iter().map(|(&rounds, &games)| (rounds, games))
    }

    /// Number of games
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Worst guess count, 0 when empty
    #[must_use]
    pub fn max(&self) -> usize {
        self.counts.keys().next_back().copied().unwrap_or(0)
    }

    /// Average guess count, 0.0 when empty
    #[must_use]
    pub fn mean(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let sum: usize = self.counts.iter().map(|(rounds, games)| rounds * games).sum();
        sum as f64 / total as f64
    }

    /// Games that needed exactly `rounds` guesses
    #[must_use]
    pub fn games_with(&self, rounds: usize) -> usize {
        self.counts.get(&rounds).copied().unwrap_or(0)
    }
}

/// Guess counts for every secret of one configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsReport {
    pub n_places: usize,
    pub n_colors: u8,
    pub strategy: String,
    /// Guesses per secret, in code-space order
    pub guesses: Vec<usize>,
}

impl StatsReport {
    /// File name a report is saved under
    #[must_use]
    pub fn file_name(n_places: usize, n_colors: u8, strategy: &str) -> String {
        format!("stats_{n_places}_{n_colors}_{strategy}.json")
    }

    #[must_use]
    pub fn distribution(&self) -> GuessDistribution {
        GuessDistribution::from_rounds(self.guesses.iter().copied())
    }

    /// Write the report as JSON into `dir`
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join(Self::file_name(self.n_places, self.n_colors, &self.strategy));
        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Load a report saved by [`StatsReport::save`]
    ///
    /// # Errors
    /// Returns an error if the file is missing or not a valid report.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse report {}", path.display()))
    }
}

/// Configuration for a batch run
#[derive(Debug, Clone, Copy)]
pub struct StatsConfig {
    pub game: GameConfig,
    pub strategy: StrategyConfig,
    pub max_rounds: usize,
    pub show_progress: bool,
}

impl StatsConfig {
    #[must_use]
    pub const fn new(game: GameConfig, strategy: StrategyConfig) -> Self {
        Self {
            game,
            strategy,
            max_rounds: DEFAULT_MAX_ROUNDS,
            show_progress: false,
        }
    }
}

/// Solve every secret of the code space in parallel
///
/// The opening is computed once, or taken from `opening` if given, and handed
/// to every worker through an in-memory store. Each worker then owns its own
/// strategy instance.
///
/// # Errors
/// Returns an error if any game fails or exceeds the round guard.
pub fn run_stats(config: &StatsConfig, opening: Option<FirstRound>) -> Result<StatsReport> {
    let space = Arc::new(CodeSpace::new(config.game));
    let key = store_key(&config.strategy.label(), config.game);

    let opening = match opening {
        Some(round) => round,
        None => {
            let mut seed = StrategyType::new(config.strategy, Arc::clone(&space));
            seed.new_guess().context("Failed to compute the opening guess")?;
            let entry = seed
                .current_entry()
                .context("Opening guess was not cached")?;
            FirstRound::from(entry)
        }
    };
    let mut shared = MemoryStore::new();
    shared.store(&key, &opening)?;

    info!(
        "Replaying {} secrets with {} (opening {})",
        space.len(),
        config.strategy.label(),
        opening.guess
    );

    let bar = progress_bar(space.len() as u64, config.show_progress)?;
    let guesses = space
        .codes()
        .par_iter()
        .map_init(
            || {
                StrategyType::new(config.strategy, Arc::clone(&space))
                    .with_store(Box::new(shared.clone()))
            },
            |strategy, secret| {
                let rounds = count_guesses(config.game, *secret, config.max_rounds, strategy);
                bar.inc(1);
                rounds
            },
        )
        .collect::<Result<Vec<_>>>()?;
    bar.finish_and_clear();

    let report = StatsReport {
        n_places: config.game.n_places(),
        n_colors: config.game.n_colors(),
        strategy: config.strategy.label(),
        guesses,
    };
    let distribution = report.distribution();
    info!(
        "Mean {:.4} guesses, worst {}",
        distribution.mean(),
        distribution.max()
    );
    Ok(report)
}

fn progress_bar(len: u64, visible: bool) -> Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }
    let style = ProgressStyle::with_template("[{elapsed_precise}] {wide_bar} {pos}/{len} ({eta})")?
        .progress_chars("=> ");
    Ok(ProgressBar::new(len).with_style(style))
}
