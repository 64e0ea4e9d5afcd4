//! Guess selection strategies
//!
//! Defines the Strategy trait, the runtime-selectable `StrategyType` wrapper,
//! and the round flow shared by every concrete strategy.

use super::{CacheEntry, DeepeningStrategy, GameState, KnuthStrategy, LookaheadStrategy};
use crate::core::{Code, CodeSpace, Feedback, SolverError};
use crate::store::{FirstRound, FirstRoundStore, store_key};
use log::{debug, info, warn};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Default number of plies scored by the lookahead strategy
pub const DEFAULT_SEARCH_DEPTH: usize = 2;

/// Default depth bound at which exhaustive search gives up
pub const DEFAULT_CEILING: usize = 100;

/// A guess selection policy playing one game at a time
pub trait Strategy {
    /// Produce the next guess for the current candidates
    ///
    /// # Errors
    /// Returns `SolverError::EmptyCandidateSet` if no candidates remain, or
    /// `SolverError::SearchExhausted` if an exhaustive search hits its ceiling.
    fn new_guess(&mut self) -> Result<Code, SolverError>;

    /// Narrow the candidates with the feedback for the last guess
    ///
    /// # Errors
    /// Returns `SolverError::UnknownFeedback` if the feedback cannot have
    /// come from the last guess.
    fn feedback(&mut self, response: Feedback) -> Result<(), SolverError>;

    /// Codes still consistent with all feedback so far
    fn candidates(&self) -> &[Code];

    /// Stable identifier used in store keys and reports
    fn name(&self) -> &'static str;

    /// Abandon the current game; cached search results are kept
    fn reset(&mut self);
}

/// Names of the available strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrategyKind {
    /// One-ply worst-case elimination
    #[default]
    Knuth,
    /// Bounded-depth minimax
    Lookahead,
    /// Iterative-deepening exhaustive search
    Deepening,
}

impl StrategyKind {
    pub const ALL: [Self; 3] = [Self::Knuth, Self::Lookahead, Self::Deepening];

    /// Parse a strategy name
    ///
    /// Supported names: "knuth" (or "minimax"), "lookahead", "deepening" (or
    /// "exhaustive").
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "knuth" | "minimax" => Some(Self::Knuth),
            "lookahead" => Some(Self::Lookahead),
            "deepening" | "exhaustive" => Some(Self::Deepening),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Knuth => "knuth",
            Self::Lookahead => "lookahead",
            Self::Deepening => "deepening",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            format!("Unknown strategy '{s}' (expected knuth, lookahead or deepening)")
        })
    }
}

/// Strategy choice plus its tuning parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyConfig {
    pub kind: StrategyKind,
    /// Plies scored by the lookahead strategy
    pub search_depth: usize,
    /// Depth bound at which exhaustive search gives up
    pub ceiling: usize,
}

impl StrategyConfig {
    #[must_use]
    pub const fn new(kind: StrategyKind) -> Self {
        Self {
            kind,
            search_depth: DEFAULT_SEARCH_DEPTH,
            ceiling: DEFAULT_CEILING,
        }
    }

    /// Label combining the strategy name and the parameter that changes its
    /// choices, used for store keys and report file names
    #[must_use]
    pub fn label(&self) -> String {
        match self.kind {
            StrategyKind::Lookahead => format!("lookahead{}", self.search_depth.max(1)),
            kind => kind.name().to_string(),
        }
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self::new(StrategyKind::default())
    }
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
#[derive(Debug)]
pub enum StrategyType {
    Knuth(KnuthStrategy),
    Lookahead(LookaheadStrategy),
    Deepening(DeepeningStrategy),
}

impl StrategyType {
    /// Build the configured strategy over a code space
    #[must_use]
    pub fn new(config: StrategyConfig, space: Arc<CodeSpace>) -> Self {
        match config.kind {
            StrategyKind::Knuth => Self::Knuth(KnuthStrategy::new(space)),
            StrategyKind::Lookahead => {
                Self::Lookahead(LookaheadStrategy::new(space, config.search_depth))
            }
            StrategyKind::Deepening => {
                Self::Deepening(DeepeningStrategy::new(space, config.ceiling))
            }
        }
    }

    /// Create a strategy with default tuning from its name
    ///
    /// Returns `None` if the name is not recognized.
    #[must_use]
    pub fn from_name(name: &str, space: Arc<CodeSpace>) -> Option<Self> {
        StrategyKind::from_name(name).map(|kind| Self::new(StrategyConfig::new(kind), space))
    }

    /// Attach a first-round store
    #[must_use]
    pub fn with_store(self, store: Box<dyn FirstRoundStore>) -> Self {
        match self {
            Self::Knuth(s) => Self::Knuth(s.with_store(store)),
            Self::Lookahead(s) => Self::Lookahead(s.with_store(store)),
            Self::Deepening(s) => Self::Deepening(s.with_store(store)),
        }
    }

    /// Shared game state of the wrapped strategy
    #[must_use]
    pub fn state(&self) -> &GameState {
        match self {
            Self::Knuth(s) => s.state(),
            Self::Lookahead(s) => s.state(),
            Self::Deepening(s) => s.state(),
        }
    }

    /// Partition of the current candidates by the guess last chosen for them
    #[must_use]
    pub fn current_entry(&self) -> Option<&CacheEntry> {
        let state = self.state();
        state.cache().peek(state.candidates())
    }
}

impl Strategy for StrategyType {
    fn new_guess(&mut self) -> Result<Code, SolverError> {
        match self {
            Self::Knuth(s) => s.new_guess(),
            Self::Lookahead(s) => s.new_guess(),
            Self::Deepening(s) => s.new_guess(),
        }
    }

    fn feedback(&mut self, response: Feedback) -> Result<(), SolverError> {
        match self {
            Self::Knuth(s) => s.feedback(response),
            Self::Lookahead(s) => s.feedback(response),
            Self::Deepening(s) => s.feedback(response),
        }
    }

    fn candidates(&self) -> &[Code] {
        match self {
            Self::Knuth(s) => s.candidates(),
            Self::Lookahead(s) => s.candidates(),
            Self::Deepening(s) => s.candidates(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Knuth(s) => s.name(),
            Self::Lookahead(s) => s.name(),
            Self::Deepening(s) => s.name(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Knuth(s) => s.reset(),
            Self::Lookahead(s) => s.reset(),
            Self::Deepening(s) => s.reset(),
        }
    }
}

/// Optional first-round store bound to one strategy's key
pub(crate) struct OpeningStore {
    store: Option<Box<dyn FirstRoundStore>>,
    key: String,
}

impl OpeningStore {
    pub(crate) fn new(label: &str, space: &CodeSpace) -> Self {
        Self {
            store: None,
            key: store_key(label, space.config()),
        }
    }

    pub(crate) fn attach(&mut self, store: Box<dyn FirstRoundStore>) {
        self.store = Some(store);
    }

    /// Stored opening for this space, if present and consistent with it
    fn load(&self, space: &CodeSpace) -> Option<CacheEntry> {
        let store = self.store.as_ref()?;
        match store.load(&self.key) {
            Ok(Some(round)) if round.fits(space) => {
                info!("Loaded first round '{}' from store", self.key);
                Some(round.into())
            }
            Ok(Some(_)) => {
                warn!(
                    "Ignoring stored first round '{}': it does not cover the code space",
                    self.key
                );
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to load first round '{}': {e}", self.key);
                None
            }
        }
    }

    fn save(&mut self, entry: &CacheEntry) {
        if let Some(store) = self.store.as_mut()
            && let Err(e) = store.store(&self.key, &FirstRound::from(entry))
        {
            warn!("Failed to store first round '{}': {e}", self.key);
        }
    }
}

impl fmt::Debug for OpeningStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpeningStore")
            .field("key", &self.key)
            .field("attached", &self.store.is_some())
            .finish()
    }
}

/// Round flow shared by every strategy
///
/// Answers from the cache, then the single-candidate shortcut, then the
/// first-round store; only when all miss does it run `search`, whose result
/// is cached and, in the first round, written back to the store.
pub(crate) fn next_guess(
    state: &mut GameState,
    opening: &mut OpeningStore,
    search: impl FnOnce(&mut GameState) -> Result<CacheEntry, SolverError>,
) -> Result<Code, SolverError> {
    if let Some(guess) = state.cached_guess()? {
        debug!("Cache hit for {} candidates: {guess}", state.candidates().len());
        return Ok(guess);
    }

    if let Some(guess) = state.remember_solved() {
        return Ok(guess);
    }

    let first_round = state.is_first_round();
    if first_round && let Some(entry) = opening.load(state.space()) {
        return Ok(state.remember(entry));
    }

    let entry = search(state)?;
    debug!(
        "Chose {} for {} candidates (largest bucket {})",
        entry.guess,
        state.candidates().len(),
        entry.partition.largest_bucket()
    );

    if first_round {
        opening.save(&entry);
    }
    Ok(state.remember(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::store::{FileStore, MemoryStore};

    fn space(n_colors: u8, n_places: usize) -> Arc<CodeSpace> {
        Arc::new(CodeSpace::new(GameConfig::new(n_colors, n_places).unwrap()))
    }

    #[test]
    fn kind_from_name() {
        assert_eq!(StrategyKind::from_name("knuth"), Some(StrategyKind::Knuth));
        assert_eq!(StrategyKind::from_name("Minimax"), Some(StrategyKind::Knuth));
        assert_eq!(
            StrategyKind::from_name("lookahead"),
            Some(StrategyKind::Lookahead)
        );
        assert_eq!(
            StrategyKind::from_name("exhaustive"),
            Some(StrategyKind::Deepening)
        );
        assert_eq!(StrategyKind::from_name("genetic"), None);
        assert!("random".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.to_string().parse::<StrategyKind>(), Ok(kind));
        }
    }

    #[test]
    fn labels_include_tuning() {
        let mut config = StrategyConfig::new(StrategyKind::Lookahead);
        config.search_depth = 3;
        assert_eq!(config.label(), "lookahead3");
        assert_eq!(StrategyConfig::default().label(), "knuth");
    }

    #[test]
    fn strategy_type_from_name() {
        let strategy = StrategyType::from_name("lookahead", space(3, 2)).unwrap();
        assert!(matches!(strategy, StrategyType::Lookahead(_)));
        assert_eq!(strategy.name(), "lookahead");
        assert!(StrategyType::from_name("nope", space(3, 2)).is_none());
    }

    #[test]
    fn strategy_type_delegates() {
        for kind in StrategyKind::ALL {
            let mut strategy = StrategyType::new(StrategyConfig::new(kind), space(3, 2));
            assert_eq!(strategy.candidates().len(), 9);

            let guess = strategy.new_guess().unwrap();
            let entry = strategy.current_entry().unwrap();
            assert_eq!(entry.guess, guess);
            assert_eq!(entry.partition.total(), 9);
        }
    }

    #[test]
    fn first_round_is_written_to_store_and_reused() {
        let dir = tempfile::TempDir::new().unwrap();
        let space = space(3, 3);

        let mut first = StrategyType::new(StrategyConfig::default(), Arc::clone(&space))
            .with_store(Box::new(FileStore::new(dir.path())));
        let guess = first.new_guess().unwrap();
        assert!(dir.path().join("knuth_3_3.json").exists());

        let mut second = StrategyType::new(StrategyConfig::default(), space)
            .with_store(Box::new(FileStore::new(dir.path())));
        assert_eq!(second.new_guess().unwrap(), guess);
        assert_eq!(second.current_entry(), first.current_entry());
    }

    #[test]
    fn mismatched_stored_round_is_ignored() {
        let small = space(2, 2);
        let mut donor = KnuthStrategy::new(Arc::clone(&small));
        donor.new_guess().unwrap();
        let entry = donor.state().cache().peek(donor.candidates()).unwrap();

        // A round for a 2x2 game stored under the key of a 3x2 game
        let big = space(3, 2);
        let mut store = MemoryStore::new();
        store
            .store(&store_key("knuth", big.config()), &FirstRound::from(entry))
            .unwrap();

        let mut strategy = KnuthStrategy::new(Arc::clone(&big)).with_store(Box::new(store));
        let guess = strategy.new_guess().unwrap();
        let fresh = KnuthStrategy::new(big).new_guess().unwrap();
        assert_eq!(guess, fresh);
    }
}
