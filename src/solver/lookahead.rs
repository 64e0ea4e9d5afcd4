//! Bounded-depth minimax
//!
//! Scores a guess by the worst number of candidates left after a fixed
//! number of further optimal plies, rather than after one ply.

use super::strategy::{OpeningStore, Strategy, next_guess};
use super::{CacheEntry, CandidateKey, GameState, Partition, partition};
use crate::core::{Code, CodeSpace, Feedback, SolverError};
use crate::store::FirstRoundStore;
use log::debug;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Minimax strategy looking `search_depth` plies ahead
///
/// With a depth of 1 it plays exactly like [`super::KnuthStrategy`].
#[derive(Debug)]
pub struct LookaheadStrategy {
    state: GameState,
    opening: OpeningStore,
    search: Lookahead,
}

/// Recursive worst-case values, memoized by candidate content and level
#[derive(Debug)]
struct Lookahead {
    search_depth: usize,
    memo: FxHashMap<(CandidateKey, usize), usize>,
}

impl Lookahead {
    /// Guaranteed remaining candidates for `codes` at `level`
    ///
    /// At the floor, or for a set of at most one code, that is the set size;
    /// otherwise the best guess's worst bucket value one level down.
    fn value(
        &mut self,
        space: &CodeSpace,
        codes: &[Code],
        level: usize,
    ) -> Result<usize, SolverError> {
        if level >= self.search_depth || codes.len() <= 1 {
            return Ok(codes.len());
        }

        let key = (CandidateKey::new(codes), level);
        if let Some(&value) = self.memo.get(&key) {
            return Ok(value);
        }

        let mut best = codes.len();
        for guess in space.codes() {
            let sheet = partition(codes, guess)?;
            if sheet.len() == 1 {
                continue;
            }
            if let Some(worst) = self.worst_bucket(space, &sheet, level + 1, best)? {
                best = worst;
            }
        }

        self.memo.insert(key, best);
        Ok(best)
    }

    /// Largest bucket value of a partition, or `None` once it reaches `bound`
    fn worst_bucket(
        &mut self,
        space: &CodeSpace,
        sheet: &Partition,
        level: usize,
        bound: usize,
    ) -> Result<Option<usize>, SolverError> {
        let mut worst = 0;
        for (_, bucket) in sheet.iter() {
            worst = worst.max(self.value(space, bucket, level)?);
            if worst >= bound {
                return Ok(None);
            }
        }
        Ok(Some(worst))
    }

    /// First guess of the space minimizing the worst bucket value
    fn choose(&mut self, state: &GameState) -> Result<CacheEntry, SolverError> {
        let space = state.space();
        let candidates = state.candidates();

        let mut best: Option<(usize, CacheEntry)> = None;
        for guess in space.codes() {
            let sheet = partition(candidates, guess)?;
            // A guess that cannot split the set would be replayed forever
            if sheet.len() == 1 && candidates.len() > 1 {
                continue;
            }
            let bound = best.as_ref().map_or(usize::MAX, |(value, _)| *value);
            if let Some(worst) = self.worst_bucket(space, &sheet, 1, bound)? {
                best = Some((worst, CacheEntry::new(*guess, sheet)));
            }
        }

        let (value, entry) = best.ok_or(SolverError::EmptyCandidateSet)?;
        debug!(
            "Lookahead {}: {} leaves at most {value} of {} (memo {})",
            self.search_depth,
            entry.guess,
            candidates.len(),
            self.memo.len()
        );
        Ok(entry)
    }
}

impl LookaheadStrategy {
    /// Create a strategy scoring `search_depth` plies; a depth of 0 counts as 1
    #[must_use]
    pub fn new(space: Arc<CodeSpace>, search_depth: usize) -> Self {
        let search_depth = search_depth.max(1);
        Self {
            opening: OpeningStore::new(&format!("lookahead{search_depth}"), &space),
            state: GameState::new(space),
            search: Lookahead {
                search_depth,
                memo: FxHashMap::default(),
            },
        }
    }

    /// Attach a store for the first-round result
    #[must_use]
    pub fn with_store(mut self, store: Box<dyn FirstRoundStore>) -> Self {
        self.opening.attach(store);
        self
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub const fn search_depth(&self) -> usize {
        self.search.search_depth
    }
}

impl Strategy for LookaheadStrategy {
    fn new_guess(&mut self) -> Result<Code, SolverError> {
        let search = &mut self.search;
        next_guess(&mut self.state, &mut self.opening, |state| search.choose(state))
    }

    fn feedback(&mut self, response: Feedback) -> Result<(), SolverError> {
        self.state.apply_feedback(response)
    }

    fn candidates(&self) -> &[Code] {
        self.state.candidates()
    }

    fn name(&self) -> &'static str {
        "lookahead"
    }

    fn reset(&mut self) {
        self.state.reset();
    }
}
