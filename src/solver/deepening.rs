//! Iterative-deepening exhaustive search
//!
//! Looks for a guess whose whole strategy tree isolates the secret within a
//! depth bound, raising the bound one round at a time. Successes are cached
//! with the depth they proved and failures with the budget they failed at,
//! so a deeper attempt never repeats work the shallower ones already did.

use super::strategy::{OpeningStore, Strategy, next_guess};
use super::{CacheEntry, CandidateKey, GameState, partition};
use crate::core::{Code, CodeSpace, Feedback, SolverError};
use crate::store::FirstRoundStore;
use log::{debug, info};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Exhaustive search for the shallowest guaranteed strategy
#[derive(Debug)]
pub struct DeepeningStrategy {
    state: GameState,
    opening: OpeningStore,
    search: Deepening,
    claimed_depth: Option<usize>,
}

#[derive(Debug)]
struct Deepening {
    ceiling: usize,
    /// Largest budget each candidate set is known to fail at
    failures: FxHashMap<CandidateKey, usize>,
}

impl Deepening {
    /// Rounds needed to isolate one code of `codes`, if at most `budget`
    ///
    /// Every resolved set is cached in `state` with its guess, partition and
    /// proven depth.
    fn resolve(
        &mut self,
        state: &mut GameState,
        codes: &[Code],
        budget: usize,
    ) -> Result<Option<usize>, SolverError> {
        if let [only] = codes {
            state.cache_mut().insert(codes, CacheEntry::solved(*only));
            return Ok(Some(0));
        }
        if budget == 0 {
            return Ok(None);
        }

        if let Some(depth) = state.cache_mut().get(codes).and_then(|entry| entry.depth)
            && depth <= budget
        {
            return Ok(Some(depth));
        }

        let key = CandidateKey::new(codes);
        if self.failures.get(&key).is_some_and(|&failed| failed >= budget) {
            return Ok(None);
        }

        // Each guess splits a set into at most `outcomes` buckets
        let outcomes = Feedback::distinct_count(state.n_places());
        let budget_exp = u32::try_from(budget).unwrap_or(u32::MAX);
        if outcomes
            .checked_pow(budget_exp)
            .is_some_and(|reachable| codes.len() > reachable)
        {
            self.failures.insert(key, budget);
            return Ok(None);
        }

        let space = Arc::clone(state.space());
        'guesses: for guess in space.codes() {
            let sheet = partition(codes, guess)?;
            if sheet.len() == 1 {
                continue;
            }

            let mut deepest = 0;
            for (_, bucket) in sheet.iter() {
                match self.resolve(state, bucket, budget - 1)? {
                    Some(depth) => deepest = deepest.max(depth),
                    None => continue 'guesses,
                }
            }

            let depth = deepest + 1;
            state.cache_mut().insert(
                codes,
                CacheEntry {
                    guess: *guess,
                    partition: sheet,
                    depth: Some(depth),
                },
            );
            return Ok(Some(depth));
        }

        self.failures.insert(key, budget);
        Ok(None)
    }

    /// Raise the bound until the current candidates resolve
    fn choose(&mut self, state: &mut GameState) -> Result<CacheEntry, SolverError> {
        let candidates = state.candidates().to_vec();

        for bound in 1..=self.ceiling {
            debug!("Deepening {} candidates to bound {bound}", candidates.len());
            if let Some(depth) = self.resolve(state, &candidates, bound)? {
                info!(
                    "{} candidates resolve within {depth} rounds ({} cached sets)",
                    candidates.len(),
                    state.cache().len()
                );
                return state
                    .cache()
                    .peek(&candidates)
                    .cloned()
                    .ok_or(SolverError::EmptyCandidateSet);
            }
        }

        Err(SolverError::SearchExhausted {
            ceiling: self.ceiling,
        })
    }
}

impl DeepeningStrategy {
    /// Create a strategy that gives up once the bound passes `ceiling`
    #[must_use]
    pub fn new(space: Arc<CodeSpace>, ceiling: usize) -> Self {
        Self {
            opening: OpeningStore::new("deepening", &space),
            state: GameState::new(space),
            search: Deepening {
                ceiling,
                failures: FxHashMap::default(),
            },
            claimed_depth: None,
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
    pub const fn ceiling(&self) -> usize {
        self.search.ceiling
    }

    /// Rounds the last guess is guaranteed to need to isolate the secret,
    /// counting that guess
    #[must_use]
    pub const fn claimed_depth(&self) -> Option<usize> {
        self.claimed_depth
    }
}

impl Strategy for DeepeningStrategy {
    fn new_guess(&mut self) -> Result<Code, SolverError> {
        let search = &mut self.search;
        let guess = next_guess(&mut self.state, &mut self.opening, |state| search.choose(state))?;
        self.claimed_depth = self
            .state
            .cache()
            .peek(self.state.candidates())
            .and_then(|entry| entry.depth);
        Ok(guess)
    }

    fn feedback(&mut self, response: Feedback) -> Result<(), SolverError> {
        self.state.apply_feedback(response)
    }

    fn candidates(&self) -> &[Code] {
        self.state.candidates()
    }

    fn name(&self) -> &'static str {
        "deepening"
    }

    fn reset(&mut self) {
        self.state.reset();
    }
}
