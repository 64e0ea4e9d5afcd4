//! Game state shared by every strategy
//!
//! Holds the code space, the current candidate set and the memoization cache.
//! Strategies own one `GameState` each and decide only which guess to play.

use super::{CacheEntry, SearchCache};
use crate::core::{Code, CodeSpace, Feedback, SolverError};
use log::debug;
use std::sync::Arc;

/// Candidate set and cache of one strategy instance
#[derive(Debug, Clone)]
pub struct GameState {
    space: Arc<CodeSpace>,
    candidates: Vec<Code>,
    cache: SearchCache,
}

impl GameState {
    /// Start a game with every code still possible
    #[must_use]
    pub fn new(space: Arc<CodeSpace>) -> Self {
        Self {
            candidates: space.codes().to_vec(),
            space,
            cache: SearchCache::new(),
        }
    }

    /// The shared code space
    #[must_use]
    pub fn space(&self) -> &Arc<CodeSpace> {
        &self.space
    }

    /// Codes still consistent with all feedback so far
    #[must_use]
    pub fn candidates(&self) -> &[Code] {
        &self.candidates
    }

    /// Number of places per code
    #[must_use]
    pub fn n_places(&self) -> usize {
        self.space.n_places()
    }

    /// True before any feedback has narrowed the candidates
    #[must_use]
    pub fn is_first_round(&self) -> bool {
        self.candidates.len() == self.space.len()
    }

    #[must_use]
    pub const fn cache(&self) -> &SearchCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut SearchCache {
        &mut self.cache
    }

    /// Cached guess for the current candidates
    ///
    /// # Errors
    /// Returns `SolverError::EmptyCandidateSet` if no candidates remain.
    pub fn cached_guess(&mut self) -> Result<Option<Code>, SolverError> {
        if self.candidates.is_empty() {
            return Err(SolverError::EmptyCandidateSet);
        }
        Ok(self.cache.get(&self.candidates).map(|entry| entry.guess))
    }

    /// Record the guess chosen for the current candidates
    pub fn remember(&mut self, entry: CacheEntry) -> Code {
        let guess = entry.guess;
        self.cache.insert(&self.candidates, entry);
        guess
    }

    /// Cache and return the only remaining candidate
    pub fn remember_solved(&mut self) -> Option<Code> {
        match self.candidates.as_slice() {
            [only] => {
                let only = *only;
                Some(self.remember(CacheEntry::solved(only)))
            }
            _ => None,
        }
    }

    /// Narrow the candidates with the feedback for the last guess
    ///
    /// The solved response resets the candidates to the full code space so
    /// the instance can play another game with its cache intact.
    ///
    /// # Errors
    /// Returns `SolverError::UnknownFeedback` if no guess was chosen for the
    /// current candidates or its partition has no bucket for `response`.
    pub fn apply_feedback(&mut self, response: Feedback) -> Result<(), SolverError> {
        if response.is_solved(self.n_places()) {
            debug!("Solved, resetting to {} codes", self.space.len());
            self.reset();
            return Ok(());
        }

        let bucket = self
            .cache
            .peek(&self.candidates)
            .and_then(|entry| entry.partition.get(&response))
            .ok_or(SolverError::UnknownFeedback(response))?
            .to_vec();

        debug!(
            "Feedback {response}: {} -> {} candidates",
            self.candidates.len(),
            bucket.len()
        );
        self.candidates = bucket;
        Ok(())
    }

    /// Start over with every code possible, keeping the cache
    pub fn reset(&mut self) {
        self.candidates = self.space.codes().to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::solver::partition;

    fn state(n_colors: u8, n_places: usize) -> GameState {
        let config = GameConfig::new(n_colors, n_places).unwrap();
        GameState::new(Arc::new(CodeSpace::new(config)))
    }

    #[test]
    fn starts_with_full_space() {
        let state = state(3, 2);
        assert_eq!(state.candidates().len(), 9);
        assert!(state.is_first_round());
    }

    #[test]
    fn feedback_selects_bucket() {
        let mut state = state(3, 2);
        let guess = Code::new(&[1, 2]).unwrap();
        let sheet = partition(state.candidates(), &guess).unwrap();
        state.remember(CacheEntry::new(guess, sheet.clone()));

        let response = Feedback::new(0, 2);
        state.apply_feedback(response).unwrap();

        assert_eq!(state.candidates(), sheet.get(&response).unwrap());
        assert!(!state.is_first_round());
    }

    #[test]
    fn impossible_feedback_is_rejected() {
        let mut state = state(3, 2);
        let guess = Code::new(&[1, 1]).unwrap();
        let sheet = partition(state.candidates(), &guess).unwrap();
        state.remember(CacheEntry::new(guess, sheet));

        // (1, 1) cannot happen against (1, 1)
        let response = Feedback::new(1, 1);
        assert_eq!(
            state.apply_feedback(response),
            Err(SolverError::UnknownFeedback(response))
        );
        assert_eq!(state.candidates().len(), 9);
    }

    #[test]
    fn feedback_without_guess_is_rejected() {
        let mut state = state(2, 2);
        assert!(matches!(
            state.apply_feedback(Feedback::new(0, 0)),
            Err(SolverError::UnknownFeedback(_))
        ));
    }

    #[test]
    fn solved_feedback_resets() {
        let mut state = state(3, 2);
        let guess = Code::new(&[1, 2]).unwrap();
        let sheet = partition(state.candidates(), &guess).unwrap();
        state.remember(CacheEntry::new(guess, sheet));
        state.apply_feedback(Feedback::new(0, 0)).unwrap();
        assert!(!state.is_first_round());

        state.apply_feedback(Feedback::solved(2)).unwrap();
        assert!(state.is_first_round());
        assert_eq!(state.cache().len(), 1);
    }

    #[test]
    fn remember_solved_only_for_single_candidate() {
        let mut state = state(2, 1);
        assert!(state.remember_solved().is_none());

        let guess = Code::new(&[1]).unwrap();
        let sheet = partition(state.candidates(), &guess).unwrap();
        state.remember(CacheEntry::new(guess, sheet));
        state.apply_feedback(Feedback::new(0, 0)).unwrap();

        assert_eq!(state.remember_solved(), Code::new(&[2]).ok());
        assert_eq!(state.cached_guess().unwrap(), Code::new(&[2]).ok());
    }
}
