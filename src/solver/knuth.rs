//! Greedy worst-case strategy
//!
//! Scores every code of the space against the remaining candidates and plays
//! the first one that eliminates the most candidates in the worst case.

use super::minimax::select_best_guess;
use super::strategy::{OpeningStore, Strategy, next_guess};
use super::{CacheEntry, GameState, partition};
use crate::core::{Code, CodeSpace, Feedback, SolverError};
use crate::store::FirstRoundStore;
use log::info;
use std::sync::Arc;

/// Knuth's one-ply minimax strategy
#[derive(Debug)]
pub struct KnuthStrategy {
    state: GameState,
    opening: OpeningStore,
}

impl KnuthStrategy {
    #[must_use]
    pub fn new(space: Arc<CodeSpace>) -> Self {
        Self {
            opening: OpeningStore::new("knuth", &space),
            state: GameState::new(space),
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
}

/// Best guess over the whole code space for the current candidates
fn search(state: &mut GameState) -> Result<CacheEntry, SolverError> {
    let candidates = state.candidates();
    let (guess, eliminated) = select_best_guess(state.space().codes(), candidates, state.n_places())
        .ok_or(SolverError::EmptyCandidateSet)?;

    if state.is_first_round() {
        info!("Opening {guess} eliminates at least {eliminated} codes");
    }
    Ok(CacheEntry::new(*guess, partition(candidates, guess)?))
}

impl Strategy for KnuthStrategy {
    fn new_guess(&mut self) -> Result<Code, SolverError> {
        next_guess(&mut self.state, &mut self.opening, search)
    }

    fn feedback(&mut self, response: Feedback) -> Result<(), SolverError> {
        self.state.apply_feedback(response)
    }

    fn candidates(&self) -> &[Code] {
        self.state.candidates()
    }

    fn name(&self) -> &'static str {
        "knuth"
    }

    fn reset(&mut self) {
        self.state.reset();
    }
}
