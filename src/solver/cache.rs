//! Memoization of search results by candidate-set content
//!
//! Keys are the sorted candidate codes, so two candidate sets with the same
//! members share an entry no matter how they were reached or ordered.

use super::Partition;
use crate::core::Code;
use rustc_hash::FxHashMap;
use std::borrow::Borrow;

/// Canonical, order-independent key for a candidate set
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateKey(Box<[Code]>);

impl CandidateKey {
    /// Build the key for a candidate set
    #[must_use]
    pub fn new(candidates: &[Code]) -> Self {
        let mut codes = candidates.to_vec();
        if !codes.is_sorted() {
            codes.sort_unstable();
        }
        Self(codes.into_boxed_slice())
    }

    /// The sorted codes of this key
    #[must_use]
    pub fn codes(&self) -> &[Code] {
        &self.0
    }
}

impl Borrow<[Code]> for CandidateKey {
    fn borrow(&self) -> &[Code] {
        &self.0
    }
}

/// A previously chosen guess for one candidate set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The chosen guess
    pub guess: Code,
    /// Candidates bucketed by their feedback against `guess`
    pub partition: Partition,
    /// Rounds needed to isolate the secret, when proven by exhaustive search
    pub depth: Option<usize>,
}

impl CacheEntry {
    /// Entry for a greedy or lookahead choice
    #[must_use]
    pub const fn new(guess: Code, partition: Partition) -> Self {
        Self {
            guess,
            partition,
            depth: None,
        }
    }

    /// Entry for a single remaining candidate
    #[must_use]
    pub fn solved(code: Code) -> Self {
        Self {
            guess: code,
            partition: Partition::solved(code),
            depth: Some(0),
        }
    }
}

/// Map from candidate-set content to the guess chosen for it
#[derive(Debug, Default, Clone)]
pub struct SearchCache {
    entries: FxHashMap<CandidateKey, CacheEntry>,
    hits: usize,
    misses: usize,
}

impl SearchCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the entry for a candidate set
    pub fn get(&mut self, candidates: &[Code]) -> Option<&CacheEntry> {
        let found = if candidates.is_sorted() {
            self.entries.get(candidates)
        } else {
            self.entries.get(&CandidateKey::new(candidates))
        };

        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    /// Look up without touching the hit counters
    #[must_use]
    pub fn peek(&self, candidates: &[Code]) -> Option<&CacheEntry> {
        if candidates.is_sorted() {
            self.entries.get(candidates)
        } else {
            self.entries.get(&CandidateKey::new(candidates))
        }
    }

    /// Store the entry for a candidate set, replacing any earlier one
    pub fn insert(&mut self, candidates: &[Code], entry: CacheEntry) {
        self.entries.insert(CandidateKey::new(candidates), entry);
    }

    /// Number of cached candidate sets
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups that found an entry
    #[must_use]
    pub const fn hits(&self) -> usize {
        self.hits
    }

    /// Lookups that found nothing
    #[must_use]
    pub const fn misses(&self) -> usize {
        self.misses
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
