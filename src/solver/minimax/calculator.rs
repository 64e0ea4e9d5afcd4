//! Worst-case elimination scoring
//!
//! Given a guess and a set of candidates, computes how many candidates the
//! guess is guaranteed to eliminate whatever the feedback.

use crate::core::{Code, MAX_PLACES, evaluate};
use crate::solver::Partition;

const MAX_SLOTS: usize = (MAX_PLACES + 1) * (MAX_PLACES + 1);

/// Score of a guess from its partition
///
/// Candidates eliminated in the worst case: the candidate count minus the
/// largest bucket. Higher is better.
///
/// # Examples
/// ```
/// use mastermind_solver::core::{all_codes, Code};
/// use mastermind_solver::solver::{minimax::score, partition};
///
/// let codes = all_codes(6, 4).unwrap();
/// let sheet = partition(&codes, &Code::new(&[1, 1, 2, 2]).unwrap()).unwrap();
/// assert_eq!(score(&codes, &sheet), 1296 - 256);
/// ```
#[must_use]
pub fn score(candidates: &[Code], partition: &Partition) -> usize {
    candidates.len() - partition.largest_bucket()
}

/// Largest bucket a guess would leave, without building the buckets
///
/// Counts candidates per feedback in a fixed array. Returns 0 for no
/// candidates.
#[must_use]
pub fn max_remaining(guess: &Code, candidates: &[Code], n_places: usize) -> usize {
    let counts = group_by_feedback(guess, candidates, n_places);
    counts.iter().copied().max().unwrap_or(0)
}

/// Count candidates per feedback index
fn group_by_feedback(guess: &Code, candidates: &[Code], n_places: usize) -> [usize; MAX_SLOTS] {
    let mut counts = [0usize; MAX_SLOTS];

    for candidate in candidates {
        let feedback = evaluate(candidate, guess);
        counts[feedback.index(n_places)] += 1;
    }

    counts
}

/// Number of distinct feedbacks a guess would produce
#[must_use]
pub fn distinct_feedbacks(guess: &Code, candidates: &[Code], n_places: usize) -> usize {
    group_by_feedback(guess, candidates, n_places)
        .iter()
        .filter(|&&count| count > 0)
        .count()
}

/// Select the guess that eliminates the most candidates in the worst case
///
/// Scans `guess_pool` in order and keeps the first guess reaching the best
/// score, so the result is deterministic for a fixed pool order.
///
/// Returns the best guess and its score, or `None` if the pool is empty.
#[must_use]
pub fn select_best_guess<'a>(
    guess_pool: &'a [Code],
    candidates: &[Code],
    n_places: usize,
) -> Option<(&'a Code, usize)> {
    let mut best: Option<(&Code, usize)> = None;

    for guess in guess_pool {
        let eliminated = candidates.len() - max_remaining(guess, candidates, n_places);
        if best.is_none_or(|(_, s)| eliminated > s) {
            best = Some((guess, eliminated));
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::all_codes;
    use crate::solver::partition;

    fn code(symbols: &[u8]) -> Code {
        Code::new(symbols).unwrap()
    }

    #[test]
    fn max_remaining_matches_partition() {
        let codes = all_codes(4, 3).unwrap();
        for guess in &codes {
            let sheet = partition(&codes, guess).unwrap();
            assert_eq!(max_remaining(guess, &codes, 3), sheet.largest_bucket());
            assert_eq!(distinct_feedbacks(guess, &codes, 3), sheet.len());
        }
    }

    #[test]
    fn max_remaining_empty_candidates() {
        assert_eq!(max_remaining(&code(&[1, 2]), &[], 2), 0);
    }

    #[test]
    fn max_remaining_perfect_split() {
        let candidates = [code(&[1, 1]), code(&[2, 2])];
        assert_eq!(max_remaining(&code(&[1, 1]), &candidates, 2), 1);
    }

    #[test]
    fn classic_opening_is_1122() {
        let codes = all_codes(6, 4).unwrap();
        let (best, eliminated) = select_best_guess(&codes, &codes, 4).unwrap();
        assert_eq!(best.symbols(), &[1, 1, 2, 2]);
        assert_eq!(eliminated, 1296 - 256);
    }

    #[test]
    fn ties_go_to_first_guess() {
        // Every guess scores 0 against one candidate; the first one wins
        let pool = [code(&[2, 2]), code(&[1, 1])];
        let candidates = [code(&[1, 2])];
        let (best, eliminated) = select_best_guess(&pool, &candidates, 2).unwrap();
        assert_eq!(*best, pool[0]);
        assert_eq!(eliminated, 0);
    }

    #[test]
    fn returns_none_on_empty_pool() {
        assert!(select_best_guess(&[], &[code(&[1])], 1).is_none());
    }

    #[test]
    fn score_from_partition() {
        let codes = all_codes(3, 2).unwrap();
        let sheet = partition(&codes, &code(&[1, 2])).unwrap();
        assert_eq!(score(&codes, &sheet), codes.len() - sheet.largest_bucket());
    }
}
