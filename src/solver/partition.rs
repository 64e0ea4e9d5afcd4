//! Response sheets
//!
//! A partition groups a candidate set by the feedback each candidate would
//! give against one guess.

use crate::core::{Code, Feedback, SolverError, evaluate};
use std::collections::BTreeMap;

/// Candidates bucketed by the feedback they produce against a guess
///
/// Buckets are non-empty, disjoint, and keep the input order of the
/// candidates they hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    buckets: BTreeMap<Feedback, Vec<Code>>,
}

impl Partition {
    /// The partition of a single known code guessed against itself
    #[must_use]
    pub fn solved(code: Code) -> Self {
        let mut buckets = BTreeMap::new();
        buckets.insert(Feedback::solved(code.len()), vec![code]);
        Self { buckets }
    }

    /// Rebuild a partition from stored buckets
    ///
    /// Empty buckets are dropped; buckets sharing a feedback are merged.
    #[must_use]
    pub fn from_buckets(buckets: impl IntoIterator<Item = (Feedback, Vec<Code>)>) -> Self {
        let mut map: BTreeMap<Feedback, Vec<Code>> = BTreeMap::new();
        for (feedback, codes) in buckets {
            if !codes.is_empty() {
                map.entry(feedback).or_default().extend(codes);
            }
        }
        Self { buckets: map }
    }

    /// Candidates that would produce `feedback`
    #[must_use]
    pub fn get(&self, feedback: &Feedback) -> Option<&[Code]> {
        self.buckets.get(feedback).map(Vec::as_slice)
    }

    /// Number of buckets
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// True if no buckets exist
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of candidates across all buckets
    #[must_use]
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Size of the largest bucket (worst-case remaining candidates)
    #[must_use]
    pub fn largest_bucket(&self) -> usize {
        self.buckets.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Iterate buckets in feedback order
    pub fn iter(&self) -> impl Iterator<Item = (&Feedback, &[Code])> {
        self.buckets
            .iter()
            .map(|(feedback, codes)| (feedback, codes.as_slice()))
    }
}

/// Bucket `candidates` by the feedback each would give against `guess`
///
/// # Errors
/// Returns `SolverError::EmptyCandidateSet` if `candidates` is empty.
///
/// # Examples
/// ```
/// use mastermind_solver::core::{all_codes, Code, Feedback};
/// use mastermind_solver::solver::partition;
///
/// let codes = all_codes(2, 2).unwrap();
/// let guess = Code::new(&[1, 2]).unwrap();
/// let sheet = partition(&codes, &guess).unwrap();
///
/// assert_eq!(sheet.total(), 4);
/// assert_eq!(sheet.get(&Feedback::new(0, 2)).unwrap().len(), 1); // (2, 1)
/// ```
pub fn partition(candidates: &[Code], guess: &Code) -> Result<Partition, SolverError> {
    if candidates.is_empty() {
        return Err(SolverError::EmptyCandidateSet);
    }

    let mut buckets: BTreeMap<Feedback, Vec<Code>> = BTreeMap::new();
    for code in candidates {
        buckets
            .entry(evaluate(code, guess))
            .or_default()
            .push(*code);
    }

    Ok(Partition { buckets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::all_codes;

    fn code(symbols: &[u8]) -> Code {
        Code::new(symbols).unwrap()
    }

    #[test]
    fn buckets_cover_candidates_exactly() {
        let codes = all_codes(4, 3).unwrap();
        for guess in [code(&[1, 1, 1]), code(&[1, 2, 3]), code(&[4, 4, 2])] {
            let sheet = partition(&codes, &guess).unwrap();
            assert_eq!(sheet.total(), codes.len());

            let mut seen: Vec<Code> = sheet.iter().flat_map(|(_, b)| b.iter().copied()).collect();
            seen.sort();
            assert_eq!(seen, codes);
        }
    }

    #[test]
    fn buckets_match_their_feedback() {
        let codes = all_codes(3, 3).unwrap();
        let guess = code(&[1, 2, 2]);
        let sheet = partition(&codes, &guess).unwrap();

        for (feedback, bucket) in sheet.iter() {
            assert!(!bucket.is_empty());
            assert!(bucket.iter().all(|c| evaluate(c, &guess) == *feedback));
        }
    }

    #[test]
    fn buckets_preserve_input_order() {
        let codes = all_codes(3, 2).unwrap();
        let mut reversed = codes.clone();
        reversed.reverse();
        let guess = code(&[1, 1]);

        let forward = partition(&codes, &guess).unwrap();
        let backward = partition(&reversed, &guess).unwrap();

        for ((_, a), (_, b)) in forward.iter().zip(backward.iter()) {
            let mut b = b.to_vec();
            b.reverse();
            assert_eq!(a, b.as_slice());
        }
    }

    #[test]
    fn empty_candidates_fail() {
        assert_eq!(
            partition(&[], &code(&[1, 2])),
            Err(SolverError::EmptyCandidateSet)
        );
    }

    #[test]
    fn solved_partition() {
        let c = code(&[2, 3, 1]);
        let sheet = Partition::solved(c);
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.get(&Feedback::new(3, 0)), Some([c].as_slice()));
    }

    #[test]
    fn largest_bucket_classic_opening() {
        // Knuth's opening 1122 leaves at most 256 codes
        let codes = all_codes(6, 4).unwrap();
        let sheet = partition(&codes, &code(&[1, 1, 2, 2])).unwrap();
        assert_eq!(sheet.largest_bucket(), 256);
    }

    #[test]
    fn from_buckets_merges_and_drops_empty() {
        let a = code(&[1, 1]);
        let b = code(&[2, 2]);
        let sheet = Partition::from_buckets([
            (Feedback::new(0, 0), vec![a]),
            (Feedback::new(0, 0), vec![b]),
            (Feedback::new(1, 0), vec![]),
        ]);
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.get(&Feedback::new(0, 0)), Some([a, b].as_slice()));
    }
}
