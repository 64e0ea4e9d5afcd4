//! Feedback calculation for Mastermind guesses
//!
//! Feedback is the pair `(exact, color_only)`: the number of pegs with the
//! right color in the right place, and the number of further pegs with the
//! right color in the wrong place.

use super::Code;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Feedback for one guess against one code
///
/// Ordered by `exact` first, then `color_only`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Feedback {
    exact: u8,
    color_only: u8,
}

impl Feedback {
    /// Create feedback from its two counts
    #[inline]
    #[must_use]
    pub const fn new(exact: u8, color_only: u8) -> Self {
        Self { exact, color_only }
    }

    /// The feedback that confirms a solved game
    #[inline]
    #[must_use]
    pub const fn solved(n_places: usize) -> Self {
        Self::new(n_places as u8, 0)
    }

    /// Number of positions where guess and code agree
    #[inline]
    #[must_use]
    pub const fn exact(self) -> u8 {
        self.exact
    }

    /// Number of additional color matches at different positions
    #[inline]
    #[must_use]
    pub const fn color_only(self) -> u8 {
        self.color_only
    }

    /// Check if this feedback confirms the secret
    #[inline]
    #[must_use]
    pub const fn is_solved(self, n_places: usize) -> bool {
        self.exact as usize == n_places && self.color_only == 0
    }

    /// Dense index of this feedback, in `0..Feedback::slots(n_places)`
    #[inline]
    #[must_use]
    pub const fn index(self, n_places: usize) -> usize {
        self.exact as usize * (n_places + 1) + self.color_only as usize
    }

    /// Size of an array that can be indexed by [`Feedback::index`]
    #[inline]
    #[must_use]
    pub const fn slots(n_places: usize) -> usize {
        (n_places + 1) * (n_places + 1)
    }

    /// Number of feedback values a guess can actually produce
    ///
    /// Every `(exact, color_only)` with `exact + color_only <= n_places`,
    /// except `(n_places - 1, 1)`.
    #[must_use]
    pub const fn distinct_count(n_places: usize) -> usize {
        (n_places + 1) * (n_places + 2) / 2 - 1
    }
}

/// Calculate the feedback when `guess` is played against the secret `code`
///
/// `exact` counts matching positions. The remaining matches come from the
/// per-color multiset overlap: for every color, the smaller of its count in
/// the code and in the guess, summed, minus the exact matches.
///
/// # Examples
/// ```
/// use mastermind_solver::core::{evaluate, Code, Feedback};
///
/// let code = Code::new(&[1, 1, 2, 2]).unwrap();
/// let guess = Code::new(&[1, 2, 1, 1]).unwrap();
/// assert_eq!(evaluate(&code, &guess), Feedback::new(1, 2));
/// ```
#[must_use]
pub fn evaluate(code: &Code, guess: &Code) -> Feedback {
    debug_assert_eq!(code.len(), guess.len(), "codes must have equal length");

    let exact = code
        .symbols()
        .iter()
        .zip(guess.symbols())
        .filter(|(c, g)| c == g)
        .count() as u8;

    let code_counts = code.color_counts();
    let guess_counts = guess.color_counts();
    let overlap: u8 = code_counts
        .iter()
        .zip(&guess_counts)
        .map(|(&c, &g)| c.min(g))
        .sum();

    Feedback::new(exact, overlap - exact)
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.exact, self.color_only)
    }
}

impl FromStr for Feedback {
    type Err = String;

    /// Parse feedback like `2,1` or `(2, 1)`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts: Vec<&str> = inner
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();

        let [exact, color_only] = parts.as_slice() else {
            return Err(format!("Invalid feedback string: {s}"));
        };

        let exact = exact
            .parse()
            .map_err(|_| format!("Invalid feedback string: {s}"))?;
        let color_only = color_only
            .parse()
            .map_err(|_| format!("Invalid feedback string: {s}"))?;

        Ok(Self::new(exact, color_only))
    }
}
