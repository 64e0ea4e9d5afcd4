//! Mastermind code representation
//!
//! A Code stores a fixed-length sequence of color symbols. Secrets and guesses
//! share this representation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of places a code can have
pub const MAX_PLACES: usize = 10;

/// Maximum number of colors (symbols are `1..=MAX_COLORS`)
pub const MAX_COLORS: u8 = 16;

/// A Mastermind code: an ordered sequence of color symbols
///
/// Stores symbols inline so the type stays `Copy`. Unused trailing slots are
/// always zero, which keeps the derived ordering lexicographic over the used
/// symbols for codes of equal length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "Vec<u8>", try_from = "Vec<u8>")]
pub struct Code {
    symbols: [u8; MAX_PLACES],
    len: u8,
}

/// Error type for invalid codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    /// Code has no symbols or more than `MAX_PLACES`
    InvalidLength(usize),
    /// Code length does not match the game configuration
    WrongLength { expected: usize, found: usize },
    /// A symbol is zero or above the allowed number of colors
    ColorOutOfRange { color: u8, n_colors: u8 },
    /// Input text could not be read as a list of colors
    InvalidSymbol(String),
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => {
                write!(f, "Code must have between 1 and {MAX_PLACES} places, got {len}")
            }
            Self::WrongLength { expected, found } => {
                write!(f, "The guess must be of length {expected}, got {found}")
            }
            Self::ColorOutOfRange { color, n_colors } => {
                write!(f, "Each color must be between 1 and {n_colors}, got {color}")
            }
            Self::InvalidSymbol(text) => write!(f, "Not a color: '{text}'"),
        }
    }
}

impl std::error::Error for CodeError {}

impl Code {
    /// Create a new Code from a slice of symbols
    ///
    /// Symbols must be in `1..=MAX_COLORS`; range checks against a specific
    /// game happen in [`GameConfig::validate_code`](super::GameConfig::validate_code).
    ///
    /// # Errors
    /// Returns `CodeError` if:
    /// - The slice is empty or longer than `MAX_PLACES`
    /// - A symbol is zero or greater than `MAX_COLORS`
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::core::Code;
    ///
    /// let code = Code::new(&[1, 1, 2, 2]).unwrap();
    /// assert_eq!(code.len(), 4);
    /// assert_eq!(code.symbols(), &[1, 1, 2, 2]);
    ///
    /// assert!(Code::new(&[]).is_err());
    /// assert!(Code::new(&[0, 1]).is_err());
    /// ```
    pub fn new(symbols: &[u8]) -> Result<Self, CodeError> {
        if symbols.is_empty() || symbols.len() > MAX_PLACES {
            return Err(CodeError::InvalidLength(symbols.len()));
        }

        if let Some(&color) = symbols.iter().find(|&&s| s == 0 || s > MAX_COLORS) {
            return Err(CodeError::ColorOutOfRange {
                color,
                n_colors: MAX_COLORS,
            });
        }

        Ok(Self::from_valid(symbols))
    }

    /// Build a code from symbols already known to be in range
    pub(crate) fn from_valid(symbols: &[u8]) -> Self {
        debug_assert!(!symbols.is_empty() && symbols.len() <= MAX_PLACES);
        let mut buf = [0u8; MAX_PLACES];
        buf[..symbols.len()].copy_from_slice(symbols);
        Self {
            symbols: buf,
            len: symbols.len() as u8,
        }
    }

    /// Get the symbols of this code
    #[inline]
    #[must_use]
    pub fn symbols(&self) -> &[u8] {
        &self.symbols[..self.len as usize]
    }

    /// Number of places in this code
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false: a valid code has at least one place
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Count how often each color appears
    ///
    /// Index `c` holds the count of color `c`; index 0 is unused.
    #[inline]
    pub(crate) fn color_counts(&self) -> [u8; MAX_COLORS as usize + 1] {
        let mut counts = [0u8; MAX_COLORS as usize + 1];
        for &symbol in self.symbols() {
            counts[symbol as usize] += 1;
        }
        counts
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, symbol) in self.symbols().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{symbol}")?;
        }
        write!(f, ")")
    }
}

impl FromStr for Code {
    type Err = CodeError;

    /// Parse colors separated by commas and/or whitespace, optionally in parentheses
    ///
    /// Accepts `1,1,2,2`, `(1, 1, 2, 2)` and `1 1 2 2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s.trim().trim_start_matches('(').trim_end_matches(')');

        let symbols = inner
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<u8>()
                    .map_err(|_| CodeError::InvalidSymbol(part.to_string()))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        Self::new(&symbols)
    }
}

impl From<Code> for Vec<u8> {
    fn from(code: Code) -> Self {
        code.symbols().to_vec()
    }
}

impl TryFrom<Vec<u8>> for Code {
    type Error = CodeError;

    fn try_from(symbols: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(&symbols)
    }
}
