//! Game configuration and code space enumeration

use super::{Code, CodeError, MAX_COLORS, MAX_PLACES, SolverError};

/// Largest code space that will be enumerated
pub const MAX_CODES: usize = 1 << 24;

/// Colors and places of one game
///
/// Fixed for the lifetime of a strategy instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameConfig {
    n_colors: u8,
    n_places: usize,
}

impl GameConfig {
    /// Create a validated configuration
    ///
    /// # Errors
    /// Returns `SolverError::InvalidConfiguration` if:
    /// - `n_colors` is 0 or above `MAX_COLORS`
    /// - `n_places` is 0 or above `MAX_PLACES`
    /// - `n_colors^n_places` exceeds `MAX_CODES`
    pub fn new(n_colors: u8, n_places: usize) -> Result<Self, SolverError> {
        let invalid = |reason| SolverError::InvalidConfiguration {
            n_colors,
            n_places,
            reason,
        };

        if n_colors < 1 {
            return Err(invalid("at least one color is required"));
        }
        if n_places < 1 {
            return Err(invalid("at least one place is required"));
        }
        if n_colors > MAX_COLORS {
            return Err(invalid("too many colors"));
        }
        if n_places > MAX_PLACES {
            return Err(invalid("too many places"));
        }

        let size = (n_colors as usize).checked_pow(n_places as u32);
        if size.is_none_or(|s| s > MAX_CODES) {
            return Err(invalid("code space too large"));
        }

        Ok(Self { n_colors, n_places })
    }

    /// Number of colors
    #[inline]
    #[must_use]
    pub const fn n_colors(&self) -> u8 {
        self.n_colors
    }

    /// Number of places per code
    #[inline]
    #[must_use]
    pub const fn n_places(&self) -> usize {
        self.n_places
    }

    /// Number of codes in the code space (`n_colors^n_places`)
    #[must_use]
    pub fn code_count(&self) -> usize {
        (self.n_colors as usize).pow(self.n_places as u32)
    }

    /// Check that a code fits this game
    ///
    /// # Errors
    /// Returns `CodeError` if the length differs from `n_places` or a color is
    /// outside `1..=n_colors`.
    pub fn validate_code(&self, code: &Code) -> Result<(), CodeError> {
        if code.len() != self.n_places {
            return Err(CodeError::WrongLength {
                expected: self.n_places,
                found: code.len(),
            });
        }

        match code.symbols().iter().find(|&&s| s > self.n_colors) {
            Some(&color) => Err(CodeError::ColorOutOfRange {
                color,
                n_colors: self.n_colors,
            }),
            None => Ok(()),
        }
    }

    /// Parse and validate a code typed by a user
    ///
    /// # Errors
    /// Returns `CodeError` if the text is not a list of colors or the code
    /// does not fit this game.
    pub fn parse_code(&self, text: &str) -> Result<Code, CodeError> {
        let code: Code = text.parse()?;
        self.validate_code(&code)?;
        Ok(code)
    }
}

impl Default for GameConfig {
    /// The classic game: 6 colors, 4 places
    fn default() -> Self {
        Self {
            n_colors: 6,
            n_places: 4,
        }
    }
}

/// Enumerate every code for the given colors and places
///
/// Codes come in lexicographic order with the first place varying slowest,
/// so `(1, 1, 1, 1)` is first and `(n, n, n, n)` last.
///
/// # Errors
/// Returns `SolverError::InvalidConfiguration` for an invalid color or place count.
///
/// # Examples
/// ```
/// use mastermind_solver::core::all_codes;
///
/// let codes = all_codes(2, 2).unwrap();
/// let text: Vec<String> = codes.iter().map(ToString::to_string).collect();
/// assert_eq!(text, ["(1, 1)", "(1, 2)", "(2, 1)", "(2, 2)"]);
/// ```
pub fn all_codes(n_colors: u8, n_places: usize) -> Result<Vec<Code>, SolverError> {
    let config = GameConfig::new(n_colors, n_places)?;
    Ok(enumerate(config))
}

fn enumerate(config: GameConfig) -> Vec<Code> {
    let n_places = config.n_places();
    let mut codes = Vec::with_capacity(config.code_count());
    let mut symbols = vec![1u8; n_places];

    loop {
        codes.push(Code::from_valid(&symbols));

        // Odometer increment, last place fastest
        let mut place = n_places;
        loop {
            if place == 0 {
                return codes;
            }
            place -= 1;
            if symbols[place] < config.n_colors() {
                symbols[place] += 1;
                break;
            }
            symbols[place] = 1;
        }
    }
}

/// Every code of one configuration, computed once and shared read-only
#[derive(Debug, Clone)]
pub struct CodeSpace {
    config: GameConfig,
    codes: Vec<Code>,
}

impl CodeSpace {
    /// Enumerate the code space of a configuration
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            codes: enumerate(config),
            config,
        }
    }

    /// The configuration this space was built for
    #[inline]
    #[must_use]
    pub const fn config(&self) -> GameConfig {
        self.config
    }

    /// All codes in enumeration order
    #[inline]
    #[must_use]
    pub fn codes(&self) -> &[Code] {
        &self.codes
    }

    /// Number of codes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Always false: a valid configuration has at least one code
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Number of places per code
    #[inline]
    #[must_use]
    pub const fn n_places(&self) -> usize {
        self.config.n_places()
    }
}
