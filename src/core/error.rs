//! Errors raised by the guess-selection engine

use super::Feedback;
use std::fmt;

/// Error type for the solver core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// Malformed color count or code length
    InvalidConfiguration {
        n_colors: u8,
        n_places: usize,
        reason: &'static str,
    },
    /// A partition or search was asked to work on no candidates
    EmptyCandidateSet,
    /// Feedback that the last guess cannot have produced
    UnknownFeedback(Feedback),
    /// Iterative deepening passed its depth ceiling without a solution
    SearchExhausted { ceiling: usize },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration {
                n_colors,
                n_places,
                reason,
            } => write!(
                f,
                "Invalid configuration ({n_colors} colors, {n_places} places): {reason}"
            ),
            Self::EmptyCandidateSet => write!(f, "No candidate codes remain"),
            Self::UnknownFeedback(feedback) => {
                write!(f, "Feedback {feedback} is impossible for the last guess")
            }
            Self::SearchExhausted { ceiling } => {
                write!(f, "Search found no solution within depth {ceiling}")
            }
        }
    }
}

impl std::error::Error for SolverError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = SolverError::UnknownFeedback(Feedback::new(3, 1));
        assert_eq!(
            err.to_string(),
            "Feedback (3, 1) is impossible for the last guess"
        );

        let err = SolverError::SearchExhausted { ceiling: 100 };
        assert!(err.to_string().contains("100"));

        let err = SolverError::InvalidConfiguration {
            n_colors: 0,
            n_places: 4,
            reason: "at least one color is required",
        };
        assert!(err.to_string().contains("0 colors"));
    }
}
