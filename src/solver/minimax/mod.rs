//! Minimax scoring
//!
//! Worst-case elimination counts used to rank guesses.

mod calculator;

pub use calculator::{distinct_feedbacks, max_remaining, score, select_best_guess};
