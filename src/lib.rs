//! Mastermind Solver
//!
//! A Mastermind solver built on worst-case minimax: Knuth's greedy strategy,
//! a bounded-depth lookahead and an iterative-deepening exhaustive search.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use mastermind_solver::core::{Code, CodeSpace, GameConfig, evaluate};
//! use mastermind_solver::solver::{KnuthStrategy, Strategy};
//!
//! let space = Arc::new(CodeSpace::new(GameConfig::default()));
//! let mut solver = KnuthStrategy::new(space);
//! let secret = Code::new(&[3, 6, 2, 5]).unwrap();
//!
//! loop {
//!     let guess = solver.new_guess().unwrap();
//!     let response = evaluate(&secret, &guess);
//!     solver.feedback(response).unwrap();
//!     if response.is_solved(4) {
//!         break;
//!     }
//! }
//! ```

// Core domain types
pub mod core;

// Solving algorithms
pub mod solver;

// First-round persistence
pub mod store;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
