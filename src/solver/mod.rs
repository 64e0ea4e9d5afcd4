//! Solving algorithms
//!
//! Partitioning, minimax scoring, the candidate-set cache and the three
//! guess selection strategies built on them.

mod cache;
mod deepening;
mod knuth;
mod lookahead;
pub mod minimax;
mod partition;
mod state;
mod strategy;

pub use cache::{CacheEntry, CandidateKey, SearchCache};
pub use deepening::DeepeningStrategy;
pub use knuth::KnuthStrategy;
pub use lookahead::LookaheadStrategy;
pub use partition::{Partition, partition};
pub use state::GameState;
pub use strategy::{
    DEFAULT_CEILING, DEFAULT_SEARCH_DEPTH, Strategy, StrategyConfig, StrategyKind, StrategyType,
};
