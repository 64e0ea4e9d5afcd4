//! Core domain types
//!
//! Codes, feedback, the code space, and the error taxonomy of the engine.

mod code;
mod error;
mod feedback;
mod space;

pub use code::{Code, CodeError, MAX_COLORS, MAX_PLACES};
pub use error::SolverError;
pub use feedback::{Feedback, evaluate};
pub use space::{CodeSpace, GameConfig, MAX_CODES, all_codes};
