//! Model family recommendations.
//!
//! The catalog is static; the engine filters it by task and dataset traits,
//! scores each candidate and keeps the best few together with a baseline
//! training recipe.

mod catalog;
mod engine;

pub use catalog::ModelFamily;
pub use engine::ModelSuggestionEngine;
