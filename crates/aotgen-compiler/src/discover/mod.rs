//! Pipeline inputs: candidate schema classes and well-known symbols.

mod candidates;
mod known_symbols;

#[cfg(test)]
mod candidates_tests;
#[cfg(test)]
mod known_symbols_tests;

pub use candidates::{CandidateClass, MARKER_ATTRIBUTES, candidate_classes, is_candidate};
pub use known_symbols::KnownSymbols;
