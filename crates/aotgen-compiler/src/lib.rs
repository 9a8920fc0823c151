//! Ahead-of-time schema generation for GraphQL.NET.
//!
//! This crate turns C# sources into generated schema wiring:
//! - `parser` - lexer, CST, and AST for the declaration subset of C#
//! - `semantic` - symbol table, built-in reference library, binder
//! - `discover` - candidate schema classes and well-known symbols
//! - `transform` - attribute lowering, member scanning, graph walking, primitive model projection
//! - `model` - value-equatable generation records
//! - `codegen` - C# text generators
//! - `driver` - end-to-end pipeline with output caching
//! - `diagnostics` - error reporting

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod codegen;
pub mod diagnostics;
pub mod discover;
pub mod driver;
pub mod model;
pub mod parser;
pub mod semantic;
pub mod source_map;
pub mod transform;

mod cancellation;
pub mod config;

#[cfg(test)]
mod driver_tests;
#[cfg(test)]
mod source_map_tests;
#[cfg(test)]
pub mod test_utils;

/// Result type for passes that produce both output and diagnostics.
///
/// Each pass returns its typed output alongside any diagnostics it collected.
/// Fatal errors (like fuel exhaustion or cancellation) use the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

pub use cancellation::CancellationToken;
pub use config::GeneratorConfig;
pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity, Span};
pub use driver::{GeneratedSource, GeneratorDriver, RunResult};
pub use semantic::{Compilation, CompilationBuilder, MetadataReferences};
pub use source_map::{SourceId, SourceKind, SourceMap};

/// Errors that abort a generation pass.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    /// The caller cancelled the pass.
    #[error("generation cancelled")]
    Cancelled,

    #[error("source analysis failed with {} errors", .0.error_count())]
    AnalysisError(Diagnostics),

    /// An internal consistency check failed.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, Error>;
