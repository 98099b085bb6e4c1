//! Error types for pass execution.

use thiserror::Error;

/// Errors raised while building or running a pass pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// A pass name was not found in the registry under the strict policy.
    #[error("Unknown pass '{name}' (available: {available})")]
    UnknownPass { name: String, available: String },

    /// A pass failed on the given circuit.
    #[error("Pass '{pass}' failed: {message}")]
    PassFailed { pass: String, message: String },
}

/// Result type for pass operations.
pub type CompileResult<T> = Result<T, CompileError>;
