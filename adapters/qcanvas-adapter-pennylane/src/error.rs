//! Error types for the PennyLane adapter.

use thiserror::Error;

/// Result type for PennyLane operations.
pub type PennyLaneResult<T> = Result<T, PennyLaneError>;

/// Errors that can occur when building or reading a PennyLane tape.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PennyLaneError {
    /// A wire label appears twice in the tape's wire list, or twice in one operation.
    #[error("Duplicate wire {0}")]
    DuplicateWire(String),

    /// An operation uses a wire the tape does not declare.
    #[error("Wire {0} is not on the tape")]
    WireNotFound(String),

    /// More wires than a circuit can index.
    #[error("Tape declares more than {} wires", u32::MAX)]
    TooManyWires,

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
