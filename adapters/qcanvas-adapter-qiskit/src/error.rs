//! Error types for the Qiskit adapter.

use thiserror::Error;

/// Result type for Qiskit operations.
pub type QiskitResult<T> = Result<T, QiskitError>;

/// Errors that can occur when building or reading a Qiskit circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QiskitError {
    /// Two quantum registers share a name.
    #[error("Duplicate quantum register '{0}'")]
    DuplicateRegister(String),

    /// Register sizes add up to more qubits than a circuit can index.
    #[error("Quantum registers exceed {} qubits", u32::MAX)]
    TooManyQubits,

    /// An operation was applied to the wrong number of qubits.
    #[error("Operation '{operation}' acts on {expected} qubits, got {got}")]
    QubitCount {
        /// Printable form of the operation.
        operation: String,
        /// Qubits the operation declares.
        expected: usize,
        /// Qubits supplied.
        got: usize,
    },

    /// A qubit index is outside the circuit.
    #[error("Qubit index {index} out of range for circuit with {num_qubits} qubits")]
    QubitOutOfRange { index: u32, num_qubits: u32 },

    /// The same qubit appears twice in one application.
    #[error("Duplicate qubit argument {0}")]
    DuplicateQubit(u32),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
