//! Error types for the IR crate.

use crate::qubit::QubitId;
use crate::registry::ShapeMismatch;
use thiserror::Error;

/// Errors raised when a circuit violates one of its structural invariants.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index outside `[0, num_qubits)`.
    #[error("Qubit {qubit} is out of range for a {num_qubits}-qubit circuit{}", format_gate_context(.gate_name))]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Width of the circuit.
        num_qubits: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// A gate application has no target qubits.
    #[error("Gate '{0}' has no target qubits")]
    EmptyTargets(String),

    /// The same qubit appears both as a control and as a target.
    #[error("Qubit {qubit} is both control and target{}", format_gate_context(.gate_name))]
    OverlappingControlTarget {
        /// The shared qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Duplicate qubit in the operand list.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// A numeric parameter is NaN or infinite.
    #[error("Gate '{gate_name}' has a non-finite parameter at position {position}")]
    NonFiniteParameter {
        /// Name of the gate.
        gate_name: String,
        /// Index into the parameter list.
        position: usize,
    },

    /// The gate does not have the shape its registry entry declares.
    #[error("Gate '{gate_name}': {mismatch}")]
    Shape {
        /// Name of the gate.
        gate_name: String,
        /// What did not match.
        mismatch: ShapeMismatch,
    },
}

#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
