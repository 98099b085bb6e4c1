//! Qiskit adapter for qcanvas
//!
//! Converts between canonical [`Circuit`](qcanvas_ir::Circuit)s and an
//! in-memory model of Qiskit's `QuantumCircuit`.
//!
//! # Conventions
//!
//! - Qubits are addressed as `(register, index)`; import flattens registers
//!   in declaration order, export always uses a single register `q`.
//! - Library gates report a leading control count (`CXGate` has one). Import
//!   takes that prefix verbatim as `controls`.
//! - `gate.control(n)` wrappers are unwrapped on import and produced on export
//!   for gates that are not natively controlled.
//! - `measure`, `reset`, `barrier` and `delay` instructions are dropped on
//!   import with a notice.
//!
//! # Example
//!
//! ```rust
//! use qcanvas_adapter_qiskit::{from_qiskit, to_qiskit};
//! use qcanvas_ir::{Circuit, GateRegistry, QubitId};
//!
//! let registry = GateRegistry::standard();
//!
//! let mut circuit = Circuit::named("bell", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let qc = to_qiskit(&circuit, &registry).into_value();
//! assert_eq!(qc.count_ops().get("cx"), Some(&1));
//!
//! let back = from_qiskit(&qc, &registry).unwrap().into_value();
//! assert_eq!(back.gates, circuit.gates);
//! assert_eq!(back.name(), Some("Converted Qiskit Circuit (bell)"));
//! ```

pub mod circuit;
mod error;
mod export;
mod import;

pub use circuit::{
    CircuitInstruction, ControlledGate, Gate, Instruction, Operation, QuantumCircuit,
    QuantumRegister, Qubit,
};
pub use error::{QiskitError, QiskitResult};
pub use export::to_qiskit;
pub use import::{Recognition, from_qiskit, imported_name, recognize};
