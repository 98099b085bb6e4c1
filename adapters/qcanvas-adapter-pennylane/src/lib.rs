//! PennyLane adapter for qcanvas
//!
//! Converts between canonical [`Circuit`](qcanvas_ir::Circuit)s and an
//! in-memory model of a PennyLane tape, and generates standalone PennyLane
//! Python scripts.
//!
//! # Conventions
//!
//! - Wires may be integers or strings; import numbers them by position in
//!   the tape's wire list, export always uses wires `0..n`.
//! - Operations carry no control count. Natively controlled operations
//!   (`CNOT`, `CRX`, `Toffoli`) are split by registry arity on import.
//! - `qml.ctrl` wrappers are unwrapped on import and produced on export for
//!   gates that are not natively controlled.
//! - `Barrier`, `Snapshot` and `MidMeasureMP` are dropped on import with a
//!   notice.
//!
//! # Example
//!
//! ```rust
//! use qcanvas_adapter_pennylane::{from_pennylane, to_pennylane, to_script};
//! use qcanvas_ir::{Circuit, GateRegistry, QubitId};
//!
//! let registry = GateRegistry::standard();
//!
//! let mut circuit = Circuit::new(2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let tape = to_pennylane(&circuit, &registry).into_value();
//! assert_eq!(tape.operations[1].to_string(), "CNOT(wires=[0, 1])");
//!
//! let back = from_pennylane(&tape, &registry).unwrap().into_value();
//! assert_eq!(back.gates, circuit.gates);
//!
//! let script = to_script(&circuit, &registry).into_value();
//! assert!(script.contains("    qml.CNOT(wires=[0, 1])"));
//! ```

pub mod tape;
mod error;
mod export;
mod import;
mod script;

pub use error::{PennyLaneError, PennyLaneResult};
pub use export::to_pennylane;
pub use import::{NON_UNITARY, from_pennylane, imported_name};
pub use script::{python_float, render_parameter, to_script};
pub use tape::{Ctrl, Op, PlOperation, QuantumTape, Wire};
