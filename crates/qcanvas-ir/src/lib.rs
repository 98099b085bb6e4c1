//! qcanvas canonical circuit representation
//!
//! Every conversion in qcanvas goes through the types in this crate: an
//! importer builds a [`Circuit`], rewrite passes map one `Circuit` to
//! another, and an exporter renders it into the requested form.
//!
//! # Core Components
//!
//! - **Circuit**: [`Circuit`], an ordered list of [`GateApplication`]s over
//!   `num_qubits` indexed qubits, with derived `gate_counts` and `depth`
//! - **Parameters**: [`Parameter`], numeric or symbolic text
//! - **Registry**: [`GateRegistry`], the table that maps canonical gate names
//!   to each [`Representation`] and back
//! - **Notices**: [`Notice`] and [`Converted`], the record of instructions a
//!   conversion dropped or could only guess at
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qcanvas_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::named("bell", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let circuit = circuit.with_fresh_stats();
//! assert_eq!(circuit.depth, Some(2));
//! ```
//!
//! # Example: Registry Lookups
//!
//! ```rust
//! use qcanvas_ir::{GateRegistry, Representation};
//!
//! let registry = GateRegistry::standard();
//! assert_eq!(registry.lookup_canonical(Representation::PennyLane, "Toffoli"), Some("ccx"));
//!
//! let recipe = registry.lookup_recipe("cnot", Representation::Qiskit).unwrap();
//! assert_eq!(recipe.identifier, "CXGate");
//! ```
//!
//! # Standard Gates
//!
//! | Gate | Controls + Targets | Parameters |
//! |------|--------------------|------------|
//! | `id`, `h`, `x`, `y`, `z`, `s`, `sdg`, `t`, `tdg`, `sx` | 0 + 1 | - |
//! | `rx`, `ry`, `rz`, `p` | 0 + 1 | 1 |
//! | `u` | 0 + 1 | 3 |
//! | `cx`, `cy`, `cz`, `ch` | 1 + 1 | - |
//! | `crx`, `cry`, `crz`, `cp` | 1 + 1 | 1 |
//! | `swap` | 0 + 2 | - |
//! | `ccx` | 2 + 1 | - |
//! | `cswap` | 1 + 2 | - |

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod notice;
pub mod parameter;
pub mod qubit;
pub mod registry;

pub use circuit::{Circuit, CircuitMetadata, GateCounts};
pub use dag::DependencyDag;
pub use error::{IrError, IrResult};
pub use gate::GateApplication;
pub use notice::{Converted, Notice, NoticeLog, SkipReason};
pub use parameter::Parameter;
pub use qubit::QubitId;
pub use registry::{
    Arity, ConstructionRecipe, GateEntry, GateRegistry, ParamSpec, Representation, ShapeMismatch,
};
