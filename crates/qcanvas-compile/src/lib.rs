//! Rewrite passes for qcanvas circuits
//!
//! A pass takes a [`Circuit`](qcanvas_ir::Circuit) and returns a new one.
//! Passes are registered by name in a [`PassRegistry`] and run in sequence by
//! a [`PassManager`].
//!
//! # Built-in Passes
//!
//! | Name | Effect |
//! |------|--------|
//! | `remove_self_inverse_pairs` | Drops adjacent identical `h`/`x`/`y`/`z` pairs on one qubit |
//!
//! # Unknown Names
//!
//! A [`PassPolicy`] decides what an unknown name does. `Lenient` (the default)
//! logs a warning and skips it; `Strict` rejects the pipeline.
//!
//! # Example
//!
//! ```rust
//! use qcanvas_compile::{PassManager, PassPolicy, PassRegistry};
//! use qcanvas_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::new(1);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.h(QubitId(0)).unwrap();
//! circuit.x(QubitId(0)).unwrap();
//!
//! let pm = PassManager::from_names(
//!     &["remove_self_inverse_pairs"],
//!     &PassRegistry::standard(),
//!     PassPolicy::Lenient,
//! )
//! .unwrap();
//!
//! let out = pm.run(&circuit).unwrap();
//! assert_eq!(out.gates.len(), 1);
//! assert!(out.stats_are_stale());
//! ```
//!
//! # Custom Passes
//!
//! ```rust
//! use qcanvas_compile::{CompileResult, Pass};
//! use qcanvas_ir::Circuit;
//!
//! struct DropAll;
//!
//! impl Pass for DropAll {
//!     fn name(&self) -> &str { "drop_all" }
//!
//!     fn run(&self, circuit: &Circuit) -> CompileResult<Circuit> {
//!         Ok(circuit.with_gates(vec![]))
//!     }
//! }
//! ```

pub mod error;
pub mod manager;
pub mod pass;
pub mod passes;
pub mod registry;

pub use error::{CompileError, CompileResult};
pub use manager::{PassManager, PassPolicy, apply_passes};
pub use pass::Pass;
pub use passes::{RemoveSelfInversePairs, SELF_INVERSE_GATES};
pub use registry::PassRegistry;
